//! Authorization state derived from security schemes
//!
//! A request editor needs to know which kind of credentials a scheme asks for
//! and, for OAuth 2.0, which grant types, endpoints and scopes apply.

use crate::error::{AmfError, Result};
use crate::types::{ApiOAuth2Flow, ApiSecurityScheme, ApiSecuritySettingsUnion};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "name")]
pub enum AuthorizationKind {
    OAuth2,
    OAuth1,
    Basic,
    Digest,
    PassThrough,
    ApiKey,
    /// OAS `http` scheme (bearer and friends)
    Http,
    OpenIdConnect,
    /// RAML `x-...` custom scheme
    Custom(String),
    Unsupported(String),
}

impl AuthorizationKind {
    /// Kind for an AMF security scheme type name.
    pub fn from_scheme_type(scheme_type: &str) -> Self {
        match scheme_type {
            "OAuth 2.0" => Self::OAuth2,
            "OAuth 1.0" => Self::OAuth1,
            "Basic Authentication" => Self::Basic,
            "Digest Authentication" => Self::Digest,
            "Pass Through" => Self::PassThrough,
            "Api Key" => Self::ApiKey,
            "http" => Self::Http,
            "openIdConnect" => Self::OpenIdConnect,
            other if other.starts_with("x-") => Self::Custom(other.to_string()),
            other => Self::Unsupported(other.to_string()),
        }
    }

    pub fn of_scheme(scheme: &ApiSecurityScheme) -> Option<Self> {
        scheme.scheme_type.as_deref().map(Self::from_scheme_type)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    pub fn label(&self) -> &str {
        match self {
            Self::OAuth2 => "OAuth 2.0",
            Self::OAuth1 => "OAuth 1.0",
            Self::Basic => "Basic authentication",
            Self::Digest => "Digest authentication",
            Self::PassThrough => "Pass through",
            Self::ApiKey => "API key",
            Self::Http => "HTTP",
            Self::OpenIdConnect => "OpenID Connect",
            Self::Custom(name) | Self::Unsupported(name) => name,
        }
    }
}

/// OAuth 2.0 grant type for an OAS flow name; RAML grant names pass through.
pub fn grant_type_for_flow(flow: &str) -> &str {
    match flow {
        "authorizationCode" => "authorization_code",
        "clientCredentials" => "client_credentials",
        other => other,
    }
}

/// Scopes and endpoints of one OAuth 2.0 flow
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuth2Authorization {
    pub grant_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grant_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_uri: Option<String>,
    pub scopes: Vec<String>,
}

impl OAuth2Authorization {
    /// Authorization state for an OAuth 2.0 scheme, using its first flow.
    ///
    /// Fails with [`AmfError::MalformedInput`] when the scheme carries no
    /// OAuth 2.0 settings or the settings list no flow.
    pub fn from_scheme(scheme: &ApiSecurityScheme) -> Result<Self> {
        let Some(ApiSecuritySettingsUnion::OAuth2(settings)) = &scheme.settings else {
            return Err(AmfError::MalformedInput(format!(
                "security scheme {} has no OAuth 2.0 settings",
                scheme.id
            )));
        };
        let Some(primary) = settings.flows.first() else {
            return Err(AmfError::MalformedInput(format!(
                "OAuth 2.0 settings of {} define no flows",
                scheme.id
            )));
        };

        let grant_types = if settings.authorization_grants.is_empty() {
            settings
                .flows
                .iter()
                .filter_map(|flow| flow.flow.as_deref())
                .map(|flow| grant_type_for_flow(flow).to_string())
                .collect()
        } else {
            settings.authorization_grants.clone()
        };

        Ok(Self::from_flow(primary, grant_types))
    }

    fn from_flow(flow: &ApiOAuth2Flow, grant_types: Vec<String>) -> Self {
        let grant_type = flow
            .flow
            .as_deref()
            .map(|name| grant_type_for_flow(name).to_string())
            .or_else(|| grant_types.first().cloned());
        Self {
            grant_type,
            grant_types,
            authorization_uri: flow.authorization_uri.clone(),
            access_token_uri: flow.access_token_uri.clone(),
            refresh_uri: flow.refresh_uri.clone(),
            scopes: flow
                .scopes
                .iter()
                .filter_map(|scope| scope.name.clone())
                .collect(),
        }
    }

    /// Whether the user has to visit the authorization endpoint.
    pub fn needs_authorization_uri(&self) -> bool {
        matches!(
            self.grant_type.as_deref(),
            Some("implicit" | "authorization_code")
        )
    }
}
