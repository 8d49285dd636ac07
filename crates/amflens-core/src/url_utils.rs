use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use url::{Url, form_urlencoded};

static TEMPLATE_VARIABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\+?)([^{}+]+)\}").expect("valid template regex"));

/// Normalize a URL to its origin (scheme + host + optional port).
///
/// Falls back to trimming trailing slashes if the input cannot be parsed.
pub fn normalize_origin(input: &str) -> String {
    match Url::parse(input) {
        Ok(parsed) => parsed
            .origin()
            .ascii_serialization()
            .trim_end_matches('/')
            .to_string(),
        Err(_) => input.trim_end_matches('/').to_string(),
    }
}

/// Inputs for [`compute_endpoint_uri`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EndpointUriOptions<'a> {
    /// URL of the server selected by the server cascade
    pub server_url: Option<&'a str>,
    /// User override; wins over `server_url`
    pub base_uri: Option<&'a str>,
    pub path: &'a str,
    /// Substituted for `{version}` in the base URI
    pub version: Option<&'a str>,
    /// API protocols, the first one is used when the base URI has no scheme
    pub protocols: &'a [String],
}

/// Full URL of an endpoint.
pub fn compute_endpoint_uri(options: &EndpointUriOptions<'_>) -> String {
    let mut base = options
        .base_uri
        .filter(|uri| !uri.is_empty())
        .or(options.server_url)
        .unwrap_or_default()
        .to_string();

    if let Some(version) = options.version {
        base = base.replace("{version}", version);
    }

    if !base.is_empty() && !base.contains("://") {
        let protocol = options
            .protocols
            .first()
            .map(|p| p.to_ascii_lowercase())
            .unwrap_or_else(|| "http".to_string());
        base = format!("{protocol}://{base}");
    }

    join_path(&base, options.path)
}

fn join_path(base: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');
    let base = base.trim_end_matches('/');
    if path.is_empty() {
        return if base.is_empty() { "/".to_string() } else { base.to_string() };
    }
    format!("{base}/{path}")
}

fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Replace `{name}` and `{+name}` templates with values from `variables`.
///
/// Reserved (`{+name}`) expansion never encodes; templates without a value
/// are left as they are.
pub fn apply_url_variables(url: &str, variables: &BTreeMap<String, String>, encode: bool) -> String {
    TEMPLATE_VARIABLE
        .replace_all(url, |caps: &Captures<'_>| {
            let reserved = !caps[1].is_empty();
            match variables.get(&caps[2]) {
                Some(value) if encode && !reserved => encode_component(value),
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Append query parameters; a parameter with several values repeats its key.
pub fn apply_url_parameters(url: &str, parameters: &[(String, Vec<String>)], encode: bool) -> String {
    let pairs: Vec<String> = parameters
        .iter()
        .filter(|(name, _)| !name.is_empty())
        .flat_map(|(name, values)| values.iter().map(move |value| (name, value)))
        .map(|(name, value)| {
            if encode {
                form_urlencoded::Serializer::new(String::new())
                    .append_pair(name, value)
                    .finish()
            } else {
                format!("{name}={value}")
            }
        })
        .collect();

    if pairs.is_empty() {
        return url.to_string();
    }

    let separator = if !url.contains('?') {
        "?"
    } else if url.ends_with('?') || url.ends_with('&') {
        ""
    } else {
        "&"
    };
    format!("{url}{separator}{}", pairs.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_standard_url() {
        let url = "https://example.com/path/page?query=true";
        assert_eq!(normalize_origin(url), "https://example.com");
    }

    #[test]
    fn keeps_port_information() {
        let url = "https://example.com:8443/path";
        assert_eq!(normalize_origin(url), "https://example.com:8443");
    }

    #[test]
    fn trims_trailing_slash_when_parse_fails() {
        let url = "example.com/";
        assert_eq!(normalize_origin(url), "example.com");
    }

    #[test]
    fn joins_server_and_path_with_one_slash() {
        let uri = compute_endpoint_uri(&EndpointUriOptions {
            server_url: Some("https://api.example.com/"),
            path: "/pets",
            ..Default::default()
        });
        assert_eq!(uri, "https://api.example.com/pets");
    }

    #[test]
    fn base_uri_override_and_version() {
        let protocols = vec!["HTTPS".to_string()];
        let uri = compute_endpoint_uri(&EndpointUriOptions {
            server_url: Some("https://api.example.com"),
            base_uri: Some("staging.example.com/{version}"),
            path: "pets/{petId}",
            version: Some("v2"),
            protocols: &protocols,
        });
        assert_eq!(uri, "https://staging.example.com/v2/pets/{petId}");
    }

    #[test]
    fn missing_protocol_defaults_to_http() {
        let uri = compute_endpoint_uri(&EndpointUriOptions {
            server_url: Some("api.example.com"),
            path: "/pets",
            ..Default::default()
        });
        assert_eq!(uri, "http://api.example.com/pets");
    }

    #[test]
    fn without_server_only_the_path_remains() {
        let uri = compute_endpoint_uri(&EndpointUriOptions {
            path: "/pets",
            ..Default::default()
        });
        assert_eq!(uri, "/pets");
    }

    #[test]
    fn substitutes_known_variables() {
        let mut vars = BTreeMap::new();
        vars.insert("petId".to_string(), "a b".to_string());
        vars.insert("path".to_string(), "x/y".to_string());

        let url = "https://example.com/pets/{petId}/{+path}/{other}";
        assert_eq!(
            apply_url_variables(url, &vars, true),
            "https://example.com/pets/a%20b/x/y/{other}"
        );
        assert_eq!(
            apply_url_variables(url, &vars, false),
            "https://example.com/pets/a b/x/y/{other}"
        );
    }

    #[test]
    fn repeats_multi_value_parameters() {
        let params = vec![
            ("tag".to_string(), vec!["a".to_string(), "b c".to_string()]),
            ("limit".to_string(), vec!["10".to_string()]),
            ("empty".to_string(), vec![]),
        ];
        assert_eq!(
            apply_url_parameters("https://example.com/pets", &params, true),
            "https://example.com/pets?tag=a&tag=b+c&limit=10"
        );
        assert_eq!(
            apply_url_parameters("https://example.com/pets?x=1", &params[1..], false),
            "https://example.com/pets?x=1&limit=10"
        );
    }

    #[test]
    fn no_parameters_leaves_url_alone() {
        assert_eq!(apply_url_parameters("/pets", &[], true), "/pets");
    }
}
