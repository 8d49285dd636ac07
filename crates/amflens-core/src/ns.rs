//! Vocabulary IRIs used by AMF graph models
//!
//! Every accessor in [`crate::helper`] and [`crate::serializer`] is keyed by one
//! of these full IRIs. Compacted documents are read by translating the IRI
//! through the document's `@context` (see [`crate::context`]).

/// Base IRI AMF uses for node ids. Compacted documents declare it as `@base`
/// so the same node may appear as `#/declares/...` or `amf://id#/declares/...`.
pub const AMF_ID_BASE: &str = "amf://id";

macro_rules! vocabulary {
    ($base:literal { $($name:ident => $term:literal),* $(,)? }) => {
        /// Namespace IRI of this vocabulary.
        pub const KEY: &str = $base;
        $(pub const $name: &str = concat!($base, $term);)*
    };
}

/// `http://a.ml/vocabularies/document#`
pub mod document {
    vocabulary!("http://a.ml/vocabularies/document#" {
        MODULE => "Module",
        DOCUMENT => "Document",
        FRAGMENT => "Fragment",
        UNIT => "Unit",
        SECURITY_SCHEME_FRAGMENT => "SecuritySchemeFragment",
        USER_DOCUMENTATION_FRAGMENT => "UserDocumentationFragment",
        DATA_TYPE_FRAGMENT => "DataTypeFragment",
        NAMED_EXAMPLES_FRAGMENT => "NamedExamplesFragment",
        DOMAIN_ELEMENT => "DomainElement",
        PARAMETRIZED_DECLARATION => "ParametrizedDeclaration",
        EXTERNAL_DOMAIN_ELEMENT => "ExternalDomainElement",
        CUSTOM_DOMAIN_PROPERTIES => "customDomainProperties",
        ENCODES => "encodes",
        DECLARES => "declares",
        REFERENCES => "references",
        EXAMPLES => "examples",
        LINK_TARGET => "link-target",
        LINK_LABEL => "link-label",
        REFERENCE_ID => "reference-id",
        STRUCTURED_VALUE => "structuredValue",
        RAW => "raw",
        EXTENDS => "extends",
        VALUE => "value",
        NAME => "name",
        STRICT => "strict",
        DEPRECATED => "deprecated",
        LOCATION => "location",
        VARIABLE => "variable",
        TARGET => "target",
        DATA_NODE => "dataNode",
        ROOT => "root",
        USAGE => "usage",
        VERSION => "version",
    });
}

/// `http://a.ml/vocabularies/core#`
pub mod core {
    vocabulary!("http://a.ml/vocabularies/core#" {
        CREATIVE_WORK => "CreativeWork",
        VERSION => "version",
        URL_TEMPLATE => "urlTemplate",
        DISPLAY_NAME => "displayName",
        TITLE => "title",
        NAME => "name",
        DESCRIPTION => "description",
        DOCUMENTATION => "documentation",
        SUMMARY => "summary",
        PROVIDER => "provider",
        EMAIL => "email",
        URL => "url",
        TERMS_OF_SERVICE => "termsOfService",
        LICENSE => "license",
        MEDIA_TYPE => "mediaType",
        EXTENSION_NAME => "extensionName",
        DEPRECATED => "deprecated",
    });
}

/// `http://a.ml/vocabularies/apiContract#`
pub mod api_contract {
    vocabulary!("http://a.ml/vocabularies/apiContract#" {
        PAYLOAD => "Payload",
        REQUEST => "Request",
        RESPONSE => "Response",
        END_POINT => "EndPoint",
        PARAMETER => "Parameter",
        OPERATION => "Operation",
        WEB_API => "WebAPI",
        ASYNC_API => "AsyncAPI",
        API => "API",
        EXAMPLE => "Example",
        SERVER => "Server",
        PARAMETRIZED_RESOURCE_TYPE => "ParametrizedResourceType",
        PARAMETRIZED_TRAIT => "ParametrizedTrait",
        CALLBACK => "Callback",
        TEMPLATED_LINK => "TemplatedLink",
        IRI_TEMPLATE_MAPPING => "IriTemplateMapping",
        TAG => "Tag",
        MESSAGE => "Message",
        HEADER => "header",
        PARAMETER_KEY => "parameter",
        PARAM_NAME => "paramName",
        URI_PARAMETER => "uriParameter",
        COOKIE_PARAMETER => "cookieParameter",
        VARIABLE => "variable",
        PAYLOAD_KEY => "payload",
        SERVER_KEY => "server",
        PATH => "path",
        URL => "url",
        SCHEME => "scheme",
        ENDPOINT => "endpoint",
        QUERY_STRING => "queryString",
        ACCEPTS => "accepts",
        CONTENT_TYPE => "contentType",
        GUI_SUMMARY => "guiSummary",
        BINDING => "binding",
        RESPONSE_KEY => "response",
        RETURNS => "returns",
        EXPECTS => "expects",
        EXAMPLES => "examples",
        SUPPORTED_OPERATION => "supportedOperation",
        STATUS_CODE => "statusCode",
        METHOD => "method",
        REQUIRED => "required",
        CALLBACK_KEY => "callback",
        EXPRESSION => "expression",
        LINK => "link",
        LINK_EXPRESSION => "linkExpression",
        TEMPLATE_VARIABLE => "templateVariable",
        MAPPING => "mapping",
        OPERATION_ID => "operationId",
        TEMPLATE => "template",
        REQUEST_BODY => "requestBody",
        PROTOCOL => "protocol",
        PROTOCOL_VERSION => "protocolVersion",
        TAG_KEY => "tag",
        ALLOW_EMPTY_VALUE => "allowEmptyValue",
        STYLE => "style",
        EXPLODE => "explode",
        ALLOW_RESERVED => "allowReserved",
    });
}

/// `http://a.ml/vocabularies/security#`
pub mod security {
    vocabulary!("http://a.ml/vocabularies/security#" {
        PARAMETRIZED_SECURITY_SCHEME => "ParametrizedSecurityScheme",
        SECURITY_SCHEME => "SecurityScheme",
        SECURITY_REQUIREMENT => "SecurityRequirement",
        SETTINGS => "Settings",
        OAUTH1_SETTINGS => "OAuth1Settings",
        OAUTH2_SETTINGS => "OAuth2Settings",
        OAUTH2_FLOW => "OAuth2Flow",
        API_KEY_SETTINGS => "ApiKeySettings",
        HTTP_SETTINGS => "HttpSettings",
        OPEN_ID_CONNECT_SETTINGS => "OpenIdConnectSettings",
        SCOPE => "Scope",
        SECURITY => "security",
        SCHEME => "scheme",
        SCHEMES => "schemes",
        SETTINGS_KEY => "settings",
        NAME => "name",
        TYPE => "type",
        SCOPE_KEY => "scope",
        ACCESS_TOKEN_URI => "accessTokenUri",
        AUTHORIZATION_URI => "authorizationUri",
        AUTHORIZATION_GRANT => "authorizationGrant",
        FLOWS => "flows",
        FLOW => "flow",
        SIGNATURE => "signature",
        TOKEN_CREDENTIALS_URI => "tokenCredentialsUri",
        REQUEST_TOKEN_URI => "requestTokenUri",
        REFRESH_URI => "refreshUri",
        OPEN_ID_CONNECT_URL => "openIdConnectUrl",
        BEARER_FORMAT => "bearerFormat",
        IN => "in",
        ADDITIONAL_PROPERTIES => "additionalProperties",
    });
}

/// `http://a.ml/vocabularies/shapes#`
pub mod shapes {
    vocabulary!("http://a.ml/vocabularies/shapes#" {
        SCALAR_SHAPE => "ScalarShape",
        ARRAY_SHAPE => "ArrayShape",
        UNION_SHAPE => "UnionShape",
        NIL_SHAPE => "NilShape",
        FILE_SHAPE => "FileShape",
        ANY_SHAPE => "AnyShape",
        SCHEMA_SHAPE => "SchemaShape",
        MATRIX_SHAPE => "MatrixShape",
        TUPLE_SHAPE => "TupleShape",
        RECURSIVE_SHAPE => "RecursiveShape",
        XML_SERIALIZER => "XMLSerializer",
        RANGE => "range",
        ITEMS => "items",
        ANY_OF => "anyOf",
        FILE_TYPE => "fileType",
        SCHEMA => "schema",
        XML_SERIALIZATION => "xmlSerialization",
        XML_NAME => "xmlName",
        XML_ATTRIBUTE => "xmlAttribute",
        XML_WRAPPED => "xmlWrapped",
        XML_NAMESPACE => "xmlNamespace",
        XML_PREFIX => "xmlPrefix",
        READ_ONLY => "readOnly",
        WRITE_ONLY => "writeOnly",
        DEPRECATED => "deprecated",
        FIX_POINT => "fixPoint",
        DISCRIMINATOR => "discriminator",
        DISCRIMINATOR_VALUE => "discriminatorValue",
        FORMAT => "format",
        MULTIPLE_OF => "multipleOf",
        UNIQUE_ITEMS => "uniqueItems",
        CLOSED_ITEMS => "closedItems",
        ADDITIONAL_ITEMS_SCHEMA => "additionalItemsSchema",
        INHERITS => "inherits",
        MIN_PROPERTIES => "minProperties",
        MAX_PROPERTIES => "maxProperties",
        PATTERN_NAME => "patternName",
    });
}

/// `http://a.ml/vocabularies/data#`
pub mod data {
    vocabulary!("http://a.ml/vocabularies/data#" {
        SCALAR => "Scalar",
        OBJECT => "Object",
        ARRAY => "Array",
        VALUE => "value",
    });
}

/// `http://a.ml/vocabularies/document-source-maps#`
pub mod doc_source_maps {
    vocabulary!("http://a.ml/vocabularies/document-source-maps#" {
        SOURCE_MAP => "SourceMap",
        SOURCES => "sources",
        ELEMENT => "element",
        VALUE => "value",
        DECLARED_ELEMENT => "declared-element",
        TRACKED_ELEMENT => "tracked-element",
        PARSED_JSON_SCHEMA => "parsed-json-schema",
        AUTO_GENERATED_NAME => "auto-generated-name",
        LEXICAL => "lexical",
        SYNTHESIZED_FIELD => "synthesized-field",
    });
}

/// `http://www.w3.org/ns/shacl#`
pub mod shacl {
    vocabulary!("http://www.w3.org/ns/shacl#" {
        SHAPE => "Shape",
        NODE_SHAPE => "NodeShape",
        PROPERTY_SHAPE => "PropertyShape",
        IN => "in",
        DEFAULT_VALUE => "defaultValue",
        DEFAULT_VALUE_STR => "defaultValueStr",
        PATTERN => "pattern",
        MIN_INCLUSIVE => "minInclusive",
        MAX_INCLUSIVE => "maxInclusive",
        MIN_EXCLUSIVE => "minExclusive",
        MAX_EXCLUSIVE => "maxExclusive",
        MIN_LENGTH => "minLength",
        MAX_LENGTH => "maxLength",
        MIN_COUNT => "minCount",
        MAX_COUNT => "maxCount",
        AND => "and",
        OR => "or",
        XONE => "xone",
        NOT => "not",
        NAME => "name",
        RAW => "raw",
        DATATYPE => "datatype",
        CLOSED => "closed",
        ADDITIONAL_PROPERTIES_SCHEMA => "additionalPropertiesSchema",
        CUSTOM_SHAPE_PROPERTIES => "customShapeProperties",
        CUSTOM_SHAPE_PROPERTY_DEFINITIONS => "customShapePropertyDefinitions",
        PROPERTY => "property",
        PATH => "path",
        NODE => "node",
    });
}

/// `http://www.w3.org/2000/01/rdf-schema#`
pub mod rdf_schema {
    vocabulary!("http://www.w3.org/2000/01/rdf-schema#" {
        MEMBER => "member",
        SEQ => "Seq",
    });
}

/// `http://www.w3.org/1999/02/22-rdf-syntax-ns#`
pub mod rdf_syntax {
    vocabulary!("http://www.w3.org/1999/02/22-rdf-syntax-ns#" {
        MEMBER => "member",
        SEQ => "Seq",
    });
}

/// `http://www.w3.org/2001/XMLSchema#`
pub mod xml_schema {
    vocabulary!("http://www.w3.org/2001/XMLSchema#" {
        BOOLEAN => "boolean",
        STRING => "string",
        NUMBER => "number",
        INTEGER => "integer",
        LONG => "long",
        DOUBLE => "double",
        FLOAT => "float",
        NIL => "nil",
        DATE_TIME => "dateTime",
        TIME => "time",
        DATE => "date",
        BASE64_BINARY => "base64Binary",
    });
}

#[cfg(test)]
mod tests {
    use super::{document, shacl, shapes};

    #[test]
    fn builds_full_iris() {
        assert_eq!(super::core::NAME, "http://a.ml/vocabularies/core#name");
        assert_eq!(
            document::LINK_TARGET,
            "http://a.ml/vocabularies/document#link-target"
        );
        assert!(shapes::TUPLE_SHAPE.starts_with(shapes::KEY));
        assert_eq!(shacl::NODE_SHAPE, "http://www.w3.org/ns/shacl#NodeShape");
    }
}
