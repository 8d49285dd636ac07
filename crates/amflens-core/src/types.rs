//! View objects produced by the serializer
//!
//! Every object is a plain, denormalised projection of one graph node. List
//! fields are always present (possibly empty) and optional scalars are left
//! out of the JSON when the graph does not define them.

use serde::Serialize;
use std::collections::BTreeMap;

/// A custom domain property (annotation / extension) applied to a node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCustomDomainProperty {
    pub id: String,
    pub name: String,
    pub extension: ApiDataNodeUnion,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSynthesizedField {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    pub value: String,
}

/// Source maps attached to a node
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDocumentSourceMaps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub types: Vec<String>,
    pub synthesized_field: Vec<ApiSynthesizedField>,
    pub lexical: Vec<ApiSynthesizedField>,
    pub tracked_element: Vec<ApiSynthesizedField>,
    pub declared_element: Vec<ApiSynthesizedField>,
    pub auto_generated_name: Vec<ApiSynthesizedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_json_schema: Option<ApiSynthesizedField>,
}

// ---------------------------------------------------------------------------
// Data nodes

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDataNode {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_maps: Option<ApiDocumentSourceMaps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiScalarNode {
    #[serde(flatten)]
    pub base: ApiDataNode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiObjectNode {
    #[serde(flatten)]
    pub base: ApiDataNode,
    pub properties: BTreeMap<String, ApiDataNodeUnion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiArrayNode {
    #[serde(flatten)]
    pub base: ApiDataNode,
    pub members: Vec<ApiDataNodeUnion>,
}

/// Any data node (example values, annotation values, default values)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiDataNodeUnion {
    Scalar(ApiScalarNode),
    Object(ApiObjectNode),
    Array(ApiArrayNode),
}

impl ApiDataNodeUnion {
    pub fn base(&self) -> &ApiDataNode {
        match self {
            Self::Scalar(node) => &node.base,
            Self::Object(node) => &node.base,
            Self::Array(node) => &node.base,
        }
    }

    /// Scalar value, if this is a scalar node that has one.
    pub fn as_scalar_value(&self) -> Option<&str> {
        match self {
            Self::Scalar(node) => node.value.as_deref(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Shapes

/// Fields shared by every shape kind
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiShape {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value_str: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<ApiDataNodeUnion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_only: Option<bool>,
    pub values: Vec<ApiDataNodeUnion>,
    pub inherits: Vec<ApiShapeUnion>,
    pub or: Vec<ApiShapeUnion>,
    pub and: Vec<ApiShapeUnion>,
    pub xone: Vec<ApiShapeUnion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<ApiShapeUnion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<ApiDocumentation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_label: Option<String>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_maps: Option<ApiDocumentSourceMaps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAnyShape {
    #[serde(flatten)]
    pub shape: ApiShape,
    pub examples: Vec<ApiExample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml_serialization: Option<ApiXmlSerializer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiScalarShape {
    #[serde(flatten)]
    pub base: ApiAnyShape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPropertyShape {
    #[serde(flatten)]
    pub shape: ApiShape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Box<ApiShapeUnion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiNodeShape {
    #[serde(flatten)]
    pub base: ApiAnyShape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator_value: Option<String>,
    pub properties: Vec<ApiPropertyShape>,
    pub custom_shape_properties: Vec<ApiPropertyShape>,
    pub custom_shape_property_definitions: Vec<ApiPropertyShape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties_schema: Option<Box<ApiShapeUnion>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUnionShape {
    #[serde(flatten)]
    pub base: ApiAnyShape,
    pub any_of: Vec<ApiShapeUnion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFileShape {
    #[serde(flatten)]
    pub base: ApiAnyShape,
    pub file_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSchemaShape {
    #[serde(flatten)]
    pub base: ApiAnyShape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

/// Common fields of array-like shapes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDataArrangeShape {
    #[serde(flatten)]
    pub base: ApiAnyShape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiArrayShape {
    #[serde(flatten)]
    pub base: ApiDataArrangeShape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ApiShapeUnion>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTupleShape {
    #[serde(flatten)]
    pub base: ApiDataArrangeShape,
    pub items: Vec<ApiShapeUnion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_items: Option<bool>,
}

/// A back-reference to a shape that is already being described higher up
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRecursiveShape {
    #[serde(flatten)]
    pub shape: ApiShape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_point: Option<String>,
}

/// Shape kinds, in the order the serializer tests for them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Scalar,
    Node,
    Union,
    File,
    Schema,
    Tuple,
    Array,
    Recursive,
    Any,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiShapeUnion {
    Scalar(ApiScalarShape),
    Node(ApiNodeShape),
    Union(ApiUnionShape),
    File(ApiFileShape),
    Schema(ApiSchemaShape),
    Tuple(ApiTupleShape),
    Array(ApiArrayShape),
    Recursive(ApiRecursiveShape),
    Any(ApiAnyShape),
}

impl ApiShapeUnion {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Scalar(_) => ShapeKind::Scalar,
            Self::Node(_) => ShapeKind::Node,
            Self::Union(_) => ShapeKind::Union,
            Self::File(_) => ShapeKind::File,
            Self::Schema(_) => ShapeKind::Schema,
            Self::Tuple(_) => ShapeKind::Tuple,
            Self::Array(_) => ShapeKind::Array,
            Self::Recursive(_) => ShapeKind::Recursive,
            Self::Any(_) => ShapeKind::Any,
        }
    }

    /// Fields common to all shape kinds.
    pub fn shape(&self) -> &ApiShape {
        match self {
            Self::Scalar(s) => &s.base.shape,
            Self::Node(s) => &s.base.shape,
            Self::Union(s) => &s.base.shape,
            Self::File(s) => &s.base.shape,
            Self::Schema(s) => &s.base.shape,
            Self::Tuple(s) => &s.base.base.shape,
            Self::Array(s) => &s.base.base.shape,
            Self::Recursive(s) => &s.shape,
            Self::Any(s) => &s.shape,
        }
    }

    /// Examples, for every kind that carries them.
    pub fn examples(&self) -> &[ApiExample] {
        match self {
            Self::Scalar(s) => &s.base.examples,
            Self::Node(s) => &s.base.examples,
            Self::Union(s) => &s.base.examples,
            Self::File(s) => &s.base.examples,
            Self::Schema(s) => &s.base.examples,
            Self::Tuple(s) => &s.base.base.examples,
            Self::Array(s) => &s.base.base.examples,
            Self::Recursive(_) => &[],
            Self::Any(s) => &s.examples,
        }
    }

    pub fn id(&self) -> &str {
        &self.shape().id
    }

    /// Name to show for this shape: display name, then name, then the link label.
    pub fn label(&self) -> Option<&str> {
        let shape = self.shape();
        shape
            .display_name
            .as_deref()
            .or(shape.name.as_deref())
            .or(shape.link_label.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiXmlSerializer {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapped: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiExample {
    pub id: String,
    pub types: Vec<String>,
    pub strict: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Raw example text as written in the API definition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_value: Option<ApiDataNodeUnion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_maps: Option<ApiDocumentSourceMaps>,
}

// ---------------------------------------------------------------------------
// API structure

/// A creative work: external documentation or a documentation page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDocumentation {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOrganization {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiLicense {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTag {
    pub id: String,
    pub types: Vec<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
}

/// Top level description of a WebAPI / AsyncAPI
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSummary {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<ApiOrganization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<ApiLicense>,
    pub documentations: Vec<ApiDocumentation>,
    pub schemes: Vec<String>,
    pub accepts: Vec<String>,
    pub content_type: Vec<String>,
    pub tags: Vec<ApiTag>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_maps: Option<ApiDocumentSourceMaps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiServer {
    pub id: String,
    pub types: Vec<String>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub variables: Vec<ApiParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_version: Option<String>,
    pub security: Vec<ApiSecurityRequirement>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_maps: Option<ApiDocumentSourceMaps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiParameter {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    pub allow_empty_value: bool,
    pub deprecated: bool,
    pub explode: bool,
    pub allow_reserved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<ApiShapeUnion>,
    pub payloads: Vec<ApiPayload>,
    pub examples: Vec<ApiExample>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_maps: Option<ApiDocumentSourceMaps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPayload {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<ApiShapeUnion>,
    pub examples: Vec<ApiExample>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_maps: Option<ApiDocumentSourceMaps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    pub query_parameters: Vec<ApiParameter>,
    pub headers: Vec<ApiParameter>,
    pub payloads: Vec<ApiPayload>,
    pub uri_parameters: Vec<ApiParameter>,
    pub cookie_parameters: Vec<ApiParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_string: Option<ApiShapeUnion>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_maps: Option<ApiDocumentSourceMaps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    pub headers: Vec<ApiParameter>,
    pub payloads: Vec<ApiPayload>,
    pub examples: Vec<ApiExample>,
    pub links: Vec<ApiTemplatedLink>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_maps: Option<ApiDocumentSourceMaps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTemplatedLink {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<String>,
    pub mapping: Vec<ApiIriTemplateMapping>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ApiServer>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiIriTemplateMapping {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_variable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_expression: Option<String>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCallback {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Box<ApiEndPoint>>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOperation {
    pub id: String,
    pub types: Vec<String>,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<ApiRequest>,
    pub responses: Vec<ApiResponse>,
    pub callbacks: Vec<ApiCallback>,
    pub servers: Vec<ApiServer>,
    pub security: Vec<ApiSecurityRequirement>,
    pub tags: Vec<ApiTag>,
    pub accepts: Vec<String>,
    pub schemes: Vec<String>,
    pub content_type: Vec<String>,
    pub extends: Vec<ApiParametrizedDeclaration>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_maps: Option<ApiDocumentSourceMaps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndPoint {
    pub id: String,
    pub types: Vec<String>,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub operations: Vec<ApiOperation>,
    pub parameters: Vec<ApiParameter>,
    pub payloads: Vec<ApiPayload>,
    pub servers: Vec<ApiServer>,
    pub security: Vec<ApiSecurityRequirement>,
    pub extends: Vec<ApiParametrizedDeclaration>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_maps: Option<ApiDocumentSourceMaps>,
}

/// Application of a resource type or trait
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiParametrizedDeclaration {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<ApiAbstractDeclaration>,
    pub variables: Vec<ApiVariableValue>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVariableValue {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ApiDataNodeUnion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAbstractDeclaration {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_node: Option<ApiDataNodeUnion>,
    pub variables: Vec<String>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
}

// ---------------------------------------------------------------------------
// Security

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSecurityRequirement {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub schemes: Vec<ApiParametrizedSecurityScheme>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_maps: Option<ApiDocumentSourceMaps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiParametrizedSecurityScheme {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<ApiSecuritySettingsUnion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<ApiSecurityScheme>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_maps: Option<ApiDocumentSourceMaps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSecurityScheme {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub scheme_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<ApiSecuritySettingsUnion>,
    pub headers: Vec<ApiParameter>,
    pub query_parameters: Vec<ApiParameter>,
    pub responses: Vec<ApiResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_string: Option<ApiShapeUnion>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_maps: Option<ApiDocumentSourceMaps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSecuritySettings {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<ApiDataNodeUnion>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSecurityOAuth1Settings {
    #[serde(flatten)]
    pub base: ApiSecuritySettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_token_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_credentials_uri: Option<String>,
    pub signatures: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSecurityOAuth2Settings {
    #[serde(flatten)]
    pub base: ApiSecuritySettings,
    pub authorization_grants: Vec<String>,
    pub flows: Vec<ApiOAuth2Flow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOAuth2Flow {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_uri: Option<String>,
    pub scopes: Vec<ApiSecurityScope>,
    pub custom_domain_properties: Vec<ApiCustomDomainProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSecurityScope {
    pub id: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSecurityApiKeySettings {
    #[serde(flatten)]
    pub base: ApiSecuritySettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSecurityHttpSettings {
    #[serde(flatten)]
    pub base: ApiSecuritySettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSecurityOpenIdConnectSettings {
    #[serde(flatten)]
    pub base: ApiSecuritySettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiSecuritySettingsUnion {
    OAuth1(ApiSecurityOAuth1Settings),
    OAuth2(ApiSecurityOAuth2Settings),
    ApiKey(ApiSecurityApiKeySettings),
    Http(ApiSecurityHttpSettings),
    OpenIdConnect(ApiSecurityOpenIdConnectSettings),
    Generic(ApiSecuritySettings),
}

// ---------------------------------------------------------------------------
// Store query results

/// What kind of document is loaded
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    pub id: String,
    pub types: Vec<String>,
    pub is_api: bool,
    pub is_web_api: bool,
    pub is_async_api: bool,
    pub is_fragment: bool,
    pub is_library: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encodes_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndPointListItem {
    pub id: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOperationListItem {
    pub id: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndPointWithOperationsListItem {
    pub id: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub operations: Vec<ApiOperationListItem>,
}
