//! Projection of graph nodes into view objects
//!
//! [`AmfSerializer`] reads one node at a time and returns the matching struct
//! from [`crate::types`]. Shapes are resolved (see [`AmfHelper::resolve`])
//! before they are read, so links are described by their target.

use crate::context::AmfContext;
use crate::helper::{AmfHelper, GraphReader, RESOLVED_MARKER};
use crate::ns;
use crate::types::*;
use serde_json::Value as JsonValue;
use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

/// Per-call options for shape serialization.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeOptions<'t> {
    /// Id of the payload or parameter the shape is described for. Examples
    /// tracked to that element are kept, other tracked examples are dropped.
    pub tracked_id: Option<&'t str>,
}

impl<'t> ShapeOptions<'t> {
    pub fn tracked(id: &'t str) -> Self {
        Self {
            tracked_id: Some(id),
        }
    }
}

pub struct AmfSerializer<'a> {
    helper: &'a AmfHelper,
    context: Option<&'a AmfContext>,
    visiting: RefCell<HashSet<String>>,
}

impl GraphReader for AmfSerializer<'_> {
    fn key(&self, iri: &str) -> String {
        match self.context {
            Some(ctx) => self.helper.amf_key_in(iri, Some(ctx)),
            None => self.helper.amf_key(iri),
        }
    }

    fn expand_key(&self, key: &str) -> String {
        match self.context {
            Some(ctx) => ctx.expand(key),
            None => self.helper.expand_key(key),
        }
    }
}

fn id_of(node: &JsonValue) -> String {
    node.get("@id")
        .and_then(JsonValue::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Index of an `rdfs:_N` style sequence key.
fn sequence_index(key: &str) -> Option<usize> {
    let (head, index) = key.rsplit_once('_')?;
    if head.ends_with('#') || head.ends_with(':') {
        index.parse().ok()
    } else {
        None
    }
}

impl<'a> AmfSerializer<'a> {
    pub fn new(helper: &'a AmfHelper) -> Self {
        Self {
            helper,
            context: None,
            visiting: RefCell::new(HashSet::new()),
        }
    }

    /// Read nodes compacted with a context other than the loaded document's.
    pub fn with_context(mut self, context: &'a AmfContext) -> Self {
        self.context = Some(context);
        self
    }

    fn resolved<'v>(&self, node: &'v JsonValue) -> Cow<'v, JsonValue> {
        if node.get(RESOLVED_MARKER).is_some() {
            Cow::Borrowed(node)
        } else {
            Cow::Owned(self.helper.resolve(node))
        }
    }

    fn objects<'v>(&self, node: &'v JsonValue, iri: &str) -> Vec<&'v JsonValue> {
        self.compute_property_array(node, iri)
            .map(|items| items.into_iter().filter(|item| item.is_object()).collect())
            .unwrap_or_default()
    }

    fn strings(&self, node: &JsonValue, iri: &str) -> Vec<String> {
        self.get_string_array(node, iri).unwrap_or_default()
    }

    /// Value that AMF writes either as a literal or as an `{"@id"}` link.
    fn string_or_link(&self, node: &JsonValue, iri: &str) -> Option<String> {
        self.get_string(node, iri)
            .or_else(|| self.get_link_value(node, iri).map(str::to_string))
    }

    fn is_sequence(&self, node: &JsonValue) -> bool {
        if self.has_type(node, ns::rdf_schema::SEQ) || self.has_type(node, ns::rdf_syntax::SEQ) {
            return true;
        }
        node.as_object()
            .is_some_and(|map| map.keys().any(|key| sequence_index(key).is_some()))
    }

    /// Members of an `rdfs:Seq` node, in index order.
    fn sequence<'v>(&self, node: &'v JsonValue) -> Vec<&'v JsonValue> {
        let Some(map) = node.as_object() else {
            return Vec::new();
        };
        let mut members: Vec<(usize, &JsonValue)> = map
            .iter()
            .filter_map(|(key, value)| {
                let index = sequence_index(key)?;
                let value = match value {
                    JsonValue::Array(items) => items.first()?,
                    other => other,
                };
                Some((index, value))
            })
            .collect();
        members.sort_by_key(|(index, _)| *index);
        members.into_iter().map(|(_, value)| value).collect()
    }

    /// Values under `iri`, unwrapping a single `rdfs:Seq` container.
    fn list_or_sequence<'v>(&self, node: &'v JsonValue, iri: &str) -> Vec<&'v JsonValue> {
        let items = self.objects(node, iri);
        if let [single] = items.as_slice() {
            let single: &'v JsonValue = *single;
            if self.is_sequence(single) {
                return self.sequence(single);
            }
        }
        items
    }

    // -- common parts --------------------------------------------------------

    pub fn custom_domain_properties(&self, node: &JsonValue) -> Vec<ApiCustomDomainProperty> {
        let Some(ids) = self.get_link_values(node, ns::document::CUSTOM_DOMAIN_PROPERTIES) else {
            return Vec::new();
        };
        let Some(map) = node.as_object() else {
            return Vec::new();
        };
        ids.into_iter()
            .filter_map(|id| {
                let prefixed = format!("{}{id}", ns::AMF_ID_BASE);
                let value = map
                    .get(id)
                    .or_else(|| map.get(&prefixed))
                    .or_else(|| id.strip_prefix(ns::AMF_ID_BASE).and_then(|short| map.get(short)))
                    .or_else(|| map.get(&self.key(id)))?;
                let value = match value {
                    JsonValue::Array(items) => items.first()?,
                    other => other,
                };
                let name = self.get_string(value, ns::core::EXTENSION_NAME)?;
                let extension = self.unknown_data_node(value)?;
                Some(ApiCustomDomainProperty {
                    id: id.to_string(),
                    name,
                    extension,
                })
            })
            .collect()
    }

    fn synthesized_fields(&self, sources: &JsonValue, iri: &str) -> Vec<ApiSynthesizedField> {
        self.objects(sources, iri)
            .into_iter()
            .map(|item| ApiSynthesizedField {
                id: id_of(item),
                element: self.get_string(item, ns::doc_source_maps::ELEMENT),
                value: self
                    .get_string(item, ns::doc_source_maps::VALUE)
                    .unwrap_or_default(),
            })
            .collect()
    }

    pub fn source_map(&self, node: &JsonValue) -> Option<ApiDocumentSourceMaps> {
        use ns::doc_source_maps as sm;
        let sources = self.get_object(node, sm::SOURCES)?;
        let id = id_of(sources);
        Some(ApiDocumentSourceMaps {
            id: (!id.is_empty()).then_some(id),
            types: self.read_types(sources),
            synthesized_field: self.synthesized_fields(sources, sm::SYNTHESIZED_FIELD),
            lexical: self.synthesized_fields(sources, sm::LEXICAL),
            tracked_element: self.synthesized_fields(sources, sm::TRACKED_ELEMENT),
            declared_element: self.synthesized_fields(sources, sm::DECLARED_ELEMENT),
            auto_generated_name: self.synthesized_fields(sources, sm::AUTO_GENERATED_NAME),
            parsed_json_schema: self
                .synthesized_fields(sources, sm::PARSED_JSON_SCHEMA)
                .into_iter()
                .next(),
        })
    }

    /// Value of the `tracked-element` source map of an example, if any.
    fn tracked_value(&self, example: &JsonValue) -> Option<String> {
        let example = self.helper.dereference(example).unwrap_or(example);
        let sources = self.get_object(example, ns::doc_source_maps::SOURCES)?;
        let tracked = self.get_object(sources, ns::doc_source_maps::TRACKED_ELEMENT)?;
        self.get_string(tracked, ns::doc_source_maps::VALUE)
            .filter(|value| !value.is_empty())
    }

    /// Examples that belong to the element `tracked_id`, plus every example
    /// that carries no tracking information.
    pub fn filter_tracked_examples<'v>(
        &self,
        examples: Vec<&'v JsonValue>,
        tracked_id: &str,
    ) -> Vec<&'v JsonValue> {
        let prefixed = format!("{}{tracked_id}", ns::AMF_ID_BASE);
        examples
            .into_iter()
            .filter(|example| match self.tracked_value(example) {
                None => true,
                Some(value) => value
                    .split(',')
                    .any(|id| id == tracked_id || id == prefixed),
            })
            .collect()
    }

    /// Examples that carry no tracking information.
    pub fn filter_non_tracked_examples<'v>(&self, examples: Vec<&'v JsonValue>) -> Vec<&'v JsonValue> {
        examples
            .into_iter()
            .filter(|example| self.tracked_value(example).is_none())
            .collect()
    }

    // -- data nodes ----------------------------------------------------------

    fn data_node(&self, node: &JsonValue) -> ApiDataNode {
        ApiDataNode {
            id: id_of(node),
            types: self.read_types(node),
            name: self.get_string(node, ns::core::NAME),
            custom_domain_properties: self.custom_domain_properties(node),
            source_maps: self.source_map(node),
        }
    }

    /// Scalar, object or array data node; `None` for anything else.
    pub fn unknown_data_node(&self, node: &JsonValue) -> Option<ApiDataNodeUnion> {
        if self.has_type(node, ns::data::SCALAR) {
            Some(ApiDataNodeUnion::Scalar(self.scalar_node(node)))
        } else if self.has_type(node, ns::data::OBJECT) {
            Some(ApiDataNodeUnion::Object(self.object_node(node)))
        } else if self.has_type(node, ns::data::ARRAY) {
            Some(ApiDataNodeUnion::Array(self.array_node(node)))
        } else {
            None
        }
    }

    pub fn scalar_node(&self, node: &JsonValue) -> ApiScalarNode {
        ApiScalarNode {
            base: self.data_node(node),
            value: self.get_string(node, ns::data::VALUE),
            data_type: self
                .string_or_link(node, ns::shacl::DATATYPE)
                .map(|ty| self.expand_key(&ty)),
        }
    }

    pub fn object_node(&self, node: &JsonValue) -> ApiObjectNode {
        let prefix = self.key(ns::data::KEY);
        let prefix = if prefix == ns::data::KEY {
            prefix
        } else {
            format!("{prefix}:")
        };
        let mut properties = BTreeMap::new();
        if let Some(map) = node.as_object() {
            for (key, value) in map {
                let Some(name) = key
                    .strip_prefix(prefix.as_str())
                    .or_else(|| key.strip_prefix(ns::data::KEY))
                else {
                    continue;
                };
                let value = match value {
                    JsonValue::Array(items) => match items.first() {
                        Some(first) => first,
                        None => continue,
                    },
                    other => other,
                };
                if let Some(data) = self.unknown_data_node(value) {
                    properties.insert(name.to_string(), data);
                }
            }
        }
        ApiObjectNode {
            base: self.data_node(node),
            properties,
        }
    }

    pub fn array_node(&self, node: &JsonValue) -> ApiArrayNode {
        let members = self
            .objects(node, ns::rdf_schema::MEMBER)
            .into_iter()
            .filter_map(|member| self.unknown_data_node(member))
            .collect();
        ApiArrayNode {
            base: self.data_node(node),
            members,
        }
    }

    // -- shapes --------------------------------------------------------------

    /// Kind a shape node is serialized as. Checked in a fixed order because
    /// AMF types overlap: a tuple is also typed as an array.
    pub fn shape_kind(&self, node: &JsonValue) -> ShapeKind {
        if self.has_type(node, ns::shapes::SCALAR_SHAPE) {
            ShapeKind::Scalar
        } else if self.has_type(node, ns::shacl::NODE_SHAPE) {
            ShapeKind::Node
        } else if self.has_type(node, ns::shapes::UNION_SHAPE) {
            ShapeKind::Union
        } else if self.has_type(node, ns::shapes::FILE_SHAPE) {
            ShapeKind::File
        } else if self.has_type(node, ns::shapes::SCHEMA_SHAPE) {
            ShapeKind::Schema
        } else if self.has_type(node, ns::shapes::TUPLE_SHAPE) {
            ShapeKind::Tuple
        } else if self.has_type(node, ns::shapes::ARRAY_SHAPE)
            || self.has_type(node, ns::shapes::MATRIX_SHAPE)
        {
            ShapeKind::Array
        } else if self.has_type(node, ns::shapes::RECURSIVE_SHAPE) {
            ShapeKind::Recursive
        } else {
            ShapeKind::Any
        }
    }

    /// Serialize any shape node.
    ///
    /// A shape (or link target) that is already being serialized further up
    /// the current path comes back as a recursive shape pointing at it.
    pub fn unknown_shape(&self, node: &JsonValue, options: ShapeOptions<'_>) -> ApiShapeUnion {
        let key = self
            .get_link_value(node, ns::document::LINK_TARGET)
            .map(str::to_string)
            .unwrap_or_else(|| id_of(node));
        if !key.is_empty() && self.visiting.borrow().contains(&key) {
            return ApiShapeUnion::Recursive(ApiRecursiveShape {
                shape: ApiShape {
                    types: vec![ns::shapes::RECURSIVE_SHAPE.to_string()],
                    ..self.shape(node)
                },
                fix_point: Some(key),
            });
        }

        let node = self.resolved(node);
        if !key.is_empty() {
            self.visiting.borrow_mut().insert(key.clone());
        }
        let shape = match self.shape_kind(&node) {
            ShapeKind::Scalar => ApiShapeUnion::Scalar(self.scalar_shape(&node, options)),
            ShapeKind::Node => ApiShapeUnion::Node(self.node_shape(&node, options)),
            ShapeKind::Union => ApiShapeUnion::Union(self.union_shape(&node, options)),
            ShapeKind::File => ApiShapeUnion::File(self.file_shape(&node, options)),
            ShapeKind::Schema => ApiShapeUnion::Schema(self.schema_shape(&node, options)),
            ShapeKind::Tuple => ApiShapeUnion::Tuple(self.tuple_shape(&node, options)),
            ShapeKind::Array => ApiShapeUnion::Array(self.array_shape(&node, options)),
            ShapeKind::Recursive => ApiShapeUnion::Recursive(self.recursive_shape(&node)),
            ShapeKind::Any => ApiShapeUnion::Any(self.any_shape(&node, options)),
        };
        if !key.is_empty() {
            self.visiting.borrow_mut().remove(&key);
        }
        shape
    }

    fn shapes(&self, nodes: Vec<&JsonValue>) -> Vec<ApiShapeUnion> {
        nodes
            .into_iter()
            .map(|node| self.unknown_shape(node, ShapeOptions::default()))
            .collect()
    }

    fn nested_shape(&self, node: &JsonValue, iri: &str) -> Option<Box<ApiShapeUnion>> {
        self.get_object(node, iri)
            .map(|item| Box::new(self.unknown_shape(item, ShapeOptions::default())))
    }

    /// Fields every shape kind shares.
    pub fn shape(&self, node: &JsonValue) -> ApiShape {
        use ns::shacl;
        let values = self
            .list_or_sequence(node, shacl::IN)
            .into_iter()
            .filter_map(|value| self.unknown_data_node(value))
            .collect();
        ApiShape {
            id: id_of(node),
            types: self.read_types(node),
            name: self.get_string(node, shacl::NAME),
            display_name: self.get_string(node, ns::core::DISPLAY_NAME),
            description: self.get_string(node, ns::core::DESCRIPTION),
            default_value_str: self.get_string(node, shacl::DEFAULT_VALUE_STR),
            default_value: self
                .get_object(node, shacl::DEFAULT_VALUE)
                .and_then(|value| self.unknown_data_node(value)),
            deprecated: self.get_bool(node, ns::shapes::DEPRECATED),
            read_only: self.get_bool(node, ns::shapes::READ_ONLY),
            write_only: self.get_bool(node, ns::shapes::WRITE_ONLY),
            values,
            inherits: self.shapes(self.objects(node, ns::shapes::INHERITS)),
            or: self.shapes(self.list_or_sequence(node, shacl::OR)),
            and: self.shapes(self.list_or_sequence(node, shacl::AND)),
            xone: self.shapes(self.list_or_sequence(node, shacl::XONE)),
            not: self.nested_shape(node, shacl::NOT),
            documentation: self
                .get_object(node, ns::core::DOCUMENTATION)
                .map(|doc| self.documentation(doc)),
            link_label: self.get_string(node, ns::document::LINK_LABEL),
            custom_domain_properties: self.custom_domain_properties(node),
            source_maps: self.source_map(node),
        }
    }

    pub fn any_shape(&self, node: &JsonValue, options: ShapeOptions<'_>) -> ApiAnyShape {
        let examples = self.objects(node, ns::api_contract::EXAMPLES);
        let examples = match options.tracked_id {
            Some(tracked_id) => self.filter_tracked_examples(examples, tracked_id),
            None => self.filter_non_tracked_examples(examples),
        };
        ApiAnyShape {
            shape: self.shape(node),
            examples: examples.into_iter().map(|ex| self.example(ex)).collect(),
            xml_serialization: self
                .get_object(node, ns::shapes::XML_SERIALIZATION)
                .map(|xml| self.xml_serializer(xml)),
        }
    }

    /// `(minimum, exclusive_minimum, maximum, exclusive_maximum)`; an
    /// exclusive bound replaces the inclusive one.
    fn bounds(&self, node: &JsonValue) -> (Option<f64>, Option<bool>, Option<f64>, Option<bool>) {
        use ns::shacl;
        let (minimum, exclusive_minimum) = match self.get_f64(node, shacl::MIN_EXCLUSIVE) {
            Some(value) => (Some(value), Some(true)),
            None => (self.get_f64(node, shacl::MIN_INCLUSIVE), None),
        };
        let (maximum, exclusive_maximum) = match self.get_f64(node, shacl::MAX_EXCLUSIVE) {
            Some(value) => (Some(value), Some(true)),
            None => (self.get_f64(node, shacl::MAX_INCLUSIVE), None),
        };
        (minimum, exclusive_minimum, maximum, exclusive_maximum)
    }

    pub fn scalar_shape(&self, node: &JsonValue, options: ShapeOptions<'_>) -> ApiScalarShape {
        use ns::shacl;
        let (minimum, exclusive_minimum, maximum, exclusive_maximum) = self.bounds(node);
        ApiScalarShape {
            base: self.any_shape(node, options),
            data_type: self
                .string_or_link(node, shacl::DATATYPE)
                .map(|ty| self.expand_key(&ty)),
            pattern: self.get_string(node, shacl::PATTERN),
            min_length: self.get_u64(node, shacl::MIN_LENGTH),
            max_length: self.get_u64(node, shacl::MAX_LENGTH),
            minimum,
            maximum,
            exclusive_minimum,
            exclusive_maximum,
            format: self.get_string(node, ns::shapes::FORMAT),
            multiple_of: self.get_f64(node, ns::shapes::MULTIPLE_OF),
        }
    }

    pub fn node_shape(&self, node: &JsonValue, options: ShapeOptions<'_>) -> ApiNodeShape {
        use ns::shacl;
        let properties = |iri: &str| -> Vec<ApiPropertyShape> {
            self.objects(node, iri)
                .into_iter()
                .map(|property| self.property_shape(property))
                .collect()
        };
        ApiNodeShape {
            base: self.any_shape(node, options),
            closed: self.get_bool(node, shacl::CLOSED),
            min_properties: self.get_u64(node, ns::shapes::MIN_PROPERTIES),
            max_properties: self.get_u64(node, ns::shapes::MAX_PROPERTIES),
            discriminator: self.get_string(node, ns::shapes::DISCRIMINATOR),
            discriminator_value: self.get_string(node, ns::shapes::DISCRIMINATOR_VALUE),
            properties: properties(shacl::PROPERTY),
            custom_shape_properties: properties(shacl::CUSTOM_SHAPE_PROPERTIES),
            custom_shape_property_definitions: properties(shacl::CUSTOM_SHAPE_PROPERTY_DEFINITIONS),
            additional_properties_schema: self.nested_shape(node, shacl::ADDITIONAL_PROPERTIES_SCHEMA),
        }
    }

    pub fn property_shape(&self, node: &JsonValue) -> ApiPropertyShape {
        use ns::shacl;
        let node = self.resolved(node);
        ApiPropertyShape {
            shape: self.shape(&node),
            path: self.get_link_value(&node, shacl::PATH).map(str::to_string),
            range: self.nested_shape(&node, ns::shapes::RANGE),
            min_count: self.get_u64(&node, shacl::MIN_COUNT),
            max_count: self.get_u64(&node, shacl::MAX_COUNT),
            pattern_name: self.get_string(&node, ns::shapes::PATTERN_NAME),
        }
    }

    pub fn union_shape(&self, node: &JsonValue, options: ShapeOptions<'_>) -> ApiUnionShape {
        ApiUnionShape {
            base: self.any_shape(node, options),
            any_of: self.shapes(self.list_or_sequence(node, ns::shapes::ANY_OF)),
        }
    }

    pub fn file_shape(&self, node: &JsonValue, options: ShapeOptions<'_>) -> ApiFileShape {
        use ns::shacl;
        let (minimum, exclusive_minimum, maximum, exclusive_maximum) = self.bounds(node);
        ApiFileShape {
            base: self.any_shape(node, options),
            file_types: self.strings(node, ns::shapes::FILE_TYPE),
            pattern: self.get_string(node, shacl::PATTERN),
            min_length: self.get_u64(node, shacl::MIN_LENGTH),
            max_length: self.get_u64(node, shacl::MAX_LENGTH),
            minimum,
            maximum,
            exclusive_minimum,
            exclusive_maximum,
            format: self.get_string(node, ns::shapes::FORMAT),
            multiple_of: self.get_f64(node, ns::shapes::MULTIPLE_OF),
        }
    }

    pub fn schema_shape(&self, node: &JsonValue, options: ShapeOptions<'_>) -> ApiSchemaShape {
        ApiSchemaShape {
            base: self.any_shape(node, options),
            media_type: self.get_string(node, ns::core::MEDIA_TYPE),
            raw: self.get_string(node, ns::shacl::RAW),
        }
    }

    fn data_arrange_shape(&self, node: &JsonValue, options: ShapeOptions<'_>) -> ApiDataArrangeShape {
        ApiDataArrangeShape {
            base: self.any_shape(node, options),
            min_items: self.get_u64(node, ns::shacl::MIN_COUNT),
            max_items: self.get_u64(node, ns::shacl::MAX_COUNT),
            unique_items: self.get_bool(node, ns::shapes::UNIQUE_ITEMS),
        }
    }

    pub fn array_shape(&self, node: &JsonValue, options: ShapeOptions<'_>) -> ApiArrayShape {
        ApiArrayShape {
            base: self.data_arrange_shape(node, options),
            items: self.nested_shape(node, ns::shapes::ITEMS),
        }
    }

    pub fn tuple_shape(&self, node: &JsonValue, options: ShapeOptions<'_>) -> ApiTupleShape {
        ApiTupleShape {
            base: self.data_arrange_shape(node, options),
            items: self.shapes(self.list_or_sequence(node, ns::shapes::ITEMS)),
            additional_items: self
                .get_bool(node, ns::shapes::CLOSED_ITEMS)
                .map(|closed| !closed),
        }
    }

    pub fn recursive_shape(&self, node: &JsonValue) -> ApiRecursiveShape {
        ApiRecursiveShape {
            shape: self.shape(node),
            fix_point: self
                .get_link_value(node, ns::shapes::FIX_POINT)
                .map(str::to_string),
        }
    }

    pub fn xml_serializer(&self, node: &JsonValue) -> ApiXmlSerializer {
        use ns::shapes;
        ApiXmlSerializer {
            id: id_of(node),
            types: self.read_types(node),
            attribute: self.get_bool(node, shapes::XML_ATTRIBUTE),
            wrapped: self.get_bool(node, shapes::XML_WRAPPED),
            name: self.get_string(node, shapes::XML_NAME),
            namespace: self.get_string(node, shapes::XML_NAMESPACE),
            prefix: self.get_string(node, shapes::XML_PREFIX),
        }
    }

    pub fn example(&self, node: &JsonValue) -> ApiExample {
        use ns::document;
        let node = self.resolved(node);
        ApiExample {
            id: id_of(&node),
            types: self.read_types(&node),
            strict: self.get_bool(&node, document::STRICT).unwrap_or(false),
            name: self.get_string(&node, ns::core::NAME),
            display_name: self.get_string(&node, ns::core::DISPLAY_NAME),
            description: self.get_string(&node, ns::core::DESCRIPTION),
            value: self.get_string(&node, document::RAW),
            structured_value: self
                .get_object(&node, document::STRUCTURED_VALUE)
                .and_then(|value| self.unknown_data_node(value)),
            media_type: self.get_string(&node, ns::core::MEDIA_TYPE),
            location: self.get_string(&node, document::LOCATION),
            custom_domain_properties: self.custom_domain_properties(&node),
            source_maps: self.source_map(&node),
        }
    }

    // -- API structure -------------------------------------------------------

    pub fn api_summary(&self, api: &JsonValue) -> ApiSummary {
        ApiSummary {
            id: id_of(api),
            types: self.read_types(api),
            name: self.get_string(api, ns::core::NAME),
            description: self.get_string(api, ns::core::DESCRIPTION),
            version: self.get_string(api, ns::core::VERSION),
            terms_of_service: self.get_string(api, ns::core::TERMS_OF_SERVICE),
            provider: self
                .get_object(api, ns::core::PROVIDER)
                .map(|org| self.organization(org)),
            license: self
                .get_object(api, ns::core::LICENSE)
                .map(|license| self.license(license)),
            documentations: self
                .objects(api, ns::core::DOCUMENTATION)
                .into_iter()
                .map(|doc| self.documentation(doc))
                .collect(),
            schemes: self.strings(api, ns::api_contract::SCHEME),
            accepts: self.strings(api, ns::api_contract::ACCEPTS),
            content_type: self.strings(api, ns::api_contract::CONTENT_TYPE),
            tags: self
                .objects(api, ns::api_contract::TAG_KEY)
                .into_iter()
                .map(|tag| self.tag(tag))
                .collect(),
            custom_domain_properties: self.custom_domain_properties(api),
            source_maps: self.source_map(api),
        }
    }

    pub fn documentation(&self, node: &JsonValue) -> ApiDocumentation {
        ApiDocumentation {
            id: id_of(node),
            types: self.read_types(node),
            url: self.string_or_link(node, ns::core::URL),
            title: self.get_string(node, ns::core::TITLE),
            description: self.get_string(node, ns::core::DESCRIPTION),
            custom_domain_properties: self.custom_domain_properties(node),
        }
    }

    pub fn organization(&self, node: &JsonValue) -> ApiOrganization {
        ApiOrganization {
            id: id_of(node),
            types: self.read_types(node),
            url: self.string_or_link(node, ns::core::URL),
            name: self.get_string(node, ns::core::NAME),
            email: self.get_string(node, ns::core::EMAIL),
            custom_domain_properties: self.custom_domain_properties(node),
        }
    }

    pub fn license(&self, node: &JsonValue) -> ApiLicense {
        ApiLicense {
            id: id_of(node),
            types: self.read_types(node),
            url: self.string_or_link(node, ns::core::URL),
            name: self.get_string(node, ns::core::NAME),
            custom_domain_properties: self.custom_domain_properties(node),
        }
    }

    pub fn tag(&self, node: &JsonValue) -> ApiTag {
        ApiTag {
            id: id_of(node),
            types: self.read_types(node),
            name: self.get_string(node, ns::core::NAME).unwrap_or_default(),
            description: self.get_string(node, ns::core::DESCRIPTION),
            custom_domain_properties: self.custom_domain_properties(node),
        }
    }

    pub fn server(&self, node: &JsonValue) -> ApiServer {
        use ns::api_contract;
        ApiServer {
            id: id_of(node),
            types: self.read_types(node),
            url: self.get_string(node, ns::core::URL_TEMPLATE).unwrap_or_default(),
            description: self.get_string(node, ns::core::DESCRIPTION),
            variables: self.parameters(node, api_contract::VARIABLE),
            protocol: self.get_string(node, api_contract::PROTOCOL),
            protocol_version: self.get_string(node, api_contract::PROTOCOL_VERSION),
            security: self.security_requirements(node),
            custom_domain_properties: self.custom_domain_properties(node),
            source_maps: self.source_map(node),
        }
    }

    fn servers(&self, node: &JsonValue) -> Vec<ApiServer> {
        self.objects(node, ns::api_contract::SERVER_KEY)
            .into_iter()
            .map(|server| self.server(server))
            .collect()
    }

    fn parameters(&self, node: &JsonValue, iri: &str) -> Vec<ApiParameter> {
        self.objects(node, iri)
            .into_iter()
            .map(|param| self.parameter(param))
            .collect()
    }

    fn payloads(&self, node: &JsonValue) -> Vec<ApiPayload> {
        self.objects(node, ns::api_contract::PAYLOAD_KEY)
            .into_iter()
            .map(|payload| self.payload(payload))
            .collect()
    }

    fn examples(&self, node: &JsonValue) -> Vec<ApiExample> {
        self.objects(node, ns::api_contract::EXAMPLES)
            .into_iter()
            .map(|example| self.example(example))
            .collect()
    }

    fn security_requirements(&self, node: &JsonValue) -> Vec<ApiSecurityRequirement> {
        self.objects(node, ns::security::SECURITY)
            .into_iter()
            .map(|requirement| self.security_requirement(requirement))
            .collect()
    }

    fn extends(&self, node: &JsonValue) -> Vec<ApiParametrizedDeclaration> {
        self.objects(node, ns::document::EXTENDS)
            .into_iter()
            .map(|declaration| self.parametrized_declaration(declaration))
            .collect()
    }

    pub fn end_point(&self, node: &JsonValue) -> ApiEndPoint {
        use ns::api_contract;
        ApiEndPoint {
            id: id_of(node),
            types: self.read_types(node),
            path: self.get_string(node, api_contract::PATH).unwrap_or_default(),
            name: self.get_string(node, ns::core::NAME),
            description: self.get_string(node, ns::core::DESCRIPTION),
            summary: self.get_string(node, ns::core::SUMMARY),
            operations: self
                .objects(node, api_contract::SUPPORTED_OPERATION)
                .into_iter()
                .map(|operation| self.operation(operation))
                .collect(),
            parameters: self.parameters(node, api_contract::PARAMETER_KEY),
            payloads: self.payloads(node),
            servers: self.servers(node),
            security: self.security_requirements(node),
            extends: self.extends(node),
            custom_domain_properties: self.custom_domain_properties(node),
            source_maps: self.source_map(node),
        }
    }

    pub fn operation(&self, node: &JsonValue) -> ApiOperation {
        use ns::api_contract;
        ApiOperation {
            id: id_of(node),
            types: self.read_types(node),
            method: self.get_string(node, api_contract::METHOD).unwrap_or_default(),
            name: self.get_string(node, ns::core::NAME),
            description: self.get_string(node, ns::core::DESCRIPTION),
            summary: self.get_string(node, api_contract::GUI_SUMMARY),
            deprecated: self.get_bool(node, ns::core::DEPRECATED).unwrap_or(false),
            operation_id: self.get_string(node, api_contract::OPERATION_ID),
            request: self
                .get_object(node, api_contract::EXPECTS)
                .map(|request| self.request(request)),
            responses: self
                .objects(node, api_contract::RETURNS)
                .into_iter()
                .map(|response| self.response(response))
                .collect(),
            callbacks: self
                .objects(node, api_contract::CALLBACK_KEY)
                .into_iter()
                .map(|callback| self.callback(callback))
                .collect(),
            servers: self.servers(node),
            security: self.security_requirements(node),
            tags: self
                .objects(node, api_contract::TAG_KEY)
                .into_iter()
                .map(|tag| self.tag(tag))
                .collect(),
            accepts: self.strings(node, api_contract::ACCEPTS),
            schemes: self.strings(node, api_contract::SCHEME),
            content_type: self.strings(node, api_contract::CONTENT_TYPE),
            extends: self.extends(node),
            custom_domain_properties: self.custom_domain_properties(node),
            source_maps: self.source_map(node),
        }
    }

    pub fn callback(&self, node: &JsonValue) -> ApiCallback {
        ApiCallback {
            id: id_of(node),
            types: self.read_types(node),
            name: self.get_string(node, ns::core::NAME),
            expression: self.get_string(node, ns::api_contract::EXPRESSION),
            endpoint: self
                .get_object(node, ns::api_contract::ENDPOINT)
                .map(|endpoint| Box::new(self.end_point(endpoint))),
            custom_domain_properties: self.custom_domain_properties(node),
        }
    }

    pub fn request(&self, node: &JsonValue) -> ApiRequest {
        use ns::api_contract;
        ApiRequest {
            id: id_of(node),
            types: self.read_types(node),
            description: self.get_string(node, ns::core::DESCRIPTION),
            required: self.get_bool(node, api_contract::REQUIRED).unwrap_or(false),
            query_parameters: self.parameters(node, api_contract::PARAMETER_KEY),
            headers: self.parameters(node, api_contract::HEADER),
            payloads: self.payloads(node),
            uri_parameters: self.parameters(node, api_contract::URI_PARAMETER),
            cookie_parameters: self.parameters(node, api_contract::COOKIE_PARAMETER),
            query_string: self
                .get_object(node, api_contract::QUERY_STRING)
                .map(|shape| self.unknown_shape(shape, ShapeOptions::default())),
            custom_domain_properties: self.custom_domain_properties(node),
            source_maps: self.source_map(node),
        }
    }

    pub fn response(&self, node: &JsonValue) -> ApiResponse {
        use ns::api_contract;
        let node = self.resolved(node);
        ApiResponse {
            id: id_of(&node),
            types: self.read_types(&node),
            name: self.get_string(&node, ns::core::NAME),
            description: self.get_string(&node, ns::core::DESCRIPTION),
            status_code: self.get_string(&node, api_contract::STATUS_CODE),
            headers: self.parameters(&node, api_contract::HEADER),
            payloads: self.payloads(&node),
            examples: self.examples(&node),
            links: self
                .objects(&node, api_contract::LINK)
                .into_iter()
                .map(|link| self.templated_link(link))
                .collect(),
            custom_domain_properties: self.custom_domain_properties(&node),
            source_maps: self.source_map(&node),
        }
    }

    pub fn templated_link(&self, node: &JsonValue) -> ApiTemplatedLink {
        use ns::api_contract;
        ApiTemplatedLink {
            id: id_of(node),
            types: self.read_types(node),
            name: self.get_string(node, ns::core::NAME),
            description: self.get_string(node, ns::core::DESCRIPTION),
            template: self.get_string(node, api_contract::TEMPLATE),
            operation_id: self.get_string(node, api_contract::OPERATION_ID),
            request_body: self.get_string(node, api_contract::REQUEST_BODY),
            mapping: self
                .objects(node, api_contract::MAPPING)
                .into_iter()
                .map(|mapping| self.iri_template_mapping(mapping))
                .collect(),
            server: self
                .get_object(node, api_contract::SERVER_KEY)
                .map(|server| self.server(server)),
            custom_domain_properties: self.custom_domain_properties(node),
        }
    }

    pub fn iri_template_mapping(&self, node: &JsonValue) -> ApiIriTemplateMapping {
        ApiIriTemplateMapping {
            id: id_of(node),
            types: self.read_types(node),
            template_variable: self.get_string(node, ns::api_contract::TEMPLATE_VARIABLE),
            link_expression: self.get_string(node, ns::api_contract::LINK_EXPRESSION),
            custom_domain_properties: self.custom_domain_properties(node),
        }
    }

    /// Payload with its schema; schema examples tracked to another payload
    /// are left out.
    pub fn payload(&self, node: &JsonValue) -> ApiPayload {
        let node = self.resolved(node);
        let id = id_of(&node);
        let schema = self
            .get_object(&node, ns::shapes::SCHEMA)
            .map(|shape| self.unknown_shape(shape, ShapeOptions::tracked(&id)));
        ApiPayload {
            types: self.read_types(&node),
            name: self.get_string(&node, ns::core::NAME),
            media_type: self.get_string(&node, ns::core::MEDIA_TYPE),
            schema,
            examples: self.examples(&node),
            custom_domain_properties: self.custom_domain_properties(&node),
            source_maps: self.source_map(&node),
            id,
        }
    }

    pub fn parameter(&self, node: &JsonValue) -> ApiParameter {
        use ns::api_contract;
        let node = self.resolved(node);
        let id = id_of(&node);
        let schema = self
            .get_object(&node, ns::shapes::SCHEMA)
            .map(|shape| self.unknown_shape(shape, ShapeOptions::tracked(&id)));
        let flag = |iri: &str| self.get_bool(&node, iri).unwrap_or(false);
        ApiParameter {
            types: self.read_types(&node),
            name: self.get_string(&node, ns::core::NAME),
            param_name: self.get_string(&node, api_contract::PARAM_NAME),
            description: self.get_string(&node, ns::core::DESCRIPTION),
            required: flag(api_contract::REQUIRED),
            allow_empty_value: flag(api_contract::ALLOW_EMPTY_VALUE),
            deprecated: flag(ns::document::DEPRECATED),
            explode: flag(api_contract::EXPLODE),
            allow_reserved: flag(api_contract::ALLOW_RESERVED),
            style: self.get_string(&node, api_contract::STYLE),
            binding: self.get_string(&node, api_contract::BINDING),
            schema,
            payloads: self.payloads(&node),
            examples: self.examples(&node),
            custom_domain_properties: self.custom_domain_properties(&node),
            source_maps: self.source_map(&node),
            id,
        }
    }

    pub fn parametrized_declaration(&self, node: &JsonValue) -> ApiParametrizedDeclaration {
        ApiParametrizedDeclaration {
            id: id_of(node),
            types: self.read_types(node),
            name: self.get_string(node, ns::core::NAME),
            target: self
                .get_object(node, ns::document::TARGET)
                .map(|target| self.abstract_declaration(target)),
            variables: self
                .objects(node, ns::document::VARIABLE)
                .into_iter()
                .map(|variable| self.variable_value(variable))
                .collect(),
            custom_domain_properties: self.custom_domain_properties(node),
        }
    }

    pub fn variable_value(&self, node: &JsonValue) -> ApiVariableValue {
        ApiVariableValue {
            id: id_of(node),
            types: self.read_types(node),
            name: self.get_string(node, ns::core::NAME),
            value: self
                .get_object(node, ns::document::VALUE)
                .and_then(|value| self.unknown_data_node(value)),
        }
    }

    pub fn abstract_declaration(&self, node: &JsonValue) -> ApiAbstractDeclaration {
        let node = self.resolved(node);
        ApiAbstractDeclaration {
            id: id_of(&node),
            types: self.read_types(&node),
            name: self.get_string(&node, ns::core::NAME),
            description: self.get_string(&node, ns::core::DESCRIPTION),
            data_node: self
                .get_object(&node, ns::document::DATA_NODE)
                .and_then(|value| self.unknown_data_node(value)),
            variables: self.strings(&node, ns::document::VARIABLE),
            custom_domain_properties: self.custom_domain_properties(&node),
        }
    }

    // -- security ------------------------------------------------------------

    pub fn security_requirement(&self, node: &JsonValue) -> ApiSecurityRequirement {
        ApiSecurityRequirement {
            id: id_of(node),
            types: self.read_types(node),
            name: self.get_string(node, ns::core::NAME),
            schemes: self
                .objects(node, ns::security::SCHEMES)
                .into_iter()
                .map(|scheme| self.parametrized_security_scheme(scheme))
                .collect(),
            custom_domain_properties: self.custom_domain_properties(node),
            source_maps: self.source_map(node),
        }
    }

    pub fn parametrized_security_scheme(&self, node: &JsonValue) -> ApiParametrizedSecurityScheme {
        use ns::security;
        ApiParametrizedSecurityScheme {
            id: id_of(node),
            types: self.read_types(node),
            name: self.get_string(node, ns::core::NAME),
            settings: self
                .get_object(node, security::SETTINGS_KEY)
                .map(|settings| self.security_settings(settings)),
            scheme: self
                .get_object(node, security::SCHEME)
                .map(|scheme| self.security_scheme(scheme)),
            custom_domain_properties: self.custom_domain_properties(node),
            source_maps: self.source_map(node),
        }
    }

    pub fn security_scheme(&self, node: &JsonValue) -> ApiSecurityScheme {
        use ns::api_contract;
        let node = self.resolved(node);
        ApiSecurityScheme {
            id: id_of(&node),
            types: self.read_types(&node),
            name: self.get_string(&node, ns::core::NAME),
            scheme_type: self.get_string(&node, ns::security::TYPE),
            display_name: self.get_string(&node, ns::core::DISPLAY_NAME),
            description: self.get_string(&node, ns::core::DESCRIPTION),
            settings: self
                .get_object(&node, ns::security::SETTINGS_KEY)
                .map(|settings| self.security_settings(settings)),
            headers: self.parameters(&node, api_contract::HEADER),
            query_parameters: self.parameters(&node, api_contract::PARAMETER_KEY),
            responses: self
                .objects(&node, api_contract::RESPONSE_KEY)
                .into_iter()
                .map(|response| self.response(response))
                .collect(),
            query_string: self
                .get_object(&node, api_contract::QUERY_STRING)
                .map(|shape| self.unknown_shape(shape, ShapeOptions::default())),
            custom_domain_properties: self.custom_domain_properties(&node),
            source_maps: self.source_map(&node),
        }
    }

    fn settings_base(&self, node: &JsonValue) -> ApiSecuritySettings {
        ApiSecuritySettings {
            id: id_of(node),
            types: self.read_types(node),
            additional_properties: self
                .get_object(node, ns::security::ADDITIONAL_PROPERTIES)
                .and_then(|value| self.unknown_data_node(value)),
            custom_domain_properties: self.custom_domain_properties(node),
        }
    }

    /// Settings projected by their settings type.
    pub fn security_settings(&self, node: &JsonValue) -> ApiSecuritySettingsUnion {
        use ns::security;
        let base = self.settings_base(node);
        if self.has_type(node, security::OAUTH1_SETTINGS) {
            ApiSecuritySettingsUnion::OAuth1(ApiSecurityOAuth1Settings {
                base,
                request_token_uri: self.get_string(node, security::REQUEST_TOKEN_URI),
                authorization_uri: self.get_string(node, security::AUTHORIZATION_URI),
                token_credentials_uri: self.get_string(node, security::TOKEN_CREDENTIALS_URI),
                signatures: self.strings(node, security::SIGNATURE),
            })
        } else if self.has_type(node, security::OAUTH2_SETTINGS) {
            ApiSecuritySettingsUnion::OAuth2(ApiSecurityOAuth2Settings {
                base,
                authorization_grants: self.strings(node, security::AUTHORIZATION_GRANT),
                flows: self
                    .objects(node, security::FLOWS)
                    .into_iter()
                    .map(|flow| self.oauth2_flow(flow))
                    .collect(),
            })
        } else if self.has_type(node, security::API_KEY_SETTINGS) {
            ApiSecuritySettingsUnion::ApiKey(ApiSecurityApiKeySettings {
                base,
                name: self.get_string(node, ns::core::NAME),
                location: self.get_string(node, security::IN),
            })
        } else if self.has_type(node, security::HTTP_SETTINGS) {
            ApiSecuritySettingsUnion::Http(ApiSecurityHttpSettings {
                base,
                scheme: self.get_string(node, security::SCHEME),
                bearer_format: self.get_string(node, security::BEARER_FORMAT),
            })
        } else if self.has_type(node, security::OPEN_ID_CONNECT_SETTINGS) {
            ApiSecuritySettingsUnion::OpenIdConnect(ApiSecurityOpenIdConnectSettings {
                base,
                url: self.get_string(node, security::OPEN_ID_CONNECT_URL),
            })
        } else {
            ApiSecuritySettingsUnion::Generic(base)
        }
    }

    pub fn oauth2_flow(&self, node: &JsonValue) -> ApiOAuth2Flow {
        use ns::security;
        ApiOAuth2Flow {
            id: id_of(node),
            types: self.read_types(node),
            authorization_uri: self.get_string(node, security::AUTHORIZATION_URI),
            access_token_uri: self.get_string(node, security::ACCESS_TOKEN_URI),
            flow: self.get_string(node, security::FLOW),
            refresh_uri: self.get_string(node, security::REFRESH_URI),
            scopes: self
                .objects(node, security::SCOPE_KEY)
                .into_iter()
                .map(|scope| self.security_scope(scope))
                .collect(),
            custom_domain_properties: self.custom_domain_properties(node),
        }
    }

    pub fn security_scope(&self, node: &JsonValue) -> ApiSecurityScope {
        ApiSecurityScope {
            id: id_of(node),
            types: self.read_types(node),
            name: self.get_string(node, ns::core::NAME),
            description: self.get_string(node, ns::core::DESCRIPTION),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with_declares(declares: JsonValue) -> AmfHelper {
        AmfHelper::with_graph(json!({
            "@context": {
                "@base": "amf://id",
                "doc": "http://a.ml/vocabularies/document#",
                "core": "http://a.ml/vocabularies/core#",
                "apiContract": "http://a.ml/vocabularies/apiContract#",
                "shacl": "http://www.w3.org/ns/shacl#",
                "shapes": "http://a.ml/vocabularies/shapes#",
                "data": "http://a.ml/vocabularies/data#",
                "sourcemaps": "http://a.ml/vocabularies/document-source-maps#",
                "xsd": "http://www.w3.org/2001/XMLSchema#",
                "rdfs": "http://www.w3.org/2000/01/rdf-schema#"
            },
            "@id": "",
            "@type": ["doc:Document"],
            "doc:declares": declares
        }))
    }

    #[test]
    fn dispatches_on_shape_type() {
        let helper = with_declares(json!([]));
        let serializer = AmfSerializer::new(&helper);
        let cases = [
            ("shapes:ScalarShape", ShapeKind::Scalar),
            ("shacl:NodeShape", ShapeKind::Node),
            ("shapes:UnionShape", ShapeKind::Union),
            ("shapes:FileShape", ShapeKind::File),
            ("shapes:SchemaShape", ShapeKind::Schema),
            ("shapes:TupleShape", ShapeKind::Tuple),
            ("shapes:ArrayShape", ShapeKind::Array),
            ("shapes:MatrixShape", ShapeKind::Array),
            ("shapes:RecursiveShape", ShapeKind::Recursive),
            ("shapes:AnyShape", ShapeKind::Any),
        ];
        for (ty, kind) in cases {
            let node = json!({"@id": format!("#/{ty}"), "@type": [ty, "shacl:Shape"]});
            let shape = serializer.unknown_shape(&node, ShapeOptions::default());
            assert_eq!(shape.kind(), kind, "{ty}");
        }
    }

    #[test]
    fn tuple_wins_over_array() {
        let helper = with_declares(json!([]));
        let serializer = AmfSerializer::new(&helper);
        let node = json!({
            "@id": "#/tuple",
            "@type": ["shapes:ArrayShape", "shapes:TupleShape", "shapes:AnyShape"],
            "shapes:items": [{
                "@id": "#/tuple/items",
                "@type": ["rdfs:Seq"],
                "rdfs:_2": [{"@id": "#/b", "@type": ["shapes:ScalarShape"], "shacl:name": "b"}],
                "rdfs:_1": [{"@id": "#/a", "@type": ["shapes:ScalarShape"], "shacl:name": "a"}]
            }]
        });
        let ApiShapeUnion::Tuple(tuple) = serializer.unknown_shape(&node, ShapeOptions::default()) else {
            panic!("expected a tuple shape");
        };
        let names: Vec<_> = tuple.items.iter().filter_map(|item| item.label()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn untyped_nodes_are_any_shapes() {
        let helper = with_declares(json!([]));
        let serializer = AmfSerializer::new(&helper);
        let shape = serializer.unknown_shape(&json!({"@id": "#/x"}), ShapeOptions::default());
        assert_eq!(shape.kind(), ShapeKind::Any);
    }

    #[test]
    fn scalar_shape_reads_facets() {
        let helper = with_declares(json!([]));
        let serializer = AmfSerializer::new(&helper);
        let node = json!({
            "@id": "#/age",
            "@type": ["shapes:ScalarShape"],
            "shacl:name": "age",
            "shacl:datatype": [{"@id": "xsd:integer"}],
            "shacl:minExclusive": 0,
            "shacl:maxInclusive": 150,
            "shacl:in": [{
                "@id": "#/age/in",
                "@type": ["rdfs:Seq"],
                "rdfs:_1": [{"@id": "#/age/in/1", "@type": ["data:Scalar"], "data:value": "1"}]
            }]
        });
        let scalar = serializer.scalar_shape(&node, ShapeOptions::default());
        assert_eq!(scalar.data_type.as_deref(), Some(ns::xml_schema::INTEGER));
        assert_eq!(scalar.minimum, Some(0.0));
        assert_eq!(scalar.exclusive_minimum, Some(true));
        assert_eq!(scalar.maximum, Some(150.0));
        assert_eq!(scalar.exclusive_maximum, None);
        assert_eq!(scalar.base.shape.values.len(), 1);
        assert_eq!(scalar.base.shape.values[0].as_scalar_value(), Some("1"));
    }

    fn tracked_example(id: &str, tracked: Option<&str>) -> JsonValue {
        match tracked {
            Some(value) => json!({
                "@id": id,
                "@type": ["apiContract:Example"],
                "sourcemaps:sources": [{
                    "sourcemaps:tracked-element": [{
                        "sourcemaps:element": "amf://id",
                        "sourcemaps:value": value
                    }]
                }]
            }),
            None => json!({"@id": id, "@type": ["apiContract:Example"]}),
        }
    }

    #[test]
    fn partitions_tracked_examples() {
        let helper = with_declares(json!([]));
        let serializer = AmfSerializer::new(&helper);
        let own = tracked_example("#/own", Some("amf://id#/payload,#/other"));
        let other = tracked_example("#/other-ex", Some("#/another-payload"));
        let untracked = tracked_example("#/plain", None);
        let all = vec![&own, &other, &untracked];

        let tracked = serializer.filter_tracked_examples(all.clone(), "#/payload");
        let ids: Vec<_> = tracked.iter().map(|ex| ex["@id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["#/own", "#/plain"]);

        let non_tracked = serializer.filter_non_tracked_examples(all);
        let ids: Vec<_> = non_tracked.iter().map(|ex| ex["@id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["#/plain"]);
    }

    #[test]
    fn tracked_ids_are_split_on_commas_verbatim() {
        let helper = with_declares(json!([]));
        let serializer = AmfSerializer::new(&helper);
        let exact = tracked_example("#/exact", Some("#/a,#/payload"));
        let spaced = tracked_example("#/spaced", Some("#/a, #/payload"));

        let tracked = serializer.filter_tracked_examples(vec![&exact, &spaced], "#/payload");
        let ids: Vec<_> = tracked.iter().map(|ex| ex["@id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["#/exact"]);
    }

    #[test]
    fn declared_example_is_read_through_a_reference() {
        let helper = with_declares(json!([{
            "@id": "#/declares/examples/cat",
            "@type": ["apiContract:Example"],
            "core:name": "cat",
            "doc:raw": "{\"name\": \"Tom\"}"
        }]));
        let serializer = AmfSerializer::new(&helper);
        let example = serializer.example(&json!({"@id": "#/declares/examples/cat"}));
        assert_eq!(example.name.as_deref(), Some("cat"));
        assert_eq!(example.value.as_deref(), Some("{\"name\": \"Tom\"}"));
    }

    #[test]
    fn data_nodes_carry_source_maps() {
        let helper = with_declares(json!([]));
        let serializer = AmfSerializer::new(&helper);
        let node = json!({
            "@id": "#/data/limit",
            "@type": ["data:Scalar"],
            "data:value": "60",
            "sourcemaps:sources": [{
                "@id": "#/data/limit/source-map",
                "sourcemaps:lexical": [{
                    "sourcemaps:element": "data:value",
                    "sourcemaps:value": "[(3,2)-(3,10)]"
                }]
            }]
        });
        let Some(ApiDataNodeUnion::Scalar(scalar)) = serializer.unknown_data_node(&node) else {
            panic!("expected a scalar node");
        };
        let source_maps = scalar.base.source_maps.expect("source maps");
        assert_eq!(source_maps.lexical.len(), 1);
        assert_eq!(source_maps.lexical[0].value, "[(3,2)-(3,10)]");
    }

    #[test]
    fn payload_schema_keeps_examples_tracked_to_the_payload() {
        let helper = with_declares(json!([]));
        let serializer = AmfSerializer::new(&helper);
        let payload = json!({
            "@id": "#/payload",
            "@type": ["apiContract:Payload"],
            "core:mediaType": "application/json",
            "shapes:schema": {
                "@id": "#/payload/schema",
                "@type": ["shacl:NodeShape"],
                "apiContract:examples": [
                    tracked_example("#/own", Some("#/payload")),
                    tracked_example("#/foreign", Some("#/elsewhere")),
                ]
            }
        });
        let payload = serializer.payload(&payload);
        let schema = payload.schema.unwrap();
        let ids: Vec<_> = schema.examples().iter().map(|ex| ex.id.as_str()).collect();
        assert_eq!(ids, ["#/own"]);
        assert_eq!(payload.media_type.as_deref(), Some("application/json"));
    }

    #[test]
    fn required_parameter_without_schema() {
        let helper = with_declares(json!([]));
        let serializer = AmfSerializer::new(&helper);
        let node = json!({
            "@id": "#/param",
            "@type": ["apiContract:Parameter"],
            "core:name": "limit",
            "apiContract:required": true
        });
        let param = serializer.parameter(&node);
        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json["required"], true);
        assert_eq!(json["examples"], json!([]));
        assert_eq!(json["payloads"], json!([]));
        assert!(json.get("schema").is_none());
        assert_eq!(json["name"], "limit");
    }

    #[test]
    fn recursive_schema_serializes_finitely() {
        let helper = with_declares(json!([{
            "@id": "#/declares/Category",
            "@type": ["shacl:NodeShape", "shapes:AnyShape"],
            "shacl:name": "Category",
            "shacl:property": [{
                "@id": "#/declares/Category/property/parent",
                "@type": ["shacl:PropertyShape"],
                "shacl:name": "parent",
                "shacl:path": [{"@id": "http://a.ml/vocabularies/data#parent"}],
                "shapes:range": {
                    "@id": "#/declares/Category/property/parent/link",
                    "@type": ["shacl:NodeShape"],
                    "doc:link-target": [{"@id": "#/declares/Category"}],
                    "doc:link-label": "Category"
                }
            }]
        }]));
        let serializer = AmfSerializer::new(&helper);
        let declared = helper.find_amf_type("#/declares/Category").unwrap();

        let ApiShapeUnion::Node(category) = serializer.unknown_shape(declared, ShapeOptions::default()) else {
            panic!("expected a node shape");
        };
        let parent = &category.properties[0];
        assert_eq!(parent.shape.name.as_deref(), Some("parent"));
        let Some(range) = parent.range.as_deref() else {
            panic!("property has no range");
        };
        let ApiShapeUnion::Recursive(recursive) = range else {
            panic!("expected a recursive shape, got {:?}", range.kind());
        };
        assert_eq!(recursive.fix_point.as_deref(), Some("#/declares/Category"));
        assert!(serde_json::to_string(&category).is_ok());
    }

    #[test]
    fn linked_shapes_keep_their_label() {
        let helper = with_declares(json!([{
            "@id": "#/declares/Id",
            "@type": ["shapes:ScalarShape"],
            "shacl:name": "Id",
            "shacl:datatype": [{"@id": "http://www.w3.org/2001/XMLSchema#string"}]
        }]));
        let serializer = AmfSerializer::new(&helper);
        let link = json!({
            "@id": "#/link",
            "@type": ["shapes:AnyShape"],
            "doc:link-target": [{"@id": "#/declares/Id"}],
            "doc:link-label": "IdRef"
        });
        let ApiShapeUnion::Scalar(scalar) = serializer.unknown_shape(&link, ShapeOptions::default()) else {
            panic!("expected the link target's kind");
        };
        assert_eq!(scalar.base.shape.link_label.as_deref(), Some("IdRef"));
        assert_eq!(scalar.base.shape.name.as_deref(), Some("Id"));
        assert_eq!(scalar.data_type.as_deref(), Some(ns::xml_schema::STRING));
    }

    #[test]
    fn reads_object_data_nodes_and_annotations() {
        let helper = with_declares(json!([]));
        let serializer = AmfSerializer::new(&helper);
        let node = json!({
            "@id": "#/op",
            "@type": ["apiContract:Operation"],
            "apiContract:method": "post",
            "doc:customDomainProperties": [{"@id": "#/annotations/rateLimit"}],
            "#/annotations/rateLimit": {
                "@id": "#/op/rateLimit",
                "@type": ["data:Object"],
                "core:extensionName": "rateLimit",
                "data:perMinute": {"@id": "#/op/rateLimit/perMinute", "@type": ["data:Scalar"], "data:value": "60"}
            }
        });
        let op = serializer.operation(&node);
        assert_eq!(op.method, "post");
        assert!(!op.deprecated);
        assert_eq!(op.custom_domain_properties.len(), 1);
        let annotation = &op.custom_domain_properties[0];
        assert_eq!(annotation.name, "rateLimit");
        let ApiDataNodeUnion::Object(object) = &annotation.extension else {
            panic!("expected an object node");
        };
        assert_eq!(object.properties["perMinute"].as_scalar_value(), Some("60"));
    }

    #[test]
    fn dispatches_security_settings() {
        let helper = with_declares(json!([]));
        let serializer = AmfSerializer::new(&helper);
        let scheme = json!({
            "@id": "#/scheme",
            "@type": ["http://a.ml/vocabularies/security#SecurityScheme"],
            "http://a.ml/vocabularies/security#type": "OAuth 2.0",
            "http://a.ml/vocabularies/security#settings": {
                "@id": "#/scheme/settings",
                "@type": ["http://a.ml/vocabularies/security#OAuth2Settings"],
                "http://a.ml/vocabularies/security#authorizationGrant": ["authorization_code"],
                "http://a.ml/vocabularies/security#flows": [{
                    "@id": "#/scheme/settings/flow",
                    "http://a.ml/vocabularies/security#flow": "authorizationCode",
                    "http://a.ml/vocabularies/security#scope": [
                        {"@id": "#/scope/read", "core:name": "read"}
                    ]
                }]
            }
        });
        let scheme = serializer.security_scheme(&scheme);
        assert_eq!(scheme.scheme_type.as_deref(), Some("OAuth 2.0"));
        let Some(ApiSecuritySettingsUnion::OAuth2(settings)) = scheme.settings else {
            panic!("expected OAuth 2 settings");
        };
        assert_eq!(settings.authorization_grants, ["authorization_code"]);
        assert_eq!(settings.flows[0].flow.as_deref(), Some("authorizationCode"));
        assert_eq!(settings.flows[0].scopes[0].name.as_deref(), Some("read"));
    }
}
