//! Access to AMF graph models
//!
//! [`GraphReader`] unwraps the JSON-LD conventions every AMF node follows
//! (values may be singular or arrays, literals may be wrapped in `@value`,
//! keys may be compacted). [`AmfHelper`] owns a loaded document and adds the
//! structural queries: declarations, references, link resolution and the
//! API / endpoint / operation / server lookups.

use crate::context::{AmfContext, KeyCache};
use crate::expand::{expand_flattened, is_expanded};
use crate::ns;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;
use std::io;

/// Marker set on shapes that went through [`AmfHelper::resolve`].
pub const RESOLVED_MARKER: &str = "__apicResolved";

/// Whether a node id refers to `id`.
///
/// AMF writes the same id either with the `amf://id` base or without it, so a
/// candidate matches the id itself or the id with that prefix removed.
pub fn ids_match(candidate: &str, id: &str) -> bool {
    candidate == id || id.strip_prefix(ns::AMF_ID_BASE) == Some(candidate)
}

fn node_id(node: &JsonValue) -> Option<&str> {
    node.get("@id").and_then(JsonValue::as_str)
}

/// Id of a bare `{"@id": ...}` reference.
fn reference_id(value: &JsonValue) -> Option<&str> {
    match value {
        JsonValue::Object(map) if map.len() == 1 => node_id(value),
        _ => None,
    }
}

/// Streams serialized JSON into a hasher.
struct HashWriter<'h>(&'h mut DefaultHasher);

impl io::Write for HashWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Hasher::write(self.0, buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Hash of a document's serialized form.
fn fingerprint(value: &JsonValue) -> u64 {
    let mut hasher = DefaultHasher::new();
    // writing into a hasher never fails
    let _ = serde_json::to_writer(HashWriter(&mut hasher), value);
    hasher.finish()
}

fn node_matches(node: &JsonValue, id: &str) -> bool {
    node_id(node).is_some_and(|candidate| ids_match(candidate, id))
}

fn first(value: &JsonValue) -> Option<&JsonValue> {
    match value {
        JsonValue::Array(items) => items.first(),
        other => Some(other),
    }
}

fn as_list(value: &JsonValue) -> Vec<&JsonValue> {
    match value {
        JsonValue::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

fn scalar(value: &JsonValue) -> Option<&JsonValue> {
    match value {
        JsonValue::Null => None,
        JsonValue::Object(map) => map.get("@value").filter(|v| !v.is_null()),
        other => Some(other),
    }
}

fn scalar_to_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Context-aware accessors over JSON-LD nodes.
///
/// Implementors only decide how a full vocabulary IRI maps to the key used by
/// the document being read. Every accessor takes full IRIs and returns `None`
/// for absent data; none of them fail.
pub trait GraphReader {
    /// Key under which `iri` is stored in the document being read.
    fn key(&self, iri: &str) -> String;

    /// Full IRI for a (possibly compacted) key such as a `@type` entry.
    fn expand_key(&self, key: &str) -> String;

    /// `@type` entries of a node as full IRIs.
    fn read_types(&self, node: &JsonValue) -> Vec<String> {
        let Some(node) = first(node) else {
            return Vec::new();
        };
        match node.get("@type") {
            Some(types) => as_list(types)
                .into_iter()
                .filter_map(JsonValue::as_str)
                .map(|ty| self.expand_key(ty))
                .collect(),
            None => Vec::new(),
        }
    }

    fn has_type(&self, node: &JsonValue, iri: &str) -> bool {
        let Some(node) = first(node) else {
            return false;
        };
        let Some(types) = node.get("@type") else {
            return false;
        };
        let key = self.key(iri);
        as_list(types)
            .into_iter()
            .filter_map(JsonValue::as_str)
            .any(|ty| ty == key || ty == iri)
    }

    fn has_property(&self, node: &JsonValue, iri: &str) -> bool {
        first(node).is_some_and(|node| node.get(self.key(iri)).is_some())
    }

    /// First scalar stored under `iri`, with one level of array and one level
    /// of `@value` unwrapped. Falsy scalars (`0`, `false`, `""`) are returned.
    fn get_value<'v>(&self, node: &'v JsonValue, iri: &str) -> Option<&'v JsonValue> {
        let data = first(node)?.get(self.key(iri))?;
        scalar(first(data)?)
    }

    fn get_string(&self, node: &JsonValue, iri: &str) -> Option<String> {
        self.get_value(node, iri).and_then(scalar_to_string)
    }

    fn get_bool(&self, node: &JsonValue, iri: &str) -> Option<bool> {
        match self.get_value(node, iri)? {
            JsonValue::Bool(b) => Some(*b),
            JsonValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    fn get_f64(&self, node: &JsonValue, iri: &str) -> Option<f64> {
        match self.get_value(node, iri)? {
            JsonValue::Number(n) => n.as_f64(),
            JsonValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    fn get_i64(&self, node: &JsonValue, iri: &str) -> Option<i64> {
        match self.get_value(node, iri)? {
            JsonValue::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            JsonValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    fn get_u64(&self, node: &JsonValue, iri: &str) -> Option<u64> {
        self.get_i64(node, iri).and_then(|v| u64::try_from(v).ok())
    }

    /// Every value stored under `iri`, `@value`-unwrapped.
    fn get_value_array<'v>(&self, node: &'v JsonValue, iri: &str) -> Option<Vec<&'v JsonValue>> {
        let data = first(node)?.get(self.key(iri))?;
        Some(
            as_list(data)
                .into_iter()
                .map(|item| item.get("@value").unwrap_or(item))
                .collect(),
        )
    }

    fn get_string_array(&self, node: &JsonValue, iri: &str) -> Option<Vec<String>> {
        self.get_value_array(node, iri)
            .map(|items| items.into_iter().filter_map(scalar_to_string).collect())
    }

    /// `@id` of the first node stored under `iri`.
    fn get_link_value<'v>(&self, node: &'v JsonValue, iri: &str) -> Option<&'v str> {
        let data = first(node)?.get(self.key(iri))?;
        node_id(first(data)?)
    }

    fn get_link_values<'v>(&self, node: &'v JsonValue, iri: &str) -> Option<Vec<&'v str>> {
        let data = first(node)?.get(self.key(iri))?;
        Some(as_list(data).into_iter().filter_map(node_id).collect())
    }

    /// Values under `iri`, always as a list.
    fn compute_property_array<'v>(
        &self,
        node: &'v JsonValue,
        iri: &str,
    ) -> Option<Vec<&'v JsonValue>> {
        let data = first(node)?.get(self.key(iri))?;
        Some(as_list(data))
    }

    /// First node under `iri`.
    fn get_object<'v>(&self, node: &'v JsonValue, iri: &str) -> Option<&'v JsonValue> {
        let data = first(node)?.get(self.key(iri))?;
        first(data).filter(|item| item.is_object())
    }
}

/// Which servers to look up; the most specific id given wins.
#[derive(Debug, Clone, Default)]
pub struct ServerQueryOptions {
    pub endpoint_id: Option<String>,
    pub method_id: Option<String>,
    /// Id of a single server, used by [`AmfHelper::get_server`]
    pub id: Option<String>,
}

impl ServerQueryOptions {
    pub fn for_endpoint(id: impl Into<String>) -> Self {
        Self {
            endpoint_id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn for_method(id: impl Into<String>) -> Self {
        Self {
            method_id: Some(id.into()),
            ..Self::default()
        }
    }
}

/// Owner of the current AMF document
#[derive(Debug, Default)]
pub struct AmfHelper {
    amf: Option<JsonValue>,
    /// Fingerprint of the value last passed to [`AmfHelper::set_amf`]
    source: Option<u64>,
    context: Option<AmfContext>,
    keys: KeyCache,
}

impl GraphReader for AmfHelper {
    fn key(&self, iri: &str) -> String {
        self.keys.resolve(iri, self.context.as_ref())
    }

    fn expand_key(&self, key: &str) -> String {
        match &self.context {
            Some(ctx) => ctx.expand(key),
            None => key.to_string(),
        }
    }
}

impl AmfHelper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_graph(value: JsonValue) -> Self {
        let mut helper = Self::new();
        helper.set_amf(value);
        helper
    }

    /// Load a document.
    ///
    /// A top-level array is unwrapped to its first element and flattened
    /// documents are inlined. Assigning the same source twice (compared by
    /// a hash of its serialized form) is a no-op; any other assignment clears
    /// the key cache.
    pub fn set_amf(&mut self, value: JsonValue) {
        let source = fingerprint(&value);
        if self.source == Some(source) {
            return;
        }
        let root = match value {
            JsonValue::Array(items) => items.into_iter().next().unwrap_or(JsonValue::Null),
            other => other,
        };
        let document = if is_expanded(&root) {
            root
        } else {
            expand_flattened(&root)
        };

        self.context = AmfContext::of_document(&document);
        self.keys.clear();
        log::debug!(
            "loaded AMF document {:?} ({} context)",
            node_id(&document),
            if self.context.is_some() { "compacted" } else { "expanded" }
        );
        self.amf = if document.is_null() { None } else { Some(document) };
        self.source = Some(source);
    }

    pub fn clear(&mut self) {
        self.amf = None;
        self.source = None;
        self.context = None;
        self.keys.clear();
    }

    pub fn amf(&self) -> Option<&JsonValue> {
        self.amf.as_ref()
    }

    pub fn context(&self) -> Option<&AmfContext> {
        self.context.as_ref()
    }

    pub fn key_cache(&self) -> &KeyCache {
        &self.keys
    }

    /// Key for `iri` in the current document (cached).
    pub fn amf_key(&self, iri: &str) -> String {
        self.key(iri)
    }

    /// Key for `iri` in an explicit context, bypassing the document cache.
    pub fn amf_key_in(&self, iri: &str, context: Option<&AmfContext>) -> String {
        match context {
            Some(ctx) => ctx.compact(iri).unwrap_or_else(|| iri.to_string()),
            None => self.amf_key(iri),
        }
    }

    // -- document structure ------------------------------------------------

    pub fn compute_encodes<'v>(&self, model: &'v JsonValue) -> Option<&'v JsonValue> {
        self.get_object(model, ns::document::ENCODES)
    }

    pub fn compute_declares<'v>(&self, model: &'v JsonValue) -> Option<Vec<&'v JsonValue>> {
        self.compute_property_array(model, ns::document::DECLARES)
    }

    pub fn compute_references<'v>(&self, model: &'v JsonValue) -> Option<Vec<&'v JsonValue>> {
        self.compute_property_array(model, ns::document::REFERENCES)
    }

    pub fn is_web_api(&self, node: &JsonValue) -> bool {
        self.has_type(node, ns::api_contract::WEB_API)
    }

    pub fn is_async_api(&self, node: &JsonValue) -> bool {
        self.has_type(node, ns::api_contract::ASYNC_API)
    }

    pub fn is_api(&self, node: &JsonValue) -> bool {
        self.has_type(node, ns::api_contract::API)
    }

    pub fn is_document(&self, model: &JsonValue) -> bool {
        self.has_type(model, ns::document::DOCUMENT)
    }

    /// A fragment unit that is not a full document.
    pub fn is_fragment(&self, model: &JsonValue) -> bool {
        self.has_type(model, ns::document::FRAGMENT) && !self.is_document(model)
    }

    /// A module (library) unit that is not a full document.
    pub fn is_library(&self, model: &JsonValue) -> bool {
        self.has_type(model, ns::document::MODULE) && !self.is_document(model)
    }

    /// The encoded WebAPI, if the model encodes one.
    pub fn compute_web_api<'v>(&self, model: &'v JsonValue) -> Option<&'v JsonValue> {
        self.compute_encodes(model)
            .filter(|encodes| self.is_web_api(encodes))
    }

    /// The encoded WebAPI or AsyncAPI.
    pub fn compute_api<'v>(&self, model: &'v JsonValue) -> Option<&'v JsonValue> {
        self.compute_encodes(model)
            .filter(|encodes| self.is_web_api(encodes) || self.is_async_api(encodes))
    }

    /// API node of the current document; the document itself when it is an API node.
    pub fn api(&self) -> Option<&JsonValue> {
        let amf = self.amf()?;
        self.compute_api(amf)
            .or_else(|| (self.is_web_api(amf) || self.is_async_api(amf)).then_some(amf))
    }

    pub fn compute_documentations<'v>(&self, api: &'v JsonValue) -> Option<Vec<&'v JsonValue>> {
        self.compute_property_array(api, ns::core::DOCUMENTATION)
    }

    // -- declarations and references ---------------------------------------

    /// Find a declared type by id: local declarations first, then every
    /// reference (encoded fragment or library declarations, recursively).
    pub fn find_amf_type(&self, id: &str) -> Option<&JsonValue> {
        let model = self.amf()?;
        self.find_amf_type_in(model, id)
    }

    fn find_amf_type_in<'v>(&self, model: &'v JsonValue, id: &str) -> Option<&'v JsonValue> {
        if let Some(found) = self
            .compute_declares(model)
            .and_then(|declares| declares.into_iter().find(|item| node_matches(item, id)))
        {
            return Some(found);
        }
        for reference in self.compute_references(model)? {
            if let Some(encoded) = self.compute_encodes(reference) {
                if node_matches(encoded, id) {
                    return Some(encoded);
                }
            }
            if let Some(found) = self.find_amf_type_in(reference, id) {
                return Some(found);
            }
        }
        None
    }

    /// Find a node that lives in one of the referenced units: the unit itself,
    /// what it encodes or what it declares.
    pub fn find_reference_object(&self, id: &str) -> Option<&JsonValue> {
        let references = self.compute_references(self.amf()?)?;
        self.find_in_references(references, id)
    }

    fn find_in_references<'v>(&self, references: Vec<&'v JsonValue>, id: &str) -> Option<&'v JsonValue> {
        for reference in references {
            if node_matches(reference, id) {
                return Some(reference);
            }
            if let Some(encoded) = self.compute_encodes(reference) {
                if node_matches(encoded, id) {
                    return Some(encoded);
                }
            }
            if let Some(found) = self
                .compute_declares(reference)
                .and_then(|declares| declares.into_iter().find(|item| node_matches(item, id)))
            {
                return Some(found);
            }
            if let Some(nested) = self.compute_references(reference) {
                if let Some(found) = self.find_in_references(nested, id) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Unresolved node a `link-target` points at: declarations, then the
    /// referenced units, then anywhere in the document.
    pub fn get_link_target(&self, id: &str) -> Option<&JsonValue> {
        let amf = self.amf()?;
        self.compute_declares(amf)
            .and_then(|declares| declares.into_iter().find(|item| node_matches(item, id)))
            .or_else(|| self.obtain_shape_from_references(amf, id))
            .or_else(|| self.find_by_id(id))
    }

    fn obtain_shape_from_references<'v>(&self, amf: &'v JsonValue, id: &str) -> Option<&'v JsonValue> {
        for reference in self.compute_references(amf)? {
            match self.compute_encodes(reference) {
                // a fragment encoding the shape
                Some(encoded) => {
                    if node_matches(encoded, id) {
                        return Some(encoded);
                    }
                }
                // a library declaring types
                None => {
                    if let Some(found) = self
                        .compute_declares(reference)
                        .and_then(|d| d.into_iter().find(|item| node_matches(item, id)))
                    {
                        return Some(found);
                    }
                }
            }
        }
        None
    }

    /// Node a `reference-id` points at: the unit encoded by a referenced fragment.
    pub fn get_reference_id(&self, id: &str) -> Option<&JsonValue> {
        let amf = self.amf()?;
        self.compute_references(amf)?
            .into_iter()
            .filter_map(|reference| self.compute_encodes(reference))
            .find(|encoded| node_matches(encoded, id))
    }

    /// Depth-first search for a full node (not a bare `{"@id"}` reference)
    /// with the given id anywhere in the document.
    pub fn find_by_id(&self, id: &str) -> Option<&JsonValue> {
        fn walk<'v>(value: &'v JsonValue, id: &str) -> Option<&'v JsonValue> {
            match value {
                JsonValue::Object(map) => {
                    if map.len() > 1 && node_matches(value, id) {
                        return Some(value);
                    }
                    map.iter()
                        .filter(|(key, _)| key.as_str() != "@context")
                        .find_map(|(_, item)| walk(item, id))
                }
                JsonValue::Array(items) => items.iter().find_map(|item| walk(item, id)),
                _ => None,
            }
        }
        walk(self.amf()?, id)
    }

    // -- link resolution ---------------------------------------------------

    /// Dereference a shape's `link-target` / `reference-id`.
    ///
    /// Returns a copy of `shape` with the target's properties merged over it
    /// (`@id` kept, `@type` lists joined, `sources` source maps merged) and
    /// every nested object resolved the same way. The copy carries
    /// [`RESOLVED_MARKER`]; resolving a marked value returns it unchanged. A
    /// shape linking to itself, or to a target already being resolved on the
    /// current path, is only marked.
    ///
    /// A bare `{"@id"}` reference is first replaced by the node it points at.
    /// Nested bare references are left alone; they are dereferenced when
    /// they are resolved in turn.
    pub fn resolve(&self, shape: &JsonValue) -> JsonValue {
        let mut visiting = HashSet::new();
        let shape = self.dereference(shape).unwrap_or(shape);
        self.resolve_with(shape, &mut visiting)
    }

    /// Node a bare `{"@id"}` reference points at. `None` when `value` is not
    /// a bare reference or its target is not in the document.
    pub fn dereference(&self, value: &JsonValue) -> Option<&JsonValue> {
        let id = reference_id(value)?;
        self.get_link_target(id)
            .filter(|node| reference_id(node).is_none())
            .or_else(|| self.find_by_id(id))
    }

    fn resolve_with(&self, shape: &JsonValue, visiting: &mut HashSet<String>) -> JsonValue {
        let JsonValue::Object(map) = shape else {
            return shape.clone();
        };
        if self.amf.is_none() || map.contains_key(RESOLVED_MARKER) || reference_id(shape).is_some() {
            return shape.clone();
        }
        let own_id = node_id(shape);

        let (target, target_id) =
            if let Some(link) = self.get_link_value(shape, ns::document::LINK_TARGET) {
                if Some(link) == own_id {
                    return marked(map.clone());
                }
                (self.get_link_target(link), link)
            } else if let Some(reference) = self.get_link_value(shape, ns::document::REFERENCE_ID) {
                if Some(reference) == own_id {
                    return marked(map.clone());
                }
                (self.get_reference_id(reference), reference)
            } else {
                (None, "")
            };

        let Some(target) = target else {
            let mut out = map.clone();
            self.resolve_children(&mut out, visiting);
            return marked(out);
        };

        if !visiting.insert(target_id.to_string()) {
            return marked(map.clone());
        }
        let resolved_target = self.resolve_with(target, visiting);
        let mut out = map.clone();
        if let JsonValue::Object(target_map) = resolved_target {
            self.merge_shapes(&mut out, target_map);
        }
        out.insert(RESOLVED_MARKER.to_string(), JsonValue::Bool(true));
        self.resolve_children(&mut out, visiting);
        visiting.remove(target_id);
        JsonValue::Object(out)
    }

    fn resolve_children(&self, out: &mut Map<String, JsonValue>, visiting: &mut HashSet<String>) {
        for (key, value) in out.iter_mut() {
            if key.starts_with('@') {
                continue;
            }
            match value {
                JsonValue::Array(items) => {
                    for item in items.iter_mut() {
                        if item.is_object() {
                            *item = self.resolve_with(item, visiting);
                        }
                    }
                }
                JsonValue::Object(_) => {
                    *value = self.resolve_with(value, visiting);
                }
                _ => {}
            }
        }
    }

    /// Merge a link target into the linking shape. Target keys win.
    fn merge_shapes(&self, shape: &mut Map<String, JsonValue>, mut target: Map<String, JsonValue>) {
        target.remove("@id");
        if let Some(target_types) = target.remove("@type") {
            let mut types: Vec<JsonValue> = shape
                .get("@type")
                .map(|t| as_list(t).into_iter().cloned().collect())
                .unwrap_or_default();
            for ty in as_list(&target_types) {
                if !types.contains(ty) {
                    types.push(ty.clone());
                }
            }
            shape.insert("@type".to_string(), JsonValue::Array(types));
        }

        let sources_key = self.key(ns::doc_source_maps::SOURCES);
        let merged_sources = if shape.contains_key(&sources_key) || target.contains_key(&sources_key) {
            Some(merge_source_maps(shape.get(&sources_key), target.get(&sources_key)))
        } else {
            None
        };
        for (key, value) in target {
            shape.insert(key, value);
        }
        if let Some(sources) = merged_sources {
            shape.insert(sources_key, sources);
        }
    }

    // -- API structure queries ---------------------------------------------

    pub fn compute_endpoints<'v>(&self, api: &'v JsonValue) -> Option<Vec<&'v JsonValue>> {
        self.compute_property_array(api, ns::api_contract::ENDPOINT)
    }

    pub fn compute_endpoint_model<'v>(&self, api: &'v JsonValue, id: &str) -> Option<&'v JsonValue> {
        self.compute_endpoints(api)?
            .into_iter()
            .find(|endpoint| node_matches(endpoint, id))
    }

    pub fn compute_endpoint_by_path<'v>(&self, api: &'v JsonValue, path: &str) -> Option<&'v JsonValue> {
        self.compute_endpoints(api)?
            .into_iter()
            .find(|endpoint| self.get_string(endpoint, ns::api_contract::PATH).as_deref() == Some(path))
    }

    pub fn compute_operations<'v>(&self, endpoint: &'v JsonValue) -> Option<Vec<&'v JsonValue>> {
        self.compute_property_array(endpoint, ns::api_contract::SUPPORTED_OPERATION)
    }

    /// Operation with the given id, searched across every endpoint.
    pub fn compute_method_model<'v>(&self, api: &'v JsonValue, id: &str) -> Option<&'v JsonValue> {
        self.compute_endpoints(api)?.into_iter().find_map(|endpoint| {
            self.compute_operations(endpoint)?
                .into_iter()
                .find(|operation| node_matches(operation, id))
        })
    }

    /// Endpoint that owns the operation with the given id.
    pub fn compute_method_endpoint<'v>(&self, api: &'v JsonValue, id: &str) -> Option<&'v JsonValue> {
        self.compute_endpoints(api)?.into_iter().find(|endpoint| {
            self.compute_operations(endpoint)
                .is_some_and(|ops| ops.into_iter().any(|operation| node_matches(operation, id)))
        })
    }

    pub fn compute_expects<'v>(&self, operation: &'v JsonValue) -> Option<&'v JsonValue> {
        self.get_object(operation, ns::api_contract::EXPECTS)
    }

    pub fn compute_returns<'v>(&self, operation: &'v JsonValue) -> Option<Vec<&'v JsonValue>> {
        self.compute_property_array(operation, ns::api_contract::RETURNS)
    }

    pub fn compute_security<'v>(&self, node: &'v JsonValue) -> Option<Vec<&'v JsonValue>> {
        self.compute_property_array(node, ns::security::SECURITY)
    }

    fn servers_of<'v>(&self, node: Option<&'v JsonValue>) -> Option<Vec<&'v JsonValue>> {
        self.compute_property_array(node?, ns::api_contract::SERVER_KEY)
            .filter(|servers| !servers.is_empty())
    }

    /// Servers that apply to the query: operation servers, else endpoint
    /// servers, else the API's own servers.
    pub fn get_servers(&self, options: &ServerQueryOptions) -> Option<Vec<&JsonValue>> {
        let api = self.api()?;
        let root = self.servers_of(Some(api));

        if let Some(method_id) = options.method_id.as_deref() {
            let operation = self.compute_method_model(api, method_id);
            let endpoint = match options.endpoint_id.as_deref() {
                Some(endpoint_id) => self.compute_endpoint_model(api, endpoint_id),
                None => self.compute_method_endpoint(api, method_id),
            };
            return self
                .servers_of(operation)
                .or_else(|| self.servers_of(endpoint))
                .or(root);
        }
        if let Some(endpoint_id) = options.endpoint_id.as_deref() {
            return self
                .servers_of(self.compute_endpoint_model(api, endpoint_id))
                .or(root);
        }
        root
    }

    /// One server out of [`Self::get_servers`], by `options.id`.
    pub fn get_server(&self, options: &ServerQueryOptions) -> Option<&JsonValue> {
        let id = options.id.as_deref()?;
        self.get_servers(options)?
            .into_iter()
            .find(|server| node_matches(server, id))
    }
}

fn marked(mut map: Map<String, JsonValue>) -> JsonValue {
    map.insert(RESOLVED_MARKER.to_string(), JsonValue::Bool(true));
    JsonValue::Object(map)
}

/// Merge two `sources` source map values into a single-entry list, keys of
/// `target` winning.
fn merge_source_maps(shape: Option<&JsonValue>, target: Option<&JsonValue>) -> JsonValue {
    let mut merged = Map::new();
    for sources in [shape, target].into_iter().flatten() {
        let entries = as_list(sources);
        if entries.len() > 1 {
            log::warn!(
                "source maps hold {} `sources` entries, merging all of them",
                entries.len()
            );
        }
        for entry in entries {
            if let JsonValue::Object(map) = entry {
                for (key, value) in map {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
    }
    JsonValue::Array(vec![JsonValue::Object(merged)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compact_context() -> JsonValue {
        json!({
            "@base": "amf://id",
            "doc": "http://a.ml/vocabularies/document#",
            "core": "http://a.ml/vocabularies/core#",
            "apiContract": "http://a.ml/vocabularies/apiContract#",
            "shacl": "http://www.w3.org/ns/shacl#",
            "shapes": "http://a.ml/vocabularies/shapes#",
            "sourcemaps": "http://a.ml/vocabularies/document-source-maps#"
        })
    }

    fn api_document(servers: JsonValue, endpoint_servers: JsonValue) -> JsonValue {
        json!({
            "@context": compact_context(),
            "@id": "",
            "@type": ["doc:Document", "doc:Fragment", "doc:Module", "doc:Unit"],
            "doc:encodes": {
                "@id": "#/web-api",
                "@type": ["apiContract:WebAPI", "doc:RootDomainElement"],
                "core:name": "Pets",
                "apiContract:server": servers,
                "apiContract:endpoint": [{
                    "@id": "#/web-api/end-points/%2Fpets",
                    "@type": ["apiContract:EndPoint"],
                    "apiContract:path": "/pets",
                    "apiContract:server": endpoint_servers,
                    "apiContract:supportedOperation": [{
                        "@id": "#/web-api/end-points/%2Fpets/get",
                        "@type": ["apiContract:Operation"],
                        "apiContract:method": "get"
                    }]
                }]
            }
        })
    }

    #[test]
    fn get_value_unwraps_arrays_and_value_objects() {
        let helper = AmfHelper::new();
        let node = json!({
            "http://a.ml/vocabularies/core#name": [{"@value": "Pets"}],
            "http://a.ml/vocabularies/apiContract#required": false,
            "http://a.ml/vocabularies/shapes#minCount": [{"@value": 0}],
            "http://a.ml/vocabularies/core#description": []
        });
        assert_eq!(
            helper.get_string(&node, ns::core::NAME).as_deref(),
            Some("Pets")
        );
        assert_eq!(helper.get_bool(&node, ns::api_contract::REQUIRED), Some(false));
        assert_eq!(helper.get_i64(&node, "http://a.ml/vocabularies/shapes#minCount"), Some(0));
        assert!(helper.get_value(&node, ns::core::DESCRIPTION).is_none());
        assert!(helper.get_value(&node, ns::core::VERSION).is_none());
    }

    #[test]
    fn value_array_and_links() {
        let helper = AmfHelper::new();
        let node = json!({
            "http://a.ml/vocabularies/apiContract#accepts": [{"@value": "application/json"}, "text/xml"],
            "http://a.ml/vocabularies/document#link-target": [{"@id": "#/declares/Pet"}],
            "http://a.ml/vocabularies/shapes#inherits": [{"@id": "a"}, {"@id": "b"}]
        });
        assert_eq!(
            helper.get_string_array(&node, ns::api_contract::ACCEPTS),
            Some(vec!["application/json".to_string(), "text/xml".to_string()])
        );
        assert_eq!(
            helper.get_link_value(&node, ns::document::LINK_TARGET),
            Some("#/declares/Pet")
        );
        assert_eq!(
            helper.get_link_values(&node, ns::shapes::INHERITS),
            Some(vec!["a", "b"])
        );
        assert!(helper.get_link_value(&node, ns::document::REFERENCE_ID).is_none());
    }

    #[test]
    fn has_type_uses_document_context() {
        let helper = AmfHelper::with_graph(api_document(json!([]), json!([])));
        let api = helper.api().unwrap();
        assert!(helper.has_type(api, ns::api_contract::WEB_API));
        assert!(!helper.has_type(api, ns::api_contract::ASYNC_API));
        assert!(helper.is_document(helper.amf().unwrap()));
        assert!(!helper.is_fragment(helper.amf().unwrap()));
    }

    #[test]
    fn key_resolution_is_cached_per_document() {
        let mut helper = AmfHelper::with_graph(api_document(json!([]), json!([])));
        let first = helper.amf_key(ns::core::NAME);
        let second = helper.amf_key(ns::core::NAME);
        assert_eq!(first, "core:name");
        assert_eq!(helper.key_cache().cached(ns::core::NAME), Some(second));

        helper.set_amf(json!({"@id": "other"}));
        assert!(helper.key_cache().is_empty());
        assert_eq!(helper.amf_key(ns::core::NAME), ns::core::NAME);
    }

    #[test]
    fn reassigning_same_source_keeps_cache() {
        let doc = api_document(json!([]), json!([]));
        let mut helper = AmfHelper::with_graph(doc.clone());
        helper.amf_key(ns::core::NAME);
        helper.set_amf(doc);
        assert_eq!(helper.key_cache().len(), 1);
    }

    #[test]
    fn array_wrapped_documents_are_unwrapped() {
        let helper = AmfHelper::with_graph(json!([api_document(json!([]), json!([]))]));
        assert!(helper.api().is_some());
    }

    #[test]
    fn ids_match_accepts_base_prefixed_ids() {
        assert!(ids_match("#/declares/Pet", "#/declares/Pet"));
        assert!(ids_match("#/declares/Pet", "amf://id#/declares/Pet"));
        assert!(!ids_match("#/declares/Pet", "#/declares/Dog"));
    }

    #[test]
    fn servers_fall_back_from_endpoint_to_root() {
        let root = json!([{"@id": "#/root-server", "core:urlTemplate": "https://api.example.com"}]);
        let own = json!([{"@id": "#/ep-server", "core:urlTemplate": "https://pets.example.com"}]);
        let endpoint_id = "#/web-api/end-points/%2Fpets";

        let helper = AmfHelper::with_graph(api_document(root.clone(), own));
        let servers = helper.get_servers(&ServerQueryOptions::for_endpoint(endpoint_id)).unwrap();
        assert_eq!(servers[0]["@id"], "#/ep-server");

        let helper = AmfHelper::with_graph(api_document(root, json!([])));
        let servers = helper.get_servers(&ServerQueryOptions::for_endpoint(endpoint_id)).unwrap();
        assert_eq!(servers[0]["@id"], "#/root-server");

        let helper = AmfHelper::with_graph(api_document(json!([]), json!([])));
        assert!(helper.get_servers(&ServerQueryOptions::for_endpoint(endpoint_id)).is_none());
    }

    #[test]
    fn method_servers_fall_back_to_owning_endpoint() {
        let own = json!([{"@id": "#/ep-server", "core:urlTemplate": "https://pets.example.com"}]);
        let helper = AmfHelper::with_graph(api_document(json!([]), own));
        let servers = helper
            .get_servers(&ServerQueryOptions::for_method("#/web-api/end-points/%2Fpets/get"))
            .unwrap();
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0]["@id"], "#/ep-server");

        let server = helper.get_server(&ServerQueryOptions {
            method_id: Some("#/web-api/end-points/%2Fpets/get".to_string()),
            id: Some("amf://id#/ep-server".to_string()),
            ..Default::default()
        });
        assert!(server.is_some());
    }

    #[test]
    fn operation_servers_come_first() {
        let root = json!([{"@id": "#/root-server", "core:urlTemplate": "https://api.example.com"}]);
        let own = json!([{"@id": "#/ep-server", "core:urlTemplate": "https://pets.example.com"}]);
        let method_id = "#/web-api/end-points/%2Fpets/get";
        let with_operation_servers = |servers: JsonValue| {
            let mut doc = api_document(root.clone(), own.clone());
            doc["doc:encodes"]["apiContract:endpoint"][0]["apiContract:supportedOperation"][0]
                ["apiContract:server"] = servers;
            AmfHelper::with_graph(doc)
        };

        let helper = with_operation_servers(json!([
            {"@id": "#/op-server", "core:urlTemplate": "https://get.example.com"}
        ]));
        let servers = helper.get_servers(&ServerQueryOptions::for_method(method_id)).unwrap();
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0]["@id"], "#/op-server");

        let helper = with_operation_servers(json!([]));
        let servers = helper.get_servers(&ServerQueryOptions::for_method(method_id)).unwrap();
        assert_eq!(servers[0]["@id"], "#/ep-server");
    }

    #[test]
    fn bare_references_resolve_to_their_target() {
        let doc = json!({
            "@context": compact_context(),
            "@graph": [
                {
                    "@id": "",
                    "@type": ["doc:Document", "doc:Unit"],
                    "doc:declares": [{"@id": "#/declares/Pet"}],
                    "doc:encodes": {"@id": "#/payload"}
                },
                {
                    "@id": "#/payload",
                    "@type": ["apiContract:Payload"],
                    "shapes:schema": {"@id": "#/declares/Pet"}
                },
                {
                    "@id": "#/declares/Pet",
                    "@type": ["shacl:NodeShape", "shacl:Shape"],
                    "shacl:name": "Pet"
                }
            ]
        });
        let helper = AmfHelper::with_graph(doc);
        let payload = helper.compute_encodes(helper.amf().unwrap()).unwrap();
        let schema = helper.get_object(payload, ns::shapes::SCHEMA).unwrap();
        assert_eq!(schema, &json!({"@id": "#/declares/Pet"}));

        let resolved = helper.resolve(schema);
        assert!(helper.has_type(&resolved, ns::shacl::NODE_SHAPE));
        assert_eq!(helper.get_string(&resolved, ns::shacl::NAME).as_deref(), Some("Pet"));
        assert_eq!(resolved[RESOLVED_MARKER], true);
    }

    #[test]
    fn reassigning_an_equal_copy_is_detected() {
        let mut helper = AmfHelper::with_graph(api_document(json!([]), json!([])));
        helper.amf_key(ns::core::NAME);
        helper.set_amf(api_document(json!([]), json!([])));
        assert_eq!(helper.key_cache().len(), 1);

        helper.set_amf(api_document(json!([{"@id": "#/s"}]), json!([])));
        assert!(helper.key_cache().is_empty());
    }

    #[test]
    fn finds_operation_and_owning_endpoint() {
        let helper = AmfHelper::with_graph(api_document(json!([]), json!([])));
        let api = helper.api().unwrap();
        let op = helper
            .compute_method_model(api, "amf://id#/web-api/end-points/%2Fpets/get")
            .unwrap();
        assert_eq!(helper.get_string(op, ns::api_contract::METHOD).as_deref(), Some("get"));
        let endpoint = helper
            .compute_method_endpoint(api, "#/web-api/end-points/%2Fpets/get")
            .unwrap();
        assert_eq!(endpoint["@id"], "#/web-api/end-points/%2Fpets");
        assert!(helper.compute_endpoint_by_path(api, "/pets").is_some());
        assert!(helper.compute_endpoint_by_path(api, "/owners").is_none());
    }

    fn document_with_declares(declares: JsonValue, references: JsonValue) -> JsonValue {
        json!({
            "@context": compact_context(),
            "@id": "",
            "@type": ["doc:Document"],
            "doc:declares": declares,
            "doc:references": references
        })
    }

    #[test]
    fn find_amf_type_searches_declares_then_references() {
        let helper = AmfHelper::with_graph(document_with_declares(
            json!([{"@id": "#/declares/Pet", "@type": ["shacl:NodeShape"]}]),
            json!([{
                "@id": "lib.raml",
                "@type": ["doc:Module"],
                "doc:declares": [{"@id": "lib.raml#/declares/Owner", "@type": ["shacl:NodeShape"]}]
            }, {
                "@id": "fragment.raml",
                "@type": ["doc:Fragment"],
                "doc:encodes": {"@id": "fragment.raml#/shape", "@type": ["shapes:ScalarShape"]}
            }]),
        ));
        assert!(helper.find_amf_type("#/declares/Pet").is_some());
        assert!(helper.find_amf_type("amf://id#/declares/Pet").is_some());
        assert!(helper.find_amf_type("lib.raml#/declares/Owner").is_some());
        assert!(helper.find_amf_type("fragment.raml#/shape").is_some());
        assert!(helper.find_amf_type("#/declares/Missing").is_none());

        assert_eq!(
            helper.find_reference_object("lib.raml").unwrap()["@id"],
            "lib.raml"
        );
        assert!(helper.get_reference_id("fragment.raml#/shape").is_some());
    }

    #[test]
    fn resolve_merges_link_target() {
        let helper = AmfHelper::with_graph(document_with_declares(
            json!([{
                "@id": "#/declares/Pet",
                "@type": ["shacl:NodeShape", "shapes:AnyShape"],
                "shacl:name": "Pet",
                "sourcemaps:sources": [{"sourcemaps:declared-element": [{"@id": "d"}]}]
            }]),
            json!([]),
        ));
        let link = json!({
            "@id": "#/link",
            "@type": ["shapes:AnyShape"],
            "doc:link-target": [{"@id": "#/declares/Pet"}],
            "doc:link-label": "Pet",
            "sourcemaps:sources": [{"sourcemaps:lexical": [{"@id": "l"}]}]
        });

        let resolved = helper.resolve(&link);
        assert_eq!(resolved["@id"], "#/link");
        assert_eq!(resolved["shacl:name"], "Pet");
        assert_eq!(
            resolved["@type"],
            json!(["shapes:AnyShape", "shacl:NodeShape"])
        );
        let sources = &resolved["sourcemaps:sources"][0];
        assert!(sources.get("sourcemaps:lexical").is_some());
        assert!(sources.get("sourcemaps:declared-element").is_some());
        assert_eq!(resolved[RESOLVED_MARKER], true);

        assert_eq!(helper.resolve(&resolved), resolved);
    }

    #[test]
    fn self_link_only_gets_marked() {
        let helper = AmfHelper::with_graph(document_with_declares(json!([]), json!([])));
        let shape = json!({
            "@id": "#/declares/Node",
            "@type": ["shacl:NodeShape"],
            "doc:link-target": [{"@id": "#/declares/Node"}]
        });
        let resolved = helper.resolve(&shape);
        let mut expected = shape.clone();
        expected[RESOLVED_MARKER] = json!(true);
        assert_eq!(resolved, expected);
    }

    #[test]
    fn mutual_links_terminate() {
        let helper = AmfHelper::with_graph(document_with_declares(
            json!([{
                "@id": "#/declares/A",
                "@type": ["shacl:NodeShape"],
                "shacl:property": [{
                    "@id": "#/declares/A/prop",
                    "shapes:range": {"@id": "#/a-to-b", "doc:link-target": [{"@id": "#/declares/B"}]}
                }]
            }, {
                "@id": "#/declares/B",
                "@type": ["shacl:NodeShape"],
                "shacl:property": [{
                    "@id": "#/declares/B/prop",
                    "shapes:range": {"@id": "#/b-to-a", "doc:link-target": [{"@id": "#/declares/A"}]}
                }]
            }]),
            json!([]),
        ));
        let link = json!({"@id": "#/root", "doc:link-target": [{"@id": "#/declares/A"}]});
        let resolved = helper.resolve(&link);
        let to_b = &resolved["shacl:property"][0]["shapes:range"];
        assert_eq!(to_b["@type"], json!(["shacl:NodeShape"]));
        let back_to_a = &to_b["shacl:property"][0]["shapes:range"];
        assert_eq!(back_to_a["@id"], "#/b-to-a");
        assert_eq!(back_to_a[RESOLVED_MARKER], true);
        assert!(back_to_a.get("shacl:property").is_none());
    }

    #[test]
    fn find_by_id_skips_bare_references() {
        let helper = AmfHelper::with_graph(json!({
            "@id": "",
            "a": {"@id": "#/x"},
            "b": [{"@id": "#/x", "core:name": "found"}]
        }));
        let found = helper.find_by_id("#/x").unwrap();
        assert_eq!(found["core:name"], "found");
    }
}
