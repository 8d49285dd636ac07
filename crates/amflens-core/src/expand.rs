//! Normalisation of flattened AMF documents
//!
//! AMF can emit a model "flattened": a `@graph` list of nodes that point at
//! each other through `{"@id": ...}` references. Every accessor in this crate
//! walks nested objects instead, so flattened input is turned into the nested
//! form once, when it is loaded. Each node appears in full only once; repeated
//! references stay links.

use crate::context::AmfContext;
use crate::ns;
use serde_json::{Map, Value as JsonValue};
use std::collections::{HashMap, HashSet};

const UNIT_TYPES: [&str; 4] = [
    ns::document::DOCUMENT,
    ns::document::MODULE,
    ns::document::FRAGMENT,
    ns::document::UNIT,
];

/// Whether a document is already in the nested form.
///
/// Only an object (or a single-element array wrapping one) carrying `@graph`
/// counts as flattened.
pub fn is_expanded(value: &JsonValue) -> bool {
    let root = match value {
        JsonValue::Array(items) => match items.first() {
            Some(first) => first,
            None => return true,
        },
        other => other,
    };
    root.get("@graph").is_none()
}

/// Inline the `@graph` of a flattened document into a nested tree.
///
/// The root is the node typed as a document unit (falling back to the first
/// node). Every graph node is written out in full exactly once: declared
/// nodes under the `declares` list of their unit, any other node at its first
/// reference. All further references stay bare `{"@id": ...}` links, which
/// [`crate::AmfHelper::resolve`] follows on demand, so shared and cyclic
/// types keep the tree linear in the size of the graph. The document's
/// `@context` is carried onto the root.
pub fn expand_flattened(value: &JsonValue) -> JsonValue {
    let root = match value {
        JsonValue::Array(items) => match items.first() {
            Some(first) => first,
            None => return value.clone(),
        },
        other => other,
    };

    let Some(graph) = root.get("@graph").and_then(JsonValue::as_array) else {
        return root.clone();
    };
    let context = root.get("@context");
    let amf_context = context.and_then(AmfContext::from_value);

    let Some(unit) = graph
        .iter()
        .find(|node| is_unit(node, amf_context.as_ref()))
        .or_else(|| graph.first())
    else {
        let mut empty = Map::new();
        if let Some(ctx) = context {
            empty.insert("@context".to_string(), ctx.clone());
        }
        return JsonValue::Object(empty);
    };

    let mut inliner = Inliner::new(graph, amf_context.as_ref());
    let mut nested = inliner.value(unit, false);
    if let (Some(ctx), JsonValue::Object(map)) = (context, &mut nested) {
        map.insert("@context".to_string(), ctx.clone());
    }
    log::debug!(
        "expanded flattened graph of {} nodes ({} declared)",
        graph.len(),
        inliner.declared.len()
    );
    nested
}

fn is_unit(node: &JsonValue, context: Option<&AmfContext>) -> bool {
    let types: Vec<&str> = match node.get("@type") {
        Some(JsonValue::String(ty)) => vec![ty.as_str()],
        Some(JsonValue::Array(items)) => items.iter().filter_map(JsonValue::as_str).collect(),
        _ => return false,
    };
    types
        .into_iter()
        .any(|ty| UNIT_TYPES.contains(&full_iri(ty, context).as_str()))
}

fn full_iri(key: &str, context: Option<&AmfContext>) -> String {
    match context {
        Some(ctx) => ctx.expand(key),
        None => key.to_string(),
    }
}

/// Id of a bare `{"@id": ...}` reference.
fn reference_id(map: &Map<String, JsonValue>) -> Option<&str> {
    if map.len() != 1 {
        return None;
    }
    map.get("@id").and_then(JsonValue::as_str)
}

struct Inliner<'g, 'c> {
    index: HashMap<&'g str, &'g JsonValue>,
    context: Option<&'c AmfContext>,
    /// Ids listed under some unit's `declares`
    declared: HashSet<&'g str>,
    /// Ids already written out in full
    written: HashSet<String>,
}

impl<'g, 'c> Inliner<'g, 'c> {
    fn new(graph: &'g [JsonValue], context: Option<&'c AmfContext>) -> Self {
        let index = graph
            .iter()
            .filter_map(|node| Some((node.get("@id")?.as_str()?, node)))
            .collect();
        let mut inliner = Self {
            index,
            context,
            declared: HashSet::new(),
            written: HashSet::new(),
        };
        for node in graph {
            let Some(map) = node.as_object() else {
                continue;
            };
            for (key, value) in map {
                if !inliner.is_declares_key(key) {
                    continue;
                }
                let items: Vec<&JsonValue> = match value {
                    JsonValue::Array(items) => items.iter().collect(),
                    other => vec![other],
                };
                inliner.declared.extend(
                    items
                        .into_iter()
                        .filter_map(|item| item.get("@id").and_then(JsonValue::as_str)),
                );
            }
        }
        inliner
    }

    fn is_declares_key(&self, key: &str) -> bool {
        full_iri(key, self.context) == ns::document::DECLARES
    }

    /// `declaration` is set for the direct entries of a `declares` list.
    fn value(&mut self, value: &'g JsonValue, declaration: bool) -> JsonValue {
        match value {
            JsonValue::Object(map) => match reference_id(map) {
                Some(id) => self.reference(value, id, declaration),
                None => self.node(map),
            },
            JsonValue::Array(items) => JsonValue::Array(
                items
                    .iter()
                    .map(|item| self.value(item, declaration))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    fn reference(&mut self, value: &JsonValue, id: &str, declaration: bool) -> JsonValue {
        let Some(target) = self.index.get(id).copied() else {
            return value.clone();
        };
        if self.written.contains(id) || (self.declared.contains(id) && !declaration) {
            return value.clone();
        }
        match target.as_object() {
            Some(map) if reference_id(map).is_none() => self.node(map),
            _ => value.clone(),
        }
    }

    fn node(&mut self, map: &'g Map<String, JsonValue>) -> JsonValue {
        if let Some(id) = map.get("@id").and_then(JsonValue::as_str) {
            self.written.insert(id.to_string());
        }
        let mut out = Map::with_capacity(map.len());
        for (key, item) in map {
            let inlined = match key.as_str() {
                "@id" | "@type" | "@value" | "@context" => item.clone(),
                _ => {
                    let declaration = self.is_declares_key(key);
                    self.value(item, declaration)
                }
            };
            out.insert(key.clone(), inlined);
        }
        JsonValue::Object(out)
    }
}
