//! `@context` handling for compacted AMF documents
//!
//! AMF emits models either with full IRIs as keys ("expanded") or with
//! prefixed keys such as `core:name` plus a `@context` table ("compacted").
//! Accessors are always written against full IRIs; [`AmfContext::compact`]
//! maps such an IRI to the key the current document actually uses.

use serde_json::Value as JsonValue;
use std::cell::RefCell;
use std::collections::HashMap;

/// Term table read from a document's `@context`.
///
/// Terms keep the order in which the document declares them so that the
/// first matching term wins, the same way a reader walking the object would
/// see it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmfContext {
    terms: Vec<(String, String)>,
}

impl AmfContext {
    /// Read the term table from a `@context` value.
    ///
    /// Keywords (`@base`, `@vocab`, ...) are skipped. Term definitions given as
    /// objects contribute their `@id`.
    pub fn from_value(value: &JsonValue) -> Option<Self> {
        let map = match value {
            JsonValue::Object(map) => map,
            JsonValue::Array(items) => {
                return items.iter().find_map(Self::from_value);
            }
            _ => return None,
        };

        let terms = map
            .iter()
            .filter(|(term, _)| !term.starts_with('@'))
            .filter_map(|(term, definition)| {
                let iri = match definition {
                    JsonValue::String(iri) => iri.as_str(),
                    JsonValue::Object(def) => def.get("@id")?.as_str()?,
                    _ => return None,
                };
                Some((term.clone(), iri.to_string()))
            })
            .collect::<Vec<_>>();

        Some(Self { terms })
    }

    /// Read the context of a document node, if it declares one.
    pub fn of_document(document: &JsonValue) -> Option<Self> {
        let root = match document {
            JsonValue::Array(items) => items.first()?,
            other => other,
        };
        root.get("@context").and_then(Self::from_value)
    }

    /// Build a context from `(term, iri)` pairs.
    pub fn from_terms<I, K, V>(terms: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            terms: terms
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// IRI a term is mapped to.
    pub fn term(&self, term: &str) -> Option<&str> {
        self.terms
            .iter()
            .find(|(name, _)| name == term)
            .map(|(_, iri)| iri.as_str())
    }

    /// Translate a full IRI into the key used by this context.
    ///
    /// Tries, per term: an exact IRI match, an IRI-prefix match for IRIs
    /// without a hash fragment, and a match on the IRI's `...#` namespace.
    /// Returns `None` when no term applies.
    pub fn compact(&self, iri: &str) -> Option<String> {
        let hash_index = iri.find('#');
        let hash_namespace = hash_index.map(|idx| &iri[..=idx]);

        for (term, value) in &self.terms {
            if value == iri {
                return Some(term.clone());
            }
            if hash_index.is_none() && !value.is_empty() && iri.starts_with(value.as_str()) {
                return Some(format!("{term}:{}", &iri[value.len()..]));
            }
            if let (Some(namespace), Some(idx)) = (hash_namespace, hash_index) {
                if value == namespace {
                    return Some(format!("{term}:{}", &iri[idx + 1..]));
                }
            }
        }
        None
    }

    /// Translate a compacted key (`prefix:suffix` or a bare term) back into a
    /// full IRI. Keys that are not mapped are returned unchanged.
    pub fn expand(&self, key: &str) -> String {
        if key.starts_with('@') {
            return key.to_string();
        }
        if let Some((prefix, suffix)) = key.split_once(':') {
            if let Some(namespace) = self.term(prefix) {
                return format!("{namespace}{suffix}");
            }
        }
        match self.term(key) {
            Some(iri) => iri.to_string(),
            None => key.to_string(),
        }
    }
}

/// Per-document cache of resolved keys.
///
/// Owned by whatever holds the current document and cleared whenever that
/// document is replaced. Misses are cached as the identity mapping, so every
/// repeated lookup is a single hash probe.
#[derive(Debug, Default)]
pub struct KeyCache {
    keys: RefCell<HashMap<String, String>>,
}

impl KeyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `iri` against `context`, consulting the cache first.
    pub fn resolve(&self, iri: &str, context: Option<&AmfContext>) -> String {
        let Some(context) = context else {
            return iri.to_string();
        };
        if let Some(hit) = self.keys.borrow().get(iri) {
            return hit.clone();
        }
        let resolved = context.compact(iri).unwrap_or_else(|| iri.to_string());
        self.keys
            .borrow_mut()
            .insert(iri.to_string(), resolved.clone());
        resolved
    }

    /// Cached value for `iri`, if it was resolved before.
    pub fn cached(&self, iri: &str) -> Option<String> {
        self.keys.borrow().get(iri).cloned()
    }

    pub fn len(&self) -> usize {
        self.keys.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.keys.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ns;
    use serde_json::json;

    fn amf_context() -> AmfContext {
        AmfContext::from_value(&json!({
            "@base": "amf://id",
            "doc": "http://a.ml/vocabularies/document#",
            "core": "http://a.ml/vocabularies/core#",
            "shacl": "http://www.w3.org/ns/shacl#",
            "rdfs": "http://www.w3.org/2000/01/rdf-schema",
            "Name": "http://a.ml/vocabularies/core#name"
        }))
        .unwrap()
    }

    #[test]
    fn skips_keywords() {
        let ctx = amf_context();
        assert!(ctx.term("@base").is_none());
        assert_eq!(ctx.term("doc"), Some("http://a.ml/vocabularies/document#"));
    }

    #[test]
    fn compacts_by_hash_namespace() {
        let ctx = amf_context();
        assert_eq!(
            ctx.compact(ns::document::ENCODES).as_deref(),
            Some("doc:encodes")
        );
        assert_eq!(
            ctx.compact(ns::shacl::NODE_SHAPE).as_deref(),
            Some("shacl:NodeShape")
        );
    }

    #[test]
    fn first_matching_term_wins() {
        let ctx = AmfContext::from_terms([
            ("core", "http://a.ml/vocabularies/core#"),
            ("label", "http://a.ml/vocabularies/core#name"),
        ]);
        assert_eq!(ctx.compact(ns::core::NAME).as_deref(), Some("core:name"));

        let ctx = AmfContext::from_terms([
            ("label", "http://a.ml/vocabularies/core#name"),
            ("core", "http://a.ml/vocabularies/core#"),
        ]);
        assert_eq!(ctx.compact(ns::core::NAME).as_deref(), Some("label"));
    }

    #[test]
    fn compacts_by_iri_prefix_without_hash() {
        let ctx = amf_context();
        assert_eq!(
            ctx.compact("http://www.w3.org/2000/01/rdf-schema/member")
                .as_deref(),
            Some("rdfs:/member")
        );
    }

    #[test]
    fn unmapped_iri_is_none() {
        let ctx = amf_context();
        assert!(ctx.compact("http://example.com/vocab#thing").is_none());
    }

    #[test]
    fn expands_prefixed_keys() {
        let ctx = amf_context();
        assert_eq!(ctx.expand("doc:Document"), ns::document::DOCUMENT);
        assert_eq!(ctx.expand("Name"), ns::core::NAME);
        assert_eq!(ctx.expand("@id"), "@id");
        assert_eq!(ctx.expand("unknown:Thing"), "unknown:Thing");
    }

    #[test]
    fn reads_term_definitions() {
        let ctx = AmfContext::from_value(&json!({
            "label": {"@id": "http://a.ml/vocabularies/core#name", "@type": "@id"}
        }))
        .unwrap();
        assert_eq!(ctx.compact(ns::core::NAME).as_deref(), Some("label"));
    }

    #[test]
    fn cache_is_stable_and_caches_misses() {
        let ctx = amf_context();
        let cache = KeyCache::new();
        let first = cache.resolve(ns::core::DESCRIPTION, Some(&ctx));
        let second = cache.resolve(ns::core::DESCRIPTION, Some(&ctx));
        assert_eq!(first, "core:description");
        assert_eq!(first, second);
        assert_eq!(cache.cached(ns::core::DESCRIPTION), Some(second));

        let miss = cache.resolve("http://example.com/x", Some(&ctx));
        assert_eq!(miss, "http://example.com/x");
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn no_context_returns_input() {
        let cache = KeyCache::new();
        assert_eq!(cache.resolve(ns::core::NAME, None), ns::core::NAME);
        assert!(cache.is_empty());
    }
}
