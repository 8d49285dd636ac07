//! Full JSON-LD expansion of AMF models
//!
//! Runs the `json-ld` processor over a compacted model (remote contexts are
//! fetched with [`ReqwestLoader`]) and writes the expanded document back out
//! as `serde_json` values: full IRIs as keys, literals wrapped in `@value`,
//! lists as `@list`. The result can be handed straight to
//! [`crate::AmfHelper::set_amf`].

use crate::error::{AmfError, Result};
use iref::IriBuf;
use json_ld::object::Literal;
use json_ld::syntax::{Parse, Value};
use json_ld::{JsonLdProcessor, RemoteDocument, ReqwestLoader};
use json_syntax::Value as SyntaxValue;
use serde_json::{Map, Value as JsonValue};
use std::str::FromStr;
use uuid::Uuid;

type IndexedObject = json_ld::IndexedObject<IriBuf, rdf_types::BlankIdBuf>;
type Node = json_ld::Node<IriBuf, rdf_types::BlankIdBuf>;
type Id = json_ld::Id<IriBuf, rdf_types::BlankIdBuf>;

/// Expand raw JSON-LD text into the `json-ld` crate's document model.
pub async fn expand_json_ld(
    base_url: &str,
    raw_json_ld: &str,
    loader: &mut ReqwestLoader,
) -> Result<json_ld::ExpandedDocument> {
    let (value, _) = Value::parse_str(raw_json_ld)
        .map_err(|err| AmfError::Expansion(format!("failed to parse JSON-LD: {err}")))?;

    let base_iri = IriBuf::new(base_url.to_string())
        .map_err(|_| AmfError::Expansion(format!("invalid base IRI: {base_url}")))?;

    let remote = RemoteDocument::new(
        Some(base_iri),
        "application/ld+json".parse().ok(),
        value,
    );

    remote
        .expand(loader)
        .await
        .map_err(|err| AmfError::Expansion(err.to_string()))
}

/// Expand a model and return it as a list of expanded top-level nodes.
pub async fn expand_document(
    base_url: &str,
    raw_json_ld: &str,
    loader: &mut ReqwestLoader,
) -> Result<JsonValue> {
    let expanded = expand_json_ld(base_url, raw_json_ld, loader).await?;
    let nodes: Vec<JsonValue> = expanded.iter().map(object_to_json).collect();
    log::debug!("expanded model into {} top-level nodes", nodes.len());
    Ok(JsonValue::Array(nodes))
}

/// [`expand_document`] with a fresh loader for remote contexts.
pub async fn expand_model(base_url: &str, raw_json_ld: &str) -> Result<JsonValue> {
    let mut loader = ReqwestLoader::default();
    expand_document(base_url, raw_json_ld, &mut loader).await
}

fn object_to_json(object: &IndexedObject) -> JsonValue {
    match object.as_ref() {
        json_ld::Object::Node(node) => node_to_json(node),
        json_ld::Object::List(list) => {
            let items = list.iter().map(object_to_json).collect();
            let mut map = Map::new();
            map.insert("@list".to_string(), JsonValue::Array(items));
            JsonValue::Object(map)
        }
        json_ld::Object::Value(value) => value_object_to_json(value),
    }
}

fn node_to_json(node: &Node) -> JsonValue {
    let mut map = Map::new();
    map.insert(
        "@id".to_string(),
        JsonValue::String(node_identifier(node.id.as_ref())),
    );

    if let Some(types) = &node.types {
        let types = types
            .iter()
            .map(|ty| JsonValue::String(id_to_string(ty)))
            .collect();
        map.insert("@type".to_string(), JsonValue::Array(types));
    }

    for (predicate, values) in node.properties.iter() {
        map.insert(id_to_string(predicate), property_values(values));
    }

    JsonValue::Object(map)
}

fn property_values(values: &[IndexedObject]) -> JsonValue {
    JsonValue::Array(values.iter().map(object_to_json).collect())
}

fn value_object_to_json(value: &json_ld::Value<IriBuf>) -> JsonValue {
    let mut obj = Map::new();
    match value {
        json_ld::Value::Literal(lit, ty) => {
            let literal = match lit {
                Literal::Null => JsonValue::Null,
                Literal::Boolean(b) => JsonValue::Bool(*b),
                Literal::Number(n) => serde_json::Number::from_str(n.as_ref())
                    .map(JsonValue::Number)
                    .unwrap_or_else(|_| JsonValue::String(n.to_string())),
                Literal::String(s) => JsonValue::String(s.to_string()),
            };
            obj.insert("@value".to_string(), literal);
            if let Some(ty) = ty {
                obj.insert("@type".to_string(), JsonValue::String(ty.as_str().to_string()));
            }
        }
        json_ld::Value::LangString(lang) => {
            let (value, language, direction) = lang.clone().into_parts();
            obj.insert("@value".to_string(), JsonValue::String(value.to_string()));
            if let Some(lang_tag) = language {
                obj.insert(
                    "@language".to_string(),
                    JsonValue::String(lang_tag.to_string()),
                );
            }
            if let Some(dir) = direction {
                obj.insert("@direction".to_string(), JsonValue::String(dir.to_string()));
            }
        }
        json_ld::Value::Json(json) => {
            obj.insert("@value".to_string(), json_syntax_value_to_json(json));
            obj.insert("@type".to_string(), JsonValue::String("@json".to_string()));
        }
    }
    JsonValue::Object(obj)
}

fn json_syntax_value_to_json(value: &SyntaxValue) -> JsonValue {
    match value {
        SyntaxValue::Null => JsonValue::Null,
        SyntaxValue::Boolean(b) => JsonValue::Bool(*b),
        SyntaxValue::Number(n) => serde_json::Number::from_str(n.as_ref())
            .ok()
            .map(JsonValue::Number)
            .unwrap_or_else(|| JsonValue::String(n.to_string())),
        SyntaxValue::String(s) => JsonValue::String(s.to_string()),
        SyntaxValue::Array(items) => {
            JsonValue::Array(items.iter().map(json_syntax_value_to_json).collect())
        }
        SyntaxValue::Object(obj) => {
            let mut map = Map::new();
            for entry in obj.iter() {
                map.insert(
                    entry.as_key().to_string(),
                    json_syntax_value_to_json(entry.as_value()),
                );
            }
            JsonValue::Object(map)
        }
    }
}

/// Node id; anonymous nodes get a fresh blank node id.
fn node_identifier(id: Option<&Id>) -> String {
    match id {
        Some(id) => id_to_string(id),
        None => format!("_:{}", Uuid::new_v4()),
    }
}

fn id_to_string(id: &Id) -> String {
    match id {
        json_ld::Id::Valid(json_ld::ValidId::Iri(iri)) => iri.as_str().to_string(),
        json_ld::Id::Valid(json_ld::ValidId::Blank(blank)) => {
            format!("_:{}", blank.as_str())
        }
        json_ld::Id::Invalid(raw) => raw.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::{AmfHelper, GraphReader};
    use crate::ns;

    #[tokio::test]
    async fn expands_inline_context_into_full_iris() {
        let raw = r#"{
            "@context": {
                "doc": "http://a.ml/vocabularies/document#",
                "core": "http://a.ml/vocabularies/core#",
                "apiContract": "http://a.ml/vocabularies/apiContract#"
            },
            "@id": "http://example.com/api.raml",
            "@type": ["doc:Document"],
            "doc:encodes": {
                "@id": "http://example.com/api.raml#/web-api",
                "@type": ["apiContract:WebAPI"],
                "core:name": "Pets"
            }
        }"#;
        let mut loader = ReqwestLoader::default();
        let expanded = expand_document("http://example.com/api.raml", raw, &mut loader)
            .await
            .unwrap();

        let helper = AmfHelper::with_graph(expanded);
        let api = helper.api().unwrap();
        assert!(helper.is_web_api(api));
        assert_eq!(helper.get_string(api, ns::core::NAME).as_deref(), Some("Pets"));
    }

    #[tokio::test]
    async fn rejects_invalid_json() {
        let mut loader = ReqwestLoader::default();
        let result = expand_document("http://example.com/", "{not json", &mut loader).await;
        assert!(matches!(result, Err(AmfError::Expansion(_))));
    }
}
