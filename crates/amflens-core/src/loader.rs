//! Reading AMF models from files, HTML pages and URLs

use crate::error::{AmfError, Result};
use scraper::{Html, Selector};
use serde_json::Value as JsonValue;

/// Extract JSON-LD script blocks from HTML
pub fn extract_json_ld_blocks(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let script_selector = Selector::parse("script")
        .map_err(|e| AmfError::Html(format!("unable to parse selector: {e}")))?;

    Ok(document
        .select(&script_selector)
        .filter_map(|element| {
            let script_type = element
                .value()
                .attr("type")
                .map(|t| t.trim().to_ascii_lowercase())
                .unwrap_or_default();

            // "application/ld+json; charset=utf-8" counts too
            if script_type.contains("ld+json") {
                let text = element.text().collect::<String>().trim().to_string();
                if text.is_empty() { None } else { Some(text) }
            } else {
                None
            }
        })
        .collect())
}

fn looks_like_html(text: &str) -> bool {
    let head = text.trim_start();
    head.starts_with('<')
}

/// Parse a model from JSON text, or from the first JSON-LD block of an HTML page.
pub fn parse_model(text: &str) -> Result<JsonValue> {
    if !looks_like_html(text) {
        return Ok(serde_json::from_str(text)?);
    }

    let blocks = extract_json_ld_blocks(text)?;
    log::debug!("found {} JSON-LD blocks in HTML input", blocks.len());
    blocks
        .iter()
        .find_map(|block| match serde_json::from_str::<JsonValue>(block) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("skipping JSON-LD block that is not valid JSON: {err}");
                None
            }
        })
        .ok_or_else(|| AmfError::Html("no JSON-LD model found in page".to_string()))
}

/// Download a model (or a page embedding one).
///
/// Requires the `full-expansion` feature (needs reqwest)
#[cfg(feature = "full-expansion")]
pub async fn fetch_model(url: &str) -> Result<String> {
    let client = reqwest::Client::builder()
        .user_agent(format!(
            "Mozilla/5.0 (compatible; amflens-core/{})",
            env!("CARGO_PKG_VERSION")
        ))
        .build()?;

    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json() {
        let model = parse_model(r#"[{"@id": "", "@type": ["doc:Document"]}]"#).unwrap();
        assert!(model.is_array());
    }

    #[test]
    fn reads_model_embedded_in_html() {
        let html = r#"
            <html>
                <head>
                    <script type="application/ld+json">{"@id": "first"}</script>
                    <script type="application/ld+json">{"@id": "second"}</script>
                </head>
            </html>
        "#;
        let model = parse_model(html).unwrap();
        assert_eq!(model["@id"], "first");
    }

    #[test]
    fn skips_broken_blocks() {
        let html = r#"
            <script type="APPLICATION/LD+JSON; charset=utf-8">{"@id": </script>
            <script type="application/ld+json">{"@id": "ok"}</script>
        "#;
        assert_eq!(parse_model(html).unwrap()["@id"], "ok");
    }

    #[test]
    fn html_without_model_is_an_error() {
        let html = "<html><body>No JSON-LD here</body></html>";
        assert!(matches!(parse_model(html), Err(AmfError::Html(_))));
        assert!(extract_json_ld_blocks(html).unwrap().is_empty());
    }

    #[test]
    fn empty_scripts_are_ignored() {
        let html = r#"
            <script type="application/ld+json"></script>
            <script type="application/ld+json">   </script>
        "#;
        assert!(extract_json_ld_blocks(html).unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_reported() {
        assert!(matches!(parse_model("{\"@id\": "), Err(AmfError::Json(_))));
    }
}
