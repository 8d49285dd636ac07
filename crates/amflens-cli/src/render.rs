use std::fmt::Write as FmtWrite;

use amflens_core::navigation::NavigationTree;
use amflens_core::security::{AuthorizationKind, OAuth2Authorization};
use amflens_core::{
    ApiEndPointWithOperationsListItem, ApiOperation, ApiParameter, ApiResponse,
    ApiSecurityScheme, ApiServer, ApiShapeUnion, AmfStore, DocumentMeta, ServerQueryOptions,
};
use anyhow::{Context, Result};
use serde_json::json;

use crate::args::View;
use crate::settings::{OutputFormat, Settings};

const DIVIDER: &str = "─────────────────────────────────────────────────────────────";
const LABEL_WIDTH: usize = 16;

fn push_section_header(buf: &mut String, icon: &str, title: &str) {
    let _ = writeln!(buf, "{DIVIDER}");
    let _ = writeln!(buf, "{icon} {title}");
    let _ = writeln!(buf, "{DIVIDER}");
}

fn push_key_value(buf: &mut String, label: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    let _ = writeln!(buf, "• {:<width$} : {}", label, value, width = LABEL_WIDTH);
}

fn push_optional(buf: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        push_key_value(buf, label, value);
    }
}

/// Render the requested view of the loaded model.
pub fn render(store: &AmfStore, view: &View, settings: &Settings) -> Result<String> {
    match (view, settings.output) {
        (View::Full, OutputFormat::Markdown) => render_document(store, settings),
        (View::Full, OutputFormat::Json) => render_document_json(store),
        (View::Navigation, OutputFormat::Markdown) => {
            Ok(render_navigation(&store.navigation()?))
        }
        (View::Navigation, OutputFormat::Json) => {
            Ok(serde_json::to_string_pretty(&store.navigation()?)?)
        }
        (View::Operation(id), OutputFormat::Markdown) => render_operation(store, id, settings),
        (View::Operation(id), OutputFormat::Json) => {
            let operation = store
                .get_operation(id)
                .with_context(|| format!("cannot show operation {id}"))?;
            Ok(serde_json::to_string_pretty(&operation)?)
        }
    }
}

fn document_kind(meta: &DocumentMeta) -> &'static str {
    if meta.is_web_api {
        "Web API"
    } else if meta.is_async_api {
        "Async API"
    } else if meta.is_library {
        "Library"
    } else if meta.is_fragment {
        "Fragment"
    } else {
        "Document"
    }
}

pub fn render_document(store: &AmfStore, settings: &Settings) -> Result<String> {
    let meta = store.document_meta()?;
    let mut output = String::new();

    if !meta.is_api {
        push_section_header(&mut output, "📄", document_kind(&meta));
        push_key_value(&mut output, "Id", &meta.id);
        let _ = writeln!(&mut output);
        render_types(&mut output, &store.list_types()?);
        return Ok(output);
    }

    let summary = store.api_summary()?;
    let title = summary.name.as_deref().unwrap_or("Untitled API");
    push_section_header(&mut output, "📘", &format!("{}: {title}", document_kind(&meta)));
    push_optional(&mut output, "Version", summary.version.as_deref());
    push_optional(&mut output, "Description", summary.description.as_deref());
    push_key_value(&mut output, "Protocols", &summary.schemes.join(", "));
    push_key_value(&mut output, "Accepts", &summary.accepts.join(", "));
    push_key_value(&mut output, "Content Type", &summary.content_type.join(", "));
    push_optional(
        &mut output,
        "Provider",
        summary.provider.as_ref().and_then(|p| p.name.as_deref()),
    );
    push_optional(
        &mut output,
        "License",
        summary.license.as_ref().and_then(|l| l.name.as_deref()),
    );
    push_optional(&mut output, "Terms of Service", summary.terms_of_service.as_deref());
    let _ = writeln!(&mut output);

    render_servers(&mut output, &store.query_servers(&ServerQueryOptions::default())?);
    render_endpoints(&mut output, store, &store.list_endpoints_with_operations()?, settings)?;
    render_security(&mut output, &store.list_security()?);
    render_types(&mut output, &store.list_types()?);

    let docs = store.list_documentation()?;
    if !docs.is_empty() {
        push_section_header(&mut output, "📚", "Documentation");
        for doc in &docs {
            let title = doc.title.as_deref().or(doc.url.as_deref()).unwrap_or(&doc.id);
            push_key_value(&mut output, title, doc.url.as_deref().unwrap_or(""));
        }
        let _ = writeln!(&mut output);
    }

    Ok(output)
}

fn render_document_json(store: &AmfStore) -> Result<String> {
    let meta = store.document_meta()?;
    let value = if meta.is_api {
        json!({
            "summary": store.api_summary()?,
            "endpoints": store.list_endpoints_with_operations()?,
        })
    } else {
        json!({
            "document": meta,
            "types": store.list_types()?,
        })
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

fn render_servers(buf: &mut String, servers: &[ApiServer]) {
    if servers.is_empty() {
        return;
    }
    push_section_header(buf, "🌐", "Servers");
    for server in servers {
        let label = server.description.as_deref().unwrap_or("Server");
        push_key_value(buf, label, &server.url);
    }
    let _ = writeln!(buf);
}

fn render_endpoints(
    buf: &mut String,
    store: &AmfStore,
    endpoints: &[ApiEndPointWithOperationsListItem],
    settings: &Settings,
) -> Result<()> {
    if endpoints.is_empty() {
        return Ok(());
    }
    push_section_header(buf, "🧭", "Endpoints");
    for endpoint in endpoints {
        let uri = store.endpoint_uri(
            &endpoint.id,
            settings.base_uri.as_deref(),
            settings.api_version.as_deref(),
        )?;
        match endpoint.name.as_deref() {
            Some(name) => {
                let _ = writeln!(buf, "{} ({name})", endpoint.path);
            }
            None => {
                let _ = writeln!(buf, "{}", endpoint.path);
            }
        }
        let _ = writeln!(buf, "  {uri}");
        for operation in &endpoint.operations {
            let method = operation.method.to_ascii_uppercase();
            let name = operation.name.as_deref().unwrap_or("");
            let _ = writeln!(buf, "  {:<7} {}", method, name);
        }
    }
    let _ = writeln!(buf);
    Ok(())
}

fn describe_scheme(scheme: &ApiSecurityScheme) -> String {
    let Some(kind) = AuthorizationKind::of_scheme(scheme) else {
        return "unknown".to_string();
    };
    if kind != AuthorizationKind::OAuth2 {
        return kind.label().to_string();
    }
    match OAuth2Authorization::from_scheme(scheme) {
        Ok(auth) if !auth.grant_types.is_empty() => {
            format!("{} ({})", kind.label(), auth.grant_types.join(", "))
        }
        Ok(_) => kind.label().to_string(),
        Err(err) => {
            log::warn!("{err}");
            kind.label().to_string()
        }
    }
}

fn render_security(buf: &mut String, schemes: &[ApiSecurityScheme]) {
    if schemes.is_empty() {
        return;
    }
    push_section_header(buf, "🔐", "Security");
    for scheme in schemes {
        let name = scheme
            .display_name
            .as_deref()
            .or(scheme.name.as_deref())
            .unwrap_or(&scheme.id);
        push_key_value(buf, name, &describe_scheme(scheme));
    }
    let _ = writeln!(buf);
}

fn render_types(buf: &mut String, types: &[ApiShapeUnion]) {
    if types.is_empty() {
        return;
    }
    push_section_header(buf, "🧩", "Types");
    for shape in types {
        let label = shape.label().unwrap_or(shape.id());
        push_key_value(buf, label, &format!("{:?}", shape.kind()));
    }
    let _ = writeln!(buf);
}

pub fn render_navigation(tree: &NavigationTree) -> String {
    let mut output = String::new();
    push_section_header(&mut output, "🧭", "Navigation");
    for item in &tree.items {
        let indent = "  ".repeat(item.indent);
        let _ = writeln!(&mut output, "{indent}{}", item.label);
        for operation in &item.operations {
            let _ = writeln!(&mut output, "{indent}  · {}", operation.label);
        }
    }
    output
}

fn parameter_line(param: &ApiParameter) -> String {
    let mut line = String::new();
    if let Some(schema) = &param.schema {
        line.push_str(&format!("{:?}", schema.kind()));
    }
    if param.required {
        if !line.is_empty() {
            line.push_str(", ");
        }
        line.push_str("required");
    }
    if line.is_empty() {
        line.push_str("optional");
    }
    line
}

fn render_parameters(buf: &mut String, title: &str, params: &[ApiParameter]) {
    if params.is_empty() {
        return;
    }
    let _ = writeln!(buf, "{title}:");
    for param in params {
        let name = param.name.as_deref().or(param.param_name.as_deref()).unwrap_or(&param.id);
        push_key_value(buf, name, &parameter_line(param));
    }
}

fn render_responses(buf: &mut String, responses: &[ApiResponse]) {
    if responses.is_empty() {
        return;
    }
    push_section_header(buf, "📬", "Responses");
    for response in responses {
        let status = response.status_code.as_deref().unwrap_or("default");
        let media_types: Vec<&str> = response
            .payloads
            .iter()
            .filter_map(|payload| payload.media_type.as_deref())
            .collect();
        let description = response.description.as_deref().unwrap_or("");
        let value = match (description.is_empty(), media_types.is_empty()) {
            (false, false) => format!("{description} [{}]", media_types.join(", ")),
            (false, true) => description.to_string(),
            (true, false) => media_types.join(", "),
            (true, true) => "-".to_string(),
        };
        push_key_value(buf, status, &value);
    }
    let _ = writeln!(buf);
}

fn render_operation_request(buf: &mut String, operation: &ApiOperation) {
    let Some(request) = &operation.request else {
        return;
    };
    push_section_header(buf, "📨", "Request");
    render_parameters(buf, "URI parameters", &request.uri_parameters);
    render_parameters(buf, "Query parameters", &request.query_parameters);
    render_parameters(buf, "Headers", &request.headers);
    render_parameters(buf, "Cookies", &request.cookie_parameters);
    let media_types: Vec<&str> = request
        .payloads
        .iter()
        .filter_map(|payload| payload.media_type.as_deref())
        .collect();
    push_key_value(buf, "Body", &media_types.join(", "));
    let _ = writeln!(buf);
}

pub fn render_operation(store: &AmfStore, id: &str, settings: &Settings) -> Result<String> {
    let operation = store
        .get_operation(id)
        .with_context(|| format!("cannot show operation {id}"))?;
    let endpoint = store.get_operation_parent(id)?;
    let servers = store.query_servers(&ServerQueryOptions::for_method(id))?;
    let uri = store.endpoint_uri(
        &endpoint.id,
        settings.base_uri.as_deref(),
        settings.api_version.as_deref(),
    )?;

    let mut output = String::new();
    let title = format!("{} {}", operation.method.to_ascii_uppercase(), endpoint.path);
    push_section_header(&mut output, "🔧", &title);
    push_optional(&mut output, "Name", operation.name.as_deref());
    push_optional(&mut output, "Summary", operation.summary.as_deref());
    push_optional(&mut output, "Description", operation.description.as_deref());
    push_optional(&mut output, "Operation ID", operation.operation_id.as_deref());
    if operation.deprecated {
        push_key_value(&mut output, "Deprecated", "yes");
    }
    push_key_value(&mut output, "URL", &uri);
    let server_urls: Vec<&str> = servers.iter().map(|server| server.url.as_str()).collect();
    push_key_value(&mut output, "Servers", &server_urls.join(", "));
    let security: Vec<&str> = operation
        .security
        .iter()
        .flat_map(|requirement| requirement.schemes.iter())
        .filter_map(|scheme| scheme.name.as_deref())
        .collect();
    push_key_value(&mut output, "Security", &security.join(", "));
    let _ = writeln!(&mut output);

    render_operation_request(&mut output, &operation);
    render_responses(&mut output, &operation.responses);
    Ok(output)
}
