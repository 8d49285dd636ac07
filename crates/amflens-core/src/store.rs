//! Query layer over the loaded graph
//!
//! Every documentation view asks for its data by domain id. [`AmfStore`]
//! answers those queries with serialized view objects and, unlike the graph
//! accessors, reports why a query could not be answered.

use crate::error::{AmfError, Result};
use crate::helper::{AmfHelper, GraphReader, ServerQueryOptions, ids_match};
use crate::navigation::NavigationTree;
use crate::ns;
use crate::serializer::{AmfSerializer, ShapeOptions};
use crate::types::*;
use crate::url_utils::{EndpointUriOptions, compute_endpoint_uri};
use serde_json::Value as JsonValue;

/// Every type the serializer dispatches on, plus the generic shape types.
const SHAPE_TYPES: [&str; 11] = [
    ns::shacl::SHAPE,
    ns::shapes::ANY_SHAPE,
    ns::shapes::SCALAR_SHAPE,
    ns::shacl::NODE_SHAPE,
    ns::shapes::UNION_SHAPE,
    ns::shapes::FILE_SHAPE,
    ns::shapes::SCHEMA_SHAPE,
    ns::shapes::TUPLE_SHAPE,
    ns::shapes::ARRAY_SHAPE,
    ns::shapes::MATRIX_SHAPE,
    ns::shapes::RECURSIVE_SHAPE,
];

fn id_string(node: &JsonValue) -> String {
    node.get("@id")
        .and_then(JsonValue::as_str)
        .unwrap_or_default()
        .to_string()
}

#[derive(Debug, Default)]
pub struct AmfStore {
    helper: AmfHelper,
}

impl AmfStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the loaded graph and describe the new document.
    pub fn load_graph(&mut self, value: JsonValue) -> Result<DocumentMeta> {
        if !(value.is_object() || value.is_array()) {
            return Err(AmfError::MalformedInput(
                "an AMF model must be a JSON object or array".to_string(),
            ));
        }
        self.helper.set_amf(value);
        if self.helper.amf().is_none() {
            return Err(AmfError::MalformedInput("the AMF model is empty".to_string()));
        }
        self.document_meta()
    }

    pub fn clear(&mut self) {
        self.helper.clear();
    }

    pub fn helper(&self) -> &AmfHelper {
        &self.helper
    }

    fn serializer(&self) -> AmfSerializer<'_> {
        AmfSerializer::new(&self.helper)
    }

    fn graph(&self) -> Result<&JsonValue> {
        self.helper.amf().ok_or(AmfError::NoGraph)
    }

    fn api(&self) -> Result<&JsonValue> {
        self.graph()?;
        self.helper.api().ok_or(AmfError::NotAnApi)
    }

    fn is_shape(&self, node: &JsonValue) -> bool {
        SHAPE_TYPES.iter().any(|ty| self.helper.has_type(node, ty))
    }

    /// Any node with the given id and type, wherever it lives.
    fn lookup(&self, kind: &'static str, id: &str, type_iri: &str) -> Result<&JsonValue> {
        self.graph()?;
        self.helper
            .get_link_target(id)
            .filter(|node| self.helper.has_type(node, type_iri))
            .ok_or_else(|| AmfError::not_found(kind, id))
    }

    /// Local declarations followed by the declarations of referenced libraries
    fn declarations(&self) -> Result<Vec<&JsonValue>> {
        let amf = self.graph()?;
        let mut declared = self.helper.compute_declares(amf).unwrap_or_default();
        for reference in self.helper.compute_references(amf).unwrap_or_default() {
            declared.extend(self.helper.compute_declares(reference).unwrap_or_default());
        }
        Ok(declared)
    }

    // -- document ------------------------------------------------------------

    pub fn document_meta(&self) -> Result<DocumentMeta> {
        let amf = self.graph()?;
        let api = self.helper.api();
        Ok(DocumentMeta {
            id: id_string(amf),
            types: self.helper.read_types(amf),
            is_api: api.is_some(),
            is_web_api: api.is_some_and(|api| self.helper.is_web_api(api)),
            is_async_api: api.is_some_and(|api| self.helper.is_async_api(api)),
            is_fragment: self.helper.is_fragment(amf),
            is_library: self.helper.is_library(amf),
            encodes_id: self.helper.compute_encodes(amf).map(id_string),
        })
    }

    pub fn api_summary(&self) -> Result<ApiSummary> {
        Ok(self.serializer().api_summary(self.api()?))
    }

    // -- endpoints and operations -------------------------------------------

    pub fn list_endpoints(&self) -> Result<Vec<ApiEndPointListItem>> {
        let api = self.api()?;
        Ok(self
            .helper
            .compute_endpoints(api)
            .unwrap_or_default()
            .into_iter()
            .map(|endpoint| ApiEndPointListItem {
                id: id_string(endpoint),
                path: self
                    .helper
                    .get_string(endpoint, ns::api_contract::PATH)
                    .unwrap_or_default(),
                name: self.helper.get_string(endpoint, ns::core::NAME),
            })
            .collect())
    }

    pub fn list_endpoints_with_operations(&self) -> Result<Vec<ApiEndPointWithOperationsListItem>> {
        let api = self.api()?;
        Ok(self
            .helper
            .compute_endpoints(api)
            .unwrap_or_default()
            .into_iter()
            .map(|endpoint| ApiEndPointWithOperationsListItem {
                id: id_string(endpoint),
                path: self
                    .helper
                    .get_string(endpoint, ns::api_contract::PATH)
                    .unwrap_or_default(),
                name: self.helper.get_string(endpoint, ns::core::NAME),
                operations: self
                    .helper
                    .compute_operations(endpoint)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|operation| ApiOperationListItem {
                        id: id_string(operation),
                        method: self
                            .helper
                            .get_string(operation, ns::api_contract::METHOD)
                            .unwrap_or_default(),
                        name: self.helper.get_string(operation, ns::core::NAME),
                    })
                    .collect(),
            })
            .collect())
    }

    pub fn navigation(&self) -> Result<NavigationTree> {
        Ok(NavigationTree::from_list(&self.list_endpoints_with_operations()?))
    }

    pub fn get_endpoint(&self, id: &str) -> Result<ApiEndPoint> {
        let api = self.api()?;
        let endpoint = self
            .helper
            .compute_endpoint_model(api, id)
            .ok_or_else(|| AmfError::not_found("endpoint", id))?;
        Ok(self.serializer().end_point(endpoint))
    }

    pub fn get_endpoint_by_path(&self, path: &str) -> Result<ApiEndPoint> {
        let api = self.api()?;
        let endpoint = self
            .helper
            .compute_endpoint_by_path(api, path)
            .ok_or_else(|| AmfError::not_found("endpoint", path))?;
        Ok(self.serializer().end_point(endpoint))
    }

    pub fn get_operation(&self, id: &str) -> Result<ApiOperation> {
        let api = self.api()?;
        let operation = self
            .helper
            .compute_method_model(api, id)
            .ok_or_else(|| AmfError::not_found("operation", id))?;
        Ok(self.serializer().operation(operation))
    }

    /// Endpoint owning an operation
    pub fn get_operation_parent(&self, id: &str) -> Result<ApiEndPoint> {
        let api = self.api()?;
        let endpoint = self
            .helper
            .compute_method_endpoint(api, id)
            .ok_or_else(|| AmfError::not_found("operation", id))?;
        Ok(self.serializer().end_point(endpoint))
    }

    // -- servers -------------------------------------------------------------

    /// Servers applying to an endpoint or operation (empty when none are defined).
    pub fn query_servers(&self, options: &ServerQueryOptions) -> Result<Vec<ApiServer>> {
        self.api()?;
        let serializer = self.serializer();
        Ok(self
            .helper
            .get_servers(options)
            .unwrap_or_default()
            .into_iter()
            .map(|server| serializer.server(server))
            .collect())
    }

    pub fn get_server(&self, id: &str) -> Result<ApiServer> {
        let server = self.lookup("server", id, ns::api_contract::SERVER)?;
        Ok(self.serializer().server(server))
    }

    /// Full URL of an endpoint, using the first server of the cascade unless
    /// `base_uri` overrides it. `version` defaults to the API version.
    pub fn endpoint_uri(
        &self,
        endpoint_id: &str,
        base_uri: Option<&str>,
        version: Option<&str>,
    ) -> Result<String> {
        let endpoint = self.get_endpoint(endpoint_id)?;
        let summary = self.api_summary()?;
        let servers = self.query_servers(&ServerQueryOptions::for_endpoint(endpoint_id))?;
        Ok(compute_endpoint_uri(&EndpointUriOptions {
            server_url: servers.first().map(|server| server.url.as_str()),
            base_uri,
            path: &endpoint.path,
            version: version.or(summary.version.as_deref()),
            protocols: &summary.schemes,
        }))
    }

    // -- security ------------------------------------------------------------

    pub fn list_security(&self) -> Result<Vec<ApiSecurityScheme>> {
        let serializer = self.serializer();
        Ok(self
            .declarations()?
            .into_iter()
            .filter(|node| self.helper.has_type(node, ns::security::SECURITY_SCHEME))
            .map(|node| serializer.security_scheme(node))
            .collect())
    }

    pub fn get_security_scheme(&self, id: &str) -> Result<ApiSecurityScheme> {
        let scheme = self.lookup("security scheme", id, ns::security::SECURITY_SCHEME)?;
        Ok(self.serializer().security_scheme(scheme))
    }

    pub fn get_security_requirement(&self, id: &str) -> Result<ApiSecurityRequirement> {
        let requirement =
            self.lookup("security requirement", id, ns::security::SECURITY_REQUIREMENT)?;
        Ok(self.serializer().security_requirement(requirement))
    }

    // -- requests, responses, payloads ---------------------------------------

    pub fn get_request(&self, id: &str) -> Result<ApiRequest> {
        let request = self.lookup("request", id, ns::api_contract::REQUEST)?;
        Ok(self.serializer().request(request))
    }

    pub fn get_response(&self, id: &str) -> Result<ApiResponse> {
        let response = self.lookup("response", id, ns::api_contract::RESPONSE)?;
        Ok(self.serializer().response(response))
    }

    pub fn get_payload(&self, id: &str) -> Result<ApiPayload> {
        let payload = self.lookup("payload", id, ns::api_contract::PAYLOAD)?;
        Ok(self.serializer().payload(payload))
    }

    pub fn get_parameter(&self, id: &str) -> Result<ApiParameter> {
        let parameter = self.lookup("parameter", id, ns::api_contract::PARAMETER)?;
        Ok(self.serializer().parameter(parameter))
    }

    // -- types ---------------------------------------------------------------

    pub fn get_shape(&self, id: &str) -> Result<ApiShapeUnion> {
        self.graph()?;
        let shape = self
            .helper
            .get_link_target(id)
            .filter(|node| self.is_shape(node))
            .ok_or_else(|| AmfError::not_found("shape", id))?;
        Ok(self.serializer().unknown_shape(shape, ShapeOptions::default()))
    }

    /// Declared types, including those of referenced libraries and the shape
    /// a data type fragment encodes.
    pub fn list_types(&self) -> Result<Vec<ApiShapeUnion>> {
        let amf = self.graph()?;
        let serializer = self.serializer();
        let mut shapes: Vec<&JsonValue> = self
            .declarations()?
            .into_iter()
            .filter(|node| self.is_shape(node))
            .collect();
        if self.helper.is_fragment(amf) {
            if let Some(encoded) = self.helper.compute_encodes(amf).filter(|e| self.is_shape(e)) {
                shapes.insert(0, encoded);
            }
        }
        Ok(shapes
            .into_iter()
            .map(|shape| serializer.unknown_shape(shape, ShapeOptions::default()))
            .collect())
    }

    // -- documentation -------------------------------------------------------

    fn documentation_nodes(&self) -> Result<Vec<&JsonValue>> {
        let amf = self.graph()?;
        if let Some(api) = self.helper.api() {
            return Ok(self.helper.compute_documentations(api).unwrap_or_default());
        }
        Ok(self
            .helper
            .compute_encodes(amf)
            .filter(|node| self.helper.has_type(node, ns::core::CREATIVE_WORK))
            .into_iter()
            .collect())
    }

    pub fn list_documentation(&self) -> Result<Vec<ApiDocumentation>> {
        let serializer = self.serializer();
        Ok(self
            .documentation_nodes()?
            .into_iter()
            .map(|node| serializer.documentation(node))
            .collect())
    }

    pub fn get_documentation(&self, id: &str) -> Result<ApiDocumentation> {
        let node = self
            .documentation_nodes()?
            .into_iter()
            .find(|node| {
                node.get("@id")
                    .and_then(JsonValue::as_str)
                    .is_some_and(|candidate| ids_match(candidate, id))
            })
            .ok_or_else(|| AmfError::not_found("documentation", id))?;
        Ok(self.serializer().documentation(node))
    }
}
