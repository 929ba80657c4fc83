use utoipa::OpenApi;

use crate::executor::ExecutionResult;
use crate::planner::{Action, ActionPlan};
use crate::server::assist::AssistRequest;
use crate::server::error::ErrorBody;
use crate::server::proxy::ProxyRequest;
use crate::server::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Toolbridge API",
        version = "0.1.0",
        description = "Intent-routing proxy between chat clients and JSON-RPC tool servers"
    ),
    paths(
        crate::server::health,
        crate::server::proxy::proxy,
        crate::server::stream::proxy_stream,
        crate::server::assist::assist,
        crate::server::assist::execute,
    ),
    components(schemas(
        // Error
        ErrorBody,
        // Health
        HealthResponse,
        // Proxy
        ProxyRequest,
        // Assist
        AssistRequest,
        Action,
        ActionPlan,
        ExecutionResult,
    )),
    tags(
        (name = "health", description = "Service liveness"),
        (name = "proxy", description = "JSON-RPC forwarding"),
        (name = "assist", description = "Intent routing and plan execution"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_serializes_and_names_every_route() {
        let spec = ApiDoc::openapi().to_pretty_json().expect("serialize spec");
        for path in ["/health", "/proxy", "/proxy/stream", "/proxy/ai", "/proxy/ai/execute"] {
            assert!(spec.contains(&format!("\"{path}\"")), "missing path {path}");
        }
    }
}
