use axum::{
    routing::{any_service, get, post},
    Router,
};
use std::sync::Arc;

use crate::infra::runtime::mcp_transport::{make_streamable_http_service, LocalSessionManager};
use crate::tools::registry::Registry;
use crate::tools::tool_router::factory_with_registry;

fn mcp_router(registry: &Registry) -> Router {
    let session_mgr = Arc::new(LocalSessionManager::default());
    let mcp_service = make_streamable_http_service(factory_with_registry(registry.clone()), session_mgr);

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route_service("/mcp", any_service(mcp_service))
}

/// MCP-only app: `/healthz` + streamable MCP at `/mcp`.
pub fn build_app_default(registry: Registry) -> Router {
    mcp_router(&registry)
}

/// MCP app **plus** the REST routes and the `/rpc` JSON-RPC shim.
pub fn build_app_with_rest(registry: Registry) -> Router {
    let rest = Router::new()
        .route("/tool/:name", post(crate::api::rest::call_tool))
        .route("/resource/:name", post(crate::api::rest::read_resource))
        .route("/rpc", post(crate::api::rpc::http))
        .with_state(registry.clone());
    mcp_router(&registry).merge(rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::registry::build_registry;
    use axum::body::Body;
    use hyper::{Request, StatusCode};
    use tower::ServiceExt;

    fn post(uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn healthz_is_mounted_in_both_apps() {
        for app in [build_app_default(build_registry()), build_app_with_rest(build_registry())] {
            let req = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
            let resp = app.oneshot(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn rest_routes_only_when_enabled() {
        let app = build_app_default(build_registry());
        let resp = app.oneshot(post("/tool/flashcards", r#"{"subject":"OOP"}"#)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let app = build_app_with_rest(build_registry());
        let resp = app.oneshot(post("/tool/flashcards", r#"{"subject":"OOP"}"#)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
