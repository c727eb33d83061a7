//! HTTP handlers and routers for the service.

pub mod health;
pub mod nodes;

use std::path::PathBuf;

use axum::routing::get;
use axum::Router;
use http::header::{ACCEPT, ORIGIN};
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::ServiceState;

/// Build the service router: node listing, health routes, and (when
/// configured) the static UI assets at the root.
pub fn router(state: ServiceState, static_dir: Option<PathBuf>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods(vec![Method::GET])
        .allow_headers(vec![ACCEPT, ORIGIN])
        .allow_origin(Any)
        .allow_credentials(false);

    let trace_layer = TraceLayer::new_for_http();

    let mut router = Router::new()
        .route("/node/:bucket", get(nodes::handler))
        .with_state(state.clone())
        .nest("/_status", health::router(state));

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router.layer(cors_layer).layer(trace_layer)
}
