// HTTP + WebSocket routes

mod http;
mod ws;

use axum::{Router, routing::get};
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tower_http::cors::{Any, CorsLayer};

use crate::ceph_api::{HealthApi, RgwApi};
use crate::services::{FaviconService, MultiClusterService, PermissionSource, SummaryService};

/// What the routes read from: the data providers and the polled service state.
#[derive(Clone)]
pub struct RouteDeps {
    pub rgw: Arc<dyn RgwApi>,
    pub health: Arc<dyn HealthApi>,
    pub summary: Arc<SummaryService>,
    pub multi_cluster: Arc<MultiClusterService>,
    pub favicon: Arc<FaviconService>,
    pub permissions: Arc<dyn PermissionSource>,
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) deps: RouteDeps,
    pub(crate) ws_connections: Arc<AtomicUsize>,
}

pub fn app(deps: RouteDeps, ws_connections: Arc<AtomicUsize>) -> Router {
    let state = AppState {
        deps,
        ws_connections,
    };
    Router::new()
        .route("/", get(|| async { "rgw-overview: hello" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/overview", get(http::overview_handler)) // GET /api/overview
        .route("/api/summary", get(http::summary_handler)) // GET /api/summary
        .route("/api/multi-cluster", get(http::multi_cluster_handler)) // GET /api/multi-cluster
        .route(
            "/api/health-indicator",
            get(http::health_indicator_handler),
        ) // GET /api/health-indicator
        .route("/api/permissions", get(http::permissions_handler)) // GET /api/permissions
        .route("/ws/overview", get(ws::ws_overview)) // WS /ws/overview
        .route("/ws/summary", get(ws::ws_summary)) // WS /ws/summary
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
