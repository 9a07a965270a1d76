// GET handlers: version, overview, polled state

use axum::{Json, extract::State, response::IntoResponse};

use super::AppState;
use crate::overview::OverviewAggregator;

/// GET /version — service name and version from Cargo.toml at build time.
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/overview — one fresh activation of the aggregator per request.
pub(super) async fn overview_handler(State(state): State<AppState>) -> impl IntoResponse {
    let aggregator = OverviewAggregator::new(state.deps.rgw.clone(), state.deps.health.clone());
    Json(aggregator.activate().await)
}

/// GET /api/summary — latest polled summary, `null` before the first poll.
pub(super) async fn summary_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.deps.summary.current())
}

pub(super) async fn multi_cluster_handler(State(state): State<AppState>) -> impl IntoResponse {
    let multi_cluster = &state.deps.multi_cluster;
    Json(serde_json::json!({
        "config": multi_cluster.config(),
        "tokenStatus": multi_cluster.token_status(),
    }))
}

pub(super) async fn health_indicator_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({ "indicator": state.deps.favicon.indicator() }))
}

pub(super) async fn permissions_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.deps.permissions.get_permissions())
}
