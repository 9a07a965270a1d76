// WebSocket handlers and stream logic

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use bytes::Bytes;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tokio::sync::{broadcast, watch};
use tokio::time::{Duration, timeout};

use super::AppState;
use crate::models::Summary;
use crate::overview::{OverviewAggregator, SOURCE_COUNT};

pub(super) const WS_PING_INTERVAL: Duration = Duration::from_secs(30);
pub(super) const WS_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Tracks open WebSocket clients (connect = +1, drop = -1).
struct WsConnectionGuard(Arc<AtomicUsize>);

impl WsConnectionGuard {
    fn new(count: Arc<AtomicUsize>) -> Self {
        count.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        Self(count)
    }
}

impl Drop for WsConnectionGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, std::sync::atomic::Ordering::Relaxed);
    }
}

/// Sends one text frame; `false` when the client is gone or too slow.
async fn send_text(socket: &mut WebSocket, json: String) -> bool {
    matches!(
        timeout(WS_SEND_TIMEOUT, socket.send(Message::Text(json.into()))).await,
        Ok(Ok(()))
    )
}

async fn send_ping(socket: &mut WebSocket) -> bool {
    matches!(
        timeout(WS_SEND_TIMEOUT, socket.send(Message::Ping(Bytes::new()))).await,
        Ok(Ok(()))
    )
}

pub(super) async fn ws_overview(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let aggregator = OverviewAggregator::new(state.deps.rgw.clone(), state.deps.health.clone());
    let conn_count = state.ws_connections.clone();
    ws.on_upgrade(move |socket| async move {
        let _guard = WsConnectionGuard::new(conn_count);
        if let Err(e) = stream_overview(socket, aggregator).await {
            tracing::info!("Overview stream error: {}", e);
        }
    })
}

/// Activates the aggregator and forwards one frame per completed fetch, then closes.
async fn stream_overview(
    mut socket: WebSocket,
    aggregator: OverviewAggregator,
) -> anyhow::Result<()> {
    tracing::info!("Client connected to overview stream");
    let mut rx = aggregator.subscribe();
    let activation = aggregator.activate();
    tokio::pin!(activation);
    let mut activation_done = false;
    let mut sent = 0usize;

    while sent < SOURCE_COUNT {
        tokio::select! {
            _ = &mut activation, if !activation_done => {
                activation_done = true;
            }
            result = rx.recv() => {
                let update = match result {
                    Ok(u) => u,
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "overview stream lagged");
                        sent += n as usize;
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                let json = serde_json::to_string(&update)?;
                if !send_text(&mut socket, json).await {
                    return Ok(());
                }
                sent += 1;
            }
        }
    }
    let _ = socket.send(Message::Close(None)).await;
    Ok(())
}

pub(super) async fn ws_summary(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let rx = state.deps.summary.subscribe();
    let conn_count = state.ws_connections.clone();
    ws.on_upgrade(move |socket| async move {
        let _guard = WsConnectionGuard::new(conn_count);
        if let Err(e) = stream_summary(socket, rx).await {
            tracing::info!("Summary stream error: {}", e);
        }
    })
}

/// Sends the current summary (if any), then every new one.
async fn stream_summary(
    mut socket: WebSocket,
    mut rx: watch::Receiver<Option<Summary>>,
) -> anyhow::Result<()> {
    tracing::info!("Client connected to summary stream");
    rx.mark_changed();

    let mut ping_interval =
        tokio::time::interval_at(tokio::time::Instant::now() + WS_PING_INTERVAL, WS_PING_INTERVAL);
    ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let latest = rx.borrow_and_update().clone();
                let Some(summary) = latest else {
                    continue;
                };
                let json = serde_json::to_string(&summary)?;
                if !send_text(&mut socket, json).await {
                    break;
                }
            }
            _ = ping_interval.tick() => {
                if !send_ping(&mut socket).await {
                    break;
                }
            }
        }
    }
    Ok(())
}
