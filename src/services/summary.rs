// Cluster summary poller

use crate::ceph_api::ClusterApi;
use crate::models::Summary;
use crate::subscription::Subscription;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{Duration, interval};

pub struct SummaryService {
    api: Arc<dyn ClusterApi>,
    interval: Duration,
    tx: watch::Sender<Option<Summary>>,
}

impl SummaryService {
    pub fn new(api: Arc<dyn ClusterApi>, interval_ms: u64) -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            api,
            interval: Duration::from_millis(interval_ms),
            tx,
        }
    }

    /// Latest summary; `None` until the first successful poll.
    pub fn current(&self) -> Option<Summary> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Summary>> {
        self.tx.subscribe()
    }

    /// Fetches once and publishes the result. Failures keep the previous summary.
    pub async fn refresh(&self) -> anyhow::Result<()> {
        refresh(self.api.as_ref(), &self.tx).await
    }

    /// Polls every interval until the returned subscription is cancelled.
    pub fn start_polling(&self) -> Subscription {
        let api = self.api.clone();
        let tx = self.tx.clone();
        let period = self.interval;
        Subscription::spawn("summary", move |mut shutdown_rx| async move {
            let mut tick = interval(period);
            tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        if let Err(e) = refresh(api.as_ref(), &tx).await {
                            tracing::warn!(
                                error = %e,
                                operation = "get_summary",
                                "summary poll failed"
                            );
                        }
                    }
                    _ = &mut shutdown_rx => {
                        tracing::debug!("Summary polling stopped");
                        break;
                    }
                }
            }
        })
    }
}

async fn refresh(api: &dyn ClusterApi, tx: &watch::Sender<Option<Summary>>) -> anyhow::Result<()> {
    let summary = api.get_summary().await?;
    tracing::debug!(
        operation = "get_summary",
        health_status = %summary.health_status,
        executing_tasks = summary.executing_tasks.len(),
        "summary polled"
    );
    tx.send_replace(Some(summary));
    Ok(())
}
