// Multi-cluster config and token status pollers

use crate::ceph_api::ClusterApi;
use crate::models::{MultiClusterConfig, TokenStatusMap};
use crate::subscription::Subscription;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{Duration, interval};

pub struct MultiClusterService {
    api: Arc<dyn ClusterApi>,
    config_interval: Duration,
    token_status_interval: Duration,
    config_tx: watch::Sender<Option<MultiClusterConfig>>,
    token_status_tx: watch::Sender<Option<TokenStatusMap>>,
}

impl MultiClusterService {
    pub fn new(
        api: Arc<dyn ClusterApi>,
        config_interval_ms: u64,
        token_status_interval_ms: u64,
    ) -> Self {
        let (config_tx, _) = watch::channel(None);
        let (token_status_tx, _) = watch::channel(None);
        Self {
            api,
            config_interval: Duration::from_millis(config_interval_ms),
            token_status_interval: Duration::from_millis(token_status_interval_ms),
            config_tx,
            token_status_tx,
        }
    }

    pub fn config(&self) -> Option<MultiClusterConfig> {
        self.config_tx.borrow().clone()
    }

    pub fn token_status(&self) -> Option<TokenStatusMap> {
        self.token_status_tx.borrow().clone()
    }

    pub fn subscribe_config(&self) -> watch::Receiver<Option<MultiClusterConfig>> {
        self.config_tx.subscribe()
    }

    pub fn start_polling(&self) -> Subscription {
        let api = self.api.clone();
        let tx = self.config_tx.clone();
        let period = self.config_interval;
        Subscription::spawn("multi_cluster", move |mut shutdown_rx| async move {
            let mut tick = interval(period);
            tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = tick.tick() => match api.get_multi_cluster_config().await {
                        Ok(config) => {
                            tracing::debug!(
                                operation = "get_multi_cluster_config",
                                clusters = config.cluster_count(),
                                "multi-cluster config polled"
                            );
                            tx.send_replace(Some(config));
                        }
                        Err(e) => {
                            tracing::warn!(
                                error = %e,
                                operation = "get_multi_cluster_config",
                                "multi-cluster poll failed"
                            );
                        }
                    },
                    _ = &mut shutdown_rx => {
                        tracing::debug!("Multi-cluster polling stopped");
                        break;
                    }
                }
            }
        })
    }

    pub fn start_cluster_token_status_polling(&self) -> Subscription {
        let api = self.api.clone();
        let tx = self.token_status_tx.clone();
        let period = self.token_status_interval;
        Subscription::spawn("cluster_token_status", move |mut shutdown_rx| async move {
            let mut tick = interval(period);
            tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = tick.tick() => match api.check_token_status().await {
                        Ok(status) => {
                            tracing::debug!(
                                operation = "check_token_status",
                                clusters = status.len(),
                                "token status polled"
                            );
                            tx.send_replace(Some(status));
                        }
                        Err(e) => {
                            tracing::warn!(
                                error = %e,
                                operation = "check_token_status",
                                "token status poll failed"
                            );
                        }
                    },
                    _ = &mut shutdown_rx => {
                        tracing::debug!("Token status polling stopped");
                        break;
                    }
                }
            }
        })
    }
}
