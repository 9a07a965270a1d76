// Overview aggregator: one concurrent fetch per data source, each reduced to a counter.
// The seven fetches are independent; each completion updates only its own counter(s)
// and publishes exactly one OverviewUpdate.

use crate::ceph_api::{HealthApi, RgwApi};
use crate::error::ApiError;
use crate::models::{OverviewCounters, OverviewUpdate};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};

/// Number of fetches issued per activation.
pub const SOURCE_COUNT: usize = 7;

pub struct OverviewAggregator {
    rgw: Arc<dyn RgwApi>,
    health: Arc<dyn HealthApi>,
    state: watch::Sender<OverviewCounters>,
    updates: broadcast::Sender<OverviewUpdate>,
}

impl OverviewAggregator {
    pub fn new(rgw: Arc<dyn RgwApi>, health: Arc<dyn HealthApi>) -> Self {
        let (state, _) = watch::channel(OverviewCounters::default());
        // Room for a whole activation so a subscriber never lags.
        let (updates, _) = broadcast::channel(SOURCE_COUNT * 2);
        Self {
            rgw,
            health,
            state,
            updates,
        }
    }

    /// Receives one update per completed fetch of every later activation.
    pub fn subscribe(&self) -> broadcast::Receiver<OverviewUpdate> {
        self.updates.subscribe()
    }

    pub fn counters(&self) -> OverviewCounters {
        self.state.borrow().clone()
    }

    /// Clears the previous counters and issues all seven requests concurrently.
    /// Returns once every request has completed or failed.
    pub async fn activate(&self) -> OverviewCounters {
        self.state.send_replace(OverviewCounters::default());

        tokio::join!(
            self.apply("daemons", self.rgw.list_daemons(), |c, daemons| {
                c.daemon_count = Some(daemons.len());
            }),
            self.apply("realms", self.rgw.list_realms(), |c, list| {
                c.realm_count = Some(list.realms.len());
            }),
            self.apply("zonegroups", self.rgw.list_zonegroups(), |c, list| {
                c.zonegroup_count = Some(list.zonegroups.len());
            }),
            self.apply("zones", self.rgw.list_zones(), |c, list| {
                c.zone_count = Some(list.zones.len());
            }),
            self.apply("buckets", self.rgw.list_buckets(), |c, buckets| {
                c.bucket_count = Some(buckets.len());
            }),
            self.apply("users", self.rgw.list_users(), |c, users| {
                c.user_count = Some(users.len());
            }),
            self.apply("capacity", self.health.get_cluster_capacity(), |c, capacity| {
                c.object_count = Some(capacity.total_objects);
                c.total_pool_used_bytes = Some(capacity.total_pool_bytes_used);
            }),
        );

        self.counters()
    }

    async fn apply<T, F>(
        &self,
        source: &'static str,
        fetch: impl Future<Output = Result<T, ApiError>>,
        update: F,
    ) where
        F: FnOnce(&mut OverviewCounters, T),
    {
        let ok = match fetch.await {
            Ok(value) => {
                self.state.send_modify(|counters| update(counters, value));
                debug!(source, "overview counter updated");
                true
            }
            Err(e) => {
                warn!(source, error = %e, "overview fetch failed");
                false
            }
        };
        // Err only means nobody is listening.
        let _ = self.updates.send(OverviewUpdate {
            source: source.to_string(),
            ok,
            counters: self.counters(),
        });
    }
}
