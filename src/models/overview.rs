// Derived overview counters served to dashboard clients

use serde::{Deserialize, Serialize};

/// One field per overview card. `None` until the matching fetch completes (or if it failed).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewCounters {
    pub daemon_count: Option<usize>,
    pub realm_count: Option<usize>,
    pub zonegroup_count: Option<usize>,
    pub zone_count: Option<usize>,
    pub bucket_count: Option<usize>,
    pub user_count: Option<usize>,
    pub object_count: Option<String>,
    pub total_pool_used_bytes: Option<u64>,
}

/// Published once per completed fetch (successful or not) during an activation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewUpdate {
    /// Which data source completed, e.g. "daemons" or "capacity".
    pub source: String,
    pub ok: bool,
    pub counters: OverviewCounters,
}
