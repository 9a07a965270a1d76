// Multi-cluster configuration and token status

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterEntry {
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub cluster_alias: String,
    #[serde(default)]
    pub cluster_connection_status: u8,
    #[serde(default)]
    pub ttl: Option<i64>,
}

/// GET /api/multi-cluster/get_config
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiClusterConfig {
    #[serde(default)]
    pub current_url: String,
    #[serde(default)]
    pub current_user: String,
    #[serde(default)]
    pub hub_url: String,
    /// Keyed by cluster fsid.
    #[serde(default)]
    pub config: HashMap<String, Vec<ClusterEntry>>,
}

impl MultiClusterConfig {
    pub fn cluster_count(&self) -> usize {
        self.config.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenStatus {
    #[serde(default)]
    pub status: String,
    /// Seconds until the token expires, when known.
    #[serde(default)]
    pub time_left: Option<i64>,
}

/// GET /api/multi-cluster/check_token_status, keyed by cluster name.
pub type TokenStatusMap = HashMap<String, TokenStatus>;
