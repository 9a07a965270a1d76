// Object gateway models: daemons, multisite topology lists, buckets, users

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A running gateway daemon and its multisite placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RgwDaemon {
    pub id: String,
    #[serde(default)]
    pub service_map_id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub server_hostname: String,
    #[serde(default)]
    pub realm_name: String,
    #[serde(default)]
    pub zonegroup_name: String,
    #[serde(default)]
    pub zone_name: String,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub port: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RealmList {
    #[serde(default)]
    pub default_info: String,
    #[serde(default)]
    pub realms: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZonegroupList {
    #[serde(default)]
    pub default_info: String,
    #[serde(default)]
    pub zonegroups: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneList {
    #[serde(default)]
    pub default_info: String,
    #[serde(default)]
    pub zones: Vec<String>,
}

/// Size/object usage of one storage class (bucket) or of a whole user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    #[serde(default)]
    pub size_actual: u64,
    #[serde(default)]
    pub num_objects: u64,
}

/// Upper bound on size and object count. Negative values mean "unlimited" on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quota {
    #[serde(default)]
    pub max_size: i64,
    #[serde(default)]
    pub max_objects: i64,
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RgwBucket {
    pub bucket: String,
    #[serde(default)]
    pub owner: String,
    /// Keyed by storage class, e.g. "rgw.main".
    #[serde(default)]
    pub usage: HashMap<String, UsageStats>,
    #[serde(default)]
    pub bucket_quota: Quota,
}

impl RgwBucket {
    /// Sum of `size_actual` over all storage classes.
    pub fn size_actual(&self) -> u64 {
        self.usage.values().map(|u| u.size_actual).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RgwUser {
    pub user_id: String,
    #[serde(default)]
    pub stats: UsageStats,
    #[serde(default)]
    pub user_quota: Quota,
}
