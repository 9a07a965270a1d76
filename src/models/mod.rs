// Domain models (management API payloads and derived view state)

mod auth;
mod health;
mod multi_cluster;
mod overview;
mod permissions;
mod rgw;
mod summary;

pub use auth::{AuthResponse, LoginRequest};
pub use health::ClusterCapacity;
pub use multi_cluster::{ClusterEntry, MultiClusterConfig, TokenStatus, TokenStatusMap};
pub use overview::{OverviewCounters, OverviewUpdate};
pub use permissions::{CONFIG_OPT_SCOPE, Permission, Permissions};
pub use rgw::{
    Quota, RealmList, RgwBucket, RgwDaemon, RgwUser, UsageStats, ZoneList, ZonegroupList,
};
pub use summary::{ExecutingTask, FinishedTask, Summary};
