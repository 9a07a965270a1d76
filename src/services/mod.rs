// Poll providers and session state shared with the workbench

mod auth_storage;
mod favicon;
mod multi_cluster;
mod summary;
mod task_manager;

pub use auth_storage::{AuthStorage, PermissionSource};
pub use favicon::{FaviconService, HealthIndicator};
pub use multi_cluster::MultiClusterService;
pub use summary::SummaryService;
pub use task_manager::TaskManagerService;
