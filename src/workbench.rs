// Workbench lifecycle: starts the background polls on activation and releases them all on
// deactivation. Inactive -> Active -> Inactive; each activation owns a fresh group.

use crate::services::{
    FaviconService, MultiClusterService, PermissionSource, SummaryService, TaskManagerService,
};
use crate::subscription::SubscriptionGroup;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Inactive,
    Active,
}

/// Services the workbench drives; injected so nothing reads global state.
pub struct WorkbenchDeps {
    pub permissions: Arc<dyn PermissionSource>,
    pub summary: Arc<SummaryService>,
    pub task_manager: Arc<TaskManagerService>,
    pub multi_cluster: Arc<MultiClusterService>,
    pub favicon: Arc<FaviconService>,
}

pub struct WorkbenchSupervisor {
    deps: WorkbenchDeps,
    subs: SubscriptionGroup,
    state: LifecycleState,
}

impl WorkbenchSupervisor {
    pub fn new(deps: WorkbenchDeps) -> Self {
        Self {
            deps,
            subs: SubscriptionGroup::new(),
            state: LifecycleState::Inactive,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Subscriptions started by the current activation (0 while inactive).
    pub fn active_subscriptions(&self) -> usize {
        match self.state {
            LifecycleState::Active => self.subs.len(),
            LifecycleState::Inactive => 0,
        }
    }

    pub fn subscription_names(&self) -> Vec<&'static str> {
        self.subs.names()
    }

    /// Inactive -> Active. Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.state == LifecycleState::Active {
            tracing::warn!("workbench already active; start ignored");
            return;
        }
        let permissions = self.deps.permissions.get_permissions();
        let mut subs = SubscriptionGroup::new();

        if permissions.config_opt().read {
            subs.add(self.deps.multi_cluster.start_polling());
            subs.add(self.deps.multi_cluster.start_cluster_token_status_polling());
        }
        subs.add(self.deps.summary.start_polling());
        subs.add(self.deps.task_manager.init(&self.deps.summary));
        self.deps.favicon.init();

        tracing::info!(
            subscriptions = subs.len(),
            multi_cluster = permissions.config_opt().read,
            "workbench activated"
        );
        self.subs = subs;
        self.state = LifecycleState::Active;
    }

    /// Active -> Inactive. Cancels each started poll once and waits for it to exit.
    /// Returns the number of polls cancelled; 0 when already inactive.
    pub async fn stop(&mut self) -> usize {
        if self.state == LifecycleState::Inactive {
            return 0;
        }
        self.state = LifecycleState::Inactive;
        let cancelled = self.subs.shutdown().await;
        tracing::info!(cancelled, "workbench deactivated");
        cancelled
    }
}
