// Cluster summary and background task models

use serde::{Deserialize, Serialize};

/// A task still running on the manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutingTask {
    pub name: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
    #[serde(default)]
    pub begin_time: String,
    #[serde(default)]
    pub progress: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishedTask {
    pub name: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
    #[serde(default)]
    pub begin_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub ret_value: serde_json::Value,
    #[serde(default)]
    pub exception: serde_json::Value,
}

/// Periodic cluster summary (GET /api/summary).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub health_status: String,
    #[serde(default)]
    pub mgr_id: String,
    #[serde(default)]
    pub mgr_host: String,
    #[serde(default)]
    pub have_mon_connection: bool,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub executing_tasks: Vec<ExecutingTask>,
    #[serde(default)]
    pub finished_tasks: Vec<FinishedTask>,
}

impl Summary {
    pub fn is_executing(&self, name: &str, metadata: &serde_json::Value) -> bool {
        self.executing_tasks
            .iter()
            .any(|t| t.name == name && &t.metadata == metadata)
    }

    pub fn find_finished(&self, name: &str, metadata: &serde_json::Value) -> Option<&FinishedTask> {
        self.finished_tasks
            .iter()
            .find(|t| t.name == name && &t.metadata == metadata)
    }
}
