// Health indicator derived from the latest summary (the dashboard's favicon colour)

use crate::models::Summary;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthIndicator {
    Ok,
    Warn,
    Error,
    Unknown,
}

impl HealthIndicator {
    pub fn from_health_status(status: &str) -> Self {
        match status {
            "HEALTH_OK" => HealthIndicator::Ok,
            "HEALTH_WARN" => HealthIndicator::Warn,
            "HEALTH_ERR" => HealthIndicator::Error,
            _ => HealthIndicator::Unknown,
        }
    }
}

pub struct FaviconService {
    summary_rx: watch::Receiver<Option<Summary>>,
    initialized: AtomicBool,
}

impl FaviconService {
    pub fn new(summary_rx: watch::Receiver<Option<Summary>>) -> Self {
        Self {
            summary_rx,
            initialized: AtomicBool::new(false),
        }
    }

    /// Fire-and-forget; spawns nothing.
    pub fn init(&self) {
        if !self.initialized.swap(true, Ordering::Relaxed) {
            tracing::debug!("health indicator initialized");
        }
    }

    /// `Unknown` before `init` or before the first summary.
    pub fn indicator(&self) -> HealthIndicator {
        if !self.initialized.load(Ordering::Relaxed) {
            return HealthIndicator::Unknown;
        }
        self.summary_rx
            .borrow()
            .as_ref()
            .map(|s| HealthIndicator::from_health_status(&s.health_status))
            .unwrap_or(HealthIndicator::Unknown)
    }
}
