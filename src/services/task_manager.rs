// Tracks interest in background manager tasks and resolves it from summary emissions.
// A registration is resolved once its task has left `executing_tasks` and shows up in
// `finished_tasks` with the same name and metadata.

use crate::models::{FinishedTask, Summary};
use crate::services::SummaryService;
use crate::subscription::Subscription;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

struct TaskRegistration {
    name: String,
    metadata: serde_json::Value,
    on_finished: oneshot::Sender<FinishedTask>,
}

#[derive(Default)]
pub struct TaskManagerService {
    registrations: Arc<Mutex<Vec<TaskRegistration>>>,
}

impl TaskManagerService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers interest in the task identified by `name` and `metadata`.
    /// The receiver resolves with the finished task as reported by the summary.
    pub fn subscribe(
        &self,
        name: impl Into<String>,
        metadata: serde_json::Value,
    ) -> oneshot::Receiver<FinishedTask> {
        let (on_finished, rx) = oneshot::channel();
        let registration = TaskRegistration {
            name: name.into(),
            metadata,
            on_finished,
        };
        match self.registrations.lock() {
            Ok(mut guard) => guard.push(registration),
            Err(e) => tracing::warn!(error = %e, "task registrations lock poisoned"),
        }
        rx
    }

    pub fn pending(&self) -> usize {
        self.registrations.lock().map(|g| g.len()).unwrap_or(0)
    }

    /// Follows `summary` emissions until cancelled.
    pub fn init(&self, summary: &SummaryService) -> Subscription {
        let registrations = self.registrations.clone();
        let mut summary_rx = summary.subscribe();
        Subscription::spawn("task_manager", move |mut shutdown_rx| async move {
            loop {
                tokio::select! {
                    changed = summary_rx.changed() => {
                        if changed.is_err() {
                            tracing::debug!("Summary source closed; task manager stopping");
                            break;
                        }
                        let latest = summary_rx.borrow_and_update().clone();
                        if let Some(summary) = latest {
                            handle_summary(&registrations, &summary);
                        }
                    }
                    _ = &mut shutdown_rx => {
                        tracing::debug!("Task manager stopped");
                        break;
                    }
                }
            }
        })
    }

    /// Applies one summary to the pending registrations. Returns how many were resolved.
    pub fn process_summary(&self, summary: &Summary) -> usize {
        handle_summary(&self.registrations, summary)
    }
}

fn handle_summary(registrations: &Mutex<Vec<TaskRegistration>>, summary: &Summary) -> usize {
    let Ok(mut guard) = registrations.lock() else {
        tracing::warn!("task registrations lock poisoned");
        return 0;
    };
    let before = guard.len();
    let pending = std::mem::take(&mut *guard);
    for registration in pending {
        if summary.is_executing(&registration.name, &registration.metadata) {
            guard.push(registration);
            continue;
        }
        match summary.find_finished(&registration.name, &registration.metadata) {
            Some(finished) => {
                tracing::info!(
                    task = %finished.name,
                    success = finished.success,
                    "task finished"
                );
                // Receiver may have been dropped; nothing to notify then.
                let _ = registration.on_finished.send(finished.clone());
            }
            None => guard.push(registration),
        }
    }
    before - guard.len()
}
