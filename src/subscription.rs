// Cancellable background tasks and the group that releases them together.
// A subscription is a spawned task plus a oneshot shutdown signal; cancellation is cooperative.

use std::future::Future;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub struct Subscription {
    name: &'static str,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Spawns `task`, handing it the receiver that resolves on `unsubscribe` (or when this
    /// handle is dropped). The task is expected to `select!` on it and return.
    pub fn spawn<F, Fut>(name: &'static str, task: F) -> Self
    where
        F: FnOnce(oneshot::Receiver<()>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(task(shutdown_rx));
        tracing::debug!(subscription = name, "subscription started");
        Self {
            name,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Signals the task to stop. Returns `true` only for the call that actually sent the signal.
    pub fn unsubscribe(&mut self) -> bool {
        match self.shutdown_tx.take() {
            Some(tx) => {
                // Err means the task already finished; it is still counted as cancelled here.
                let _ = tx.send(());
                tracing::debug!(subscription = self.name, "subscription cancelled");
                true
            }
            None => false,
        }
    }

    pub fn closed(&self) -> bool {
        self.shutdown_tx.is_none()
    }

    /// Waits for the task to exit. Call after `unsubscribe`; joining twice is a no-op.
    pub async fn join(&mut self) {
        if let Some(handle) = self.handle.take()
            && let Err(e) = handle.await
        {
            tracing::warn!(subscription = self.name, error = %e, "subscription task failed");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

/// The subscriptions started during one activation, released together.
#[derive(Default)]
pub struct SubscriptionGroup {
    members: Vec<Subscription>,
    closed: bool,
}

impl SubscriptionGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member. Adding to a group that was already unsubscribed cancels the member at once.
    pub fn add(&mut self, mut subscription: Subscription) {
        if self.closed {
            subscription.unsubscribe();
        }
        self.members.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.members.iter().map(Subscription::name).collect()
    }

    /// Cancels every member that has not been cancelled yet; returns how many this call cancelled.
    pub fn unsubscribe(&mut self) -> usize {
        self.closed = true;
        self.members
            .iter_mut()
            .map(Subscription::unsubscribe)
            .filter(|cancelled| *cancelled)
            .count()
    }

    /// Unsubscribes, then waits for every member task to exit.
    pub async fn shutdown(&mut self) -> usize {
        let cancelled = self.unsubscribe();
        for member in &mut self.members {
            member.join().await;
        }
        cancelled
    }
}
