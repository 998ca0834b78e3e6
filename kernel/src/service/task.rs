//! Fire-and-forget execution of best-effort side effects.
//!
//! Calendar sync and notifications are submitted here after the appointment
//! state change has been persisted. Their outcome is only logged.

use std::{future::Future, pin::Pin, time::Duration};

use shared::error::AppResult;

pub type SideEffect = Pin<Box<dyn Future<Output = AppResult<()>> + Send + 'static>>;

pub trait TaskRunner: Send + Sync {
    /// Schedules `task` without waiting for it. Must not block the caller.
    fn submit(&self, label: &'static str, task: SideEffect);
}

/// Spawns every side effect on the tokio runtime, bounded by a timeout.
pub struct TokioTaskRunner {
    timeout: Duration,
}

impl TokioTaskRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl TaskRunner for TokioTaskRunner {
    fn submit(&self, label: &'static str, task: SideEffect) {
        let timeout = self.timeout;
        tokio::spawn(run_logged(label, timeout, task));
    }
}

/// Awaits `task` and reports its outcome; failures and timeouts end here.
pub async fn run_logged(label: &'static str, timeout: Duration, task: SideEffect) {
    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(())) => tracing::debug!(task = label, "side effect completed"),
        Ok(Err(e)) => tracing::warn!(
            task = label,
            error.message = %e,
            "side effect failed, ignoring"
        ),
        Err(_) => tracing::warn!(
            task = label,
            timeout_ms = timeout.as_millis() as u64,
            "side effect timed out, ignoring"
        ),
    }
}
