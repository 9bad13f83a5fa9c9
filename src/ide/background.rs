//! Background loops: diagnostics publishing and project context refresh.
//!
//! Each loop is a [`PeriodicTask`] on the tokio runtime with its own
//! cancellation token. Shutdown cancels the loop and waits a bounded time for
//! it to finish.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use smol_str::SmolStr;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::diagnostics::Diagnostic;
use super::workspace::Workspace;

/// Receives diagnostics for documents that changed.
pub trait DiagnosticsPublisher: Send + Sync {
    fn publish(&self, uri: &str, diagnostics: Vec<Diagnostic>);
}

/// A job run at a fixed interval until cancelled.
pub struct PeriodicTask {
    name: SmolStr,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl PeriodicTask {
    /// Start running `job` every `interval`, the first time right away.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// Each run happens on the blocking pool. A run that panics is logged and
    /// the next tick runs the job again.
    pub fn spawn<F>(name: impl Into<SmolStr>, interval: Duration, job: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let name = name.into();
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let task_name = name.clone();
        let job = Arc::new(Mutex::new(job));
        let handle = tokio::spawn(async move {
            tracing::debug!("Task {} started (interval: {:?})", task_name, interval);
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let job = Arc::clone(&job);
                        let run = tokio::task::spawn_blocking(move || {
                            let mut job = job.lock();
                            (*job)()
                        });
                        if let Err(e) = run.await {
                            tracing::warn!("Task {} job failed: {}", task_name, e);
                        }
                    }
                }
            }
            tracing::debug!("Task {} stopped", task_name);
        });
        Self { name, cancel, handle }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Cancel the loop and wait up to `timeout` for it to finish.
    ///
    /// Returns `true` when the task stopped cleanly or was cancelled. A timeout
    /// is logged and reported as `false`.
    pub async fn shutdown(self, timeout: Duration) -> bool {
        self.cancel.cancel();
        let abort = self.handle.abort_handle();
        match tokio::time::timeout(timeout, self.handle).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) if e.is_cancelled() => true,
            Ok(Err(e)) => {
                tracing::warn!("Task {} failed: {}", self.name, e);
                false
            }
            Err(_) => {
                tracing::warn!("Task {} did not stop within {:?}, aborting", self.name, timeout);
                abort.abort();
                false
            }
        }
    }
}

/// Publish diagnostics of documents changed since the previous tick, or of
/// every document after the project context changed.
pub fn spawn_diagnostics_publisher(
    workspace: Arc<Workspace>,
    publisher: Arc<dyn DiagnosticsPublisher>,
    interval: Duration,
) -> PeriodicTask {
    let mut last_published: Option<Instant> = None;
    let mut last_generation: Option<u64> = None;
    PeriodicTask::spawn("publish-diagnostics", interval, move || {
        let started = Instant::now();
        let generation = workspace.provider().current().map(|c| c.generation());
        let since = if generation == last_generation { last_published } else { None };
        for (uri, diagnostics) in workspace.collect_diagnostics(since) {
            publisher.publish(&uri, diagnostics);
        }
        last_published = Some(started);
        last_generation = generation;
    })
}

/// Initialize the project context once a document names its root path, and
/// reload it when the syntax model changes.
pub fn spawn_root_path_check(workspace: Arc<Workspace>, interval: Duration) -> PeriodicTask {
    PeriodicTask::spawn("root-path-check", interval, move || {
        match workspace.ensure_project_context() {
            Ok(true) => tracing::info!("Project context updated"),
            Ok(false) => {}
            Err(e) => tracing::warn!("Project context check failed: {}", e),
        }
    })
}
