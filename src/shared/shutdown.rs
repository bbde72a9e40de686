//! Cooperative shutdown shared by the HTTP server and the background jobs
//!
//! `ShutdownSignal` is a latch: once triggered it stays triggered, and
//! every clone observes it. Jobs poll it between iterations and race their
//! database calls against it with `run_until`. `BackgroundTasks` waits for
//! the jobs to wind down within a grace period.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Clone)]
pub struct ShutdownSignal {
    sender: Arc<watch::Sender<bool>>,
    receiver: watch::Receiver<bool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    pub fn trigger(&self) {
        if !self.sender.send_replace(true) {
            info!("🛑 Shutdown requested");
        }
    }

    pub fn is_triggered(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolves once the signal is triggered (immediately if it already was)
    pub async fn wait(&self) {
        let mut receiver = self.receiver.clone();
        // The sender lives as long as `self`, so this cannot fail
        let _ = receiver.wait_for(|triggered| *triggered).await;
    }

    /// Drive `fut` to completion unless shutdown comes first. `None` means
    /// the future was dropped, or never started because shutdown was
    /// already requested.
    pub async fn run_until<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.is_triggered() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.wait() => None,
            out = fut => Some(out),
        }
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Trigger `signal` on SIGTERM or Ctrl+C
pub async fn listen_for_os_signals(signal: ShutdownSignal) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal as unix_signal, SignalKind};

        let mut sigterm = match unix_signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => info!("📡 Received SIGTERM"),
            res = tokio::signal::ctrl_c() => match res {
                Ok(()) => info!("📡 Received Ctrl+C"),
                Err(e) => {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                    return;
                }
            },
            _ = signal.wait() => return,
        }
    }

    #[cfg(not(unix))]
    {
        tokio::select! {
            res = tokio::signal::ctrl_c() => match res {
                Ok(()) => info!("📡 Received Ctrl+C"),
                Err(e) => {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                    return;
                }
            },
            _ = signal.wait() => return,
        }
    }

    signal.trigger();
}

/// The spawned background jobs, drained together on shutdown
pub struct BackgroundTasks {
    signal: ShutdownSignal,
    grace: Duration,
    tasks: Vec<(&'static str, JoinHandle<()>)>,
}

impl BackgroundTasks {
    pub fn new(signal: ShutdownSignal, grace_secs: u64) -> Self {
        Self {
            signal,
            grace: Duration::from_secs(grace_secs),
            tasks: Vec::new(),
        }
    }

    pub fn track(&mut self, name: &'static str, handle: JoinHandle<()>) {
        self.tasks.push((name, handle));
    }

    /// Trigger shutdown and wait for every task. Tasks still running when
    /// the grace period ends are aborted; returns `false` in that case.
    pub async fn drain(self) -> bool {
        self.signal.trigger();
        info!(
            tasks = self.tasks.len(),
            grace_secs = self.grace.as_secs(),
            "⏳ Waiting for background tasks"
        );

        let mut tasks = self.tasks;
        let joined = tokio::time::timeout(self.grace, async {
            for (name, handle) in tasks.iter_mut() {
                if let Err(e) = handle.await {
                    warn!(task = *name, error = %e, "Background task ended abnormally");
                }
            }
        })
        .await
        .is_ok();

        if joined {
            info!("✅ Background tasks stopped");
        } else {
            for (name, handle) in &tasks {
                if !handle.is_finished() {
                    warn!(task = *name, "⚠️ Background task did not stop in time, aborting");
                    handle.abort();
                }
            }
        }
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_clone_sees_the_trigger() {
        let signal = ShutdownSignal::new();
        let other = signal.clone();
        let waiter = tokio::spawn(async move { other.wait().await });

        signal.trigger();
        signal.trigger();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should resolve")
            .unwrap();
        assert!(signal.is_triggered());
    }

    #[tokio::test]
    async fn run_until_completes_or_abandons() {
        let signal = ShutdownSignal::new();
        assert_eq!(signal.run_until(async { 7 }).await, Some(7));

        let pending = signal.run_until(std::future::pending::<()>());
        let trigger = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            signal.trigger();
        };
        let (out, ()) = tokio::join!(pending, trigger);
        assert_eq!(out, None);

        // Never started once triggered
        assert_eq!(signal.run_until(async { 7 }).await, None);
    }

    #[tokio::test]
    async fn drain_waits_for_cooperative_tasks() {
        let signal = ShutdownSignal::new();
        let mut tasks = BackgroundTasks::new(signal.clone(), 1);
        let watched = signal.clone();
        tasks.track("scan", tokio::spawn(async move { watched.wait().await }));

        assert!(tasks.drain().await);
        assert!(signal.is_triggered());
    }

    #[tokio::test]
    async fn drain_aborts_tasks_that_ignore_the_signal() {
        let mut tasks = BackgroundTasks::new(ShutdownSignal::new(), 0);
        tasks.track("stuck", tokio::spawn(std::future::pending::<()>()));
        assert!(!tasks.drain().await);
    }
}
