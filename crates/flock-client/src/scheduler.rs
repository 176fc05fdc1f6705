//! Background engagement timers.
//!
//! Two loops keep the feed alive while a session is open: a fast tick that
//! grows every post a little, and a slower drift that nudges the profile's
//! monthly viewer count.  Each loop is owned by a [`TimerGuard`]; dropping
//! the guard stops the loop, so a closed session leaves nothing running.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use flock_shared::constants::{TICK_INTERVAL_MS, VIEWER_DRIFT_INTERVAL_MS};
use flock_store::KvBackend;

use crate::repository::Repository;

/// Handle to a spawned timer loop.  The loop runs until the guard drops.
pub struct TimerGuard {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl TimerGuard {
    pub(crate) fn new(name: &'static str, handle: JoinHandle<()>) -> Self {
        Self { name, handle }
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        debug!(timer = self.name, "stopping timer");
        self.handle.abort();
    }
}

/// Grow every post's metrics on a fixed cadence.
pub fn spawn_feed_tick<K>(repo: Arc<Mutex<Repository<K>>>) -> TimerGuard
where
    K: KvBackend + 'static,
{
    spawn_timer("feed-tick", TICK_INTERVAL_MS, repo, |repo| {
        if let Err(e) = repo.tick_all() {
            warn!(error = %e, "feed tick failed");
        }
    })
}

/// Drift the profile's monthly viewer count on a slower cadence.
pub fn spawn_viewer_drift<K>(repo: Arc<Mutex<Repository<K>>>) -> TimerGuard
where
    K: KvBackend + 'static,
{
    spawn_timer("viewer-drift", VIEWER_DRIFT_INTERVAL_MS, repo, |repo| {
        if let Err(e) = repo.drift_monthly_viewers() {
            warn!(error = %e, "viewer drift failed");
        }
    })
}

fn spawn_timer<K, F>(
    name: &'static str,
    period_ms: u64,
    repo: Arc<Mutex<Repository<K>>>,
    mut body: F,
) -> TimerGuard
where
    K: KvBackend + 'static,
    F: FnMut(&mut Repository<K>) + Send + 'static,
{
    debug!(timer = name, period_ms, "starting timer");

    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(period_ms));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; the loop should wait a full
        // period before its first pass.
        interval.tick().await;

        loop {
            interval.tick().await;
            let mut repo = repo.lock().unwrap_or_else(|e| e.into_inner());
            body(&mut repo);
        }
    });

    TimerGuard::new(name, handle)
}
