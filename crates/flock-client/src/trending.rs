//! Trending sidebar data.
//!
//! Topics are fixed; only their post counts move.  Drift is additive so a
//! topic's count never shrinks between renders.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tokio::time::MissedTickBehavior;
use tracing::debug;

use flock_shared::constants::TREND_DRIFT_INTERVAL_MS;

use crate::scheduler::TimerGuard;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingTopic {
    pub id: u32,
    pub category: String,
    pub hashtag: String,
    pub post_count: u64,
}

pub fn seed_topics() -> Vec<TrendingTopic> {
    let topics = [
        (1, "Music", "#LucidPPVibes", 45_200),
        (2, "Entertainment", "#HipHopHeat", 128_500),
        (3, "Technology", "#AITrends", 89_300),
        (4, "Sports", "#GameDay", 76_400),
        (5, "News", "#Breaking", 234_100),
    ];

    topics
        .into_iter()
        .map(|(id, category, hashtag, post_count)| TrendingTopic {
            id,
            category: category.to_string(),
            hashtag: hashtag.to_string(),
            post_count,
        })
        .collect()
}

/// Bump every topic's post count by an independent random amount.
pub fn drift<R: Rng>(rng: &mut R, topics: &mut [TrendingTopic]) {
    for topic in topics {
        topic.post_count += rng.gen_range(0..500);
    }
}

/// Drift the shared topic list on its own cadence while the sidebar is
/// visible.  Stops when the returned guard drops.
pub fn spawn_trend_drift(topics: Arc<Mutex<Vec<TrendingTopic>>>) -> TimerGuard {
    debug!(period_ms = TREND_DRIFT_INTERVAL_MS, "starting trend drift");

    let handle = tokio::spawn(async move {
        let mut rng = StdRng::from_entropy();
        let mut interval =
            tokio::time::interval(Duration::from_millis(TREND_DRIFT_INTERVAL_MS));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        interval.tick().await;

        loop {
            interval.tick().await;
            let mut topics = topics.lock().unwrap_or_else(|e| e.into_inner());
            drift(&mut rng, &mut topics);
        }
    });

    TimerGuard::new("trend-drift", handle)
}
