//! Headless feed demo: open the store, let the engagement timers run for a
//! few seconds, poke at a post, and print the feed before and after.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use flock_client::clock::SystemClock;
use flock_client::scheduler::{spawn_feed_tick, spawn_viewer_drift};
use flock_client::trending::{seed_topics, spawn_trend_drift};
use flock_client::{init_tracing, FeedSession, Repository};
use flock_shared::format::{compact_count, time_ago};
use flock_shared::Post;
use flock_store::{FileKv, Store};

fn print_feed(label: &str, posts: &[Post], now_ms: i64) {
    println!("--- {label} ---");
    for post in posts {
        println!(
            "@{:<12} {:>6} views  {:>5} likes  {:>4} rts  ({})",
            post.author.handle,
            compact_count(post.views),
            compact_count(post.likes),
            compact_count(post.retweets),
            time_ago(now_ms, post.timestamp),
        );
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let store = Store::new(FileKv::open()?);
    let repo = Repository::open(store, Arc::new(SystemClock))?;
    let now = repo.now_ms();
    print_feed("feed on open", repo.posts(), now);

    let repo = Arc::new(Mutex::new(repo));
    let topics = Arc::new(Mutex::new(seed_topics()));
    let _tick = spawn_feed_tick(repo.clone());
    let _viewers = spawn_viewer_drift(repo.clone());
    let _trends = spawn_trend_drift(topics.clone());

    let mut session = FeedSession::new(repo.clone());
    let first = session.posts()[0].id;
    session.like(first)?;
    info!(%first, "liked the top post");

    tokio::time::sleep(Duration::from_secs(10)).await;

    let guard = repo.lock().unwrap_or_else(|e| e.into_inner());
    print_feed("feed after 10s of engagement", guard.posts(), guard.now_ms());
    println!(
        "monthly viewers: {}",
        compact_count(guard.profile().monthly_viewers)
    );
    drop(guard);

    println!("\ntrending:");
    for topic in topics.lock().unwrap_or_else(|e| e.into_inner()).iter() {
        println!(
            "  {:<14} {:<14} {} posts",
            topic.hashtag,
            topic.category,
            compact_count(topic.post_count)
        );
    }

    Ok(())
}
