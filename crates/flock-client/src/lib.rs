//! # flock-client
//!
//! The client core of the Flock demo: the repository every surface reads
//! and writes through, the discrete user-action mutators with their one-shot
//! guards, and the background scheduler that keeps engagement moving while
//! a view is open.
//!
//! All shared state lives in one [`repository::Repository`] behind
//! `Arc<Mutex<_>>`; surfaces never keep authoritative copies of their own.

pub mod clock;
pub mod guards;
pub mod mutators;
pub mod repository;
pub mod scheduler;
pub mod session;
pub mod trending;

use tracing_subscriber::{fmt, EnvFilter};

pub use repository::{ComposeRequest, Repository};
pub use session::FeedSession;

/// Initialise tracing for binaries embedding the client core.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("flock_client=debug,flock_store=info,warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
