/// Application name
pub const APP_NAME: &str = "Flock";

/// Maximum post / comment length in code units
pub const MAX_POST_LEN: usize = 280;

/// Maximum profile bio length
pub const MAX_BIO_LEN: usize = 160;

/// Maximum profile location length
pub const MAX_LOCATION_LEN: usize = 30;

/// Maximum profile website length
pub const MAX_WEBSITE_LEN: usize = 50;

/// Interval between real-time engagement ticks
pub const TICK_INTERVAL_MS: u64 = 4_000;

/// Interval between monthly-viewer drift steps on the profile
pub const VIEWER_DRIFT_INTERVAL_MS: u64 = 10_000;

/// Interval between trending post-count drift steps
pub const TREND_DRIFT_INTERVAL_MS: u64 = 5_000;

/// Minimum away time before catch-up growth is applied on load
pub const CATCH_UP_MIN_ELAPSED_MS: i64 = 300_000;

/// Total capacity of the backing key-value store (50 MiB)
pub const MAX_STORAGE_BYTES: u64 = 50 * 1024 * 1024;

/// Audience assumed for posts when no follower count is available
pub const DEFAULT_FOLLOWERS: u64 = 100;
