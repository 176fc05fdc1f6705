//! # flock-engine
//!
//! The engagement growth engine: pure functions that advance a post's
//! engagement tuple, either in one bounded catch-up step covering the time
//! the application was closed, or in small repeated real-time ticks while it
//! is open.
//!
//! Every function takes its random generator as a parameter so the math is
//! reproducible under a seeded generator.  Nothing in this crate touches the
//! store or the clock.

pub mod audience;
pub mod growth;

pub use audience::{post_audience, Audience};
pub use growth::{catch_up, reach, tick};
