//! # flock-shared
//!
//! Domain models and constants shared by every Flock crate.
//!
//! Flock is a client-only social feed demo: there is no backend, so all
//! entities live in a local persisted store and engagement numbers are
//! advanced by a simulation.  This crate holds the plain data types that the
//! store, the growth engine and the client all agree on, plus a couple of
//! display-format helpers.

pub mod constants;
pub mod format;
pub mod models;
pub mod types;

pub use models::*;
pub use types::{CommentId, PostId};
