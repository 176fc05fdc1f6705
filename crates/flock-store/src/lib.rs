//! # flock-store
//!
//! The persisted entity store for the Flock demo.
//!
//! The backing storage is deliberately primitive: an opaque key-value
//! backend with whole-value string get/set semantics, a fixed ~50 MiB
//! capacity, and no transactions or change notifications.  Whole-collection
//! replace, seeding on first run and the malformed-record fallback are all
//! layered on top by [`Store`].

pub mod kv;
pub mod seed;
pub mod store;

mod error;

pub use error::{Result, StoreError};
pub use kv::{FileKv, KvBackend, MemoryKv};
pub use store::Store;
