//! Typed record access over the key-value backend.
//!
//! Three logical records exist: the posts collection (JSON array, newest
//! first, comments nested), the profile object, and the last-session marker
//! used to compute away time.  There is no partial-field update primitive;
//! every mutation loads a whole record, transforms it in memory, and writes
//! the whole record back.

use flock_shared::{Post, Profile};

use crate::error::{Result, StoreError};
use crate::kv::KvBackend;

const POSTS_KEY: &str = "flock_posts";
const PROFILE_KEY: &str = "flock_profile";
const LAST_SESSION_KEY: &str = "flock_last_session";

/// Typed facade over a [`KvBackend`].
pub struct Store<K: KvBackend> {
    kv: K,
}

impl<K: KvBackend> Store<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Load the full posts collection.  Fails with
    /// [`StoreError::NotInitialized`] before the first seed.
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let raw = self.kv.get(POSTS_KEY)?.ok_or(StoreError::NotInitialized)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Atomic whole-collection overwrite, last-writer-wins.
    pub fn replace_posts(&mut self, posts: &[Post]) -> Result<()> {
        let raw = serde_json::to_string(posts)?;
        self.kv.set(POSTS_KEY, &raw)
    }

    pub fn load_profile(&self) -> Result<Profile> {
        let raw = self.kv.get(PROFILE_KEY)?.ok_or(StoreError::NotInitialized)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save_profile(&mut self, profile: &Profile) -> Result<()> {
        let raw = serde_json::to_string(profile)?;
        self.kv.set(PROFILE_KEY, &raw)
    }

    /// When the application was last open, epoch millis.  A marker that does
    /// not parse is treated as absent; it only drives catch-up, and skipping
    /// one catch-up is cheaper than failing the load.
    pub fn last_session(&self) -> Result<Option<i64>> {
        let Some(raw) = self.kv.get(LAST_SESSION_KEY)? else {
            return Ok(None);
        };

        match raw.trim().parse::<i64>() {
            Ok(ms) => Ok(Some(ms)),
            Err(_) => {
                tracing::warn!(raw, "discarding malformed last-session marker");
                Ok(None)
            }
        }
    }

    /// Overwritten on every load.
    pub fn stamp_session(&mut self, now_ms: i64) -> Result<()> {
        self.kv.set(LAST_SESSION_KEY, &now_ms.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKv;
    use crate::seed::{seed_posts, seed_profile};

    fn store() -> Store<MemoryKv> {
        Store::new(MemoryKv::new())
    }

    #[test]
    fn posts_fail_not_initialized_before_seed() {
        assert!(matches!(
            store().load_posts(),
            Err(StoreError::NotInitialized)
        ));
    }

    #[test]
    fn posts_round_trip() {
        let mut store = store();
        let posts = seed_posts(1_700_000_000_000, 100);
        store.replace_posts(&posts).unwrap();

        let loaded = store.load_posts().unwrap();
        assert_eq!(loaded, posts);
    }

    #[test]
    fn replace_is_whole_collection_overwrite() {
        let mut store = store();
        store.replace_posts(&seed_posts(0, 100)).unwrap();

        let mut posts = store.load_posts().unwrap();
        posts.remove(0);
        store.replace_posts(&posts).unwrap();

        assert_eq!(store.load_posts().unwrap().len(), 2);
    }

    #[test]
    fn malformed_posts_record_is_reported() {
        let mut kv = MemoryKv::new();
        kv.set("flock_posts", "{not json").unwrap();
        let store = Store::new(kv);
        assert!(matches!(
            store.load_posts(),
            Err(StoreError::MalformedRecord(_))
        ));
    }

    #[test]
    fn profile_round_trip() {
        let mut store = store();
        let profile = seed_profile();
        store.save_profile(&profile).unwrap();
        assert_eq!(store.load_profile().unwrap(), profile);
    }

    #[test]
    fn session_marker_round_trip_and_fallback() {
        let mut store = store();
        assert_eq!(store.last_session().unwrap(), None);

        store.stamp_session(1_700_000_000_000).unwrap();
        assert_eq!(store.last_session().unwrap(), Some(1_700_000_000_000));

        let mut kv = MemoryKv::new();
        kv.set("flock_last_session", "not-a-number").unwrap();
        assert_eq!(Store::new(kv).last_session().unwrap(), None);
    }

    #[test]
    fn quota_error_propagates_from_replace() {
        let mut store = Store::new(MemoryKv::with_capacity(64));
        let err = store.replace_posts(&seed_posts(0, 100)).unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { .. }));
    }
}
