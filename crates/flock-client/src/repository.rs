//! The sync coordinator: one repository, one read-modify-write protocol.
//!
//! The backing store only offers whole-value get/set, so every mutation
//! follows the same shape: load the full collection, transform the target
//! in memory, write the full collection straight back.  All five steps run synchronously with no
//! suspension point between the read and the write; that, not locking, is
//! what keeps the last-write-wins window small.  Background work always
//! starts from a freshly loaded snapshot, never from the cached view kept
//! for rendering.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use flock_engine::{catch_up, post_audience, tick};
use flock_shared::constants::CATCH_UP_MIN_ELAPSED_MS;
use flock_shared::{normalize_handle, Author, Media, Post, PostId, Profile};
use flock_store::seed::{seed_posts, seed_profile};
use flock_store::{KvBackend, Result, Store, StoreError};

use crate::clock::Clock;

/// A compose-action input, already validated for length upstream.
#[derive(Debug, Clone, Default)]
pub struct ComposeRequest {
    pub content: String,
    pub media: Option<Vec<Media>>,
    /// Post under a synthetic bot identity instead of the profile.
    pub as_bot: bool,
    pub bot_name: Option<String>,
}

/// Single source of truth for the posts collection and the profile record.
/// Every surface reads and writes through this type; the cached `posts`
/// view is refreshed on every write and is never written back as-is.
pub struct Repository<K: KvBackend> {
    store: Store<K>,
    clock: Arc<dyn Clock>,
    rng: StdRng,
    profile: Profile,
    posts: Vec<Post>,
}

impl<K: KvBackend> Repository<K> {
    /// Open the repository: seed on first run, reconcile away-time growth,
    /// stamp the session marker.
    pub fn open(store: Store<K>, clock: Arc<dyn Clock>) -> Result<Self> {
        Self::open_with_rng(store, clock, StdRng::from_entropy())
    }

    /// Open with an explicit generator; tests seed it for reproducibility.
    pub fn open_with_rng(mut store: Store<K>, clock: Arc<dyn Clock>, mut rng: StdRng) -> Result<Self> {
        let now = clock.now_ms();

        let profile = match store.load_profile() {
            Ok(profile) => profile,
            Err(StoreError::NotInitialized) => {
                let profile = seed_profile();
                store.save_profile(&profile)?;
                info!(handle = %profile.handle, "seeded default profile");
                profile
            }
            Err(StoreError::MalformedRecord(e)) => {
                warn!(error = %e, "malformed profile record, reseeding");
                let profile = seed_profile();
                store.save_profile(&profile)?;
                profile
            }
            Err(e) => return Err(e),
        };

        let mut posts = match store.load_posts() {
            Ok(posts) => posts,
            Err(StoreError::NotInitialized) => {
                let posts = seed_posts(now, profile.effective_followers());
                store.replace_posts(&posts)?;
                info!(count = posts.len(), "seeded default posts");
                posts
            }
            Err(StoreError::MalformedRecord(e)) => {
                warn!(error = %e, "malformed posts record, reseeding");
                let posts = seed_posts(now, profile.effective_followers());
                store.replace_posts(&posts)?;
                posts
            }
            Err(e) => return Err(e),
        };

        // Time-passed catch-up: grow every post once by the wall-clock time
        // the app was closed, then persist before anything else reads.
        if let Some(last_session) = store.last_session()? {
            let elapsed_ms = now - last_session;
            if elapsed_ms > CATCH_UP_MIN_ELAPSED_MS {
                let followers = profile.effective_followers();
                for post in &mut posts {
                    let audience = post_audience(post, &profile.handle, followers);
                    let grown = catch_up(&mut rng, post.metrics(), &audience, elapsed_ms);
                    post.apply_metrics(grown, now);
                }
                store.replace_posts(&posts)?;
                info!(elapsed_ms, count = posts.len(), "applied catch-up growth");
            }
        }

        store.stamp_session(now)?;

        Ok(Self {
            store,
            clock,
            rng,
            profile,
            posts,
        })
    }

    /// Create the profile record at signup, before the first open.
    pub fn signup(store: &mut Store<K>, name: &str, username: &str) -> Result<Profile> {
        let profile = Profile::signup(name, username);
        store.save_profile(&profile)?;
        info!(handle = %profile.handle, "profile created");
        Ok(profile)
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// The cached view for rendering.  Refreshed on every write; never the
    /// input to a mutation.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Posts authored by the given handle, for the profile surface.
    pub fn posts_by<'a>(&'a self, handle: &str) -> Vec<&'a Post> {
        self.posts.iter().filter(|p| p.is_authored_by(handle)).collect()
    }

    /// Reload the cached view from the store.  Surfaces call this on mount
    /// instead of trusting another surface's copy.
    pub fn reload(&mut self) -> Result<&[Post]> {
        self.posts = self.store.load_posts()?;
        Ok(&self.posts)
    }

    /// The read-modify-write protocol for one post: load a fresh collection,
    /// locate the target by id, apply exactly one transformation, splice the
    /// result back at the same position, write the whole collection.
    ///
    /// A missing target is a no-op (`Ok(None)`).  On a failed write nothing
    /// is committed: the cached view keeps its pre-mutation state.
    pub fn mutate_post<F>(&mut self, id: PostId, f: F) -> Result<Option<Post>>
    where
        F: FnOnce(&mut Post, &mut StdRng),
    {
        let mut posts = self.store.load_posts()?;

        let Some(index) = posts.iter().position(|p| p.id == id) else {
            debug!(%id, "mutation target not found, treating as no-op");
            return Ok(None);
        };

        f(&mut posts[index], &mut self.rng);
        self.store.replace_posts(&posts)?;

        let updated = posts[index].clone();
        self.posts = posts;
        Ok(Some(updated))
    }

    /// Create a post and prepend it to the collection (newest first).
    pub fn compose(&mut self, request: ComposeRequest) -> Result<Post> {
        let now = self.clock.now_ms();

        let bot_name = request
            .bot_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        let (name, handle) = match (request.as_bot, bot_name) {
            (true, Some(bot)) => (bot.to_string(), normalize_handle(bot)),
            _ => (self.profile.name.clone(), self.profile.handle.clone()),
        };

        let post = Post {
            id: PostId::from_millis(now),
            author: Author {
                name,
                handle,
                avatar: self.profile.avatar.clone(),
                verified: self.profile.verified && !request.as_bot,
            },
            content: request.content,
            media: request.media,
            timestamp: now,
            views: self.rng.gen_range(0..1000),
            replies: 0,
            retweets: 0,
            likes: 0,
            liked: false,
            last_updated: None,
            is_bot: request.as_bot,
            comments: Vec::new(),
        };

        let mut posts = match self.store.load_posts() {
            Ok(posts) => posts,
            Err(StoreError::NotInitialized) => Vec::new(),
            Err(e) => return Err(e),
        };
        posts.insert(0, post.clone());
        self.store.replace_posts(&posts)?;

        self.posts = posts;
        info!(id = %post.id, bot = post.is_bot, "composed post");
        Ok(post)
    }

    /// One real-time growth step across every post, on a freshly loaded
    /// snapshot so a user action committed since the last tick is never
    /// clobbered.
    pub fn tick_all(&mut self) -> Result<()> {
        let now = self.clock.now_ms();
        let mut posts = self.store.load_posts()?;

        let followers = self.profile.effective_followers();
        for post in &mut posts {
            let audience = post_audience(post, &self.profile.handle, followers);
            let grown = tick(&mut self.rng, post.metrics(), &audience);
            post.apply_metrics(grown, now);
        }

        self.store.replace_posts(&posts)?;
        self.posts = posts;
        debug!(count = self.posts.len(), "engagement tick applied");
        Ok(())
    }

    /// Ambient monthly-viewer drift on the profile.  Returns the new total.
    pub fn drift_monthly_viewers(&mut self) -> Result<u64> {
        let mut profile = self.profile.clone();
        profile.monthly_viewers += self.rng.gen_range(0..5000);
        self.store.save_profile(&profile)?;

        self.profile = profile;
        Ok(self.profile.monthly_viewers)
    }

    /// Replace the profile record (edit-profile action).
    pub fn update_profile(&mut self, profile: Profile) -> Result<()> {
        self.store.save_profile(&profile)?;
        self.profile = profile;
        info!(handle = %self.profile.handle, "profile updated");
        Ok(())
    }
}
