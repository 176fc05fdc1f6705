//! Guarded user actions over the shared repository.
//!
//! A `FeedSession` is what one interactive surface (feed list, post detail,
//! profile view) holds: a handle to the shared repository plus the one-shot
//! guards for its current render.  Guarded actions return `Ok(None)` when
//! they are swallowed (duplicate event, missing target, or denied pin).

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use flock_shared::constants::{MAX_BIO_LEN, MAX_LOCATION_LEN, MAX_POST_LEN, MAX_WEBSITE_LEN};
use flock_shared::{clip_field, CommentId, Post, PostId, Profile};
use flock_store::{KvBackend, Result};

use crate::guards::{ActionGuards, PostAction};
use crate::mutators;
use crate::repository::{ComposeRequest, Repository};

pub struct FeedSession<K: KvBackend> {
    repo: Arc<Mutex<Repository<K>>>,
    guards: ActionGuards,
}

impl<K: KvBackend> FeedSession<K> {
    pub fn new(repo: Arc<Mutex<Repository<K>>>) -> Self {
        Self {
            repo,
            guards: ActionGuards::new(),
        }
    }

    fn repo(&self) -> MutexGuard<'_, Repository<K>> {
        // A poisoned lock only means another holder panicked; the snapshot
        // it guards is still the authoritative one.
        self.repo.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Reload from the store (mount / re-render) and re-arm all guards.
    pub fn refresh(&mut self) -> Result<Vec<Post>> {
        self.guards.reset_all();
        let mut repo = self.repo();
        repo.reload()?;
        Ok(repo.posts().to_vec())
    }

    pub fn posts(&self) -> Vec<Post> {
        self.repo().posts().to_vec()
    }

    pub fn profile(&self) -> Profile {
        self.repo().profile().clone()
    }

    pub fn like(&mut self, id: PostId) -> Result<Option<Post>> {
        if !self.guards.try_begin(id, PostAction::Like) {
            debug!(%id, "duplicate like swallowed");
            return Ok(None);
        }
        self.repo().mutate_post(id, |post, _| mutators::like_toggle(post))
    }

    pub fn retweet(&mut self, id: PostId) -> Result<Option<Post>> {
        if !self.guards.try_begin(id, PostAction::Retweet) {
            debug!(%id, "duplicate retweet swallowed");
            return Ok(None);
        }
        self.repo().mutate_post(id, |post, _| mutators::retweet_once(post))
    }

    /// Reply to a post, optionally as the bot identity.
    pub fn reply(&mut self, id: PostId, content: &str, as_bot: bool) -> Result<Option<Post>> {
        if !self.guards.try_begin(id, PostAction::Reply) {
            debug!(%id, "duplicate reply swallowed");
            return Ok(None);
        }

        let content = clip_field(content, MAX_POST_LEN);
        let mut repo = self.repo();
        let profile = repo.profile().clone();
        let now = repo.now_ms();
        repo.mutate_post(id, |post, rng| {
            mutators::add_comment(rng, post, &profile, content, as_bot, now);
        })
    }

    /// Pin or unpin a comment.  Only the post's author may pin; authorship
    /// never changes, so the cached view is authoritative for the check.
    pub fn pin_comment(&mut self, id: PostId, comment_id: CommentId) -> Result<Option<Post>> {
        if !self.guards.try_begin(id, PostAction::Pin) {
            debug!(%id, "duplicate pin swallowed");
            return Ok(None);
        }

        let mut repo = self.repo();
        let authorized = repo
            .posts()
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.is_authored_by(&repo.profile().handle))
            .unwrap_or(false);
        if !authorized {
            warn!(%id, "pin denied: viewer is not the post author");
            return Ok(None);
        }

        repo.mutate_post(id, |post, _| mutators::pin_toggle(post, comment_id))
    }

    /// Unguarded: comment likes are a reversible toggle.
    pub fn like_comment(&mut self, id: PostId, comment_id: CommentId) -> Result<Option<Post>> {
        self.repo()
            .mutate_post(id, |post, _| mutators::like_comment_toggle(post, comment_id))
    }

    pub fn compose(&mut self, mut request: ComposeRequest) -> Result<Post> {
        request.content = clip_field(&request.content, MAX_POST_LEN).to_string();
        self.repo().compose(request)
    }

    /// Apply an edited profile, with each free-text field held to its input
    /// limit.
    pub fn update_profile(&mut self, mut profile: Profile) -> Result<()> {
        profile.bio = clip_field(&profile.bio, MAX_BIO_LEN).to_string();
        profile.location = clip_field(&profile.location, MAX_LOCATION_LEN).to_string();
        profile.website = clip_field(&profile.website, MAX_WEBSITE_LEN).to_string();
        self.repo().update_profile(profile)
    }
}
