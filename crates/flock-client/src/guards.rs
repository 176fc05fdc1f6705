//! One-shot action guards.
//!
//! Retweet and reply are not idempotent, and like/pin should not fire twice
//! from one double-click.  Each interactive action is therefore gated by a
//! per-post "already handled in this render" flag; re-rendering the post
//! (a reload) resets the flags.

use std::collections::HashMap;

use flock_shared::PostId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    Reply,
    Retweet,
    Like,
    Pin,
}

#[derive(Debug, Default)]
struct PostGuards {
    reply: bool,
    retweet: bool,
    like: bool,
    pin: bool,
}

impl PostGuards {
    fn flag(&mut self, action: PostAction) -> &mut bool {
        match action {
            PostAction::Reply => &mut self.reply,
            PostAction::Retweet => &mut self.retweet,
            PostAction::Like => &mut self.like,
            PostAction::Pin => &mut self.pin,
        }
    }
}

#[derive(Debug, Default)]
pub struct ActionGuards {
    per_post: HashMap<PostId, PostGuards>,
}

impl ActionGuards {
    pub fn new() -> Self {
        Self::default()
    }

    /// True the first time an action fires for a post; false for every
    /// duplicate until the post is re-rendered.
    pub fn try_begin(&mut self, post: PostId, action: PostAction) -> bool {
        let flag = self.per_post.entry(post).or_default().flag(action);
        if *flag {
            false
        } else {
            *flag = true;
            true
        }
    }

    /// The post was re-rendered; its actions may fire again.
    pub fn reset(&mut self, post: PostId) {
        self.per_post.remove(&post);
    }

    /// The whole surface was re-rendered.
    pub fn reset_all(&mut self) {
        self.per_post.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_events_are_swallowed() {
        let mut guards = ActionGuards::new();
        let id = PostId::from_millis(1);

        assert!(guards.try_begin(id, PostAction::Retweet));
        assert!(!guards.try_begin(id, PostAction::Retweet));
        // Other actions on the same post are independent.
        assert!(guards.try_begin(id, PostAction::Like));
    }

    #[test]
    fn guards_are_per_post() {
        let mut guards = ActionGuards::new();
        assert!(guards.try_begin(PostId::from_millis(1), PostAction::Like));
        assert!(guards.try_begin(PostId::from_millis(2), PostAction::Like));
    }

    #[test]
    fn reset_rearms_a_post() {
        let mut guards = ActionGuards::new();
        let id = PostId::from_millis(1);

        assert!(guards.try_begin(id, PostAction::Pin));
        guards.reset(id);
        assert!(guards.try_begin(id, PostAction::Pin));
    }
}
