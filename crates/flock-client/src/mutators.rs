//! Discrete user-action mutators.
//!
//! Each mutator applies exactly one transformation to one entity and has no
//! hidden state.  Rapid-duplicate protection lives in [`crate::guards`], not
//! here: `retweet_once` really does add one every call.

use rand::Rng;

use flock_shared::{Author, Comment, CommentId, Post, Profile};

/// Flip the local-viewer like flag and move the count with it.  Applying it
/// twice restores both the flag and the count.
pub fn like_toggle(post: &mut Post) {
    if post.liked {
        post.likes = post.likes.saturating_sub(1);
    } else {
        post.likes += 1;
    }
    post.liked = !post.liked;
}

/// Unconditional +1.  There is no un-retweet; callers enforce the
/// once-per-session contract with a one-shot guard.
pub fn retweet_once(post: &mut Post) {
    post.retweets += 1;
}

/// Prepend a reply to the post's comment list.  Bot replies arrive with a
/// synthetic like count; user replies start at zero.
pub fn add_comment<R: Rng>(
    rng: &mut R,
    post: &mut Post,
    profile: &Profile,
    content: &str,
    as_bot: bool,
    now_ms: i64,
) {
    let author = if as_bot {
        Author {
            name: "Bot Comment".to_string(),
            handle: "botcomment".to_string(),
            avatar: profile.avatar.clone(),
            verified: false,
        }
    } else {
        Author {
            name: profile.name.clone(),
            handle: profile.handle.clone(),
            avatar: profile.avatar.clone(),
            verified: false,
        }
    };

    let comment = Comment {
        id: CommentId::from_millis(now_ms),
        author,
        content: content.to_string(),
        timestamp: now_ms,
        likes: if as_bot { rng.gen_range(0..1000) } else { 0 },
        liked: false,
        is_bot: as_bot,
        is_pinned: false,
    };

    post.comments.insert(0, comment);
}

/// Toggle the pin on the target comment and unpin every other comment, so
/// at most one comment per post is ever pinned.  Authorization (post author
/// only) is the caller's job.
pub fn pin_toggle(post: &mut Post, comment_id: CommentId) {
    for comment in &mut post.comments {
        if comment.id == comment_id {
            comment.is_pinned = !comment.is_pinned;
        } else {
            comment.is_pinned = false;
        }
    }
}

/// Like toggle scoped to one comment.
pub fn like_comment_toggle(post: &mut Post, comment_id: CommentId) {
    for comment in &mut post.comments {
        if comment.id == comment_id {
            if comment.liked {
                comment.likes = comment.likes.saturating_sub(1);
            } else {
                comment.likes += 1;
            }
            comment.liked = !comment.liked;
        }
    }
}

/// Comments in display order: the pinned comment (if any) first, everything
/// else in insertion order.  A stable sort keyed solely on the pin flag.
pub fn display_comments(post: &Post) -> Vec<&Comment> {
    let mut comments: Vec<&Comment> = post.comments.iter().collect();
    comments.sort_by_key(|c| !c.is_pinned);
    comments
}
