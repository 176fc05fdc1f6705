//! Domain model structs persisted in the local key-value store.
//!
//! Every struct derives `Serialize` and `Deserialize` with camelCase field
//! names so the JSON records match the shapes the UI layer reads.  These are
//! plain value types; the growth engine and the mutators own all behavior.

use serde::{Deserialize, Serialize};

use crate::types::{CommentId, PostId};

// ---------------------------------------------------------------------------
// Author
// ---------------------------------------------------------------------------

/// The authorship block embedded in posts and comments.
///
/// `verified` defaults to false because comment records omit it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Display name.
    pub name: String,
    /// Unique per author, lowercase, no whitespace.
    pub handle: String,
    /// Single-glyph avatar.
    pub avatar: String,
    #[serde(default)]
    pub verified: bool,
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// An opaque media reference attached to a post.  Upload and compression
/// happen upstream; the core only carries the reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Media {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
}

// ---------------------------------------------------------------------------
// Engagement metrics
// ---------------------------------------------------------------------------

/// The engagement tuple the growth engine operates on.
///
/// All fields are non-negative and, under ambient growth, monotonically
/// non-decreasing.  The only decrement anywhere in the system is an explicit
/// unlike, which lowers `likes` by exactly 1.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngagementMetrics {
    pub views: u64,
    pub likes: u64,
    pub retweets: u64,
    pub replies: u64,
}

// ---------------------------------------------------------------------------
// Comment
// ---------------------------------------------------------------------------

/// A reply nested under a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique within the owning post.
    pub id: CommentId,
    pub author: Author,
    pub content: String,
    /// Creation time, epoch millis.
    pub timestamp: i64,
    pub likes: u64,
    /// Local-viewer flag, not a count.
    pub liked: bool,
    #[serde(default)]
    pub is_bot: bool,
    /// At most one comment per post may carry this flag.
    #[serde(default)]
    pub is_pinned: bool,
}

// ---------------------------------------------------------------------------
// Post
// ---------------------------------------------------------------------------

/// A feed post with its nested comments.
///
/// The four engagement counters are stored flat (that is the record shape);
/// [`Post::metrics`] and [`Post::apply_metrics`] bridge to the tuple the
/// growth engine works with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub author: Author,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<Media>>,
    /// Creation time, epoch millis.
    pub timestamp: i64,
    pub views: u64,
    pub replies: u64,
    pub retweets: u64,
    pub likes: u64,
    /// Local-viewer flag, not a count.
    pub liked: bool,
    /// Advisory: when the simulation last touched this post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<i64>,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    /// Whether this post belongs to the local viewer, by handle equality.
    /// Own posts are scaled by the live profile audience.
    pub fn is_authored_by(&self, handle: &str) -> bool {
        self.author.handle == handle
    }

    pub fn metrics(&self) -> EngagementMetrics {
        EngagementMetrics {
            views: self.views,
            likes: self.likes,
            retweets: self.retweets,
            replies: self.replies,
        }
    }

    /// Write a new engagement tuple back onto the post and stamp
    /// `last_updated`.
    pub fn apply_metrics(&mut self, metrics: EngagementMetrics, now_ms: i64) {
        self.views = metrics.views;
        self.likes = metrics.likes;
        self.retweets = metrics.retweets;
        self.replies = metrics.replies;
        self.last_updated = Some(now_ms);
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// The single local-viewer profile record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    /// Unique, lowercase, drives post-authorship matching.
    pub handle: String,
    #[serde(default)]
    pub bio: String,
    pub avatar: String,
    pub verified: bool,
    pub followers: u64,
    pub following: u64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub website: String,
    /// Discovery audience; drifts upward while the profile view is open.
    #[serde(default)]
    pub monthly_viewers: u64,
}

impl Profile {
    /// Build the profile created at signup: normalized handle, zeroed
    /// counters.
    pub fn signup(name: &str, username: &str) -> Self {
        Self {
            name: name.to_string(),
            handle: normalize_handle(username),
            bio: String::new(),
            avatar: "☻".to_string(),
            verified: false,
            followers: 0,
            following: 0,
            location: String::new(),
            website: String::new(),
            monthly_viewers: 0,
        }
    }

    /// The follower count fed to the growth engine.  A profile with zero
    /// followers still reaches a small default audience.
    pub fn effective_followers(&self) -> u64 {
        if self.followers == 0 {
            crate::constants::DEFAULT_FOLLOWERS
        } else {
            self.followers
        }
    }
}

/// Lowercase and strip whitespace, the handle shape every record expects.
pub fn normalize_handle(raw: &str) -> String {
    raw.to_lowercase().split_whitespace().collect()
}

/// Enforce a field limit the way an input box would: keep the first
/// `max_chars` characters, drop the rest.
pub fn clip_field(raw: &str, max_chars: usize) -> &str {
    match raw.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &raw[..byte_index],
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_normalizes_handle() {
        let profile = Profile::signup("Night Owl", "Night Owl 99");
        assert_eq!(profile.handle, "nightowl99");
        assert_eq!(profile.followers, 0);
        assert!(!profile.verified);
    }

    #[test]
    fn clip_field_respects_char_boundaries() {
        assert_eq!(clip_field("hello", 280), "hello");
        assert_eq!(clip_field("hello", 3), "hel");
        assert_eq!(clip_field("héllo", 2), "hé");
    }

    #[test]
    fn zero_followers_falls_back_to_default_audience() {
        let profile = Profile::signup("A", "a");
        assert_eq!(profile.effective_followers(), 100);
    }

    #[test]
    fn post_record_shape_parses() {
        // A record as the UI layer wrote it: string id, camelCase flags,
        // comment author without `verified`.
        let raw = r#"{
            "id": "1700000000000",
            "author": {"name": "LucidPP", "handle": "lucidpp", "avatar": "●", "verified": true},
            "content": "im famous!",
            "media": [{"type": "image", "url": "data:image/jpeg;base64,..."}],
            "timestamp": 1700000000000,
            "views": 16,
            "replies": 0,
            "retweets": 0,
            "likes": 1,
            "liked": false,
            "isBot": false,
            "comments": [{
                "id": "1700000000500",
                "author": {"name": "Bot Comment", "handle": "botcomment", "avatar": "●"},
                "content": "fire",
                "timestamp": 1700000000500,
                "likes": 412,
                "liked": false,
                "isBot": true,
                "isPinned": false
            }]
        }"#;

        let post: Post = serde_json::from_str(raw).unwrap();
        assert_eq!(post.id, PostId::from_millis(1_700_000_000_000));
        assert!(post.author.verified);
        assert_eq!(post.media.as_ref().unwrap()[0].kind, MediaKind::Image);
        assert_eq!(post.comments.len(), 1);
        assert!(!post.comments[0].author.verified);
        assert!(post.comments[0].is_bot);
        assert_eq!(post.metrics().views, 16);
    }

    #[test]
    fn apply_metrics_stamps_last_updated() {
        let raw = r#"{
            "id": "1",
            "author": {"name": "A", "handle": "a", "avatar": "●"},
            "content": "x",
            "timestamp": 0,
            "views": 1, "replies": 0, "retweets": 0, "likes": 0,
            "liked": false
        }"#;
        let mut post: Post = serde_json::from_str(raw).unwrap();

        let mut metrics = post.metrics();
        metrics.views += 5;
        post.apply_metrics(metrics, 42);

        assert_eq!(post.views, 6);
        assert_eq!(post.last_updated, Some(42));
    }
}
