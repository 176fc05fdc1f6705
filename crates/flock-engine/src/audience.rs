//! Per-post audience scaling.

use flock_shared::Post;

/// The audience inputs that scale all growth for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Audience {
    pub followers: f64,
    pub monthly_viewers: f64,
}

/// Derive the audience for one post from the live profile.
///
/// Own posts (author handle equals the profile handle) see the full follower
/// count; every other post gets a smaller synthetic audience, floored at 100.
/// Monthly viewers are approximated from the post's own view count, so a
/// post's visibility feeds its future growth.
pub fn post_audience(post: &Post, profile_handle: &str, profile_followers: u64) -> Audience {
    let followers = if post.is_authored_by(profile_handle) {
        profile_followers as f64
    } else {
        (profile_followers as f64 * 0.3).max(100.0)
    };

    Audience {
        followers,
        monthly_viewers: post.views as f64 * 0.05,
    }
}
