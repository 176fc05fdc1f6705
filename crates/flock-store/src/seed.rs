//! Deterministic defaults written on first-ever load.
//!
//! The starting view count scales with the viewer's follower count so a
//! fresh feed looks proportionate to the audience it claims.

use flock_shared::{Author, Post, PostId, Profile};

/// The three default posts, newest first.  `followers` is the live profile
/// follower count (already defaulted when the profile has none).
pub fn seed_posts(now_ms: i64, followers: u64) -> Vec<Post> {
    let starting_views = followers as f64 * 0.02;

    vec![
        Post {
            id: PostId::from_millis(1),
            author: Author {
                name: "Urban Vibes".to_string(),
                handle: "urbanvibes".to_string(),
                avatar: "●".to_string(),
                verified: false,
            },
            content: "@lucidpp really snapped on \"JJ\" fr fr. Album of the year incoming?"
                .to_string(),
            media: None,
            timestamp: now_ms - 60_000,
            views: (starting_views * 5.0).floor() as u64,
            replies: 283,
            retweets: 135,
            likes: (starting_views * 0.3).floor() as u64,
            liked: false,
            last_updated: None,
            is_bot: false,
            comments: Vec::new(),
        },
        Post {
            id: PostId::from_millis(2),
            author: Author {
                name: "LucidPP".to_string(),
                handle: "lucidpp".to_string(),
                avatar: "●".to_string(),
                verified: true,
            },
            content: "im famous!".to_string(),
            media: None,
            timestamp: now_ms - 120_000,
            views: (starting_views * 8.0).floor() as u64,
            replies: 0,
            retweets: (starting_views * 0.15).floor() as u64,
            likes: (starting_views * 0.5).floor() as u64,
            liked: false,
            last_updated: None,
            is_bot: false,
            comments: Vec::new(),
        },
        Post {
            id: PostId::from_millis(3),
            author: Author {
                name: "Street Heat".to_string(),
                handle: "streetheat".to_string(),
                avatar: "●".to_string(),
                verified: false,
            },
            content: "@lucidpp's new track \"JJ\" is on repeat! This is the one".to_string(),
            media: None,
            timestamp: now_ms - 3_600_000,
            views: (starting_views * 3.0).floor() as u64,
            replies: 21,
            retweets: (starting_views * 0.08).floor() as u64,
            likes: (starting_views * 0.12).floor() as u64,
            liked: false,
            last_updated: None,
            is_bot: false,
            comments: Vec::new(),
        },
    ]
}

/// The default profile written when no profile record exists yet.
pub fn seed_profile() -> Profile {
    Profile {
        name: "LucidPP".to_string(),
        handle: "lucidpp".to_string(),
        bio: "Hip Hop Artist 🎤".to_string(),
        avatar: "☻".to_string(),
        verified: true,
        followers: 181_000,
        following: 0,
        location: String::new(),
        website: String::new(),
        monthly_viewers: 2_400_000,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_views_scale_with_followers() {
        // followers = 100 -> starting_views = 2 -> views 10 / 16 / 6.
        let posts = seed_posts(0, 100);
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].views, 10);
        assert_eq!(posts[1].views, 16);
        assert_eq!(posts[2].views, 6);
    }

    #[test]
    fn seed_posts_are_newest_first() {
        let posts = seed_posts(10_000_000, 100);
        assert!(posts[0].timestamp > posts[1].timestamp);
        assert!(posts[1].timestamp > posts[2].timestamp);
    }

    #[test]
    fn seed_profile_is_the_verified_owner() {
        let profile = seed_profile();
        assert_eq!(profile.handle, "lucidpp");
        assert!(profile.verified);
        assert_eq!(profile.followers, 181_000);
    }
}
