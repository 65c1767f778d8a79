//! stockroom/crates/sr-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Stockroom.

pub mod analysis;
pub mod error;
pub mod flair;
pub mod format;
pub mod market;
pub mod models;
pub mod thread;
pub mod tickers;
pub mod traits;
pub mod vote;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::models::*;
    use chrono::Utc;

    #[test]
    fn test_post_score_and_ids_v7() {
        let id = PostId::new();
        let post = Post {
            id,
            title: "Hello Rust!".to_string(),
            content: "Watching $SAMSUNG".to_string(),
            stock_room_id: RoomId::new(),
            author_id: UserId::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            upvotes: 45,
            downvotes: 3,
            comment_count: 0,
            tickers: vec!["SAMSUNG".to_string()],
        };
        assert_eq!(post.id, id);
        assert_eq!(post.score(), 42);
        assert_eq!(id.to_string().parse::<PostId>().unwrap(), id);
        assert_eq!(id.0.get_version_num(), 7);
    }

    #[test]
    fn vote_target_is_tagged() {
        let json = serde_json::to_string(&VoteTarget::Post(PostId::new())).unwrap();
        assert!(json.starts_with("{\"kind\":\"post\""));
    }
}
