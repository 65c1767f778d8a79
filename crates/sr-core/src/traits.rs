//! # Core Traits (Ports)
//!
//! Any store plugin must implement these traits to be used by the page layer.
//! Every call may suspend; once it resolves its effect is visible to later reads.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    Comment, CommentId, NewComment, NewPost, NewStockRoom, Post, PostId, RoomId, StockData,
    StockRoom, User, UserId, VoteTarget, VoteType,
};

/// Accounts and the current session.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AccountRepo: Send + Sync {
    /// Registers a user and makes it the session user.
    /// Fails with `DuplicateEmail` if the email is taken.
    async fn sign_up(&self, email: &str, password: &str, username: &str) -> Result<User>;

    /// Fails with `InvalidCredentials` if no user has this email.
    /// The password is not checked.
    async fn sign_in(&self, email: &str, password: &str) -> Result<User>;

    async fn sign_out(&self);

    async fn current_user(&self) -> Option<User>;

    async fn get_user(&self, id: UserId) -> Option<User>;
}

/// Rooms, posts, comments and votes.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ForumRepo: Send + Sync {
    // Room Operations

    /// Most members first; equal counts keep insertion order.
    async fn list_stock_rooms(&self) -> Vec<StockRoom>;
    /// Case-insensitive exact match on the room name.
    async fn get_stock_room_by_name(&self, name: &str) -> Option<StockRoom>;
    async fn get_stock_room(&self, id: RoomId) -> Option<StockRoom>;
    async fn create_stock_room(&self, room: NewStockRoom) -> Result<StockRoom>;

    // Post Operations

    /// Newest first, optionally restricted to one room.
    async fn list_posts(&self, room: Option<RoomId>) -> Vec<Post>;
    /// Ten best-scored posts; equal scores keep insertion order.
    async fn get_trending_posts(&self) -> Vec<Post>;
    async fn get_post(&self, id: PostId) -> Option<Post>;
    async fn create_post(&self, post: NewPost) -> Result<Post>;

    // Comment Operations

    /// Flat list, oldest first. Threading is rebuilt from `parent_id`.
    async fn list_comments(&self, post: PostId) -> Vec<Comment>;
    async fn get_comment(&self, id: CommentId) -> Option<Comment>;
    /// Also bumps the post's `comment_count` when the post exists.
    async fn create_comment(&self, comment: NewComment) -> Result<Comment>;

    // Vote Operations

    /// Casts, retracts or switches `user`'s vote on `target` in one step.
    async fn vote(&self, user: UserId, target: VoteTarget, vote_type: VoteType) -> Result<()>;
    async fn get_user_vote(&self, user: UserId, target: VoteTarget) -> Option<VoteType>;
}

/// Quote lookups for room pages.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MarketData: Send + Sync {
    async fn get_stock_data(&self, ticker: &str) -> Option<StockData>;
}
