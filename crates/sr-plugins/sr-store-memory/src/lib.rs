//! # sr-store-memory Implementation
//!
//! Keeps every table in process memory behind one `RwLock`, so each
//! operation (including the two-counter vote switch) is applied in a single
//! write guard. State is lost when the store is dropped.

mod seed;

use std::cmp::Reverse;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sr_core::error::{AppError, Result};
use sr_core::market::stock_quote;
use sr_core::models::{
    Comment, CommentId, NewComment, NewPost, NewStockRoom, Post, PostId, RoomId, StockData,
    StockRoom, User, UserId, Vote, VoteId, VoteTarget, VoteType,
};
use sr_core::traits::{AccountRepo, ForumRepo, MarketData};
use sr_core::vote::{CounterDelta, VoteTransition};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

pub const TRENDING_LIMIT: usize = 10;

/// Tuning for the mock backend.
#[derive(Debug, Clone, Default)]
pub struct StoreSettings {
    /// Simulated round-trip delay awaited before every operation
    pub latency: Duration,
}

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) users: Vec<User>,
    pub(crate) rooms: Vec<StockRoom>,
    pub(crate) posts: Vec<Post>,
    pub(crate) comments: Vec<Comment>,
    pub(crate) votes: Vec<Vote>,
    pub(crate) session: Option<UserId>,
}

impl Tables {
    /// Adds `delta` to the target's counters. Returns false if the target is unknown.
    fn apply_delta(&mut self, target: VoteTarget, delta: CounterDelta) -> bool {
        match target {
            VoteTarget::Post(id) => match self.posts.iter_mut().find(|p| p.id == id) {
                Some(post) => {
                    delta.apply(&mut post.upvotes, &mut post.downvotes);
                    true
                }
                None => false,
            },
            VoteTarget::Comment(id) => match self.comments.iter_mut().find(|c| c.id == id) {
                Some(comment) => {
                    delta.apply(&mut comment.upvotes, &mut comment.downvotes);
                    true
                }
                None => false,
            },
        }
    }

    fn find_vote(&self, user: UserId, target: VoteTarget) -> Option<usize> {
        self.votes
            .iter()
            .position(|v| v.user_id == user && v.target == target)
    }
}

pub struct MemoryStore {
    tables: RwLock<Tables>,
    settings: StoreSettings,
}

impl MemoryStore {
    /// An empty store.
    pub fn new(settings: StoreSettings) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            settings,
        }
    }

    /// A store holding the demo rooms, users, posts and comments.
    pub fn seeded(settings: StoreSettings) -> Self {
        let mut tables = Tables::default();
        seed::populate(&mut tables, Utc::now());
        info!(
            rooms = tables.rooms.len(),
            users = tables.users.len(),
            posts = tables.posts.len(),
            comments = tables.comments.len(),
            "seeded in-memory store"
        );
        Self {
            tables: RwLock::new(tables),
            settings,
        }
    }

    async fn pause(&self) {
        if !self.settings.latency.is_zero() {
            tokio::time::sleep(self.settings.latency).await;
        }
    }

    /// Every vote row currently stored, in insertion order.
    pub async fn votes(&self) -> Vec<Vote> {
        self.tables.read().await.votes.clone()
    }
}

#[async_trait]
impl AccountRepo for MemoryStore {
    async fn sign_up(&self, email: &str, _password: &str, username: &str) -> Result<User> {
        self.pause().await;
        let mut tables = self.tables.write().await;

        if tables.users.iter().any(|u| u.email == email) {
            return Err(AppError::DuplicateEmail(email.to_string()));
        }

        let user = User {
            id: UserId::new(),
            email: email.to_string(),
            username: username.to_string(),
            avatar_url: Some(seed::avatar_for(username)),
            created_at: Utc::now(),
            karma: 0,
        };
        tables.users.push(user.clone());
        tables.session = Some(user.id);

        info!(user_id = %user.id, username, "user signed up");
        Ok(user)
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<User> {
        self.pause().await;
        let mut tables = self.tables.write().await;

        let user = tables
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(AppError::InvalidCredentials)?;
        tables.session = Some(user.id);

        info!(user_id = %user.id, "user signed in");
        Ok(user)
    }

    async fn sign_out(&self) {
        self.pause().await;
        self.tables.write().await.session = None;
    }

    async fn current_user(&self) -> Option<User> {
        let tables = self.tables.read().await;
        let id = tables.session?;
        tables.users.iter().find(|u| u.id == id).cloned()
    }

    async fn get_user(&self, id: UserId) -> Option<User> {
        self.pause().await;
        self.tables
            .read()
            .await
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }
}

#[async_trait]
impl ForumRepo for MemoryStore {
    async fn list_stock_rooms(&self) -> Vec<StockRoom> {
        self.pause().await;
        let mut rooms = self.tables.read().await.rooms.clone();
        rooms.sort_by_key(|r| Reverse(r.member_count));
        rooms
    }

    async fn get_stock_room_by_name(&self, name: &str) -> Option<StockRoom> {
        self.pause().await;
        self.tables
            .read()
            .await
            .rooms
            .iter()
            .find(|r| r.name.to_lowercase() == name.to_lowercase())
            .cloned()
    }

    async fn get_stock_room(&self, id: RoomId) -> Option<StockRoom> {
        self.pause().await;
        self.tables
            .read()
            .await
            .rooms
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    async fn create_stock_room(&self, room: NewStockRoom) -> Result<StockRoom> {
        self.pause().await;
        let mut tables = self.tables.write().await;

        let slug = room.name.to_lowercase();
        if tables.rooms.iter().any(|r| r.name.to_lowercase() == slug) {
            return Err(AppError::Conflict(format!("stock room {} already exists", room.name)));
        }

        let created = StockRoom {
            id: RoomId::new(),
            name: room.name,
            display_name: room.display_name,
            description: room.description,
            ticker: room.ticker,
            created_at: Utc::now(),
            created_by: room.created_by,
            member_count: 1,
            icon_url: room.icon_url,
        };
        tables.rooms.push(created.clone());

        info!(room_id = %created.id, name = %created.name, "stock room created");
        Ok(created)
    }

    async fn list_posts(&self, room: Option<RoomId>) -> Vec<Post> {
        self.pause().await;
        let mut posts: Vec<Post> = self
            .tables
            .read()
            .await
            .posts
            .iter()
            .filter(|p| room.map_or(true, |id| p.stock_room_id == id))
            .cloned()
            .collect();
        posts.sort_by_key(|p| Reverse(p.created_at));
        posts
    }

    async fn get_trending_posts(&self) -> Vec<Post> {
        self.pause().await;
        let mut posts = self.tables.read().await.posts.clone();
        posts.sort_by_key(|p| Reverse(p.score()));
        posts.truncate(TRENDING_LIMIT);
        posts
    }

    async fn get_post(&self, id: PostId) -> Option<Post> {
        self.pause().await;
        self.tables
            .read()
            .await
            .posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    async fn create_post(&self, post: NewPost) -> Result<Post> {
        self.pause().await;
        let now = Utc::now();
        let created = Post {
            id: PostId::new(),
            title: post.title,
            content: post.content,
            stock_room_id: post.stock_room_id,
            author_id: post.author_id,
            created_at: now,
            updated_at: now,
            upvotes: 0,
            downvotes: 0,
            comment_count: 0,
            tickers: post.tickers,
        };
        self.tables.write().await.posts.push(created.clone());

        info!(post_id = %created.id, room_id = %created.stock_room_id, "post created");
        Ok(created)
    }

    async fn list_comments(&self, post: PostId) -> Vec<Comment> {
        self.pause().await;
        let mut comments: Vec<Comment> = self
            .tables
            .read()
            .await
            .comments
            .iter()
            .filter(|c| c.post_id == post)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created_at);
        comments
    }

    async fn get_comment(&self, id: CommentId) -> Option<Comment> {
        self.pause().await;
        self.tables
            .read()
            .await
            .comments
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    async fn create_comment(&self, comment: NewComment) -> Result<Comment> {
        self.pause().await;
        let now = Utc::now();
        let created = Comment {
            id: CommentId::new(),
            content: comment.content,
            post_id: comment.post_id,
            author_id: comment.author_id,
            parent_id: comment.parent_id,
            created_at: now,
            updated_at: now,
            upvotes: 0,
            downvotes: 0,
        };

        let mut tables = self.tables.write().await;
        tables.comments.push(created.clone());
        match tables.posts.iter_mut().find(|p| p.id == created.post_id) {
            Some(post) => post.comment_count += 1,
            None => warn!(post_id = %created.post_id, "comment stored for unknown post"),
        }

        info!(comment_id = %created.id, post_id = %created.post_id, "comment created");
        Ok(created)
    }

    /// Resolves the transition from the standing vote, then applies the row
    /// change and the counter delta under the same write guard.
    async fn vote(&self, user: UserId, target: VoteTarget, vote_type: VoteType) -> Result<()> {
        self.pause().await;
        let mut tables = self.tables.write().await;

        let existing = tables.find_vote(user, target);
        let transition =
            VoteTransition::resolve(existing.map(|i| tables.votes[i].vote_type), vote_type);

        match (existing, transition.resulting_vote()) {
            (Some(i), None) => {
                tables.votes.remove(i);
            }
            (Some(i), Some(t)) => tables.votes[i].vote_type = t,
            (None, Some(t)) => tables.votes.push(Vote {
                id: VoteId::new(),
                user_id: user,
                target,
                vote_type: t,
                created_at: Utc::now(),
            }),
            (None, None) => {}
        }

        if !tables.apply_delta(target, transition.delta()) {
            warn!(?target, "vote recorded for unknown target");
        }

        debug!(user_id = %user, ?target, ?transition, "vote applied");
        Ok(())
    }

    async fn get_user_vote(&self, user: UserId, target: VoteTarget) -> Option<VoteType> {
        self.pause().await;
        let tables = self.tables.read().await;
        tables.find_vote(user, target).map(|i| tables.votes[i].vote_type)
    }
}

#[async_trait]
impl MarketData for MemoryStore {
    async fn get_stock_data(&self, ticker: &str) -> Option<StockData> {
        self.pause().await;
        stock_quote(ticker)
    }
}
