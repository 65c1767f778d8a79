//! # Domain Models
//!
//! These structs represent the core entities of Stockroom.
//! We use UUID v7 for time-ordered, globally unique identification.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(
    /// Identifier of a stock room. Rooms are routed by name, not by id.
    RoomId
);
id_newtype!(PostId);
id_newtype!(CommentId);
id_newtype!(VoteId);

/// A registered member of the community.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Unique, compared byte-for-byte
    pub email: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub karma: i64,
}

/// Who opened a stock room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum Creator {
    System,
    User(UserId),
}

/// A topic community for one listed company (e.g. /s/SAMSUNG).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRoom {
    pub id: RoomId,
    /// The routing slug (e.g. "SAMSUNG"), unique case-insensitively
    pub name: String,
    pub display_name: String,
    pub description: String,
    /// Exchange ticker, e.g. "005930.KS"
    pub ticker: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Creator,
    pub member_count: i64,
    pub icon_url: Option<String>,
}

/// Fields a caller supplies when opening a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStockRoom {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub ticker: String,
    pub created_by: Creator,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    /// May carry an encoded flair prefix, see [`crate::flair`]
    pub title: String,
    pub content: String,
    pub stock_room_id: RoomId,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub upvotes: i64,
    pub downvotes: i64,
    pub comment_count: i64,
    /// `$TICKER` mentions found in `content` when the post was created
    pub tickers: Vec<String>,
}

impl Post {
    pub fn score(&self) -> i64 {
        self.upvotes - self.downvotes
    }
}

/// Fields a caller supplies when creating a post.
///
/// The store trusts these: `title` must be non-blank and `tickers` must
/// already be extracted from `content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub stock_room_id: RoomId,
    pub author_id: UserId,
    pub tickers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub post_id: PostId,
    pub author_id: UserId,
    /// `None` for a top-level comment
    pub parent_id: Option<CommentId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub upvotes: i64,
    pub downvotes: i64,
}

impl Comment {
    pub fn score(&self) -> i64 {
        self.upvotes - self.downvotes
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub content: String,
    pub post_id: PostId,
    pub author_id: UserId,
    pub parent_id: Option<CommentId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteType {
    Up,
    Down,
}

/// The entity a vote is cast on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum VoteTarget {
    Post(PostId),
    Comment(CommentId),
}

/// One user's standing vote on one target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub user_id: UserId,
    pub target: VoteTarget,
    pub vote_type: VoteType,
    pub created_at: DateTime<Utc>,
}

/// Quote snapshot shown on a room page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockData {
    pub ticker: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    pub market_cap: Option<f64>,
    pub high_52w: Option<f64>,
    pub low_52w: Option<f64>,
    pub pe_ratio: Option<f64>,
}
