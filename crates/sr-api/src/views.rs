//! Page models handed to whatever draws the UI.

use serde::Serialize;
use sr_core::analysis;
use sr_core::flair::{parse_title, Flair};
use sr_core::format::Sentiment;
use sr_core::models::{Comment, Post, StockData, StockRoom, User, VoteType};

/// A post joined with its author, room and the viewer's vote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostCard {
    pub post: Post,
    /// Title without the flair prefix
    pub title: String,
    pub flair: Option<Flair>,
    pub score: i64,
    pub sentiment: Sentiment,
    pub author: Option<User>,
    pub room: Option<StockRoom>,
    pub user_vote: Option<VoteType>,
}

impl PostCard {
    pub fn new(
        post: Post,
        author: Option<User>,
        room: Option<StockRoom>,
        user_vote: Option<VoteType>,
    ) -> Self {
        let (flair, title) = parse_title(&post.title);
        let title = title.to_string();
        let score = post.score();
        Self {
            title,
            flair,
            score,
            sentiment: Sentiment::of(score),
            author,
            room,
            user_vote,
            post,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentView {
    pub comment: Comment,
    pub author: Option<User>,
    pub user_vote: Option<VoteType>,
    pub score: i64,
    pub depth: usize,
    pub indent: usize,
    pub replies: Vec<CommentView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Page {
    Login,
    Signup,
    Home {
        rooms: Vec<StockRoom>,
        trending: Vec<PostCard>,
    },
    StockRooms {
        rooms: Vec<StockRoom>,
        /// Search term the list was filtered by
        query: Option<String>,
    },
    Room {
        room: StockRoom,
        stock: Option<StockData>,
        posts: Vec<PostCard>,
        analyst: AnalystPanel,
    },
    PostDetail {
        post: Box<PostCard>,
        comments: Vec<CommentView>,
    },
    NotFound {
        path: String,
    },
}

/// The filings analyst box on a room page, before any question is asked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalystPanel {
    pub greeting: String,
    pub suggestions: Vec<String>,
}

impl AnalystPanel {
    /// Suggestions shown under the input.
    pub const SHOWN: usize = 3;

    pub fn for_room(room: &StockRoom) -> Self {
        Self {
            greeting: analysis::welcome(&room.name),
            suggestions: analysis::SUGGESTED_QUESTIONS
                .iter()
                .take(Self::SHOWN)
                .map(|q| q.to_string())
                .collect(),
        }
    }
}

/// Rooms whose name, display name or ticker contains `query`, ignoring case.
pub fn search_rooms<'a>(rooms: &'a [StockRoom], query: &str) -> Vec<&'a StockRoom> {
    let query = query.to_lowercase();
    rooms
        .iter()
        .filter(|r| {
            r.name.to_lowercase().contains(&query)
                || r.display_name.to_lowercase().contains(&query)
                || r.ticker.to_lowercase().contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sr_core::models::{Creator, PostId, RoomId, UserId};

    fn room(name: &str, display_name: &str, ticker: &str) -> StockRoom {
        StockRoom {
            id: RoomId::new(),
            name: name.into(),
            display_name: display_name.into(),
            description: String::new(),
            ticker: ticker.into(),
            created_at: Utc::now(),
            created_by: Creator::System,
            member_count: 1,
            icon_url: None,
        }
    }

    #[test]
    fn search_matches_any_field() {
        let rooms = vec![
            room("SAMSUNG", "Samsung Electronics", "005930.KS"),
            room("NAVER", "Naver Corp", "035420.KS"),
        ];
        assert_eq!(search_rooms(&rooms, "electro").len(), 1);
        assert_eq!(search_rooms(&rooms, "035420")[0].name, "NAVER");
        assert_eq!(search_rooms(&rooms, "").len(), 2);
        assert!(search_rooms(&rooms, "tesla").is_empty());
    }

    #[test]
    fn card_splits_flair_and_scores() {
        let now = Utc::now();
        let post = Post {
            id: PostId::new(),
            title: "[Dividend Info] Payout dates".into(),
            content: String::new(),
            stock_room_id: RoomId::new(),
            author_id: UserId::new(),
            created_at: now,
            updated_at: now,
            upvotes: 1,
            downvotes: 4,
            comment_count: 0,
            tickers: vec![],
        };
        let card = PostCard::new(post, None, None, Some(VoteType::Down));
        assert_eq!(card.flair, Some(Flair::DividendInfo));
        assert_eq!(card.title, "Payout dates");
        assert_eq!(card.score, -3);
        assert_eq!(card.sentiment, Sentiment::Negative);
    }
}
