//! # sr-api Handlers
//!
//! This module coordinates the flow between a location and the Core traits:
//! resolving a path into a page model, and turning user actions into store
//! mutations once the caller contracts are checked.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use sr_core::analysis::{self, Answer};
use sr_core::error::{AppError, Result};
use sr_core::flair::{encode_title, Flair};
use sr_core::models::{
    Comment, CommentId, Creator, NewComment, NewPost, NewStockRoom, Post, PostId, RoomId,
    StockRoom, User, UserId, VoteTarget, VoteType,
};
use sr_core::thread::{build_tree, CommentNode};
use sr_core::tickers::extract_tickers;
use sr_core::traits::{AccountRepo, ForumRepo, MarketData};
use tracing::{debug, info};

use crate::router::Router;
use crate::routes::{app_router, AppRoute};
use crate::views::{search_rooms, AnalystPanel, CommentView, Page, PostCard};

/// How long the filings analyst "thinks" before answering.
pub const ANALYST_DELAY: Duration = Duration::from_millis(1500);

/// Ports shared by every page and action.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountRepo>,
    pub forum: Arc<dyn ForumRepo>,
    pub market: Arc<dyn MarketData>,
    routes: Arc<Router<AppRoute>>,
}

impl AppState {
    pub fn new(
        accounts: Arc<dyn AccountRepo>,
        forum: Arc<dyn ForumRepo>,
        market: Arc<dyn MarketData>,
    ) -> Self {
        Self {
            accounts,
            forum,
            market,
            routes: Arc::new(app_router()),
        }
    }

    /// One store serving all three ports.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: AccountRepo + ForumRepo + MarketData + 'static,
    {
        Self::new(store.clone(), store.clone(), store)
    }

    /// Resolves `path` and loads the page it names.
    pub async fn render(&self, path: &str) -> Result<Page> {
        let (route_path, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };
        let Some(matched) = self.routes.resolve(route_path) else {
            return Ok(not_found(path));
        };
        debug!(path, route = ?matched.route, "route resolved");

        let page = match matched.route {
            AppRoute::Login => Page::Login,
            AppRoute::Signup => Page::Signup,
            AppRoute::Home => self.home().await,
            AppRoute::StockRooms => self.stock_rooms(query.and_then(search_term)).await,
            AppRoute::StockRoom => match matched.params.get("name") {
                Some(name) => self.room(name).await.unwrap_or_else(|| not_found(path)),
                None => not_found(path),
            },
            AppRoute::PostDetail => match matched
                .params
                .get("id")
                .and_then(|id| id.parse::<PostId>().ok())
            {
                Some(id) => self.post_detail(id).await.unwrap_or_else(|| not_found(path)),
                None => not_found(path),
            },
            AppRoute::NotFound => not_found(path),
        };
        Ok(page)
    }

    async fn home(&self) -> Page {
        let rooms = self.forum.list_stock_rooms().await;
        let trending = self.forum.get_trending_posts().await;
        Page::Home {
            trending: self.cards(trending).await,
            rooms,
        }
    }

    async fn stock_rooms(&self, query: Option<String>) -> Page {
        let rooms = self.forum.list_stock_rooms().await;
        let rooms = match &query {
            Some(q) => search_rooms(&rooms, q).into_iter().cloned().collect(),
            None => rooms,
        };
        Page::StockRooms { rooms, query }
    }

    async fn room(&self, name: &str) -> Option<Page> {
        let room = self.forum.get_stock_room_by_name(name).await?;
        let stock = self.market.get_stock_data(&room.ticker).await;
        let posts = self.forum.list_posts(Some(room.id)).await;
        Some(Page::Room {
            posts: self.cards(posts).await,
            stock,
            analyst: AnalystPanel::for_room(&room),
            room,
        })
    }

    async fn post_detail(&self, id: PostId) -> Option<Page> {
        let post = self.forum.get_post(id).await?;
        let viewer = self.accounts.current_user().await.map(|u| u.id);
        let card = self.card(post, viewer).await;

        let comments = self.forum.list_comments(id).await;
        let mut authors: HashMap<UserId, Option<User>> = HashMap::new();
        let mut votes: HashMap<CommentId, VoteType> = HashMap::new();
        for c in &comments {
            if !authors.contains_key(&c.author_id) {
                let author = self.accounts.get_user(c.author_id).await;
                authors.insert(c.author_id, author);
            }
            if let Some(viewer) = viewer {
                if let Some(v) = self.forum.get_user_vote(viewer, VoteTarget::Comment(c.id)).await {
                    votes.insert(c.id, v);
                }
            }
        }

        let comments = build_tree(comments)
            .into_iter()
            .map(|node| comment_view(node, &authors, &votes))
            .collect();
        Some(Page::PostDetail {
            post: Box::new(card),
            comments,
        })
    }

    async fn cards(&self, posts: Vec<Post>) -> Vec<PostCard> {
        let viewer = self.accounts.current_user().await.map(|u| u.id);
        let mut cards = Vec::with_capacity(posts.len());
        for post in posts {
            cards.push(self.card(post, viewer).await);
        }
        cards
    }

    async fn card(&self, post: Post, viewer: Option<UserId>) -> PostCard {
        let author = self.accounts.get_user(post.author_id).await;
        let room = self.forum.get_stock_room(post.stock_room_id).await;
        let user_vote = match viewer {
            Some(user) => self.forum.get_user_vote(user, VoteTarget::Post(post.id)).await,
            None => None,
        };
        PostCard::new(post, author, room, user_vote)
    }

    async fn require_user(&self, action: &str) -> Result<User> {
        self.accounts
            .current_user()
            .await
            .ok_or_else(|| AppError::Unauthorized(format!("sign in to {action}")))
    }

    /// Creates a post in `form.room_id` as the session user.
    pub async fn submit_post(&self, form: NewPostForm) -> Result<Post> {
        let user = self.require_user("post").await?;

        let title = form.title.trim();
        if title.is_empty() {
            return Err(AppError::ValidationError("title must not be empty".into()));
        }
        if self.forum.get_stock_room(form.room_id).await.is_none() {
            return Err(AppError::NotFound("StockRoom".into(), form.room_id.to_string()));
        }

        let post = self
            .forum
            .create_post(NewPost {
                title: encode_title(form.flair, title),
                tickers: extract_tickers(&form.content),
                content: form.content,
                stock_room_id: form.room_id,
                author_id: user.id,
            })
            .await?;
        info!(post_id = %post.id, author = %user.username, "post submitted");
        Ok(post)
    }

    /// Adds a comment (or a reply when `parent_id` is set) as the session user.
    pub async fn submit_comment(
        &self,
        post_id: PostId,
        parent_id: Option<CommentId>,
        content: &str,
    ) -> Result<Comment> {
        let user = self.require_user("comment").await?;

        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::ValidationError("comment must not be empty".into()));
        }
        if self.forum.get_post(post_id).await.is_none() {
            return Err(AppError::NotFound("Post".into(), post_id.to_string()));
        }

        self.forum
            .create_comment(NewComment {
                content: content.to_string(),
                post_id,
                author_id: user.id,
                parent_id,
            })
            .await
    }

    /// Votes as the session user and returns the vote now standing.
    /// Fails with `NotFound` if the post or comment does not exist.
    pub async fn cast_vote(
        &self,
        target: VoteTarget,
        vote_type: VoteType,
    ) -> Result<Option<VoteType>> {
        let user = self.require_user("vote").await?;

        let exists = match target {
            VoteTarget::Post(id) => self.forum.get_post(id).await.is_some(),
            VoteTarget::Comment(id) => self.forum.get_comment(id).await.is_some(),
        };
        if !exists {
            let (entity, id) = match target {
                VoteTarget::Post(id) => ("Post", id.to_string()),
                VoteTarget::Comment(id) => ("Comment", id.to_string()),
            };
            return Err(AppError::NotFound(entity.into(), id));
        }

        self.forum.vote(user.id, target, vote_type).await?;
        Ok(self.forum.get_user_vote(user.id, target).await)
    }

    /// Asks the filings analyst about a room. Answers arrive after
    /// [`ANALYST_DELAY`]; no session is needed.
    pub async fn ask_analyst(&self, room_name: &str, question: &str) -> Result<Answer> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::ValidationError("question must not be empty".into()));
        }
        let room = self
            .forum
            .get_stock_room_by_name(room_name)
            .await
            .ok_or_else(|| AppError::NotFound("StockRoom".into(), room_name.to_string()))?;

        tokio::time::sleep(ANALYST_DELAY).await;
        let answer = analysis::answer(&room.name, question);
        debug!(room = %room.name, topic = ?answer.topic, "analyst answered");
        Ok(answer)
    }

    /// Opens a room owned by the session user.
    pub async fn open_room(&self, form: NewRoomForm) -> Result<StockRoom> {
        let user = self.require_user("create a stock room").await?;

        let name = form.name.trim();
        if name.is_empty() || name.contains('/') {
            return Err(AppError::ValidationError(format!("invalid room name {name:?}")));
        }

        self.forum
            .create_stock_room(NewStockRoom {
                name: name.to_string(),
                display_name: form.display_name,
                description: form.description,
                ticker: form.ticker,
                created_by: Creator::User(user.id),
                icon_url: None,
            })
            .await
    }
}

fn not_found(path: &str) -> Page {
    Page::NotFound {
        path: path.to_string(),
    }
}

/// Query parameters accepted by the room list.
#[derive(Debug, Default, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

/// The decoded `q` value of a query string, if non-blank. A malformed query
/// string is treated as no search.
fn search_term(query: &str) -> Option<String> {
    let params: SearchParams = match serde_urlencoded::from_str(query) {
        Ok(params) => params,
        Err(err) => {
            debug!(query, %err, "ignoring malformed query string");
            SearchParams::default()
        }
    };
    params
        .q
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
}

fn comment_view(
    node: CommentNode,
    authors: &HashMap<UserId, Option<User>>,
    votes: &HashMap<CommentId, VoteType>,
) -> CommentView {
    let indent = node.indent();
    let CommentNode {
        comment,
        depth,
        replies,
    } = node;
    CommentView {
        author: authors.get(&comment.author_id).cloned().flatten(),
        user_vote: votes.get(&comment.id).copied(),
        score: comment.score(),
        depth,
        indent,
        replies: replies
            .into_iter()
            .map(|r| comment_view(r, authors, votes))
            .collect(),
        comment,
    }
}

/// What the create-post dialog submits.
#[derive(Debug, Clone)]
pub struct NewPostForm {
    pub room_id: RoomId,
    pub title: String,
    pub content: String,
    pub flair: Flair,
}

#[derive(Debug, Clone)]
pub struct NewRoomForm {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub ticker: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sr_core::traits::{MockAccountRepo, MockForumRepo, MockMarketData};

    fn user() -> User {
        User {
            id: UserId::new(),
            email: "a@example.com".into(),
            username: "alice".into(),
            avatar_url: None,
            created_at: Utc::now(),
            karma: 0,
        }
    }

    fn post(id: PostId) -> Post {
        let now = Utc::now();
        Post {
            id,
            title: "Kakao thesis".into(),
            content: String::new(),
            stock_room_id: RoomId::new(),
            author_id: UserId::new(),
            created_at: now,
            updated_at: now,
            upvotes: 0,
            downvotes: 0,
            comment_count: 0,
            tickers: vec![],
        }
    }

    fn state(accounts: MockAccountRepo, forum: MockForumRepo) -> AppState {
        AppState::new(
            Arc::new(accounts),
            Arc::new(forum),
            Arc::new(MockMarketData::new()),
        )
    }

    fn form(title: &str) -> NewPostForm {
        NewPostForm {
            room_id: RoomId::new(),
            title: title.into(),
            content: "Buying $KAKAO and $NAVER".into(),
            flair: Flair::DdAnalysis,
        }
    }

    #[tokio::test]
    async fn test_unknown_room_renders_not_found() {
        let mut forum = MockForumRepo::new();
        forum.expect_get_stock_room_by_name().returning(|_| None);

        let page = state(MockAccountRepo::new(), forum)
            .render("/s/NOPE")
            .await
            .unwrap();
        assert_eq!(page, not_found("/s/NOPE"));
    }

    #[tokio::test]
    async fn test_bad_post_id_skips_the_store() {
        let mut forum = MockForumRepo::new();
        forum.expect_get_post().times(0);

        let page = state(MockAccountRepo::new(), forum)
            .render("/post/42")
            .await
            .unwrap();
        assert!(matches!(page, Page::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_submit_post_requires_a_session() {
        let mut accounts = MockAccountRepo::new();
        accounts.expect_current_user().returning(|| None);
        let mut forum = MockForumRepo::new();
        forum.expect_create_post().times(0);

        let err = state(accounts, forum)
            .submit_post(form("Hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_submit_post_rejects_blank_titles() {
        let mut accounts = MockAccountRepo::new();
        accounts.expect_current_user().returning(|| Some(user()));
        let mut forum = MockForumRepo::new();
        forum.expect_create_post().times(0);

        let err = state(accounts, forum)
            .submit_post(form("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_submit_post_encodes_flair_and_tickers() {
        let author = user();
        let author_id = author.id;
        let mut accounts = MockAccountRepo::new();
        accounts
            .expect_current_user()
            .returning(move || Some(author.clone()));

        let mut forum = MockForumRepo::new();
        forum.expect_get_stock_room().returning(|id| {
            Some(StockRoom {
                id,
                name: "KAKAO".into(),
                display_name: "Kakao Corp".into(),
                description: String::new(),
                ticker: "035720.KS".into(),
                created_at: Utc::now(),
                created_by: Creator::System,
                member_count: 1,
                icon_url: None,
            })
        });
        forum
            .expect_create_post()
            .withf(|p| {
                p.title == "[DD/Analysis] Kakao thesis"
                    && p.tickers == vec!["KAKAO".to_string(), "NAVER".to_string()]
            })
            .times(1)
            .returning(|p| {
                let now = Utc::now();
                Ok(Post {
                    id: PostId::new(),
                    title: p.title,
                    content: p.content,
                    stock_room_id: p.stock_room_id,
                    author_id: p.author_id,
                    created_at: now,
                    updated_at: now,
                    upvotes: 0,
                    downvotes: 0,
                    comment_count: 0,
                    tickers: p.tickers,
                })
            });

        let post = state(accounts, forum)
            .submit_post(form("  Kakao thesis "))
            .await
            .unwrap();
        assert_eq!(post.author_id, author_id);
        assert_eq!(post.upvotes, 0);
    }

    #[tokio::test]
    async fn test_cast_vote_returns_the_standing_vote() {
        let voter = user();
        let voter_id = voter.id;
        let mut accounts = MockAccountRepo::new();
        accounts
            .expect_current_user()
            .returning(move || Some(voter.clone()));

        let target = VoteTarget::Post(PostId::new());
        let mut forum = MockForumRepo::new();
        forum.expect_get_post().returning(|id| Some(post(id)));
        forum
            .expect_vote()
            .withf(move |u, t, v| *u == voter_id && *t == target && *v == VoteType::Up)
            .times(1)
            .returning(|_, _, _| Ok(()));
        forum
            .expect_get_user_vote()
            .returning(|_, _| Some(VoteType::Up));

        let standing = state(accounts, forum)
            .cast_vote(target, VoteType::Up)
            .await
            .unwrap();
        assert_eq!(standing, Some(VoteType::Up));
    }

    #[tokio::test]
    async fn test_cast_vote_on_missing_comment_is_rejected() {
        let mut accounts = MockAccountRepo::new();
        accounts.expect_current_user().returning(|| Some(user()));

        let mut forum = MockForumRepo::new();
        forum.expect_get_comment().returning(|_| None);
        forum.expect_vote().times(0);

        let err = state(accounts, forum)
            .cast_vote(VoteTarget::Comment(CommentId::new()), VoteType::Down)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(entity, _) if entity == "Comment"));
    }

    #[test]
    fn test_search_term_from_query() {
        assert_eq!(search_term("q=sam").as_deref(), Some("sam"));
        assert_eq!(search_term("sort=new&q=lg+energy").as_deref(), Some("lg energy"));
        assert_eq!(search_term("q=LG%20Energy").as_deref(), Some("LG Energy"));
        assert_eq!(
            search_term("q=%EC%82%BC%EC%84%B1").as_deref(),
            Some("\u{c0bc}\u{c131}")
        );
        assert_eq!(search_term("q=+"), None);
        assert_eq!(search_term("sort=new"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyst_answers_after_the_delay() {
        let mut forum = MockForumRepo::new();
        forum.expect_get_stock_room_by_name().returning(|name| {
            Some(StockRoom {
                id: RoomId::new(),
                name: name.to_uppercase(),
                display_name: "Samsung Electronics".into(),
                description: String::new(),
                ticker: "005930.KS".into(),
                created_at: Utc::now(),
                created_by: Creator::System,
                member_count: 1,
                icon_url: None,
            })
        });

        let started = tokio::time::Instant::now();
        let answer = state(MockAccountRepo::new(), forum)
            .ask_analyst("samsung", "  How is dividend income taxed? ")
            .await
            .unwrap();
        assert!(started.elapsed() >= ANALYST_DELAY);
        assert_eq!(answer.topic, analysis::Topic::Tax);
        assert!(answer.content.contains("SAMSUNG"));
    }

    #[tokio::test]
    async fn test_analyst_rejects_blank_questions_and_unknown_rooms() {
        let mut forum = MockForumRepo::new();
        forum.expect_get_stock_room_by_name().returning(|_| None);
        let s = state(MockAccountRepo::new(), forum);

        let err = s.ask_analyst("SAMSUNG", "   ").await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        let err = s.ask_analyst("NOPE", "Taxes?").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(..)));
    }

    #[tokio::test]
    async fn test_login_and_signup_pages_need_no_store() {
        let s = state(MockAccountRepo::new(), MockForumRepo::new());
        assert_eq!(s.render("/login").await.unwrap(), Page::Login);
        assert_eq!(s.render("/signup").await.unwrap(), Page::Signup);
    }
}
