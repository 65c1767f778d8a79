//! Shared fixtures for the cross-crate tests.

use std::sync::Arc;

use sr_core::models::{Creator, NewPost, NewStockRoom, Post, StockRoom, User};
use sr_core::traits::{AccountRepo, ForumRepo};
use sr_store_memory::{MemoryStore, StoreSettings};

/// An empty store with one room, one signed-in user and one post by that user.
pub struct Fixture {
    pub store: Arc<MemoryStore>,
    pub room: StockRoom,
    pub author: User,
    pub post: Post,
}

pub async fn fixture() -> anyhow::Result<Fixture> {
    let store = Arc::new(MemoryStore::new(StoreSettings::default()));
    let author = store
        .sign_up("author@example.com", "pw", "author")
        .await?;
    let room = store
        .create_stock_room(NewStockRoom {
            name: "NAVER".into(),
            display_name: "Naver Corp".into(),
            description: "Search and webtoons".into(),
            ticker: "035420.KS".into(),
            created_by: Creator::System,
            icon_url: None,
        })
        .await?;
    let post = store
        .create_post(NewPost {
            title: "Webtoon IPO".into(),
            content: "Watching $NAVER".into(),
            stock_room_id: room.id,
            author_id: author.id,
            tickers: vec!["NAVER".into()],
        })
        .await?;
    Ok(Fixture {
        store,
        room,
        author,
        post,
    })
}

/// Signs up `n` users with distinct emails. The last one holds the session.
pub async fn users(store: &MemoryStore, n: usize) -> anyhow::Result<Vec<User>> {
    let mut users = Vec::with_capacity(n);
    for i in 0..n {
        users.push(
            store
                .sign_up(&format!("user{i}@example.com"), "pw", &format!("user{i}"))
                .await?,
        );
    }
    Ok(users)
}

/// A seeded store with no simulated latency.
pub fn seeded() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::seeded(StoreSettings::default()))
}
