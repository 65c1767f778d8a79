use integration_tests::{fixture, seeded, users};
use sr_core::error::AppError;
use sr_core::models::{NewComment, NewPost, VoteTarget, VoteType};
use sr_core::tickers::extract_tickers;
use sr_core::traits::{AccountRepo, ForumRepo, MarketData};
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_comment_count_tracks_comments() {
    let f = fixture().await.unwrap();
    let first = f
        .store
        .create_comment(NewComment {
            content: "First".into(),
            post_id: f.post.id,
            author_id: f.author.id,
            parent_id: None,
        })
        .await
        .unwrap();
    f.store
        .create_comment(NewComment {
            content: "Reply".into(),
            post_id: f.post.id,
            author_id: f.author.id,
            parent_id: Some(first.id),
        })
        .await
        .unwrap();

    let post = f.store.get_post(f.post.id).await.unwrap();
    let comments = f.store.list_comments(f.post.id).await;
    assert_eq!(post.comment_count, comments.len() as i64);
    assert_eq!(comments[1].parent_id, Some(first.id));
}

#[tokio::test]
async fn test_duplicate_sign_up_keeps_one_account() {
    let f = fixture().await.unwrap();
    let err = assert_err!(
        f.store
            .sign_up("author@example.com", "other", "impostor")
            .await
    );
    assert_eq!(err, AppError::DuplicateEmail("author@example.com".into()));

    f.store.sign_out().await;
    assert!(f.store.current_user().await.is_none());
    let again = assert_ok!(f.store.sign_in("author@example.com", "anything").await);
    assert_eq!(again.id, f.author.id);
    assert_eq!(again.username, "author");
}

#[tokio::test]
async fn test_trending_is_stable_for_ties() {
    let f = fixture().await.unwrap();
    let me = f.author.id;

    let mut ids = Vec::new();
    for title in ["a", "b", "c"] {
        let post = f
            .store
            .create_post(NewPost {
                title: title.into(),
                content: String::new(),
                stock_room_id: f.room.id,
                author_id: me,
                tickers: vec![],
            })
            .await
            .unwrap();
        ids.push(post.id);
    }

    let voters = users(&f.store, 10).await.unwrap();
    // scores: a = 10, b = 10, c = 5, fixture post = 0
    for (i, voter) in voters.iter().enumerate() {
        f.store
            .vote(voter.id, VoteTarget::Post(ids[0]), VoteType::Up)
            .await
            .unwrap();
        f.store
            .vote(voter.id, VoteTarget::Post(ids[1]), VoteType::Up)
            .await
            .unwrap();
        if i < 5 {
            f.store
                .vote(voter.id, VoteTarget::Post(ids[2]), VoteType::Up)
                .await
                .unwrap();
        }
    }

    let trending: Vec<_> = f
        .store
        .get_trending_posts()
        .await
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(trending, vec![ids[0], ids[1], ids[2], f.post.id]);
}

#[tokio::test]
async fn test_seeded_store_contents() {
    let store = seeded();

    let rooms = store.list_stock_rooms().await;
    assert_eq!(rooms.len(), 8);
    assert_eq!(rooms[0].name, "SAMSUNG");
    assert!(rooms
        .windows(2)
        .all(|w| w[0].member_count >= w[1].member_count));

    let posts = store.list_posts(None).await;
    assert_eq!(posts.len(), 6);
    assert!(posts.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    for post in &posts {
        assert_eq!(post.tickers, extract_tickers(&post.content));
    }

    let trending = store.get_trending_posts().await;
    assert_eq!(trending[0].title, "SK Hynix HBM3E Memory - Game Changer for AI?");

    let user = store
        .sign_in("analyst@example.com", "whatever")
        .await
        .unwrap();
    assert_eq!(user.karma, 2340);

    let hynix = store.get_stock_data("000660.KS").await.unwrap();
    assert_eq!(hynix.name, "SK Hynix");
    assert!(store.get_stock_data("NOPE").await.is_none());
}

#[tokio::test]
async fn test_room_lookup_ignores_case() {
    let store = seeded();
    let room = store.get_stock_room_by_name("kakao").await.unwrap();
    assert_eq!(room.name, "KAKAO");
    assert_eq!(store.get_stock_room(room.id).await, Some(room.clone()));

    let posts = store.list_posts(Some(room.id)).await;
    assert_eq!(posts.len(), 1);
    assert!(posts.iter().all(|p| p.stock_room_id == room.id));
}
