//! Demo content installed by [`crate::MemoryStore::seeded`].
//!
//! Seeded counters are display figures; no vote rows back them.

use chrono::{DateTime, Duration, Utc};
use sr_core::models::{
    Comment, CommentId, Creator, Post, PostId, RoomId, StockRoom, User, UserId,
};
use sr_core::tickers::extract_tickers;

use crate::Tables;

const ROOMS: [(&str, &str, &str, &str, i64); 8] = [
    ("SAMSUNG", "Samsung Electronics", "005930.KS", "Korea's largest electronics company.", 15420),
    ("HYUNDAI", "Hyundai Motor", "005380.KS", "Global automotive manufacturer.", 8930),
    ("SKHYNIX", "SK Hynix", "000660.KS", "Leading memory semiconductor manufacturer.", 6210),
    ("NAVER", "Naver Corp", "035420.KS", "Korea's largest search engine and tech company.", 4560),
    ("KAKAO", "Kakao Corp", "035720.KS", "Mobile messaging and platform company.", 3890),
    ("LGENERGY", "LG Energy Solution", "373220.KS", "Global battery manufacturer.", 7230),
    ("CELLTRION", "Celltrion", "068270.KS", "Biopharmaceutical company.", 2150),
    (
        "SAMSUNGBIO",
        "Samsung Biologics",
        "207940.KS",
        "Biopharmaceutical contract manufacturer.",
        1890,
    ),
];

const USERS: [(&str, &str, i64); 3] = [
    ("investor@example.com", "KInvestor", 1250),
    ("trader@example.com", "SeoulTrader", 890),
    ("analyst@example.com", "StockAnalyst", 2340),
];

// (title, content, room index, author index, hours ago, upvotes, downvotes, comment_count)
const POSTS: [(&str, &str, usize, usize, i64, i64, i64, i64); 6] = [
    (
        "Samsung Q4 Earnings Preview - What to Expect?",
        "With Samsung's Q4 earnings coming up next week, I'm seeing strong momentum in the semiconductor division. The $SAMSUNG stock has been consolidating around 72,000 KRW. What's everyone's take on the earnings call?\n\nI'm particularly interested in:\n- Memory chip pricing trends\n- Foundry business outlook\n- Smartphone shipment numbers\n\nAlso keeping an eye on $SKHYNIX for comparison.",
        0, 0, 2, 45, 3, 12,
    ),
    (
        "Hyundai's EV Strategy Looking Strong",
        "Hyundai Motor's electric vehicle lineup is gaining serious traction in the US and European markets. The Ioniq 5 and Ioniq 6 are getting great reviews. $HYUNDAI might be undervalued compared to other EV players.\n\nKey points:\n- Record EV sales in Q3\n- New Georgia plant coming online\n- Solid battery partnerships\n\nThoughts on the $LGENERGY partnership?",
        1, 1, 5, 32, 1, 8,
    ),
    (
        "SK Hynix HBM3E Memory - Game Changer for AI?",
        "SK Hynix's new HBM3E memory chips are getting massive orders from NVIDIA and other AI chip makers. This could be a huge revenue driver for $SKHYNIX in 2024.\n\nThe AI boom is real, and memory is at the center of it. $SAMSUNG is also in this space but SK Hynix seems to have the edge in HBM technology right now.",
        2, 2, 8, 67, 2, 23,
    ),
    (
        "Naver Webtoon IPO - Impact on Stock Price?",
        "With Naver Webtoon's potential IPO in the US, how do you think this will affect $NAVER stock? The webtoon business has been growing rapidly globally.\n\nCould be a major catalyst for the stock. Also watching $KAKAO for comparison in the content space.",
        3, 0, 12, 28, 5, 15,
    ),
    (
        "Kakao Pay Regulatory Issues - Buying Opportunity?",
        "Kakao Pay has been facing some regulatory scrutiny lately, causing the stock to dip. Is this a good entry point for long-term investors?\n\nThe fintech business fundamentals remain strong, and $KAKAO has a massive user base to leverage.",
        4, 1, 18, 19, 7, 9,
    ),
    (
        "LG Energy Solution - Battery Market Dominance",
        "LG Energy Solution continues to sign major supply deals with global automakers. The EV battery market is exploding and $LGENERGY is positioned perfectly.\n\nRecent wins:\n- Toyota partnership expansion\n- New European facility announcements\n- Solid-state battery R&D progress\n\nThis is a long-term hold for me.",
        5, 2, 24, 41, 2, 11,
    ),
];

// (content, post index, author index, parent comment index, minutes ago, upvotes, downvotes)
const COMMENTS: [(&str, usize, usize, Option<usize>, i64, i64, i64); 5] = [
    (
        "Great analysis! I'm also bullish on Samsung's semiconductor recovery. The memory cycle seems to be turning.",
        0,
        1,
        None,
        60,
        8,
        0,
    ),
    (
        "Agreed! The HBM3 margins are going to be fantastic. SK Hynix is leading but Samsung is catching up fast.",
        0,
        2,
        Some(0),
        45,
        5,
        0,
    ),
    (
        "I'm concerned about smartphone demand though. The global market is still soft.",
        0,
        0,
        None,
        30,
        3,
        1,
    ),
    (
        "The Ioniq 5 is an amazing car. I own one and the quality is exceptional. Hyundai is definitely competing with Tesla now.",
        1,
        2,
        None,
        180,
        12,
        0,
    ),
    (
        "HBM3E is going to be massive for AI training. SK Hynix has the best technology right now.",
        2,
        0,
        None,
        360,
        15,
        0,
    ),
];

pub(crate) fn avatar_for(username: &str) -> String {
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={username}")
}

pub(crate) fn populate(tables: &mut Tables, now: DateTime<Utc>) {
    let rooms: Vec<StockRoom> = ROOMS
        .iter()
        .map(|&(name, display_name, ticker, blurb, members)| StockRoom {
            id: RoomId::new(),
            name: name.to_string(),
            display_name: display_name.to_string(),
            description: format!("{display_name} ({ticker}) - {blurb}"),
            ticker: ticker.to_string(),
            created_at: now,
            created_by: Creator::System,
            member_count: members,
            icon_url: None,
        })
        .collect();

    let users: Vec<User> = USERS
        .iter()
        .map(|&(email, username, karma)| User {
            id: UserId::new(),
            email: email.to_string(),
            username: username.to_string(),
            avatar_url: Some(avatar_for(username)),
            created_at: now,
            karma,
        })
        .collect();

    let posts: Vec<Post> = POSTS
        .iter()
        .map(|&(title, content, room, author, hours, up, down, comments)| {
            let at = now - Duration::hours(hours);
            Post {
                id: PostId::new(),
                title: title.to_string(),
                content: content.to_string(),
                stock_room_id: rooms[room].id,
                author_id: users[author].id,
                created_at: at,
                updated_at: at,
                upvotes: up,
                downvotes: down,
                comment_count: comments,
                tickers: extract_tickers(content),
            }
        })
        .collect();

    let mut comments: Vec<Comment> = Vec::with_capacity(COMMENTS.len());
    for &(content, post, author, parent, minutes, up, down) in COMMENTS.iter() {
        let at = now - Duration::minutes(minutes);
        let parent_id = parent.map(|i| comments[i].id);
        comments.push(Comment {
            id: CommentId::new(),
            content: content.to_string(),
            post_id: posts[post].id,
            author_id: users[author].id,
            parent_id,
            created_at: at,
            updated_at: at,
            upvotes: up,
            downvotes: down,
        });
    }

    tables.rooms.extend(rooms);
    tables.users.extend(users);
    tables.posts.extend(posts);
    tables.comments.extend(comments);
}
