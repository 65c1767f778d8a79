//! # sr-api
//!
//! The routing and orchestration layer for Stockroom: the hash router, the
//! application's route table, page models and the actions behind each page.

pub mod handlers;
pub mod router;
pub mod routes;
pub mod ticker;
pub mod views;

pub use handlers::{AppState, NewPostForm, NewRoomForm, ANALYST_DELAY};
pub use router::{Navigator, Router};
pub use routes::AppRoute;
pub use views::Page;
