//! The application's route table.

use serde::Serialize;

use crate::router::Router;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppRoute {
    Login,
    Signup,
    Home,
    StockRooms,
    /// `/s/:name`
    StockRoom,
    /// `/post/:id`
    PostDetail,
    NotFound,
}

pub fn app_router() -> Router<AppRoute> {
    Router::new()
        .route("/login", AppRoute::Login)
        .route("/signup", AppRoute::Signup)
        .route("/", AppRoute::Home)
        .route("/stock-rooms", AppRoute::StockRooms)
        .route("/s/:name", AppRoute::StockRoom)
        .route("/post/:id", AppRoute::PostDetail)
        .route("/*", AppRoute::NotFound)
}

pub fn room_path(name: &str) -> String {
    format!("/s/{name}")
}

pub fn post_path(id: impl std::fmt::Display) -> String {
    format!("/post/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_path_resolves() {
        let router = app_router();
        let cases = [
            ("/", AppRoute::Home),
            ("/login", AppRoute::Login),
            ("/stock-rooms", AppRoute::StockRooms),
            ("/s/SAMSUNG", AppRoute::StockRoom),
            ("/post/42", AppRoute::PostDetail),
            ("/nope/really", AppRoute::NotFound),
        ];
        for (path, expected) in cases {
            assert_eq!(*router.resolve(path).unwrap().route, expected, "{path}");
        }
        assert_eq!(
            router.resolve(&room_path("KAKAO")).unwrap().params.get("name"),
            Some("KAKAO")
        );
    }
}
