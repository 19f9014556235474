use crate::commands;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/feed/list",
            get(commands::feed::get_feed_record_list_axum),
        )
        .route(
            "/api/admin/feed/create",
            post(commands::feed::create_feed_record_axum),
        )
        .route(
            "/api/admin/feed/update",
            post(commands::feed::update_feed_record_axum),
        )
        .route(
            "/api/admin/feed/delete",
            post(commands::feed::delete_feed_record_axum),
        )
}
