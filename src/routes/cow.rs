use crate::commands;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/cow/list", get(commands::cow::get_cow_list_axum))
        .route("/api/admin/cow/create", post(commands::cow::create_cow_axum))
        .route("/api/admin/cow/update", post(commands::cow::update_cow_axum))
        .route("/api/admin/cow/delete", post(commands::cow::delete_cow_axum))
}
