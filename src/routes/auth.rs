use crate::commands;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/auth/session",
        get(commands::auth::get_session_status_axum),
    )
}
