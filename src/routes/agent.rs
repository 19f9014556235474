use crate::commands;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/agent/list",
            get(commands::agent::get_agent_list_axum),
        )
        .route(
            "/api/admin/agent/create",
            post(commands::agent::create_agent_axum),
        )
        .route(
            "/api/admin/agent/update",
            post(commands::agent::update_agent_axum),
        )
        .route(
            "/api/admin/agent/delete",
            post(commands::agent::delete_agent_axum),
        )
}
