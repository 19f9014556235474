use crate::commands;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/customer/list",
            get(commands::customer::get_customer_list_axum),
        )
        .route(
            "/api/admin/customer/create",
            post(commands::customer::create_customer_axum),
        )
        .route(
            "/api/admin/customer/update",
            post(commands::customer::update_customer_axum),
        )
        .route(
            "/api/admin/customer/delete",
            post(commands::customer::delete_customer_axum),
        )
}
