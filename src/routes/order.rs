use crate::commands;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/order/list",
            get(commands::order::get_order_list_axum),
        )
        .route(
            "/api/admin/order/create",
            post(commands::order::create_order_axum),
        )
        .route(
            "/api/admin/order/update",
            post(commands::order::update_order_axum),
        )
        .route(
            "/api/admin/order/delete",
            post(commands::order::delete_order_axum),
        )
        .route(
            "/api/admin/order/generate",
            post(commands::order::weekly::generate_weekly_orders_axum),
        )
        .route(
            "/api/admin/order/preview",
            post(commands::order::weekly::preview_weekly_orders_axum),
        )
}
