use crate::commands;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/delivery/orders",
            get(commands::delivery::get_delivery_orders_axum),
        )
        .route(
            "/api/delivery/order/status",
            post(commands::delivery::update_order_status_axum),
        )
}
