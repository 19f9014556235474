use crate::commands;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/site/products", get(commands::site::get_products_axum))
        .route("/api/site/blogs", get(commands::site::get_blogs_axum))
        .route(
            "/api/site/order",
            post(commands::site::submit_public_order_axum),
        )
        .route(
            "/api/site/visit",
            post(commands::site::book_farm_visit_axum),
        )
}
