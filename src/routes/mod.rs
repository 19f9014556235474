use crate::middleware::auth::{require_admin, require_delivery_agent};
use crate::state::AppState;
use axum::{middleware, Router};

pub mod agent;
pub mod auth;
pub mod cow;
pub mod customer;
pub mod delivery;
pub mod feed;
pub mod order;
pub mod site;

pub fn create_router(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .merge(cow::router())
        .merge(customer::router())
        .merge(order::router())
        .merge(feed::router())
        .merge(agent::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let delivery = delivery::router().layer(middleware::from_fn_with_state(
        state,
        require_delivery_agent,
    ));

    Router::new()
        .merge(site::router())
        .merge(auth::router())
        .merge(admin)
        .merge(delivery)
}
