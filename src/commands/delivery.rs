use crate::db::DeliveryOrder;
use crate::error::{FarmError, FarmResult};
use crate::middleware::auth::Claims;
use crate::state::AppState;
use axum::{
    extract::{Query, State as AxumState},
    Extension, Json,
};
use chrono::Local;
use serde::Deserialize;

use crate::commands::order::utils::{parse_date_safe, validate_status};

#[derive(Deserialize)]
pub struct DeliveryOrdersQuery {
    pub date: Option<String>,
}

/// The agent's round for one day: orders whose customer is assigned to the
/// authenticated agent's email, joined with the customer's address and
/// geopin.
pub async fn get_delivery_orders_axum(
    AxumState(state): AxumState<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<DeliveryOrdersQuery>,
) -> FarmResult<Json<Vec<DeliveryOrder>>> {
    let date = match params.date.as_deref() {
        Some(raw) => parse_date_safe(raw)
            .ok_or_else(|| FarmError::Validation(format!("Invalid date '{}'", raw)))?,
        None => Local::now().date_naive(),
    };

    let orders = sqlx::query_as::<_, DeliveryOrder>(
        "SELECT o.id, o.customer_id, o.customer_name, o.order_date, o.status,
                o.item, o.quantity, c.address, c.geopin
         FROM orders o
         JOIN customers c ON o.customer_id = c.id
         WHERE o.order_date = $1 AND c.delivery_agent = $2
         ORDER BY o.created_at DESC",
    )
    .bind(date)
    .bind(claims.email())
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(orders))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusInput {
    pub order_id: String,
    pub status: String,
}

/// Status-only update, the one mutation the delivery portal performs.
pub async fn update_order_status_axum(
    AxumState(state): AxumState<AppState>,
    Json(input): Json<UpdateOrderStatusInput>,
) -> FarmResult<Json<()>> {
    validate_status(&input.status)?;

    sqlx::query("UPDATE orders SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2")
        .bind(&input.status)
        .bind(&input.order_id)
        .execute(&state.pool)
        .await?;

    Ok(Json(()))
}
