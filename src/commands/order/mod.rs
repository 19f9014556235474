pub mod utils;
pub mod weekly;

use crate::db::{DbPool, Order};
use crate::error::{FarmError, FarmResult};
use crate::state::AppState;
use axum::{
    extract::{Query, State as AxumState},
    Json,
};
use serde::{Deserialize, Serialize};

use self::utils::{parse_date_safe, validate_status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSortKey {
    CustomerName,
    OrderDate,
    Status,
}

impl OrderSortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "customer_name" => Some(Self::CustomerName),
            "order_date" => Some(Self::OrderDate),
            "status" => Some(Self::Status),
            _ => None,
        }
    }
}

/// Case-insensitive substring match over the denormalized customer name.
pub fn filter_orders(orders: Vec<Order>, search: &str) -> Vec<Order> {
    if search.is_empty() {
        return orders;
    }
    let needle = search.to_lowercase();
    orders
        .into_iter()
        .filter(|o| o.customer_name.to_lowercase().contains(&needle))
        .collect()
}

/// Single-key sort over the in-memory list. Dates and statuses compare as
/// their string forms, matching the list view's column semantics.
pub fn sort_orders(orders: &mut [Order], key: OrderSortKey, ascending: bool) {
    orders.sort_by(|a, b| {
        let ord = match key {
            OrderSortKey::CustomerName => a.customer_name.cmp(&b.customer_name),
            OrderSortKey::OrderDate => a.order_date.cmp(&b.order_date),
            OrderSortKey::Status => a
                .status
                .as_deref()
                .unwrap_or("")
                .cmp(b.status.as_deref().unwrap_or("")),
        };
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListQuery {
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Fetches all orders newest-first, then applies the search/sort in memory
/// over the full result set on every request.
pub async fn get_order_list_axum(
    AxumState(state): AxumState<AppState>,
    Query(params): Query<OrderListQuery>,
) -> FarmResult<Json<Vec<Order>>> {
    let orders = sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
        .fetch_all(&state.pool)
        .await?;

    let mut orders = filter_orders(orders, params.search.as_deref().unwrap_or(""));

    if let Some(ref sort_by) = params.sort_by {
        let key = OrderSortKey::parse(sort_by)
            .ok_or_else(|| FarmError::Validation(format!("Unknown sort key '{}'", sort_by)))?;
        let ascending = params.sort_order.as_deref() != Some("desc");
        sort_orders(&mut orders, key, ascending);
    }

    Ok(Json(orders))
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    pub id: Option<String>,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub order_date: String,
    pub status: Option<String>,
    pub item: String,
    pub quantity: f64,
}

pub async fn create_order_internal(pool: &DbPool, input: OrderInput) -> FarmResult<String> {
    let order_date = parse_date_safe(&input.order_date)
        .ok_or_else(|| FarmError::Validation("Order date is required (YYYY-MM-DD).".into()))?;

    if input.item.trim().is_empty() {
        return Err(FarmError::Validation("Item is required.".into()));
    }
    if input.quantity <= 0.0 {
        return Err(FarmError::Validation(
            "Quantity must be greater than zero.".into(),
        ));
    }

    let status = input.status.unwrap_or_else(|| "pending".to_string());
    validate_status(&status)?;

    // customer_id is authoritative: resolve the denormalized name from the
    // customers table whenever a link is given.
    let customer_name = match input.customer_id.as_deref().filter(|s| !s.is_empty()) {
        Some(customer_id) => {
            let row: Option<(String,)> = sqlx::query_as("SELECT name FROM customers WHERE id = $1")
                .bind(customer_id)
                .fetch_optional(pool)
                .await?;
            row.ok_or_else(|| FarmError::Validation("Customer not found.".into()))?
                .0
        }
        None => input
            .customer_name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| FarmError::Validation("Customer name is required.".into()))?,
    };

    let id = crate::db::new_row_id("ORD");
    sqlx::query(
        "INSERT INTO orders (id, customer_id, customer_name, order_date, status, item, quantity)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(&id)
    .bind(input.customer_id.filter(|s| !s.is_empty()))
    .bind(&customer_name)
    .bind(order_date)
    .bind(&status)
    .bind(&input.item)
    .bind(input.quantity)
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn create_order_axum(
    AxumState(state): AxumState<AppState>,
    Json(input): Json<OrderInput>,
) -> FarmResult<Json<String>> {
    let id = create_order_internal(&state.pool, input).await?;
    Ok(Json(id))
}

/// Full-record replace; every field is resubmitted.
pub async fn update_order_axum(
    AxumState(state): AxumState<AppState>,
    Json(input): Json<OrderInput>,
) -> FarmResult<Json<()>> {
    let id = input
        .id
        .ok_or_else(|| FarmError::Validation("Order ID is required for update.".into()))?;
    let order_date = parse_date_safe(&input.order_date)
        .ok_or_else(|| FarmError::Validation("Order date is required (YYYY-MM-DD).".into()))?;
    let status = input.status.unwrap_or_else(|| "pending".to_string());
    validate_status(&status)?;

    let customer_name = input
        .customer_name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| FarmError::Validation("Customer name is required.".into()))?;

    sqlx::query(
        "UPDATE orders SET
            customer_name = $1, order_date = $2, status = $3, item = $4,
            quantity = $5, updated_at = CURRENT_TIMESTAMP
         WHERE id = $6",
    )
    .bind(&customer_name)
    .bind(order_date)
    .bind(&status)
    .bind(&input.item)
    .bind(input.quantity)
    .bind(&id)
    .execute(&state.pool)
    .await?;

    Ok(Json(()))
}

#[derive(Deserialize)]
pub struct OrderDeleteInput {
    pub id: String,
}

pub async fn delete_order_axum(
    AxumState(state): AxumState<AppState>,
    Json(input): Json<OrderDeleteInput>,
) -> FarmResult<Json<()>> {
    sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(input.id)
        .execute(&state.pool)
        .await?;
    Ok(Json(()))
}
