use crate::db::DbPool;
use crate::error::{FarmError, FarmResult};
use crate::state::AppState;
use axum::{extract::State as AxumState, Json};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// A weekly recurrence: one quantity per weekday, expanded over a calendar
/// month. Quantities default to 0, meaning "no delivery that weekday".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyOrder {
    pub customer_id: String,
    #[serde(default)]
    pub customer_name: String,
    pub item: String,
    pub month: u32,
    pub year: i32,
    #[serde(default)]
    pub monday: f64,
    #[serde(default)]
    pub tuesday: f64,
    #[serde(default)]
    pub wednesday: f64,
    #[serde(default)]
    pub thursday: f64,
    #[serde(default)]
    pub friday: f64,
    #[serde(default)]
    pub saturday: f64,
    #[serde(default)]
    pub sunday: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedOrder {
    pub customer_id: String,
    pub customer_name: String,
    pub item: String,
    pub quantity: f64,
    pub order_date: NaiveDate,
    pub status: String,
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    // The day before the first of the following month.
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(0)
}

/// Expands a weekly recurrence into the concrete order rows for one month.
///
/// Pure: no I/O, identical inputs yield identical output, safe to call
/// repeatedly for previews. Only strictly positive weekday quantities emit a
/// row; the result is ordered by ascending date. The caller is responsible
/// for month/year validity and for treating an empty expansion as a
/// validation failure before persisting.
pub fn generate_orders_for_month(order: &WeeklyOrder) -> Vec<GeneratedOrder> {
    let mut orders = Vec::new();

    for day in 1..=days_in_month(order.year, order.month) {
        let Some(date) = NaiveDate::from_ymd_opt(order.year, order.month, day) else {
            continue;
        };

        let quantity = match date.weekday() {
            Weekday::Mon => order.monday,
            Weekday::Tue => order.tuesday,
            Weekday::Wed => order.wednesday,
            Weekday::Thu => order.thursday,
            Weekday::Fri => order.friday,
            Weekday::Sat => order.saturday,
            Weekday::Sun => order.sunday,
        };

        if quantity > 0.0 {
            orders.push(GeneratedOrder {
                customer_id: order.customer_id.clone(),
                customer_name: order.customer_name.clone(),
                item: order.item.clone(),
                quantity,
                order_date: date,
                status: "pending".to_string(),
            });
        }
    }

    orders
}

/// Resolves the customer, expands the recurrence, and bulk-inserts the rows
/// in one transaction. Returns the inserted count. Resubmitting the same
/// recurrence inserts the rows again; there is no dedup key.
pub async fn generate_weekly_orders_internal(
    pool: &DbPool,
    mut weekly: WeeklyOrder,
) -> FarmResult<usize> {
    if weekly.customer_id.trim().is_empty() {
        return Err(FarmError::Validation("Please select a customer.".into()));
    }
    if !(1..=12).contains(&weekly.month) {
        return Err(FarmError::Validation(format!(
            "Month {} is out of range",
            weekly.month
        )));
    }

    // The customers table is authoritative for the denormalized name.
    let customer: Option<(String,)> = sqlx::query_as("SELECT name FROM customers WHERE id = $1")
        .bind(&weekly.customer_id)
        .fetch_optional(pool)
        .await?;
    let Some((customer_name,)) = customer else {
        return Err(FarmError::Validation("Customer not found.".into()));
    };
    weekly.customer_name = customer_name;

    let orders = generate_orders_for_month(&weekly);
    if orders.is_empty() {
        return Err(FarmError::Validation(
            "No orders generated. Please set quantities for at least one day.".into(),
        ));
    }

    let mut tx = pool.begin().await?;
    for order in &orders {
        let id = crate::db::new_row_id("ORD");
        sqlx::query(
            "INSERT INTO orders (id, customer_id, customer_name, order_date, status, item, quantity)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&id)
        .bind(&order.customer_id)
        .bind(&order.customer_name)
        .bind(order.order_date)
        .bind(&order.status)
        .bind(&order.item)
        .bind(order.quantity)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    tracing::info!(
        "Generated {} orders for {} ({}/{})",
        orders.len(),
        weekly.customer_name,
        weekly.month,
        weekly.year
    );
    Ok(orders.len())
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub inserted: usize,
}

pub async fn generate_weekly_orders_axum(
    AxumState(state): AxumState<AppState>,
    Json(input): Json<WeeklyOrder>,
) -> FarmResult<Json<GenerateResponse>> {
    let inserted = generate_weekly_orders_internal(&state.pool, input).await?;
    Ok(Json(GenerateResponse { inserted }))
}

#[derive(Serialize)]
pub struct PreviewResponse {
    pub count: usize,
    pub total_quantity: f64,
    pub dates: Vec<NaiveDate>,
}

/// Dry run of the expansion for the summary view; never writes.
pub async fn preview_weekly_orders_axum(
    Json(input): Json<WeeklyOrder>,
) -> FarmResult<Json<PreviewResponse>> {
    if !(1..=12).contains(&input.month) {
        return Err(FarmError::Validation(format!(
            "Month {} is out of range",
            input.month
        )));
    }

    let orders = generate_orders_for_month(&input);
    Ok(Json(PreviewResponse {
        count: orders.len(),
        total_quantity: orders.iter().map(|o| o.quantity).sum(),
        dates: orders.iter().map(|o| o.order_date).collect(),
    }))
}
