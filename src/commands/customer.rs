use crate::db::{Customer, DbPool};
use crate::error::{FarmError, FarmResult};
use crate::state::AppState;
use axum::{extract::State as AxumState, Json};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub id: Option<String>,
    pub name: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub contact_number: Option<String>,
    pub area: Option<String>,
    pub address: Option<String>,
    pub geopin: Option<String>,
    pub delivery_agent: Option<String>,
}

/// Reference list for forms and the weekly generator, name ascending.
pub async fn get_customer_list_axum(
    AxumState(state): AxumState<AppState>,
) -> FarmResult<Json<Vec<Customer>>> {
    let customers = sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY name ASC")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(customers))
}

pub async fn create_customer_internal(pool: &DbPool, input: CustomerInput) -> FarmResult<String> {
    if input.name.trim().is_empty() {
        return Err(FarmError::Validation("Name is required.".into()));
    }

    let id = crate::db::new_row_id("CUS");
    sqlx::query(
        "INSERT INTO customers (
            id, name, quantity, unit, contact_number, area, address, geopin, delivery_agent
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(&id)
    .bind(&input.name)
    .bind(input.quantity)
    .bind(input.unit)
    .bind(input.contact_number)
    .bind(input.area)
    .bind(input.address)
    .bind(input.geopin)
    .bind(input.delivery_agent.filter(|e| !e.trim().is_empty()))
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn create_customer_axum(
    AxumState(state): AxumState<AppState>,
    Json(input): Json<CustomerInput>,
) -> FarmResult<Json<String>> {
    let id = create_customer_internal(&state.pool, input).await?;
    Ok(Json(id))
}

pub async fn update_customer_axum(
    AxumState(state): AxumState<AppState>,
    Json(input): Json<CustomerInput>,
) -> FarmResult<Json<()>> {
    let id = input
        .id
        .ok_or_else(|| FarmError::Validation("Customer ID is required for update.".into()))?;
    if input.name.trim().is_empty() {
        return Err(FarmError::Validation("Name is required.".into()));
    }

    sqlx::query(
        "UPDATE customers SET
            name = $1, quantity = $2, unit = $3, contact_number = $4, area = $5,
            address = $6, geopin = $7, delivery_agent = $8, updated_at = CURRENT_TIMESTAMP
         WHERE id = $9",
    )
    .bind(&input.name)
    .bind(input.quantity)
    .bind(input.unit)
    .bind(input.contact_number)
    .bind(input.area)
    .bind(input.address)
    .bind(input.geopin)
    .bind(input.delivery_agent.filter(|e| !e.trim().is_empty()))
    .bind(&id)
    .execute(&state.pool)
    .await?;

    Ok(Json(()))
}

#[derive(Deserialize)]
pub struct CustomerDeleteInput {
    pub id: String,
}

pub async fn delete_customer_axum(
    AxumState(state): AxumState<AppState>,
    Json(input): Json<CustomerDeleteInput>,
) -> FarmResult<Json<()>> {
    sqlx::query("DELETE FROM customers WHERE id = $1")
        .bind(input.id)
        .execute(&state.pool)
        .await?;
    Ok(Json(()))
}
