use crate::db::{DbPool, DeliveryAgent};
use crate::error::{FarmError, FarmResult};
use crate::state::AppState;
use axum::{extract::State as AxumState, Json};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAgentInput {
    pub id: Option<String>,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub area: Option<String>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

fn validate_agent_input(input: &DeliveryAgentInput) -> FarmResult<()> {
    if input.email.trim().is_empty() {
        return Err(FarmError::Validation("Email is required.".into()));
    }
    if input.name.trim().is_empty() {
        return Err(FarmError::Validation("Name is required.".into()));
    }
    Ok(())
}

pub async fn get_agent_list_axum(
    AxumState(state): AxumState<AppState>,
) -> FarmResult<Json<Vec<DeliveryAgent>>> {
    let agents =
        sqlx::query_as::<_, DeliveryAgent>("SELECT * FROM delivery_agents ORDER BY created_at DESC")
            .fetch_all(&state.pool)
            .await?;
    Ok(Json(agents))
}

pub async fn create_agent_internal(pool: &DbPool, input: DeliveryAgentInput) -> FarmResult<String> {
    validate_agent_input(&input)?;

    let id = crate::db::new_row_id("DA");
    sqlx::query(
        "INSERT INTO delivery_agents (id, email, name, phone, area, is_active)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(&id)
    .bind(input.email.trim())
    .bind(&input.name)
    .bind(input.phone)
    .bind(input.area)
    .bind(input.is_active)
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn create_agent_axum(
    AxumState(state): AxumState<AppState>,
    Json(input): Json<DeliveryAgentInput>,
) -> FarmResult<Json<String>> {
    let id = create_agent_internal(&state.pool, input).await?;
    Ok(Json(id))
}

pub async fn update_agent_axum(
    AxumState(state): AxumState<AppState>,
    Json(input): Json<DeliveryAgentInput>,
) -> FarmResult<Json<()>> {
    let id = input
        .id
        .clone()
        .ok_or_else(|| FarmError::Validation("Agent ID is required for update.".into()))?;
    validate_agent_input(&input)?;

    sqlx::query(
        "UPDATE delivery_agents SET
            email = $1, name = $2, phone = $3, area = $4, is_active = $5,
            updated_at = CURRENT_TIMESTAMP
         WHERE id = $6",
    )
    .bind(input.email.trim())
    .bind(&input.name)
    .bind(input.phone)
    .bind(input.area)
    .bind(input.is_active)
    .bind(&id)
    .execute(&state.pool)
    .await?;

    Ok(Json(()))
}

#[derive(Deserialize)]
pub struct AgentDeleteInput {
    pub id: String,
}

pub async fn delete_agent_axum(
    AxumState(state): AxumState<AppState>,
    Json(input): Json<AgentDeleteInput>,
) -> FarmResult<Json<()>> {
    sqlx::query("DELETE FROM delivery_agents WHERE id = $1")
        .bind(input.id)
        .execute(&state.pool)
        .await?;
    Ok(Json(()))
}
