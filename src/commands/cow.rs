use crate::db::{Cow, DbPool};
use crate::error::{FarmError, FarmResult};
use crate::state::AppState;
use axum::{extract::State as AxumState, Json};
use serde::{Deserialize, Serialize};

use crate::commands::order::utils::parse_date_safe;

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CowInput {
    pub id: Option<String>,
    pub name: String,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub birthdate: Option<String>,
    pub lactation: Option<bool>,
    pub lactation_day: Option<String>,
    pub mother: Option<String>,
    pub father: Option<String>,
    pub origin: Option<String>,
    pub comments: Option<String>,
}

fn validate_cow_input(input: &CowInput) -> FarmResult<()> {
    if input.name.trim().is_empty() {
        return Err(FarmError::Validation("Name is required.".into()));
    }
    if let Some(ref gender) = input.gender {
        if !gender.is_empty() && gender != "MALE" && gender != "FEMALE" {
            return Err(FarmError::Validation(format!(
                "Unknown gender '{}'",
                gender
            )));
        }
    }
    Ok(())
}

pub async fn get_cow_list_axum(
    AxumState(state): AxumState<AppState>,
) -> FarmResult<Json<Vec<Cow>>> {
    let cows = sqlx::query_as::<_, Cow>("SELECT * FROM cows ORDER BY created_at DESC")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(cows))
}

pub async fn create_cow_internal(pool: &DbPool, input: CowInput) -> FarmResult<String> {
    validate_cow_input(&input)?;

    let birthdate = input.birthdate.as_deref().and_then(parse_date_safe);
    let id = crate::db::new_row_id("COW");

    sqlx::query(
        "INSERT INTO cows (
            id, name, gender, age, birthdate, lactation, lactation_day,
            mother, father, origin, comments
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
    )
    .bind(&id)
    .bind(&input.name)
    .bind(input.gender.filter(|g| !g.is_empty()))
    .bind(input.age)
    .bind(birthdate)
    .bind(input.lactation)
    .bind(input.lactation_day)
    .bind(input.mother)
    .bind(input.father)
    .bind(input.origin)
    .bind(input.comments)
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn create_cow_axum(
    AxumState(state): AxumState<AppState>,
    Json(input): Json<CowInput>,
) -> FarmResult<Json<String>> {
    let id = create_cow_internal(&state.pool, input).await?;
    Ok(Json(id))
}

pub async fn update_cow_axum(
    AxumState(state): AxumState<AppState>,
    Json(input): Json<CowInput>,
) -> FarmResult<Json<()>> {
    let id = input
        .id
        .clone()
        .ok_or_else(|| FarmError::Validation("Cow ID is required for update.".into()))?;
    validate_cow_input(&input)?;

    let birthdate = input.birthdate.as_deref().and_then(parse_date_safe);

    sqlx::query(
        "UPDATE cows SET
            name = $1, gender = $2, age = $3, birthdate = $4, lactation = $5,
            lactation_day = $6, mother = $7, father = $8, origin = $9,
            comments = $10, updated_at = CURRENT_TIMESTAMP
         WHERE id = $11",
    )
    .bind(&input.name)
    .bind(input.gender.filter(|g| !g.is_empty()))
    .bind(input.age)
    .bind(birthdate)
    .bind(input.lactation)
    .bind(input.lactation_day)
    .bind(input.mother)
    .bind(input.father)
    .bind(input.origin)
    .bind(input.comments)
    .bind(&id)
    .execute(&state.pool)
    .await?;

    Ok(Json(()))
}

#[derive(Deserialize)]
pub struct CowDeleteInput {
    pub id: String,
}

pub async fn delete_cow_axum(
    AxumState(state): AxumState<AppState>,
    Json(input): Json<CowDeleteInput>,
) -> FarmResult<Json<()>> {
    sqlx::query("DELETE FROM cows WHERE id = $1")
        .bind(input.id)
        .execute(&state.pool)
        .await?;
    Ok(Json(()))
}
