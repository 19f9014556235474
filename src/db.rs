#![allow(dead_code)]
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::{FromRow, Pool, Postgres};
use std::str::FromStr;

use crate::error::{FarmError, FarmResult};

pub type DbPool = Pool<Postgres>;

pub async fn init_pool_with_options(opts: PgConnectOptions) -> FarmResult<DbPool> {
    // connect_lazy_with returns the pool immediately without validating the
    // connection.
    Ok(PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .idle_timeout(std::time::Duration::from_secs(120))
        .max_lifetime(std::time::Duration::from_secs(300))
        .connect_lazy_with(opts))
}

pub async fn init_pool(database_url: &str) -> FarmResult<DbPool> {
    let opts = PgConnectOptions::from_str(database_url)
        .map_err(|e| FarmError::Internal(format!("Invalid DB URL: {}", e)))?
        .ssl_mode(PgSslMode::Prefer);

    init_pool_with_options(opts).await
}

pub async fn init_database(pool: &DbPool) -> FarmResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;

    let _ = ensure_seeds(pool).await;
    tracing::info!("Database ready");

    Ok(())
}

/// Seed the initial admin authorization so a fresh deployment is reachable.
async fn ensure_seeds(pool: &DbPool) -> FarmResult<()> {
    let admin_email = match std::env::var("ADMIN_EMAIL") {
        Ok(e) if !e.trim().is_empty() => e,
        _ => return Ok(()),
    };

    let exists: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM authorized_admins WHERE email = $1")
        .bind(&admin_email)
        .fetch_one(pool)
        .await
        .unwrap_or((0,));
    if exists.0 == 0 {
        let id = new_row_id("ADM");
        let _ = sqlx::query(
            "INSERT INTO authorized_admins (id, email) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(&id)
        .bind(&admin_email)
        .execute(pool)
        .await;
        tracing::info!("Seeded initial admin authorization for {}", admin_email);
    }
    Ok(())
}

/// Row ids are short prefixed uuid fragments, e.g. `COW-1A2B3C4D`.
pub fn new_row_id(prefix: &str) -> String {
    format!(
        "{}-{}",
        prefix,
        uuid::Uuid::new_v4().to_string()[..8].to_uppercase()
    )
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Cow {
    pub id: String,
    pub name: String,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub birthdate: Option<NaiveDate>,
    pub lactation: Option<bool>,
    pub lactation_day: Option<String>,
    pub mother: Option<String>,
    pub father: Option<String>,
    pub origin: Option<String>,
    pub comments: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    #[sqlx(default)]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub contact_number: Option<String>,
    pub area: Option<String>,
    pub address: Option<String>,
    pub geopin: Option<String>,
    pub delivery_agent: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    #[sqlx(default)]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: String,
    pub customer_id: Option<String>,
    pub customer_name: String,
    pub order_date: NaiveDate,
    pub status: Option<String>,
    pub item: String,
    pub quantity: f64,
    pub created_at: Option<NaiveDateTime>,
    #[sqlx(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Order joined with the customer's delivery details, as the delivery portal
/// lists it.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct DeliveryOrder {
    pub id: String,
    pub customer_id: Option<String>,
    pub customer_name: String,
    pub order_date: NaiveDate,
    pub status: Option<String>,
    pub item: String,
    pub quantity: f64,
    pub address: Option<String>,
    pub geopin: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct FeedRecord {
    pub id: String,
    pub cow_id: Option<String>,
    pub record_date: Option<NaiveDate>,
    pub vaccine: Option<String>,
    pub deworming: Option<String>,
    pub disease: Option<String>,
    pub medical_note: Option<String>,
    pub grower_below_6_months: Option<f64>,
    pub grower_above_6_months: Option<f64>,
    pub tuver_bhusu: Option<f64>,
    pub ghau_bhusu: Option<f64>,
    pub chana_bhusu: Option<f64>,
    pub juvar_bajari: Option<f64>,
    pub sheradi_kucha: Option<f64>,
    pub saileg: Option<f64>,
    pub makai: Option<f64>,
    pub bajari_juvar: Option<f64>,
    pub bajari_sheradi: Option<f64>,
    pub bajari_makai: Option<f64>,
    pub vegetable_waste: Option<f64>,
    pub kapas_khod: Option<f64>,
    pub makai_khod: Option<f64>,
    pub readymade_feed: Option<f64>,
    pub milk_output_morning: Option<f64>,
    pub milk_output_evening: Option<f64>,
    pub milk_output: Option<f64>,
    pub created_at: Option<NaiveDateTime>,
    #[sqlx(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Feed record with the owning cow's name denormalized for display and
/// search.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct FeedRecordView {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub record: FeedRecord,
    pub cow_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct DeliveryAgent {
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub area: Option<String>,
    pub is_active: bool,
    pub created_at: Option<NaiveDateTime>,
    #[sqlx(default)]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct AuthorizedAdmin {
    pub id: String,
    pub email: String,
    pub created_at: Option<NaiveDateTime>,
}
