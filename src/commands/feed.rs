use crate::db::{DbPool, FeedRecordView};
use crate::error::{FarmError, FarmResult};
use crate::state::AppState;
use axum::{
    extract::{Query, State as AxumState},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::commands::order::utils::parse_date_safe;

/// The single rounding function used everywhere a feed quantity or milk
/// output is stored or displayed: one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Derived total milk output, computed once at submit time and stored.
/// Absent inputs count as zero; both absent means "not recorded".
pub fn combined_milk_output(morning: Option<f64>, evening: Option<f64>) -> Option<f64> {
    if morning.is_none() && evening.is_none() {
        return None;
    }
    let m = morning.map(round1).unwrap_or(0.0);
    let e = evening.map(round1).unwrap_or(0.0);
    Some(round1(m + e))
}

/// Form drafts arrive with every numeric as free text. Parsing happens here,
/// at the boundary; handlers only ever see the typed values.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRecordDraft {
    pub id: Option<String>,
    pub cow_id: Option<String>,
    pub record_date: Option<String>,
    pub vaccine: Option<String>,
    pub deworming: Option<String>,
    pub disease: Option<String>,
    pub medical_note: Option<String>,
    pub grower_below_6_months: Option<String>,
    pub grower_above_6_months: Option<String>,
    pub tuver_bhusu: Option<String>,
    pub ghau_bhusu: Option<String>,
    pub chana_bhusu: Option<String>,
    pub juvar_bajari: Option<String>,
    pub sheradi_kucha: Option<String>,
    pub saileg: Option<String>,
    pub makai: Option<String>,
    pub bajari_juvar: Option<String>,
    pub bajari_sheradi: Option<String>,
    pub bajari_makai: Option<String>,
    pub vegetable_waste: Option<String>,
    pub kapas_khod: Option<String>,
    pub makai_khod: Option<String>,
    pub readymade_feed: Option<String>,
    pub milk_output_morning: Option<String>,
    pub milk_output_evening: Option<String>,
}

/// The validated, typed form of a draft. `milk_output` is already derived.
#[derive(Debug, PartialEq)]
pub struct FeedRecordValues {
    pub cow_id: Option<String>,
    pub record_date: NaiveDate,
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
}

/// Empty or missing means "not recorded", never zero.
fn parse_quantity(field: &str, raw: &Option<String>) -> FarmResult<Option<f64>> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<f64>()
            .map(|v| Some(round1(v)))
            .map_err(|_| FarmError::Validation(format!("'{}' is not a number for {}", s, field))),
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

impl FeedRecordDraft {
    pub fn parse(self) -> FarmResult<FeedRecordValues> {
        let record_date = self
            .record_date
            .as_deref()
            .and_then(parse_date_safe)
            .ok_or_else(|| FarmError::Validation("Record date is required (YYYY-MM-DD).".into()))?;

        let milk_output_morning =
            parse_quantity("milk_output_morning", &self.milk_output_morning)?;
        let milk_output_evening =
            parse_quantity("milk_output_evening", &self.milk_output_evening)?;

        Ok(FeedRecordValues {
            cow_id: non_empty(self.cow_id),
            record_date,
            vaccine: non_empty(self.vaccine),
            deworming: non_empty(self.deworming),
            disease: non_empty(self.disease),
            medical_note: non_empty(self.medical_note),
            grower_below_6_months: parse_quantity(
                "grower_below_6_months",
                &self.grower_below_6_months,
            )?,
            grower_above_6_months: parse_quantity(
                "grower_above_6_months",
                &self.grower_above_6_months,
            )?,
            tuver_bhusu: parse_quantity("tuver_bhusu", &self.tuver_bhusu)?,
            ghau_bhusu: parse_quantity("ghau_bhusu", &self.ghau_bhusu)?,
            chana_bhusu: parse_quantity("chana_bhusu", &self.chana_bhusu)?,
            juvar_bajari: parse_quantity("juvar_bajari", &self.juvar_bajari)?,
            sheradi_kucha: parse_quantity("sheradi_kucha", &self.sheradi_kucha)?,
            saileg: parse_quantity("saileg", &self.saileg)?,
            makai: parse_quantity("makai", &self.makai)?,
            bajari_juvar: parse_quantity("bajari_juvar", &self.bajari_juvar)?,
            bajari_sheradi: parse_quantity("bajari_sheradi", &self.bajari_sheradi)?,
            bajari_makai: parse_quantity("bajari_makai", &self.bajari_makai)?,
            vegetable_waste: parse_quantity("vegetable_waste", &self.vegetable_waste)?,
            kapas_khod: parse_quantity("kapas_khod", &self.kapas_khod)?,
            makai_khod: parse_quantity("makai_khod", &self.makai_khod)?,
            readymade_feed: parse_quantity("readymade_feed", &self.readymade_feed)?,
            milk_output: combined_milk_output(milk_output_morning, milk_output_evening),
            milk_output_morning,
            milk_output_evening,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSortKey {
    RecordDate,
    CowName,
    MilkOutput,
}

impl FeedSortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "record_date" => Some(Self::RecordDate),
            "cow_name" => Some(Self::CowName),
            "milk_output" => Some(Self::MilkOutput),
            _ => None,
        }
    }
}

/// Case-insensitive substring search over the denormalized cow name.
pub fn search_feed_records(records: Vec<FeedRecordView>, search: &str) -> Vec<FeedRecordView> {
    if search.is_empty() {
        return records;
    }
    let needle = search.to_lowercase();
    records
        .into_iter()
        .filter(|r| {
            r.cow_name
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&needle))
        })
        .collect()
}

pub fn filter_feed_records_by_cow(
    records: Vec<FeedRecordView>,
    cow_id: &str,
) -> Vec<FeedRecordView> {
    if cow_id.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| r.record.cow_id.as_deref() == Some(cow_id))
        .collect()
}

pub fn sort_feed_records(records: &mut [FeedRecordView], key: FeedSortKey, ascending: bool) {
    records.sort_by(|a, b| {
        let ord = match key {
            FeedSortKey::RecordDate => a.record.record_date.cmp(&b.record.record_date),
            FeedSortKey::CowName => a
                .cow_name
                .as_deref()
                .unwrap_or("")
                .cmp(b.cow_name.as_deref().unwrap_or("")),
            FeedSortKey::MilkOutput => a
                .record
                .milk_output
                .unwrap_or(0.0)
                .total_cmp(&b.record.milk_output.unwrap_or(0.0)),
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
pub struct FeedListQuery {
    pub search: Option<String>,
    pub cow_id: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

pub async fn get_feed_record_list_axum(
    AxumState(state): AxumState<AppState>,
    Query(params): Query<FeedListQuery>,
) -> FarmResult<Json<Vec<FeedRecordView>>> {
    let records = sqlx::query_as::<_, FeedRecordView>(
        "SELECT f.*, c.name AS cow_name
         FROM feed_records f
         LEFT JOIN cows c ON f.cow_id = c.id
         ORDER BY f.record_date DESC",
    )
    .fetch_all(&state.pool)
    .await?;

    let records = search_feed_records(records, params.search.as_deref().unwrap_or(""));
    let mut records = filter_feed_records_by_cow(records, params.cow_id.as_deref().unwrap_or(""));

    if let Some(ref sort_by) = params.sort_by {
        let key = FeedSortKey::parse(sort_by)
            .ok_or_else(|| FarmError::Validation(format!("Unknown sort key '{}'", sort_by)))?;
        let ascending = params.sort_order.as_deref() != Some("desc");
        sort_feed_records(&mut records, key, ascending);
    }

    Ok(Json(records))
}

pub async fn create_feed_record_internal(
    pool: &DbPool,
    draft: FeedRecordDraft,
) -> FarmResult<String> {
    let values = draft.parse()?;
    let id = crate::db::new_row_id("FR");

    sqlx::query(
        "INSERT INTO feed_records (
            id, cow_id, record_date, vaccine, deworming, disease, medical_note,
            grower_below_6_months, grower_above_6_months, tuver_bhusu, ghau_bhusu,
            chana_bhusu, juvar_bajari, sheradi_kucha, saileg, makai, bajari_juvar,
            bajari_sheradi, bajari_makai, vegetable_waste, kapas_khod, makai_khod,
            readymade_feed, milk_output_morning, milk_output_evening, milk_output
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                  $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26)",
    )
    .bind(&id)
    .bind(&values.cow_id)
    .bind(values.record_date)
    .bind(&values.vaccine)
    .bind(&values.deworming)
    .bind(&values.disease)
    .bind(&values.medical_note)
    .bind(values.grower_below_6_months)
    .bind(values.grower_above_6_months)
    .bind(values.tuver_bhusu)
    .bind(values.ghau_bhusu)
    .bind(values.chana_bhusu)
    .bind(values.juvar_bajari)
    .bind(values.sheradi_kucha)
    .bind(values.saileg)
    .bind(values.makai)
    .bind(values.bajari_juvar)
    .bind(values.bajari_sheradi)
    .bind(values.bajari_makai)
    .bind(values.vegetable_waste)
    .bind(values.kapas_khod)
    .bind(values.makai_khod)
    .bind(values.readymade_feed)
    .bind(values.milk_output_morning)
    .bind(values.milk_output_evening)
    .bind(values.milk_output)
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn create_feed_record_axum(
    AxumState(state): AxumState<AppState>,
    Json(draft): Json<FeedRecordDraft>,
) -> FarmResult<Json<String>> {
    let id = create_feed_record_internal(&state.pool, draft).await?;
    Ok(Json(id))
}

pub async fn update_feed_record_axum(
    AxumState(state): AxumState<AppState>,
    Json(draft): Json<FeedRecordDraft>,
) -> FarmResult<Json<()>> {
    let id = draft
        .id
        .clone()
        .ok_or_else(|| FarmError::Validation("Feed record ID is required for update.".into()))?;
    let values = draft.parse()?;

    sqlx::query(
        "UPDATE feed_records SET
            cow_id = $1, record_date = $2, vaccine = $3, deworming = $4,
            disease = $5, medical_note = $6, grower_below_6_months = $7,
            grower_above_6_months = $8, tuver_bhusu = $9, ghau_bhusu = $10,
            chana_bhusu = $11, juvar_bajari = $12, sheradi_kucha = $13,
            saileg = $14, makai = $15, bajari_juvar = $16, bajari_sheradi = $17,
            bajari_makai = $18, vegetable_waste = $19, kapas_khod = $20,
            makai_khod = $21, readymade_feed = $22, milk_output_morning = $23,
            milk_output_evening = $24, milk_output = $25,
            updated_at = CURRENT_TIMESTAMP
         WHERE id = $26",
    )
    .bind(&values.cow_id)
    .bind(values.record_date)
    .bind(&values.vaccine)
    .bind(&values.deworming)
    .bind(&values.disease)
    .bind(&values.medical_note)
    .bind(values.grower_below_6_months)
    .bind(values.grower_above_6_months)
    .bind(values.tuver_bhusu)
    .bind(values.ghau_bhusu)
    .bind(values.chana_bhusu)
    .bind(values.juvar_bajari)
    .bind(values.sheradi_kucha)
    .bind(values.saileg)
    .bind(values.makai)
    .bind(values.bajari_juvar)
    .bind(values.bajari_sheradi)
    .bind(values.bajari_makai)
    .bind(values.vegetable_waste)
    .bind(values.kapas_khod)
    .bind(values.makai_khod)
    .bind(values.readymade_feed)
    .bind(values.milk_output_morning)
    .bind(values.milk_output_evening)
    .bind(values.milk_output)
    .bind(&id)
    .execute(&state.pool)
    .await?;

    Ok(Json(()))
}

#[derive(Deserialize)]
pub struct FeedRecordDeleteInput {
    pub id: String,
}

pub async fn delete_feed_record_axum(
    AxumState(state): AxumState<AppState>,
    Json(input): Json<FeedRecordDeleteInput>,
) -> FarmResult<Json<()>> {
    sqlx::query("DELETE FROM feed_records WHERE id = $1")
        .bind(input.id)
        .execute(&state.pool)
        .await?;
    Ok(Json(()))
}
