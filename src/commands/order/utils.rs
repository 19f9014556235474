use crate::error::{FarmError, FarmResult};
use chrono::NaiveDate;

pub const ORDER_STATUSES: [&str; 4] = ["pending", "processing", "completed", "cancelled"];

pub fn validate_status(status: &str) -> FarmResult<()> {
    if ORDER_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(FarmError::Validation(format!(
            "Unknown order status '{}'",
            status
        )))
    }
}

pub fn parse_date_safe(date_str: &str) -> Option<NaiveDate> {
    if date_str.trim().is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_str, "%Y%m%d"))
        .ok()
}
