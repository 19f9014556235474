use crate::error::{FarmError, FarmResult};
use serde_json::json;
use std::collections::HashMap;

/// Transactional-email dispatch: a named template plus a key-value parameter
/// map, posted to the configured provider. Used only for farm-visit booking
/// confirmations.
pub async fn send_template_email(
    template: &str,
    params: &HashMap<String, String>,
) -> FarmResult<()> {
    let api_url = std::env::var("EMAIL_API_URL")
        .map_err(|_| FarmError::Internal("EMAIL_API_URL is not configured".into()))?;
    let api_key = std::env::var("EMAIL_API_KEY").unwrap_or_default();

    let client = reqwest::Client::new();
    client
        .post(&api_url)
        .bearer_auth(api_key)
        .json(&json!({
            "template": template,
            "params": params,
        }))
        .send()
        .await?
        .error_for_status()?;

    Ok(())
}

/// Fire-and-forget variant: dispatch failures are logged, never propagated
/// to the caller.
pub fn dispatch_template_email(template: &str, params: HashMap<String, String>) {
    let template = template.to_string();
    tokio::spawn(async move {
        match send_template_email(&template, &params).await {
            Ok(()) => tracing::info!("Dispatched '{}' notification", template),
            Err(e) => tracing::warn!("Email dispatch '{}' failed: {}", template, e),
        }
    });
}
