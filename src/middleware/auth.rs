use crate::db::DbPool;
use crate::error::FarmResult;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by the session token the identity provider issues. The
/// service only verifies and reads them; it never issues or refreshes tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub name: Option<String>,
    pub exp: usize,
}

impl Claims {
    pub fn email(&self) -> &str {
        &self.sub
    }
}

pub fn get_jwt_secret() -> Vec<u8> {
    std::env::var("JWT_SECRET")
        .unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using insecure default!");
            "insecure-development-secret-key-replace-me-immediately".to_string()
        })
        .into_bytes()
}

fn decode_bearer(request: &Request) -> Option<Claims> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    let token = auth_header.strip_prefix("Bearer ")?;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&get_jwt_secret()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims)
}

/// Verifies the bearer token on protected API paths and attaches the claims
/// to the request. Public site and session-probe paths pass through.
pub async fn auth_middleware(mut request: Request, next: Next) -> Result<Response, StatusCode> {
    let path = request.uri().path();
    let is_public = !path.starts_with("/api/")
        || path.starts_with("/api/site/")
        || path == "/api/auth/session";

    if is_public {
        // Still attach claims when a token is present so public handlers can
        // report session status.
        if let Some(claims) = decode_bearer(&request) {
            request.extensions_mut().insert(claims);
        }
        return Ok(next.run(request).await);
    }

    match decode_bearer(&request) {
        Some(claims) => {
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        None => Err(StatusCode::UNAUTHORIZED),
    }
}

pub async fn is_authorized_admin(pool: &DbPool, email: &str) -> FarmResult<bool> {
    let row: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM authorized_admins WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await?;
    Ok(row.0)
}

pub async fn is_authorized_delivery_agent(pool: &DbPool, email: &str) -> FarmResult<bool> {
    let row: (bool,) = sqlx::query_as(
        "SELECT EXISTS(SELECT 1 FROM delivery_agents WHERE email = $1 AND is_active)",
    )
    .bind(email)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

/// Gate for `/api/admin/**`: the authenticated email must appear in
/// `authorized_admins`.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let claims = request
        .extensions()
        .get::<Claims>()
        .cloned()
        .ok_or(StatusCode::UNAUTHORIZED)?;

    match is_authorized_admin(&state.pool, claims.email()).await {
        Ok(true) => Ok(next.run(request).await),
        Ok(false) => {
            tracing::warn!("Admin access denied for {}", claims.email());
            Err(StatusCode::FORBIDDEN)
        }
        Err(e) => {
            tracing::error!("Admin authorization check failed: {:?}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Gate for `/api/delivery/**`: the authenticated email must match an active
/// delivery agent.
pub async fn require_delivery_agent(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let claims = request
        .extensions()
        .get::<Claims>()
        .cloned()
        .ok_or(StatusCode::UNAUTHORIZED)?;

    match is_authorized_delivery_agent(&state.pool, claims.email()).await {
        Ok(true) => Ok(next.run(request).await),
        Ok(false) => {
            tracing::warn!("Delivery access denied for {}", claims.email());
            Err(StatusCode::FORBIDDEN)
        }
        Err(e) => {
            tracing::error!("Delivery authorization check failed: {:?}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
