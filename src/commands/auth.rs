use crate::error::FarmResult;
use crate::middleware::auth::{is_authorized_admin, is_authorized_delivery_agent, Claims};
use crate::state::AppState;
use axum::{
    extract::{Request, State as AxumState},
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct SessionUser {
    pub email: String,
    pub name: Option<String>,
}

/// What the auth gate polls while in its loading state: the current identity
/// (if any) and both authorization flags.
#[derive(Serialize)]
pub struct SessionStatusResponse {
    pub user: Option<SessionUser>,
    pub is_authorized_admin: bool,
    pub is_authorized_delivery_agent: bool,
}

pub async fn get_session_status_axum(
    AxumState(state): AxumState<AppState>,
    request: Request,
) -> FarmResult<Json<SessionStatusResponse>> {
    let Some(claims) = request.extensions().get::<Claims>().cloned() else {
        return Ok(Json(SessionStatusResponse {
            user: None,
            is_authorized_admin: false,
            is_authorized_delivery_agent: false,
        }));
    };

    let admin = is_authorized_admin(&state.pool, claims.email()).await?;
    let agent = is_authorized_delivery_agent(&state.pool, claims.email()).await?;

    Ok(Json(SessionStatusResponse {
        user: Some(SessionUser {
            email: claims.sub.clone(),
            name: claims.name.clone(),
        }),
        is_authorized_admin: admin,
        is_authorized_delivery_agent: agent,
    }))
}
