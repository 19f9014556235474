use crate::db::DbPool;

/// Application state handed to every handler. Identity lives per-request in
/// the verified token claims, not here.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}

impl axum::extract::FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}
