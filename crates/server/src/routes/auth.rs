//! Authentication route handler.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::error::Result;
use crate::services::auth::Login;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Check credentials against the fixed user list.
///
/// Returns `{id, username, role, token}` on success, 401 on any mismatch.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Login>> {
    let login = state
        .auth()
        .authenticate(&request.username, &request.password)?;
    Ok(Json(login))
}
