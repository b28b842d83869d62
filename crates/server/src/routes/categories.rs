//! Category route handlers.
//!
//! Categories are plain JSON - no upload transport involved.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use artiva_core::{Category, CategoryDraft, CategoryPatch};

use crate::error::Result;
use crate::routes::Message;
use crate::state::AppState;

/// List all categories.
pub async fn list(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.catalog().list_categories())
}

/// Get a category by id.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Category>> {
    Ok(Json(state.catalog().category(&id)?))
}

/// Create a category, deriving the slug when none is supplied.
pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<CategoryDraft>,
) -> Result<(StatusCode, Json<Category>)> {
    let category = state.catalog().create_category(draft)?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Update a category.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<CategoryPatch>,
) -> Result<Json<Category>> {
    Ok(Json(state.catalog().update_category(&id, patch)?))
}

/// Delete a category. Products referencing its slug are unaffected.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Message>> {
    state.catalog().delete_category(&id)?;
    Ok(Json(Message::new("Category deleted")))
}
