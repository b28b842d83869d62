//! Product route handlers.
//!
//! Create and update accept multipart form data: a `product` field holding
//! the JSON payload plus an optional `image` file. The upload is validated
//! and stored before the payload reaches the catalog core; its stored path
//! then takes precedence over any image field the payload carried.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;

use artiva_core::{Product, ProductDraft, ProductPatch};

use crate::error::{AppError, Result};
use crate::routes::Message;
use crate::services::images::{ImageStore, UploadError};
use crate::state::AppState;

/// A parsed product form: the JSON payload text plus the stored path of an
/// accompanying upload, if any.
struct ProductForm {
    payload: Option<String>,
    uploaded: Option<String>,
}

impl ProductForm {
    /// Drain the multipart stream, storing the image as a side effect.
    ///
    /// Unknown fields are ignored. Upload constraint violations surface
    /// before the payload is even parsed.
    async fn read(images: &ImageStore, mut multipart: Multipart) -> Result<Self> {
        let mut payload = None;
        let mut uploaded = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("malformed multipart request: {e}")))?
        {
            // Copy the metadata out before the field is consumed by the
            // body read.
            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                Some("product") => {
                    let text = field.text().await.map_err(|e| {
                        AppError::Validation(format!("unreadable product payload: {e}"))
                    })?;
                    payload = Some(text);
                }
                Some("image") => {
                    let file_name = field
                        .file_name()
                        .ok_or(UploadError::MissingFileName)?
                        .to_owned();
                    let content_type = field
                        .content_type()
                        .ok_or_else(|| {
                            UploadError::UnsupportedContentType("missing".to_owned())
                        })?
                        .to_owned();
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::Validation(format!("unreadable image upload: {e}"))
                    })?;

                    uploaded = Some(images.store(&file_name, &content_type, &bytes)?);
                }
                _ => {}
            }
        }

        Ok(Self { payload, uploaded })
    }

    /// Parse the JSON payload; an absent field falls back to the default
    /// (empty draft / empty patch).
    fn parse<T: DeserializeOwned + Default>(&self) -> Result<T> {
        match &self.payload {
            Some(text) => serde_json::from_str(text)
                .map_err(|e| AppError::Validation(format!("invalid product payload: {e}"))),
            None => Ok(T::default()),
        }
    }
}

/// List all products.
pub async fn list(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog().list_products())
}

/// Get a product by id.
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    Ok(Json(state.catalog().product(&id)?))
}

/// Create a product from a multipart form.
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Product>)> {
    let form = ProductForm::read(state.images(), multipart).await?;
    let draft: ProductDraft = form.parse()?;
    let product = state.catalog().create_product(draft, form.uploaded)?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product from a multipart form.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Product>> {
    let form = ProductForm::read(state.images(), multipart).await?;
    let patch: ProductPatch = form.parse()?;
    let product = state.catalog().update_product(&id, patch, form.uploaded)?;
    Ok(Json(product))
}

/// Delete a product, releasing its image file best-effort.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Message>> {
    state.catalog().delete_product(&id)?;
    Ok(Json(Message::new("Product deleted")))
}
