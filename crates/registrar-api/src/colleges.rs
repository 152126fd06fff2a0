//! Handler for `GET /colleges`.

use std::sync::Arc;

use axum::{Json, extract::State};
use registrar_core::{model::College, store::RegistrarStore};

use crate::error::ApiError;

/// `GET /colleges`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<College>>, ApiError>
where
  S: RegistrarStore,
{
  let colleges = store.list_colleges().await.map_err(ApiError::from_store)?;
  Ok(Json(colleges))
}
