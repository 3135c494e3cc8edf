//! Inventory routes, mounted at `/api/inventory`.
//!
//! Updates are full replacements: a PUT body must carry every required field.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use pantry_core::{FieldErrors, InventoryCandidate, InventoryItem, InventoryOverview, SortOrder, ValidationError};
use serde::Deserialize;

use super::MessageResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/overview", get(overview))
        .route("/{id}", put(update).delete(remove))
}

/// `?search=&order=` for the overview. `order` is `asc` or `desc`.
#[derive(Debug, Default, Deserialize)]
pub struct OverviewParams {
    pub search: Option<String>,
    pub order: Option<String>,
}

impl OverviewParams {
    fn sort_order(&self) -> Result<SortOrder, ApiError> {
        match self.order.as_deref() {
            None => Ok(SortOrder::default()),
            Some(raw) => raw.parse().map_err(|reason| {
                ApiError::validation(FieldErrors::from(ValidationError::InvalidFormat {
                    field: "order".to_string(),
                    reason,
                }))
            }),
        }
    }
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<InventoryItem>>, ApiError> {
    Ok(Json(state.lifecycle.list_inventory().await?))
}

async fn overview(
    State(state): State<AppState>,
    Query(params): Query<OverviewParams>,
) -> Result<Json<InventoryOverview>, ApiError> {
    let order = params.sort_order()?;
    let search = params.search.as_deref().unwrap_or_default();
    Ok(Json(state.lifecycle.inventory_view(search, order).await?))
}

async fn create(
    State(state): State<AppState>,
    body: Result<Json<InventoryCandidate>, JsonRejection>,
) -> Result<(StatusCode, Json<InventoryItem>), ApiError> {
    let Json(candidate) = body?;
    let item = state.lifecycle.create_inventory(&candidate).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<InventoryCandidate>, JsonRejection>,
) -> Result<Json<InventoryItem>, ApiError> {
    let Json(candidate) = body?;
    Ok(Json(state.lifecycle.update_inventory(&id, &candidate).await?))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.lifecycle.delete_inventory(&id).await?;
    Ok(Json(MessageResponse::new("Item deleted successfully")))
}
