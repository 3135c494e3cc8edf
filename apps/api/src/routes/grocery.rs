//! Shopping-list routes, mounted at `/api/groceries`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use pantry_core::{GroceryCandidate, GroceryItem, GroceryOverview, GroceryPatch, ItemFilter, Tab};
use serde::{Deserialize, Serialize};

use super::MessageResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/archived", get(list_archived))
        .route("/overview", get(overview))
        .route("/purchase-all", post(purchase_all))
        .route("/{id}", put(update).delete(remove))
}

/// `?search=&tab=` for the overview.
#[derive(Debug, Default, Deserialize)]
pub struct OverviewParams {
    pub search: Option<String>,
    pub tab: Option<String>,
}

/// Reply to a bulk purchase.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    pub message: String,
    /// Items in the pending snapshot
    pub purchased_items: usize,
    /// Items whose flags actually changed
    pub modified_count: u64,
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<GroceryItem>>, ApiError> {
    Ok(Json(state.lifecycle.list_groceries().await?))
}

async fn list_archived(State(state): State<AppState>) -> Result<Json<Vec<GroceryItem>>, ApiError> {
    Ok(Json(state.lifecycle.list_archived_groceries().await?))
}

async fn overview(
    State(state): State<AppState>,
    Query(params): Query<OverviewParams>,
) -> Result<Json<GroceryOverview>, ApiError> {
    let filter = ItemFilter::new(
        params.search.unwrap_or_default(),
        Tab::from_param(params.tab.as_deref().unwrap_or_default()),
    );
    Ok(Json(state.lifecycle.grocery_view(&filter).await?))
}

async fn create(
    State(state): State<AppState>,
    body: Result<Json<GroceryCandidate>, JsonRejection>,
) -> Result<(StatusCode, Json<GroceryItem>), ApiError> {
    let Json(candidate) = body?;
    let item = state.lifecycle.create_grocery(&candidate).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<GroceryPatch>, JsonRejection>,
) -> Result<Json<GroceryItem>, ApiError> {
    let Json(patch) = body?;
    Ok(Json(state.lifecycle.update_grocery(&id, &patch).await?))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.lifecycle.delete_grocery(&id).await?;
    Ok(Json(MessageResponse::new("Item removed")))
}

async fn purchase_all(State(state): State<AppState>) -> Result<Json<PurchaseResponse>, ApiError> {
    let outcome = state.lifecycle.purchase_all_pending().await?;
    Ok(Json(PurchaseResponse {
        message: format!(
            "{} items marked as purchased and archived",
            outcome.modified_count
        ),
        purchased_items: outcome.considered_count,
        modified_count: outcome.modified_count,
    }))
}
