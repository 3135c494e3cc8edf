//! Shared option lists and service health.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use pantry_core::CatalogOptions;
use pantry_db::MigrationStatus;
use serde::Serialize;

use crate::state::AppState;

/// `GET /api/catalog`: categories, names, temperatures, statuses and
/// low-stock thresholds for building forms.
pub async fn options(State(state): State<AppState>) -> Json<CatalogOptions> {
    Json(state.catalog.clone())
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// "ok" or "unavailable"
    pub status: &'static str,
    pub database: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migrations: Option<MigrationStatus>,
    pub version: &'static str,
}

/// `GET /health`: 200 when the database answers and is fully migrated,
/// 503 otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let database = state.db.health_check().await;
    let migrations = if database {
        match state.db.migration_status().await {
            Ok(status) => Some(status),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read migration status");
                None
            }
        }
    } else {
        None
    };

    let healthy = database && migrations.is_some_and(|m| m.applied >= m.total);
    let status = if healthy {
        StatusCode::OK
    } else {
        tracing::warn!(database, "Health check failed");
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthReport {
            status: if healthy { "ok" } else { "unavailable" },
            database,
            migrations,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
