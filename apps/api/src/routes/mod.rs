//! # HTTP Routes
//!
//! ```text
//! /health                         GET
//! /api/catalog                    GET
//! /api/groceries                  GET, POST
//! /api/groceries/archived         GET
//! /api/groceries/overview         GET  ?search=&tab=
//! /api/groceries/purchase-all     POST
//! /api/groceries/{id}             PUT, DELETE
//! /api/inventory                  GET, POST
//! /api/inventory/overview         GET  ?search=&order=
//! /api/inventory/{id}             PUT, DELETE
//! ```

pub mod catalog;
pub mod grocery;
pub mod inventory;

use axum::http::{header, Method};
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// `{ "message": ... }` reply for deletes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

/// Builds the full application router.
pub fn app(state: AppState, cors_any_origin: bool) -> Router {
    let api = Router::new()
        .route("/catalog", get(catalog::options))
        .nest("/groceries", grocery::router())
        .nest("/inventory", inventory::router());

    Router::new()
        .route("/health", get(catalog::health))
        .nest("/api", api)
        .layer(build_cors_layer(cors_any_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(any_origin: bool) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if any_origin {
        tracing::info!("CORS: allowing all origins");
        cors.allow_origin(Any)
    } else {
        // Same-origin only
        cors
    }
}
