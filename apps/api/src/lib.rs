//! # Pantry API
//!
//! REST server for the shopping list and the inventory ledger.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Pantry API                                    │
//! │                                                                         │
//! │  ┌────────────────┐  ┌─────────────────────┐  ┌──────────────────────┐ │
//! │  │  routes        │  │ LifecycleController │  │  pantry-db           │ │
//! │  │                │  │                     │  │                      │ │
//! │  │ • groceries    │─►│ • create / update   │─►│ • GroceryStore       │ │
//! │  │ • inventory    │  │ • delete            │  │ • InventoryStore     │ │
//! │  │ • catalog      │  │ • purchase all      │  │                      │ │
//! │  │ • health       │  │ • overviews         │  │  SQLite (WAL)        │ │
//! │  └────────────────┘  └─────────────────────┘  └──────────────────────┘ │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  ApiError ─► { code, message, errors? } + HTTP status                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config`] for the `PANTRY_*` environment variables.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod routes;
pub mod state;

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ErrorCode};
pub use lifecycle::{LifecycleController, LifecycleError, PurchaseOutcome};
pub use routes::app;
pub use state::AppState;
