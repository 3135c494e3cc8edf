//! # pantry-core: Pure Business Logic for Pantry
//!
//! This crate is the **heart** of Pantry. It holds the record rules and the
//! derived views for both catalogs as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pantry Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │   /groceries  /inventory  /catalog  ──►  LifecycleController   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pantry-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  catalog  │  │validation │  │   views   │  │   │
//! │  │   │ Grocery   │  │ units     │  │ records   │  │ filter    │  │   │
//! │  │   │ Inventory │  │ low stock │  │ patches   │  │ totals    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO CLOCK                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    pantry-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records, raw inputs and normalized outputs
//! - [`catalog`] - Category units, enumerations, low-stock policy
//! - [`validation`] - Record validation for both catalogs
//! - [`views`] - Search, filters, aggregates, overviews
//! - [`cache`] - Client-side snapshot with refetch-on-write
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pantry_core::catalog::LowStockPolicy;
//! use pantry_core::types::{GroceryCandidate, RawQuantity};
//! use pantry_core::validation::validate_grocery;
//!
//! let candidate = GroceryCandidate {
//!     name: Some("Bananas".into()),
//!     quantity: Some(RawQuantity::Text("1.5".to_string())),
//!     category: Some("Fruits".into()),
//! };
//! let item = validate_grocery(&candidate).unwrap();
//!
//! // 1.5 kg is below the default grocery threshold of 3
//! assert!(LowStockPolicy::default().is_low(pantry_core::CatalogKind::Grocery, item.quantity));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cache;
pub mod catalog;
pub mod error;
pub mod types;
pub mod validation;
pub mod views;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cache::CatalogCache;
pub use catalog::{CatalogKind, CatalogOptions, LowStockPolicy, MeasureUnit};
pub use error::{CoreError, CoreResult, FieldErrors, ValidationError};
pub use types::*;
pub use views::{GroceryOverview, InventoryOverview, ItemFilter, SortOrder, Tab};

/// Largest number of ids written by one bulk statement.
///
/// SQLite limits bound parameters per statement, so bulk writes over more ids
/// are split into chunks of this size.
pub const BULK_WRITE_CHUNK: usize = 500;
