//! # pantry-db: Database Layer for Pantry
//!
//! Persistence for both catalogs: the store traits the lifecycle layer is
//! written against, and their SQLite implementations via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pantry Data Flow                                 │
//! │                                                                         │
//! │  LifecycleController (apps/api)                                        │
//! │       │  Arc<dyn GroceryStore> / Arc<dyn InventoryStore>               │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     pantry-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐ │   │
//! │  │   │   Database    │    │  Repositories      │  │ Migrations │ │   │
//! │  │   │   (pool.rs)   │◄───│  GroceryRepository │  │ (embedded) │ │   │
//! │  │   │  SqlitePool   │    │  InventoryRepo..   │  │ 001_init   │ │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (PANTRY_DB_PATH)                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`gateway`] - Store traits and query types
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - SQLite repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pantry_db::{Database, DbConfig, GroceryQuery, GroceryStore, RecordOrder};
//!
//! let db = Database::new(DbConfig::new("pantry.db")).await?;
//! let pending = db
//!     .groceries()
//!     .find(GroceryQuery::PENDING, RecordOrder::NewestFirst)
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod gateway;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use gateway::{GroceryQuery, GroceryStore, InventoryStore, RecordOrder};
pub use migrations::MigrationStatus;
pub use pool::{Database, DbConfig};

pub use repository::grocery::GroceryRepository;
pub use repository::inventory::InventoryRepository;
