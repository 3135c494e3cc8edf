//! # Repository Module
//!
//! SQLite implementations of the store traits in [`crate::gateway`].
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LifecycleController                                                   │
//! │       │                                                                 │
//! │       │  groceries.find(GroceryQuery::PENDING, RecordOrder::NewestFirst)│
//! │       ▼                                                                 │
//! │  GroceryRepository                  InventoryRepository                │
//! │  ├── find / find_by_id              ├── find                           │
//! │  ├── insert                         ├── insert                         │
//! │  ├── update_one / update_many       ├── update_one (full replace)      │
//! │  └── delete_one                     └── delete_one                     │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`grocery::GroceryRepository`] - Shopping list, including chunked bulk writes
//! - [`inventory::InventoryRepository`] - Inventory ledger

pub mod grocery;
pub mod inventory;
