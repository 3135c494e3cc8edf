//! # Domain Types
//!
//! Core domain types used throughout Pantry.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐                         │
//! │  │  GroceryItem    │   │   InventoryItem     │   Stored records        │
//! │  │  ─────────────  │   │  ─────────────────  │                         │
//! │  │  id (UUID)      │   │  id (UUID)          │                         │
//! │  │  name           │   │  name     (enum)    │                         │
//! │  │  quantity (f64) │   │  category (enum)    │                         │
//! │  │  category       │   │  quantity (i64)     │                         │
//! │  │  completed      │   │  manufacture/expire │                         │
//! │  │  archived       │   │  temperature (enum) │                         │
//! │  │  date_added     │   │  status   (enum)    │                         │
//! │  └─────────────────┘   └─────────────────────┘                         │
//! │                                                                         │
//! │  Inputs (raw, untrusted)      Outputs of validation (normalized)       │
//! │  GroceryCandidate       ──►   NewGroceryItem                           │
//! │  GroceryPatch           ──►   GroceryChanges                           │
//! │  InventoryCandidate     ──►   NewInventoryItem                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Versioning
//! Every stored record carries `version`, bumped by the store on each write.
//! Nothing compares it yet; it exists so that version-checked writes can be
//! added without a schema change.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Catalog Enumerations
// =============================================================================

/// Generates `ALL`, `as_str`, `Display` and `FromStr` for a closed string
/// enumeration. Parsing is exact after trimming.
macro_rules! string_enum {
    ($ty:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// Every member, in display order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $ty::ALL.iter().copied().find(|v| v.as_str() == s).ok_or(())
            }
        }
    };
}

/// Names of items tracked in the inventory ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum InventoryName {
    Milk,
    Eggs,
    Bread,
    Cheese,
}

string_enum!(InventoryName {
    Milk => "Milk",
    Eggs => "Eggs",
    Bread => "Bread",
    Cheese => "Cheese",
});

/// Inventory shelf category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum InventoryCategory {
    Dairy,
    Bakery,
    Frozen,
    Beverages,
}

string_enum!(InventoryCategory {
    Dairy => "Dairy",
    Bakery => "Bakery",
    Frozen => "Frozen",
    Beverages => "Beverages",
});

/// Storage temperature band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum StorageTemperature {
    #[serde(rename = "Frozen (-18°C)")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Frozen (-18°C)"))]
    Frozen,
    #[serde(rename = "Refrigerated (0-4°C)")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Refrigerated (0-4°C)"))]
    Refrigerated,
    Ambient,
}

string_enum!(StorageTemperature {
    Frozen => "Frozen (-18°C)",
    Refrigerated => "Refrigerated (0-4°C)",
    Ambient => "Ambient",
});

/// Whether an inventory item can currently be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum StockStatus {
    #[default]
    Available,
    #[serde(rename = "Out of Stock")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Out of Stock"))]
    OutOfStock,
}

string_enum!(StockStatus {
    Available => "Available",
    OutOfStock => "Out of Stock",
});

// =============================================================================
// Grocery Item
// =============================================================================

/// An entry on the shopping list.
///
/// ## State
/// `(completed, archived)` is one of:
/// - `(false, false)` pending
/// - `(true, false)` purchased, still shown on the list
/// - `(true, true)` purchased and archived by a bulk purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItem {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub name: String,
    /// Kilograms or a unit count, depending on the category.
    pub quantity: f64,
    pub category: String,
    pub completed: bool,
    pub archived: bool,
    /// Set once at creation.
    #[ts(as = "String")]
    pub date_added: DateTime<Utc>,
    pub version: i64,
}

impl GroceryItem {
    /// Neither purchased nor archived.
    pub fn is_pending(&self) -> bool {
        !self.completed && !self.archived
    }
}

// =============================================================================
// Inventory Item
// =============================================================================

/// A perishable item in stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub name: InventoryName,
    pub category: InventoryCategory,
    pub quantity: i64,
    #[ts(as = "Option<String>")]
    pub manufacture_date: Option<DateTime<Utc>>,
    /// Informational only. Nothing expires records automatically.
    #[ts(as = "Option<String>")]
    pub expire_date: Option<DateTime<Utc>>,
    pub temperature: StorageTemperature,
    pub status: StockStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
    pub version: i64,
}

// =============================================================================
// Raw Input
// =============================================================================

/// A quantity as sent by a client: a JSON number or a numeric string.
///
/// Any other JSON value lands in `Malformed` and is reported as a
/// `quantity` error during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawQuantity {
    Number(f64),
    Text(String),
    Malformed(serde_json::Value),
}

impl From<f64> for RawQuantity {
    fn from(value: f64) -> Self {
        RawQuantity::Number(value)
    }
}

impl From<&str> for RawQuantity {
    fn from(value: &str) -> Self {
        RawQuantity::Text(value.to_string())
    }
}

/// A request field that survives having the wrong JSON type.
///
/// `{"name": 42}` deserializes to `Malformed(42)` instead of failing the
/// whole body, so validation can report `name` next to every other bad field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Valid(T),
    Malformed(serde_json::Value),
}

impl<T> Lenient<T> {
    /// The value, if it had the expected type.
    pub fn valid(&self) -> Option<&T> {
        match self {
            Lenient::Valid(value) => Some(value),
            Lenient::Malformed(_) => None,
        }
    }
}

impl<T> From<T> for Lenient<T> {
    fn from(value: T) -> Self {
        Lenient::Valid(value)
    }
}

impl From<&str> for Lenient<String> {
    fn from(value: &str) -> Self {
        Lenient::Valid(value.to_string())
    }
}

/// Unvalidated body of a grocery create request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryCandidate {
    pub name: Option<Lenient<String>>,
    pub quantity: Option<RawQuantity>,
    pub category: Option<Lenient<String>>,
}

/// Unvalidated body of a grocery update request.
///
/// `None` means "not sent, keep the stored value". `Some(_)` always counts as
/// sent, including `0` and `false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryPatch {
    pub name: Option<Lenient<String>>,
    pub quantity: Option<RawQuantity>,
    pub category: Option<Lenient<String>>,
    pub completed: Option<Lenient<bool>>,
    pub archived: Option<Lenient<bool>>,
}

/// Unvalidated body of an inventory create or update request.
///
/// Dates are RFC 3339 timestamps or `YYYY-MM-DD`. Empty strings mean absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryCandidate {
    pub name: Option<Lenient<String>>,
    pub category: Option<Lenient<String>>,
    pub quantity: Option<RawQuantity>,
    pub manufacture_date: Option<Lenient<String>>,
    pub expire_date: Option<Lenient<String>>,
    pub temperature: Option<Lenient<String>>,
    pub status: Option<Lenient<String>>,
}

// =============================================================================
// Normalized Records
// =============================================================================

/// A grocery item that passed validation, ready to insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGroceryItem {
    pub name: String,
    pub quantity: f64,
    pub category: String,
}

/// The full set of mutable grocery fields after merging a patch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroceryChanges {
    pub name: String,
    pub quantity: f64,
    pub category: String,
    pub completed: bool,
    pub archived: bool,
}

/// Flags written to many grocery items at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroceryFlags {
    pub completed: bool,
    pub archived: bool,
}

impl GroceryFlags {
    /// Purchased and archived.
    pub const PURCHASED: GroceryFlags = GroceryFlags {
        completed: true,
        archived: true,
    };
}

/// An inventory item that passed validation, ready to insert or replace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewInventoryItem {
    pub name: InventoryName,
    pub category: InventoryCategory,
    pub quantity: i64,
    pub manufacture_date: Option<DateTime<Utc>>,
    pub expire_date: Option<DateTime<Utc>>,
    pub temperature: StorageTemperature,
    pub status: StockStatus,
}

// =============================================================================
// Unit Tests
// =============================================================================
