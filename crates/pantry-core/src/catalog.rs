//! # Catalog Configuration
//!
//! The enumerations and policies shared by every layer: validation, storage,
//! the REST surface and any frontend reading `GET /catalog`.
//!
//! ## Grocery Category → Unit Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Category          Unit     Allowed quantity                           │
//! │  ───────────────   ──────   ───────────────────────────────────────    │
//! │  Vegetables        kg       0.1 ..= 100   (fractions allowed)          │
//! │  Fruits            kg       0.1 ..= 100                                │
//! │  Meat & Fish       kg       0.1 ..= 100                                │
//! │  Dairy Products    units    1 ..= 20      (whole numbers only)         │
//! │  Beverages         units    1 ..= 20                                   │
//! │  Snacks            units    1 ..= 20                                   │
//! │  Household Items   units    1 ..= 20                                   │
//! │  Personal Care     units    1 ..= 20                                   │
//! │  Spices            units    1 ..= 20                                   │
//! │  Other             units    1 ..= 20                                   │
//! │  <anything else>   units    1 ..= 20                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{InventoryCategory, InventoryName, StockStatus, StorageTemperature};

// =============================================================================
// Measure Unit
// =============================================================================

/// How a grocery quantity is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum MeasureUnit {
    /// Weight in kilograms, fractions allowed.
    Kg,
    /// Discrete item count.
    Units,
}

impl MeasureUnit {
    /// Quantity bounds implied by this unit.
    pub const fn bounds(&self) -> QuantityBounds {
        match self {
            MeasureUnit::Kg => QuantityBounds {
                min: 0.1,
                max: 100.0,
                whole: false,
            },
            MeasureUnit::Units => QuantityBounds {
                min: 1.0,
                max: 20.0,
                whole: true,
            },
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            MeasureUnit::Kg => "kg",
            MeasureUnit::Units => "units",
        }
    }
}

/// Inclusive quantity range for one unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityBounds {
    pub min: f64,
    pub max: f64,
    /// Quantity must be a whole number.
    pub whole: bool,
}

/// Known grocery categories and their units, in display order.
pub const GROCERY_CATEGORIES: &[(&str, MeasureUnit)] = &[
    ("Vegetables", MeasureUnit::Kg),
    ("Fruits", MeasureUnit::Kg),
    ("Meat & Fish", MeasureUnit::Kg),
    ("Dairy Products", MeasureUnit::Units),
    ("Beverages", MeasureUnit::Units),
    ("Snacks", MeasureUnit::Units),
    ("Household Items", MeasureUnit::Units),
    ("Personal Care", MeasureUnit::Units),
    ("Spices", MeasureUnit::Units),
    ("Other", MeasureUnit::Units),
];

/// Returns the unit a grocery category is counted in.
///
/// Unknown categories are unit-based.
///
/// ## Example
/// ```rust
/// use pantry_core::catalog::{category_unit_of, MeasureUnit};
///
/// assert_eq!(category_unit_of("Fruits"), MeasureUnit::Kg);
/// assert_eq!(category_unit_of("Snacks"), MeasureUnit::Units);
/// assert_eq!(category_unit_of("Gadgets"), MeasureUnit::Units);
/// ```
pub fn category_unit_of(category: &str) -> MeasureUnit {
    let category = category.trim();
    GROCERY_CATEGORIES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, unit)| *unit)
        .unwrap_or(MeasureUnit::Units)
}

// =============================================================================
// Low-Stock Policy
// =============================================================================

/// Which catalog a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Grocery,
    Inventory,
}

/// Per-catalog low-stock thresholds.
///
/// An item is low on stock when its quantity is strictly below the threshold
/// of its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LowStockPolicy {
    pub grocery_threshold: f64,
    pub inventory_threshold: f64,
}

impl LowStockPolicy {
    pub const DEFAULT_GROCERY_THRESHOLD: f64 = 3.0;
    pub const DEFAULT_INVENTORY_THRESHOLD: f64 = 5.0;

    pub fn new(grocery_threshold: f64, inventory_threshold: f64) -> Self {
        LowStockPolicy {
            grocery_threshold,
            inventory_threshold,
        }
    }

    pub fn threshold(&self, kind: CatalogKind) -> f64 {
        match kind {
            CatalogKind::Grocery => self.grocery_threshold,
            CatalogKind::Inventory => self.inventory_threshold,
        }
    }

    pub fn is_low(&self, kind: CatalogKind, quantity: f64) -> bool {
        quantity < self.threshold(kind)
    }
}

impl Default for LowStockPolicy {
    fn default() -> Self {
        LowStockPolicy::new(
            Self::DEFAULT_GROCERY_THRESHOLD,
            Self::DEFAULT_INVENTORY_THRESHOLD,
        )
    }
}

// =============================================================================
// Catalog Options
// =============================================================================

/// A grocery category as offered to a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GroceryCategoryOption {
    pub name: String,
    pub unit: MeasureUnit,
}

/// Every option a presentation layer needs to build its forms and filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogOptions {
    pub grocery_categories: Vec<GroceryCategoryOption>,
    pub inventory_names: Vec<String>,
    pub inventory_categories: Vec<String>,
    pub temperatures: Vec<String>,
    pub statuses: Vec<String>,
    pub low_stock: LowStockPolicy,
}

impl CatalogOptions {
    pub fn new(low_stock: LowStockPolicy) -> Self {
        CatalogOptions {
            grocery_categories: GROCERY_CATEGORIES
                .iter()
                .map(|(name, unit)| GroceryCategoryOption {
                    name: name.to_string(),
                    unit: *unit,
                })
                .collect(),
            inventory_names: InventoryName::ALL.iter().map(|v| v.as_str().to_string()).collect(),
            inventory_categories: InventoryCategory::ALL
                .iter()
                .map(|v| v.as_str().to_string())
                .collect(),
            temperatures: StorageTemperature::ALL
                .iter()
                .map(|v| v.as_str().to_string())
                .collect(),
            statuses: StockStatus::ALL.iter().map(|v| v.as_str().to_string()).collect(),
            low_stock,
        }
    }
}

impl Default for CatalogOptions {
    fn default() -> Self {
        CatalogOptions::new(LowStockPolicy::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
