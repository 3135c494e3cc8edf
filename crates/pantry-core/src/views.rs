//! # Derived Views
//!
//! Read-only computations over a catalog snapshot: search, tab filters,
//! category sets, per-category totals, low-stock subsets and date ordering.
//!
//! Every table, chart and report reads through these functions so they all
//! agree on what "low stock" or "pending" means. Nothing here mutates its
//! input; results are fresh vectors.
//!
//! ```text
//! ┌──────────────┐    ┌───────────────────┐    ┌──────────────────────┐
//! │ store.find() │───►│ filter / sort /   │───►│ GroceryOverview      │
//! │  (snapshot)  │    │ aggregate / low   │    │ InventoryOverview    │
//! └──────────────┘    └───────────────────┘    └──────────────────────┘
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{CatalogKind, LowStockPolicy};
use crate::types::{GroceryItem, InventoryItem};

/// Category shown for items whose category is blank.
pub const UNCATEGORIZED: &str = "Uncategorized";

// =============================================================================
// View Item
// =============================================================================

/// What the view functions need to know about a record.
pub trait ViewItem: Clone {
    /// Catalog the record belongs to, used to pick the low-stock threshold.
    const KIND: CatalogKind;

    fn name(&self) -> &str;

    fn category(&self) -> &str;

    fn quantity(&self) -> f64;

    /// Inventory records are never completed.
    fn is_completed(&self) -> bool {
        false
    }

    /// The category, or [`UNCATEGORIZED`] when blank.
    fn category_label(&self) -> &str {
        let category = self.category().trim();
        if category.is_empty() {
            UNCATEGORIZED
        } else {
            category
        }
    }
}

impl ViewItem for GroceryItem {
    const KIND: CatalogKind = CatalogKind::Grocery;

    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn quantity(&self) -> f64 {
        self.quantity
    }

    fn is_completed(&self) -> bool {
        self.completed
    }
}

impl ViewItem for InventoryItem {
    const KIND: CatalogKind = CatalogKind::Inventory;

    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn category(&self) -> &str {
        self.category.as_str()
    }

    fn quantity(&self) -> f64 {
        self.quantity as f64
    }
}

// =============================================================================
// Filters
// =============================================================================

/// The tab a list is viewed through.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    All,
    Pending,
    Purchased,
    /// Items whose category label equals this value.
    Category(String),
}

impl Tab {
    /// Parses a tab from a query parameter. Blank means `All`; anything that
    /// is not a reserved word names a category.
    pub fn from_param(param: &str) -> Self {
        match param.trim() {
            "" | "all" => Tab::All,
            "pending" => Tab::Pending,
            "purchased" => Tab::Purchased,
            category => Tab::Category(category.to_string()),
        }
    }

    fn admits<T: ViewItem>(&self, item: &T) -> bool {
        match self {
            Tab::All => true,
            Tab::Pending => !item.is_completed(),
            Tab::Purchased => item.is_completed(),
            Tab::Category(category) => item.category_label() == category,
        }
    }
}

/// Search term plus tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub search_term: String,
    pub tab: Tab,
}

impl ItemFilter {
    pub fn new(search_term: impl Into<String>, tab: Tab) -> Self {
        ItemFilter {
            search_term: search_term.into(),
            tab,
        }
    }
}

fn name_matches<T: ViewItem>(item: &T, needle: &str) -> bool {
    needle.is_empty() || item.name().to_lowercase().contains(needle)
}

/// Returns items whose name contains the search term (case-insensitive) and
/// that the tab admits. An empty search term matches everything.
pub fn filter_items<T: ViewItem>(items: &[T], filter: &ItemFilter) -> Vec<T> {
    let needle = filter.search_term.to_lowercase();
    items
        .iter()
        .filter(|item| name_matches(*item, &needle) && filter.tab.admits(*item))
        .cloned()
        .collect()
}

/// Distinct category labels in first-seen order.
pub fn distinct_categories<T: ViewItem>(items: &[T]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for item in items {
        let label = item.category_label();
        if !categories.iter().any(|c| c == label) {
            categories.push(label.to_string());
        }
    }
    categories
}

/// Items below their catalog's low-stock threshold.
pub fn low_stock<T: ViewItem>(items: &[T], policy: &LowStockPolicy) -> Vec<T> {
    items
        .iter()
        .filter(|item| policy.is_low(T::KIND, item.quantity()))
        .cloned()
        .collect()
}

// =============================================================================
// Aggregates
// =============================================================================

/// Count and summed quantity for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotals {
    pub category: String,
    pub count: usize,
    /// Sum of quantities, each truncated to an integer first.
    pub total_quantity: i64,
}

/// Per-category count and total quantity, in first-seen category order.
///
/// Quantities are truncated before summing (`2.7 kg` counts as `2`), and a
/// non-finite quantity counts as `0`. Totals saturate at the `i64` bounds.
pub fn aggregate_by_category<T: ViewItem>(items: &[T]) -> Vec<CategoryTotals> {
    let mut totals: Vec<CategoryTotals> = Vec::new();
    for item in items {
        let label = item.category_label();
        let quantity = item.quantity();
        let whole = if quantity.is_finite() {
            quantity.trunc() as i64
        } else {
            0
        };

        match totals.iter_mut().find(|t| t.category == label) {
            Some(entry) => {
                entry.count += 1;
                entry.total_quantity = entry.total_quantity.saturating_add(whole);
            }
            None => totals.push(CategoryTotals {
                category: label.to_string(),
                count: 1,
                total_quantity: whole,
            }),
        }
    }
    totals
}

// =============================================================================
// Ordering
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{other}', expected asc or desc")),
        }
    }
}

/// Orders inventory items by manufacture date.
///
/// Items without a manufacture date go last in either order. The sort is
/// stable, so equal dates keep their input order.
pub fn sort_by_manufacture_date(items: &[InventoryItem], order: SortOrder) -> Vec<InventoryItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| match (a.manufacture_date, b.manufacture_date) {
        (Some(x), Some(y)) => match order {
            SortOrder::Asc => x.cmp(&y),
            SortOrder::Desc => y.cmp(&x),
        },
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    sorted
}

// =============================================================================
// Overviews
// =============================================================================

/// Everything the shopping-list page shows.
///
/// `items` honours the filter. Categories, totals, low stock and the counts
/// describe the whole list so tabs and charts do not shift while searching.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GroceryOverview {
    pub items: Vec<GroceryItem>,
    pub categories: Vec<String>,
    pub totals: Vec<CategoryTotals>,
    pub low_stock: Vec<GroceryItem>,
    pub pending_count: usize,
    pub total_count: usize,
}

pub fn grocery_overview(
    items: &[GroceryItem],
    filter: &ItemFilter,
    policy: &LowStockPolicy,
) -> GroceryOverview {
    GroceryOverview {
        items: filter_items(items, filter),
        categories: distinct_categories(items),
        totals: aggregate_by_category(items),
        low_stock: low_stock(items, policy),
        pending_count: items.iter().filter(|i| !i.completed).count(),
        total_count: items.len(),
    }
}

/// Everything the inventory page shows.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryOverview {
    pub items: Vec<InventoryItem>,
    pub low_stock: Vec<InventoryItem>,
    pub category_count: usize,
    pub total_count: usize,
}

pub fn inventory_overview(
    items: &[InventoryItem],
    search_term: &str,
    order: SortOrder,
    policy: &LowStockPolicy,
) -> InventoryOverview {
    let matching = filter_items(items, &ItemFilter::new(search_term, Tab::All));
    InventoryOverview {
        items: sort_by_manufacture_date(&matching, order),
        low_stock: low_stock(items, policy),
        category_count: distinct_categories(items).len(),
        total_count: items.len(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InventoryCategory, InventoryName, StockStatus, StorageTemperature};
    use chrono::{DateTime, TimeZone, Utc};

    fn grocery(name: &str, quantity: f64, category: &str, completed: bool) -> GroceryItem {
        GroceryItem {
            id: name.to_lowercase(),
            name: name.to_string(),
            quantity,
            category: category.to_string(),
            completed,
            archived: false,
            date_added: Utc::now(),
            version: 0,
        }
    }

    fn stock(id: &str, quantity: i64, made: Option<DateTime<Utc>>) -> InventoryItem {
        InventoryItem {
            id: id.to_string(),
            name: InventoryName::Milk,
            category: InventoryCategory::Dairy,
            quantity,
            manufacture_date: made,
            expire_date: None,
            temperature: StorageTemperature::Refrigerated,
            status: StockStatus::Available,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            version: 0,
        }
    }

    fn day(d: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap())
    }

    fn names(items: &[GroceryItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let items = vec![
            grocery("Milk Lite", 2.0, "Dairy Products", false),
            grocery("Bread", 1.0, "Other", false),
        ];
        let found = filter_items(&items, &ItemFilter::new("milk", Tab::All));
        assert_eq!(names(&found), vec!["Milk Lite"]);

        let all = filter_items(&items, &ItemFilter::default());
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_tabs() {
        let items = vec![
            grocery("Apple", 2.0, "Fruits", false),
            grocery("Pear", 1.0, "Fruits", true),
            grocery("Soap", 4.0, "Household Items", false),
        ];

        let pending = filter_items(&items, &ItemFilter::new("", Tab::from_param("pending")));
        assert_eq!(names(&pending), vec!["Apple", "Soap"]);

        let purchased = filter_items(&items, &ItemFilter::new("", Tab::from_param("purchased")));
        assert_eq!(names(&purchased), vec!["Pear"]);

        let fruits = filter_items(&items, &ItemFilter::new("p", Tab::from_param("Fruits")));
        assert_eq!(names(&fruits), vec!["Apple", "Pear"]);
    }

    #[test]
    fn test_distinct_categories_first_seen_with_fallback() {
        let items = vec![
            grocery("Apple", 2.0, "Fruits", false),
            grocery("Soap", 1.0, "  ", false),
            grocery("Pear", 1.0, "Fruits", false),
            grocery("Milk", 1.0, "Dairy Products", false),
        ];
        assert_eq!(
            distinct_categories(&items),
            vec!["Fruits", UNCATEGORIZED, "Dairy Products"]
        );
    }

    #[test]
    fn test_low_stock_thresholds() {
        let policy = LowStockPolicy::default();

        let groceries = vec![
            grocery("Apple", 2.0, "Fruits", false),
            grocery("Pear", 3.0, "Fruits", false),
        ];
        assert_eq!(names(&low_stock(&groceries, &policy)), vec!["Apple"]);

        let inventory = vec![stock("a", 4, None), stock("b", 5, None)];
        let low: Vec<String> = low_stock(&inventory, &policy)
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(low, vec!["a"]);
    }

    #[test]
    fn test_aggregate_truncates_quantities() {
        let items = vec![
            grocery("Apple", 2.7, "Fruits", false),
            grocery("Soap", 3.0, "Household Items", false),
            grocery("Pear", 1.9, "Fruits", false),
        ];
        let totals = aggregate_by_category(&items);
        assert_eq!(
            totals,
            vec![
                CategoryTotals {
                    category: "Fruits".to_string(),
                    count: 2,
                    total_quantity: 3,
                },
                CategoryTotals {
                    category: "Household Items".to_string(),
                    count: 1,
                    total_quantity: 3,
                },
            ]
        );
    }

    #[test]
    fn test_aggregate_total_saturates() {
        let items = vec![
            stock("a", 9_000_000_000_000_000_000, None),
            stock("b", 9_000_000_000_000_000_000, None),
        ];
        let totals = aggregate_by_category(&items);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].count, 2);
        assert_eq!(totals[0].total_quantity, i64::MAX);
    }

    #[test]
    fn test_sort_by_manufacture_date_puts_missing_last() {
        let items = vec![
            stock("none-1", 1, None),
            stock("jan-5", 1, day(5)),
            stock("jan-2", 1, day(2)),
            stock("none-2", 1, None),
            stock("jan-5b", 1, day(5)),
        ];

        let ids = |v: Vec<InventoryItem>| v.into_iter().map(|i| i.id).collect::<Vec<_>>();

        assert_eq!(
            ids(sort_by_manufacture_date(&items, SortOrder::Asc)),
            vec!["jan-2", "jan-5", "jan-5b", "none-1", "none-2"]
        );
        assert_eq!(
            ids(sort_by_manufacture_date(&items, SortOrder::Desc)),
            vec!["jan-5", "jan-5b", "jan-2", "none-1", "none-2"]
        );
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!("ASC".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("sideways".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_grocery_overview() {
        let items = vec![
            grocery("Apple", 2.0, "Fruits", false),
            grocery("Pear", 5.0, "Fruits", true),
            grocery("Soap", 4.0, "Household Items", false),
        ];
        let overview = grocery_overview(
            &items,
            &ItemFilter::new("pear", Tab::All),
            &LowStockPolicy::default(),
        );
        assert_eq!(names(&overview.items), vec!["Pear"]);
        assert_eq!(overview.categories, vec!["Fruits", "Household Items"]);
        assert_eq!(overview.pending_count, 2);
        assert_eq!(overview.total_count, 3);
        assert_eq!(names(&overview.low_stock), vec!["Apple"]);
    }

    #[test]
    fn test_inventory_overview() {
        let items = vec![stock("a", 10, day(3)), stock("b", 2, day(9))];
        let overview =
            inventory_overview(&items, "MILK", SortOrder::Desc, &LowStockPolicy::default());
        let ids: Vec<&str> = overview.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(overview.low_stock.len(), 1);
        assert_eq!(overview.category_count, 1);
    }
}
