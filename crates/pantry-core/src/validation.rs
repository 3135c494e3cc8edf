//! # Validation Module
//!
//! Record validation for both catalogs.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (apps/api)                                      │
//! │  ├── Deserialization into *Candidate / *Patch                          │
//! │  ├── Wrong-typed fields kept as `Lenient::Malformed`                   │
//! │  └── Body that is not JSON at all → `general` error                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, patterns, lengths                                │
//! │  ├── Category-dependent quantity bounds                                │
//! │  ├── Enumeration membership, date ordering                             │
//! │  └── Output: normalized record OR FieldErrors (one per field)          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── NOT NULL / CHECK constraints                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validators never panic and never stop at the first failing field: every
//! field is checked and every failure is returned together.
//!
//! ## Usage
//! ```rust
//! use pantry_core::types::{GroceryCandidate, RawQuantity};
//! use pantry_core::validation::validate_grocery;
//!
//! let candidate = GroceryCandidate {
//!     name: Some("  Apple ".into()),
//!     quantity: Some(RawQuantity::Number(3.0)),
//!     category: Some("Fruits".into()),
//! };
//! let item = validate_grocery(&candidate).unwrap();
//! assert_eq!(item.name, "Apple");
//! ```

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::catalog::category_unit_of;
use crate::error::{FieldErrors, ValidationError};
use crate::types::{
    GroceryCandidate, GroceryChanges, GroceryItem, GroceryPatch, InventoryCandidate,
    InventoryCategory, InventoryName, Lenient, NewGroceryItem, NewInventoryItem, RawQuantity, StockStatus,
    StorageTemperature,
};

/// Result type for single-field validators.
pub type ValidationResult<T> = Result<T, ValidationError>;

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 50;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates and trims a grocery item name.
///
/// ## Rules
/// - Required after trimming
/// - Between 2 and 50 characters
/// - No digits
/// - Only ASCII letters, whitespace, hyphens and apostrophes
///
/// ## Example
/// ```rust
/// use pantry_core::validation::validate_item_name;
///
/// assert_eq!(validate_item_name(Some(" Rye bread ")).unwrap(), "Rye bread");
/// assert!(validate_item_name(Some("7up")).is_err());
/// assert!(validate_item_name(None).is_err());
/// ```
pub fn validate_item_name(name: Option<&str>) -> ValidationResult<String> {
    let name = name.map(str::trim).unwrap_or_default();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    let len = name.chars().count();
    if len < NAME_MIN_LEN {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: NAME_MIN_LEN,
        });
    }
    if len > NAME_MAX_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: NAME_MAX_LEN,
        });
    }

    if name.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::invalid_format("name", "cannot contain numbers"));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || c == '-' || c == '\'')
    {
        return Err(ValidationError::invalid_format(
            "name",
            "must contain only letters, spaces, hyphens, and apostrophes",
        ));
    }

    Ok(name.to_string())
}

/// Validates and trims a required free-text field.
pub fn validate_required_text(field: &str, value: Option<&str>) -> ValidationResult<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::required(field)),
    }
}

/// Parses a raw quantity into a finite number.
///
/// Missing values and blank strings are `Required`.
pub fn parse_quantity(field: &str, raw: Option<&RawQuantity>) -> ValidationResult<f64> {
    let value = match raw {
        None => return Err(ValidationError::required(field)),
        Some(RawQuantity::Number(n)) => *n,
        Some(RawQuantity::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(ValidationError::required(field));
            }
            text.parse::<f64>()
                .map_err(|_| ValidationError::invalid_format(field, "must be a number"))?
        }
        Some(RawQuantity::Malformed(_)) => {
            return Err(ValidationError::invalid_format(field, "must be a number"))
        }
    };

    if !value.is_finite() {
        return Err(ValidationError::invalid_format(field, "must be a number"));
    }
    Ok(value)
}

/// Validates a grocery quantity against the bounds of its category's unit.
///
/// ## Rules
/// - Must be a number greater than 0
/// - Weight-based categories: 0.1 ..= 100
/// - Unit-based categories (and unknown ones): whole number, 1 ..= 20
///
/// ## Example
/// ```rust
/// use pantry_core::types::RawQuantity;
/// use pantry_core::validation::validate_grocery_quantity;
///
/// assert_eq!(validate_grocery_quantity(Some(&RawQuantity::Number(0.5)), "Fruits").unwrap(), 0.5);
/// assert!(validate_grocery_quantity(Some(&RawQuantity::Number(0.5)), "Snacks").is_err());
/// ```
pub fn validate_grocery_quantity(raw: Option<&RawQuantity>, category: &str) -> ValidationResult<f64> {
    let quantity = parse_quantity("quantity", raw)?;

    if quantity <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    let bounds = category_unit_of(category).bounds();
    if quantity < bounds.min || quantity > bounds.max {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: bounds.min,
            max: bounds.max,
        });
    }
    if bounds.whole && quantity.fract() != 0.0 {
        return Err(ValidationError::invalid_format("quantity", "must be a whole number"));
    }

    Ok(quantity)
}

/// Validates the `(completed, archived)` pair a grocery item would end up in.
///
/// `was_archived` is the stored flag. Archiving is reserved for bulk purchase,
/// so an update may clear `archived` but never set it.
pub fn validate_grocery_state(
    completed: bool,
    archived: bool,
    was_archived: bool,
) -> ValidationResult<()> {
    if archived && !was_archived {
        return Err(ValidationError::rule(
            "archived",
            "can only be set by purchasing all pending items",
        ));
    }
    if archived && !completed {
        return Err(ValidationError::rule(
            "archived",
            "cannot be set on an item that is not completed",
        ));
    }
    Ok(())
}

/// Parses an optional date. Blank strings are treated as absent.
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_optional_date(field: &str, raw: Option<&str>) -> ValidationResult<Option<DateTime<Utc>>> {
    let raw = match raw.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return Ok(None),
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Some(Utc.from_utc_datetime(&naive)))
        .ok_or_else(|| {
            ValidationError::invalid_format(field, "must be a date (YYYY-MM-DD or RFC 3339)")
        })
}

/// Reads a text field. A value of any other JSON type is an error on `field`.
pub fn text_field<'a>(field: &str, raw: Option<&'a Lenient<String>>) -> ValidationResult<Option<&'a str>> {
    match raw {
        None => Ok(None),
        Some(Lenient::Valid(text)) => Ok(Some(text.as_str())),
        Some(Lenient::Malformed(_)) => Err(ValidationError::invalid_format(field, "must be a string")),
    }
}

/// Reads a boolean field. A value of any other JSON type is an error on `field`.
pub fn flag_field(field: &str, raw: Option<&Lenient<bool>>) -> ValidationResult<Option<bool>> {
    match raw {
        None => Ok(None),
        Some(Lenient::Valid(flag)) => Ok(Some(*flag)),
        Some(Lenient::Malformed(_)) => Err(ValidationError::invalid_format(field, "must be true or false")),
    }
}

fn parse_member<T: std::str::FromStr>(
    field: &str,
    raw: Option<&str>,
    allowed: &[T],
    label: fn(&T) -> &'static str,
) -> ValidationResult<T> {
    let raw = validate_required_text(field, raw)?;
    raw.parse::<T>().map_err(|_| {
        let labels: Vec<&str> = allowed.iter().map(label).collect();
        ValidationError::not_allowed(field, &labels)
    })
}

// =============================================================================
// Grocery Records
// =============================================================================

/// Validates a grocery create request.
///
/// Returns the normalized record, or every failing field at once.
pub fn validate_grocery(candidate: &GroceryCandidate) -> Result<NewGroceryItem, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = errors.check(text_field("name", candidate.name.as_ref()).and_then(validate_item_name));
    let category = errors.check(
        text_field("category", candidate.category.as_ref())
            .and_then(|raw| validate_required_text("category", raw)),
    );
    let quantity = errors.check(validate_grocery_quantity(
        candidate.quantity.as_ref(),
        category.as_deref().unwrap_or_default(),
    ));

    match (name, quantity, category) {
        (Some(name), Some(quantity), Some(category)) if errors.is_empty() => Ok(NewGroceryItem {
            name,
            quantity,
            category,
        }),
        _ => Err(errors),
    }
}

/// Validates a grocery update against the stored record.
///
/// Fields present in `patch` override the stored values, then the merged
/// record is validated as a whole. A category change therefore re-checks the
/// stored quantity against the new unit.
pub fn validate_grocery_update(
    current: &GroceryItem,
    patch: &GroceryPatch,
) -> Result<GroceryChanges, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = errors.check(
        text_field("name", patch.name.as_ref())
            .and_then(|raw| validate_item_name(Some(raw.unwrap_or(&current.name)))),
    );
    let category = errors.check(
        text_field("category", patch.category.as_ref())
            .and_then(|raw| validate_required_text("category", Some(raw.unwrap_or(&current.category)))),
    );

    let stored_quantity = RawQuantity::Number(current.quantity);
    let quantity = errors.check(validate_grocery_quantity(
        Some(patch.quantity.as_ref().unwrap_or(&stored_quantity)),
        category.as_deref().unwrap_or_default(),
    ));

    let completed = errors
        .check(flag_field("completed", patch.completed.as_ref()))
        .map(|flag| flag.unwrap_or(current.completed));
    let archived = errors
        .check(flag_field("archived", patch.archived.as_ref()))
        .map(|flag| flag.unwrap_or(current.archived));
    if let (Some(completed), Some(archived)) = (completed, archived) {
        errors.check(validate_grocery_state(completed, archived, current.archived));
    }

    match (name, quantity, category, completed, archived) {
        (Some(name), Some(quantity), Some(category), Some(completed), Some(archived))
            if errors.is_empty() =>
        {
            Ok(GroceryChanges {
                name,
                quantity,
                category,
                completed,
                archived,
            })
        }
        _ => Err(errors),
    }
}

// =============================================================================
// Inventory Records
// =============================================================================

/// Validates an inventory create or full-replace request.
///
/// ## Rules
/// - name, category, quantity, temperature are required
/// - name, category, temperature, status must be catalog members
/// - quantity is a whole number ≥ 1
/// - manufactureDate must not be after `now`
/// - expireDate must be after manufactureDate when both are present
/// - status defaults to Available
pub fn validate_inventory(
    candidate: &InventoryCandidate,
    now: DateTime<Utc>,
) -> Result<NewInventoryItem, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = errors.check(text_field("name", candidate.name.as_ref()).and_then(|raw| {
        parse_member("name", raw, InventoryName::ALL, InventoryName::as_str)
    }));
    let category = errors.check(text_field("category", candidate.category.as_ref()).and_then(|raw| {
        parse_member("category", raw, InventoryCategory::ALL, InventoryCategory::as_str)
    }));
    let quantity = errors.check(validate_inventory_quantity(candidate.quantity.as_ref()));
    let temperature = errors.check(text_field("temperature", candidate.temperature.as_ref()).and_then(|raw| {
        parse_member("temperature", raw, StorageTemperature::ALL, StorageTemperature::as_str)
    }));

    let status = match text_field("status", candidate.status.as_ref()) {
        Ok(Some(s)) if !s.trim().is_empty() => errors.check(parse_member(
            "status",
            Some(s.trim()),
            StockStatus::ALL,
            StockStatus::as_str,
        )),
        Ok(_) => Some(StockStatus::default()),
        Err(err) => {
            errors.add(err);
            None
        }
    };

    let manufacture_date = errors
        .check(
            text_field("manufactureDate", candidate.manufacture_date.as_ref())
                .and_then(|raw| parse_optional_date("manufactureDate", raw)),
        )
        .flatten();
    let expire_date = errors
        .check(
            text_field("expireDate", candidate.expire_date.as_ref())
                .and_then(|raw| parse_optional_date("expireDate", raw)),
        )
        .flatten();

    if let Some(made) = manufacture_date {
        if made > now {
            errors.add(ValidationError::rule("manufactureDate", "cannot be in the future"));
        }
        if let Some(expires) = expire_date {
            if expires <= made {
                errors.add(ValidationError::rule("expireDate", "must be after manufactureDate"));
            }
        }
    }

    match (name, category, quantity, temperature, status) {
        (Some(name), Some(category), Some(quantity), Some(temperature), Some(status))
            if errors.is_empty() =>
        {
            Ok(NewInventoryItem {
                name,
                category,
                quantity,
                manufacture_date,
                expire_date,
                temperature,
                status,
            })
        }
        _ => Err(errors),
    }
}

/// Validates an inventory quantity: a whole number of at least 1.
pub fn validate_inventory_quantity(raw: Option<&RawQuantity>) -> ValidationResult<i64> {
    let quantity = parse_quantity("quantity", raw)?;

    if quantity < 1.0 {
        return Err(ValidationError::rule("quantity", "must be at least 1"));
    }
    if quantity.fract() != 0.0 || quantity > i64::MAX as f64 {
        return Err(ValidationError::invalid_format("quantity", "must be a whole number"));
    }

    Ok(quantity as i64)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn grocery(name: &str, quantity: f64, category: &str) -> GroceryCandidate {
        GroceryCandidate {
            name: Some(name.into()),
            quantity: Some(RawQuantity::Number(quantity)),
            category: Some(category.into()),
        }
    }

    fn stored(quantity: f64, category: &str, completed: bool, archived: bool) -> GroceryItem {
        GroceryItem {
            id: "g-1".to_string(),
            name: "Apple".to_string(),
            quantity,
            category: category.to_string(),
            completed,
            archived,
            date_added: Utc::now(),
            version: 0,
        }
    }

    fn inventory() -> InventoryCandidate {
        InventoryCandidate {
            name: Some("Milk".into()),
            category: Some("Dairy".into()),
            quantity: Some(RawQuantity::Number(6.0)),
            manufacture_date: Some("2024-01-10".into()),
            expire_date: Some("2024-01-20".into()),
            temperature: Some("Refrigerated (0-4°C)".into()),
            status: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_valid_grocery_is_normalized() {
        let item = validate_grocery(&grocery("  Green Apple ", 3.0, " Fruits ")).unwrap();
        assert_eq!(item.name, "Green Apple");
        assert_eq!(item.category, "Fruits");
        assert_eq!(item.quantity, 3.0);
    }

    #[test]
    fn test_grocery_name_rules() {
        assert!(validate_item_name(Some("O'Neil's Jam-Mix")).is_ok());
        assert!(matches!(
            validate_item_name(Some("   ")),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_item_name(Some("A")),
            Err(ValidationError::TooShort { min: 2, .. })
        ));
        assert!(matches!(
            validate_item_name(Some("a".repeat(51).as_str())),
            Err(ValidationError::TooLong { max: 50, .. })
        ));
        assert_eq!(
            validate_item_name(Some("Cola 2L")).unwrap_err().to_string(),
            "name has invalid format: cannot contain numbers"
        );
        assert!(validate_item_name(Some("Café")).is_err());
        assert!(validate_item_name(Some("Milk & Honey")).is_err());
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        for q in [0.0, -1.0, -0.5] {
            let errors = validate_grocery(&grocery("Apple", q, "Fruits")).unwrap_err();
            assert!(matches!(
                errors.get("quantity"),
                Some(ValidationError::MustBePositive { .. })
            ));
        }
    }

    #[test]
    fn test_weight_bounds() {
        assert!(validate_grocery(&grocery("Apple", 0.1, "Fruits")).is_ok());
        assert!(validate_grocery(&grocery("Apple", 100.0, "Fruits")).is_ok());
        assert!(validate_grocery(&grocery("Apple", 2.75, "Vegetables")).is_ok());
        assert!(validate_grocery(&grocery("Apple", 0.05, "Fruits")).is_err());
        assert!(validate_grocery(&grocery("Apple", 100.5, "Meat & Fish")).is_err());
    }

    #[test]
    fn test_unit_bounds() {
        assert!(validate_grocery(&grocery("Chips", 1.0, "Snacks")).is_ok());
        assert!(validate_grocery(&grocery("Chips", 20.0, "Snacks")).is_ok());
        assert!(validate_grocery(&grocery("Chips", 21.0, "Snacks")).is_err());
        assert!(validate_grocery(&grocery("Chips", 0.5, "Snacks")).is_err());

        let errors = validate_grocery(&grocery("Chips", 2.5, "Snacks")).unwrap_err();
        assert_eq!(
            errors.get("quantity").unwrap().to_string(),
            "quantity has invalid format: must be a whole number"
        );
    }

    #[test]
    fn test_unknown_category_uses_unit_bounds() {
        assert!(validate_grocery(&grocery("Batteries", 4.0, "Electronics")).is_ok());
        assert!(validate_grocery(&grocery("Batteries", 25.0, "Electronics")).is_err());
    }

    #[test]
    fn test_quantity_as_string() {
        let mut candidate = grocery("Apple", 1.0, "Fruits");
        candidate.quantity = Some(RawQuantity::from("1.5"));
        assert_eq!(validate_grocery(&candidate).unwrap().quantity, 1.5);

        candidate.quantity = Some(RawQuantity::from("lots"));
        let errors = validate_grocery(&candidate).unwrap_err();
        assert_eq!(
            errors.get("quantity").unwrap().to_string(),
            "quantity has invalid format: must be a number"
        );

        candidate.quantity = Some(RawQuantity::from(""));
        let errors = validate_grocery(&candidate).unwrap_err();
        assert!(matches!(errors.get("quantity"), Some(ValidationError::Required { .. })));
    }

    #[test]
    fn test_all_missing_fields_reported() {
        let errors = validate_grocery(&GroceryCandidate::default()).unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["category", "name", "quantity"]
        );
    }

    #[test]
    fn test_update_merges_only_present_fields() {
        let current = stored(2.0, "Fruits", false, false);
        let patch = GroceryPatch {
            completed: Some(true.into()),
            ..Default::default()
        };
        let changes = validate_grocery_update(&current, &patch).unwrap();
        assert_eq!(changes.name, "Apple");
        assert_eq!(changes.quantity, 2.0);
        assert!(changes.completed);
        assert!(!changes.archived);
    }

    #[test]
    fn test_update_with_zero_quantity_is_rejected() {
        let current = stored(2.0, "Fruits", false, false);
        let patch = GroceryPatch {
            quantity: Some(RawQuantity::Number(0.0)),
            ..Default::default()
        };
        let errors = validate_grocery_update(&current, &patch).unwrap_err();
        assert!(errors.contains("quantity"));
    }

    #[test]
    fn test_update_category_rechecks_stored_quantity() {
        let current = stored(2.5, "Fruits", false, false);
        let patch = GroceryPatch {
            category: Some("Snacks".into()),
            ..Default::default()
        };
        assert!(validate_grocery_update(&current, &patch)
            .unwrap_err()
            .contains("quantity"));
    }

    #[test]
    fn test_update_cannot_archive() {
        let current = stored(2.0, "Fruits", true, false);
        let patch = GroceryPatch {
            archived: Some(true.into()),
            ..Default::default()
        };
        assert!(validate_grocery_update(&current, &patch)
            .unwrap_err()
            .contains("archived"));
    }

    #[test]
    fn test_update_rejects_archived_but_not_completed() {
        let current = stored(2.0, "Fruits", true, true);
        let patch = GroceryPatch {
            completed: Some(false.into()),
            ..Default::default()
        };
        assert!(validate_grocery_update(&current, &patch)
            .unwrap_err()
            .contains("archived"));
    }

    #[test]
    fn test_update_can_restore_archived_item() {
        let current = stored(2.0, "Fruits", true, true);
        let patch = GroceryPatch {
            completed: Some(false.into()),
            archived: Some(false.into()),
            ..Default::default()
        };
        let changes = validate_grocery_update(&current, &patch).unwrap();
        assert!(!changes.completed && !changes.archived);
    }

    #[test]
    fn test_valid_inventory() {
        let item = validate_inventory(&inventory(), now()).unwrap();
        assert_eq!(item.name, InventoryName::Milk);
        assert_eq!(item.temperature, StorageTemperature::Refrigerated);
        assert_eq!(item.status, StockStatus::Available);
        assert_eq!(item.quantity, 6);
        assert_eq!(
            item.manufacture_date,
            Some(Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_inventory_missing_required_fields() {
        let errors = validate_inventory(&InventoryCandidate::default(), now()).unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["category", "name", "quantity", "temperature"]
        );
    }

    #[test]
    fn test_inventory_enumeration_membership() {
        let mut candidate = inventory();
        candidate.name = Some("Butter".into());
        candidate.temperature = Some("Warm".into());
        candidate.status = Some("Sold".into());
        let errors = validate_inventory(&candidate, now()).unwrap_err();
        assert!(errors.contains("name"));
        assert!(errors.contains("temperature"));
        assert!(errors.contains("status"));
        assert!(!errors.contains("category"));
    }

    #[test]
    fn test_inventory_quantity_rules() {
        assert!(validate_inventory_quantity(Some(&RawQuantity::Number(1.0))).is_ok());
        assert!(validate_inventory_quantity(Some(&RawQuantity::Number(0.0))).is_err());
        assert!(validate_inventory_quantity(Some(&RawQuantity::Number(2.5))).is_err());
        assert_eq!(validate_inventory_quantity(Some(&RawQuantity::from("12"))).unwrap(), 12);
    }

    #[test]
    fn test_manufacture_date_in_future_rejected() {
        let mut candidate = inventory();
        candidate.manufacture_date = Some((now() + Duration::days(1)).to_rfc3339().into());
        candidate.expire_date = None;
        let errors = validate_inventory(&candidate, now()).unwrap_err();
        assert_eq!(
            errors.get("manufactureDate").unwrap().to_string(),
            "manufactureDate cannot be in the future"
        );
    }

    #[test]
    fn test_expire_date_must_follow_manufacture_date() {
        let mut candidate = inventory();
        candidate.expire_date = Some("2024-01-10".into());
        let errors = validate_inventory(&candidate, now()).unwrap_err();
        assert!(errors.contains("expireDate"));

        candidate.expire_date = Some("2024-01-05".into());
        assert!(validate_inventory(&candidate, now()).is_err());
    }

    #[test]
    fn test_date_rules_vacuous_when_either_absent() {
        let mut candidate = inventory();
        candidate.manufacture_date = Some(String::new().into());
        candidate.expire_date = Some("2020-01-01".into());
        let item = validate_inventory(&candidate, now()).unwrap();
        assert_eq!(item.manufacture_date, None);
        assert!(item.expire_date.is_some());
    }

    #[test]
    fn test_bad_date_format() {
        let mut candidate = inventory();
        candidate.expire_date = Some("next tuesday".into());
        let errors = validate_inventory(&candidate, now()).unwrap_err();
        assert!(matches!(
            errors.get("expireDate"),
            Some(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_wrong_json_types_fail_per_field() {
        let candidate = GroceryCandidate {
            name: Some(Lenient::Malformed(serde_json::json!(42))),
            quantity: Some(RawQuantity::Malformed(serde_json::json!(true))),
            category: Some("Fruits".into()),
        };
        let errors = validate_grocery(&candidate).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["name", "quantity"]);
        assert!(matches!(
            errors.get("name"),
            Some(ValidationError::InvalidFormat { .. })
        ));

        let patch = GroceryPatch {
            completed: Some(Lenient::Malformed(serde_json::json!("yes"))),
            ..Default::default()
        };
        let errors = validate_grocery_update(&stored(2.0, "Fruits", false, false), &patch).unwrap_err();
        assert_eq!(
            errors.get("completed").unwrap().to_string(),
            "completed has invalid format: must be true or false"
        );

        let mut candidate = inventory();
        candidate.status = Some(Lenient::Malformed(serde_json::json!(["Sold"])));
        candidate.expire_date = Some(Lenient::Malformed(serde_json::json!(20240120)));
        let errors = validate_inventory(&candidate, now()).unwrap_err();
        assert!(errors.contains("status"));
        assert!(errors.contains("expireDate"));
    }
}
