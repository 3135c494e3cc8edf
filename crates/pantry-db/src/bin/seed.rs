//! # Seed Data Generator
//!
//! Populates a database with sample groceries and inventory for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./pantry_dev.db
//! cargo run -p pantry-db --bin seed
//!
//! # Specify database path
//! cargo run -p pantry-db --bin seed -- --db ./data/pantry.db
//! ```
//!
//! Rows are written straight through the repositories. Every sample below is
//! a record the validators would accept.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use std::env;
use uuid::Uuid;

use pantry_core::{
    GroceryItem, InventoryCategory, InventoryItem, InventoryName, StockStatus, StorageTemperature,
};
use pantry_db::{Database, DbConfig, GroceryStore, InventoryStore};

/// (name, quantity, category, completed)
const GROCERIES: &[(&str, f64, &str, bool)] = &[
    ("Tomatoes", 1.5, "Vegetables", false),
    ("Carrots", 2.0, "Vegetables", false),
    ("Bananas", 1.2, "Fruits", false),
    ("Apples", 3.0, "Fruits", true),
    ("Salmon Fillet", 0.8, "Meat & Fish", false),
    ("Greek Yogurt", 4.0, "Dairy Products", false),
    ("Sparkling Water", 12.0, "Beverages", false),
    ("Trail Mix", 2.0, "Snacks", true),
    ("Dish Soap", 1.0, "Household Items", false),
    ("Toothpaste", 2.0, "Personal Care", false),
    ("Black Pepper", 1.0, "Spices", false),
];

/// (name, category, quantity, manufactured (y, m, d), shelf life days, temperature, status)
#[allow(clippy::type_complexity)]
const INVENTORY: &[(
    InventoryName,
    InventoryCategory,
    i64,
    Option<(i32, u32, u32)>,
    i64,
    StorageTemperature,
    StockStatus,
)] = &[
    (
        InventoryName::Milk,
        InventoryCategory::Dairy,
        12,
        Some((2024, 5, 2)),
        10,
        StorageTemperature::Refrigerated,
        StockStatus::Available,
    ),
    (
        InventoryName::Eggs,
        InventoryCategory::Dairy,
        4,
        Some((2024, 4, 28)),
        28,
        StorageTemperature::Refrigerated,
        StockStatus::Available,
    ),
    (
        InventoryName::Bread,
        InventoryCategory::Bakery,
        3,
        Some((2024, 5, 5)),
        5,
        StorageTemperature::Ambient,
        StockStatus::Available,
    ),
    (
        InventoryName::Cheese,
        InventoryCategory::Frozen,
        7,
        None,
        0,
        StorageTemperature::Frozen,
        StockStatus::OutOfStock,
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./pantry_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Pantry Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./pantry_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Pantry Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let groceries = db.groceries();
    let inventory = db.inventory();

    if groceries.count().await? > 0 || inventory.count().await? > 0 {
        println!("⚠ Database already has data");
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let now = Utc::now();

    for (offset, (name, quantity, category, completed)) in GROCERIES.iter().enumerate() {
        let item = GroceryItem {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            quantity: *quantity,
            category: category.to_string(),
            completed: *completed,
            archived: false,
            date_added: now - Duration::minutes(offset as i64),
            version: 0,
        };
        groceries.insert(&item).await?;
    }
    println!("✓ Inserted {} grocery items", GROCERIES.len());

    for (offset, (name, category, quantity, made, shelf_days, temperature, status)) in
        INVENTORY.iter().enumerate()
    {
        let manufacture_date = made
            .and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive));
        let created_at = now - Duration::minutes(offset as i64);

        let item = InventoryItem {
            id: Uuid::new_v4().to_string(),
            name: *name,
            category: *category,
            quantity: *quantity,
            manufacture_date,
            expire_date: manufacture_date.map(|made| made + Duration::days(*shelf_days)),
            temperature: *temperature,
            status: *status,
            created_at,
            updated_at: created_at,
            version: 0,
        };
        inventory.insert(&item).await?;
    }
    println!("✓ Inserted {} inventory items", INVENTORY.len());

    db.close().await;
    println!();
    println!("🎉 Seed complete!");

    Ok(())
}
