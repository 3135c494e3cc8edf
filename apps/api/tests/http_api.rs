//! End-to-end tests driving the router against an in-memory database.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pantry_core::{CatalogOptions, LowStockPolicy};
use pantry_db::{Database, DbConfig};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use pantry_api::{app, AppState};

async fn test_app() -> Router {
    let db = Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database should open");
    let state = AppState::new(db, CatalogOptions::new(LowStockPolicy::default()));
    app(state, true)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };
    (status, value)
}

async fn create_grocery(app: &Router, name: &str, quantity: f64, category: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/groceries",
        Some(json!({ "name": name, "quantity": quantity, "category": category })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body
}

fn milk(quantity: u32) -> Value {
    json!({
        "name": "Milk",
        "category": "Dairy",
        "quantity": quantity,
        "manufactureDate": "2024-05-01",
        "expireDate": "2024-05-10",
        "temperature": "Refrigerated (0-4°C)"
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], true);
    assert_eq!(body["migrations"]["applied"], body["migrations"]["total"]);
}

#[tokio::test]
async fn catalog_lists_options() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/api/catalog", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["groceryCategories"].as_array().unwrap().len() >= 9);
    assert_eq!(body["lowStock"]["inventoryThreshold"], 5.0);
}

#[tokio::test]
async fn grocery_create_and_list() {
    let app = test_app().await;

    let created = create_grocery(&app, "Apple", 3.0, "Fruits").await;
    assert_eq!(created["completed"], false);
    assert_eq!(created["archived"], false);
    assert!(created["dateAdded"].is_string());

    let (status, body) = send(&app, Method::GET, "/api/groceries", None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], created["id"]);
    assert_eq!(items[0]["name"], "Apple");
}

#[tokio::test]
async fn grocery_create_validation_errors() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/groceries",
        Some(json!({ "name": "Chips", "quantity": 0, "category": "Snacks" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["errors"]["quantity"].is_string());

    let (status, body) = send(&app, Method::POST, "/api/groceries", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    for field in ["name", "quantity", "category"] {
        assert!(body["errors"][field].is_string(), "missing error for {field}");
    }
}

#[tokio::test]
async fn wrong_typed_fields_are_reported_individually() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/groceries",
        Some(json!({ "name": 42, "quantity": true, "category": "Fruits" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["errors"]["name"].is_string());
    assert!(body["errors"]["quantity"].is_string());
    assert!(body["errors"].get("general").is_none());
    assert!(body["errors"].get("category").is_none());

    let mut milk = milk(4);
    milk["temperature"] = json!(4);
    let (status, body) = send(&app, Method::POST, "/api/inventory", Some(milk)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["temperature"].is_string());
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = test_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/groceries")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["errors"]["general"].is_string());
}

#[tokio::test]
async fn grocery_update_semantics() {
    let app = test_app().await;
    let created = create_grocery(&app, "Apple", 3.0, "Fruits").await;
    let uri = format!("/api/groceries/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "quantity": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["quantity"].is_string());

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "completed": true }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completed"], true);
    assert_eq!(body["quantity"], 3.0);
    assert_eq!(body["dateAdded"], created["dateAdded"]);

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "archived": true }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["archived"].is_string());

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/groceries/does-not-exist",
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn grocery_delete() {
    let app = test_app().await;
    let created = create_grocery(&app, "Apple", 3.0, "Fruits").await;
    let uri = format!("/api/groceries/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Item removed");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn purchase_all_flow() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::POST, "/api/groceries/purchase-all", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "NO_PENDING_ITEMS");
    assert_eq!(body["message"], "No pending items to purchase");

    create_grocery(&app, "Apple", 3.0, "Fruits").await;
    create_grocery(&app, "Crackers", 2.0, "Snacks").await;

    let (status, body) = send(&app, Method::POST, "/api/groceries/purchase-all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "2 items marked as purchased and archived");
    assert_eq!(body["purchasedItems"], 2);
    assert_eq!(body["modifiedCount"], 2);

    let (_, active) = send(&app, Method::GET, "/api/groceries", None).await;
    assert!(active.as_array().unwrap().is_empty());

    let (status, archived) = send(&app, Method::GET, "/api/groceries/archived", None).await;
    assert_eq!(status, StatusCode::OK);
    let archived = archived.as_array().unwrap();
    assert_eq!(archived.len(), 2);
    assert!(archived
        .iter()
        .all(|item| item["completed"] == true && item["archived"] == true));

    let (status, _) = send(&app, Method::POST, "/api/groceries/purchase-all", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn grocery_overview_filters() {
    let app = test_app().await;
    let apple = create_grocery(&app, "Apple", 3.0, "Fruits").await;
    create_grocery(&app, "Bread", 1.0, "Other").await;

    send(
        &app,
        Method::PUT,
        &format!("/api/groceries/{}", apple["id"].as_str().unwrap()),
        Some(json!({ "completed": true })),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/groceries/overview?tab=pending", None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Bread");
    assert_eq!(body["totalCount"], 2);
    assert_eq!(body["pendingCount"], 1);

    let (_, body) = send(&app, Method::GET, "/api/groceries/overview?search=APP", None).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["name"], "Apple");
}

#[tokio::test]
async fn inventory_lifecycle() {
    let app = test_app().await;

    let (status, created) = send(&app, Method::POST, "/api/inventory", Some(milk(12))).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {created}");
    assert_eq!(created["status"], "Available");
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let uri = format!("/api/inventory/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "quantity": 3 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["name"].is_string());

    let (status, updated) = send(&app, Method::PUT, &uri, Some(milk(3))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["quantity"], 3);
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let (status, view) = send(&app, Method::GET, "/api/inventory/overview?order=asc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["items"].as_array().unwrap().len(), 1);
    assert_eq!(view["lowStock"].as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Item deleted successfully");

    let (_, list) = send(&app, Method::GET, "/api/inventory", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn inventory_rejects_bad_dates() {
    let app = test_app().await;

    let mut body = milk(5);
    body["expireDate"] = json!("2024-04-01");
    let (status, response) = send(&app, Method::POST, "/api/inventory", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["errors"]["expireDate"].is_string());

    let mut body = milk(5);
    body["manufactureDate"] = json!("2999-01-01");
    body["expireDate"] = json!("2999-02-01");
    let (status, response) = send(&app, Method::POST, "/api/inventory", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["errors"]["manufactureDate"].is_string());
}

#[tokio::test]
async fn inventory_overview_rejects_unknown_order() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/api/inventory/overview?order=sideways", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["order"].is_string());
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = test_app().await;
    let request = Request::builder()
        .uri("/api/groceries")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
