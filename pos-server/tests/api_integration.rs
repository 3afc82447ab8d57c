//! End-to-end API tests
//!
//! Boot the real router on an ephemeral port with a file-backed database and
//! drive it over HTTP.

use serde_json::{Value, json};

use pos_server::api;
use pos_server::core::{Config, ServerState};

struct TestApp {
    base_url: String,
    client: reqwest::Client,
    // Held so the database directory outlives the server
    _db_dir: tempfile::TempDir,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn spawn_app() -> TestApp {
    let db_dir = tempfile::tempdir().expect("tempdir");
    let db_path = db_dir.path().join("test.db");
    let config = Config::with_overrides(db_path.to_str().unwrap(), 0);

    let state = ServerState::initialize(&config).await.expect("state");
    let app = api::build_app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        base_url: format!("http://{addr}"),
        client: reqwest::Client::new(),
        _db_dir: db_dir,
    }
}

async fn create_category(app: &TestApp, name: &str) -> Value {
    let res = app
        .client
        .post(app.url("/api/v1/categories"))
        .json(&json!({ "name": name }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);
    res.json().await.unwrap()
}

async fn create_price(app: &TestApp, body: Value) -> Value {
    let res = app
        .client
        .post(app.url("/api/v1/prices"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201, "{}", res.text().await.unwrap());
    res.json().await.unwrap()
}

async fn client_count(app: &TestApp) -> usize {
    let clients: Vec<Value> = app
        .client
        .get(app.url("/api/v1/clients"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    clients.len()
}

#[tokio::test]
async fn test_root_and_health() {
    let app = spawn_app().await;

    let root: Value = app
        .client
        .get(app.url("/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(root["message"], "Laundry POS backend");

    let health: Value = app
        .client
        .get(app.url("/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["database"]["status"], "ok");
}

#[tokio::test]
async fn test_integrated_order_end_to_end() {
    let app = spawn_app().await;

    let category = create_category(&app, "Wash&Fold").await;
    let category_id = category["id"].as_i64().unwrap();

    let price = create_price(
        &app,
        json!({
            "type": "Regular",
            "weight_min": 0.5,
            "weight_max": 5.0,
            "amount": 100.0,
            "category_id": category_id
        }),
    )
    .await;
    let price_id = price["id"].as_i64().unwrap();

    let res = app
        .client
        .post(app.url("/api/v1/orders/integrated"))
        .json(&json!({
            "client_name": "Jane",
            "client_contact": "09171234567",
            "client_address": "123 St",
            "category_id": category_id,
            "type_name": "Regular",
            "weight": 3.0
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["total_amount"], 100.0);
    assert_eq!(body["price_id"].as_i64(), Some(price_id));
    assert_eq!(body["status"], "pending");
    assert_eq!(body["category_name"], "Wash&Fold");

    // A client row with the normalized contact number now exists
    let clients: Vec<Value> = app
        .client
        .get(app.url("/api/v1/clients"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0]["contact_number"], "09171234567");

    // The order is visible through the details read
    let order_id = body["order_id"].as_i64().unwrap();
    let details: Value = app
        .client
        .get(app.url(&format!("/api/v1/orders/{order_id}/details")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(details["client"]["name"], "Jane");
    assert_eq!(details["category"]["name"], "Wash&Fold");
}

#[tokio::test]
async fn test_integrated_order_category_gate_creates_no_client() {
    let app = spawn_app().await;

    let res = app
        .client
        .post(app.url("/api/v1/orders/integrated"))
        .json(&json!({
            "client_name": "Jane",
            "client_contact": "09171234567",
            "client_address": "123 St",
            "category_id": 42,
            "type_name": "Regular",
            "weight": 3.0
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Category with ID 42 not found");

    assert_eq!(client_count(&app).await, 0);
}

#[tokio::test]
async fn test_integrated_order_custom_type() {
    let app = spawn_app().await;
    let category = create_category(&app, "Wash&Fold").await;
    let category_id = category["id"].as_i64().unwrap();

    // Missing custom_amount → 400
    let res = app
        .client
        .post(app.url("/api/v1/orders/integrated"))
        .json(&json!({
            "client_name": "Jane",
            "client_contact": "09171234567",
            "client_address": "123 St",
            "category_id": category_id,
            "type_name": "custom",
            "weight": 3.0
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "custom_amount is required for custom type");

    // With the override the order succeeds and carries no price id
    let res = app
        .client
        .post(app.url("/api/v1/orders/integrated"))
        .json(&json!({
            "client_name": "Jane",
            "client_contact": "09171234567",
            "client_address": "123 St",
            "category_id": category_id,
            "type_name": "custom",
            "weight": 3.0,
            "custom_amount": 50.0
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["total_amount"], 50.0);
    assert!(body["price_id"].is_null());
}

#[tokio::test]
async fn test_duplicate_category_name_is_conflict() {
    let app = spawn_app().await;
    create_category(&app, "Dry Clean").await;

    let res = app
        .client
        .post(app.url("/api/v1/categories"))
        .json(&json!({ "name": "Dry Clean" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Category with name 'Dry Clean' already exists");
}

#[tokio::test]
async fn test_duplicate_custom_price_is_conflict() {
    let app = spawn_app().await;
    let category = create_category(&app, "Wash&Fold").await;
    let category_id = category["id"].as_i64().unwrap();

    create_price(
        &app,
        json!({
            "type": "Custom",
            "weight_max": 100.0,
            "amount": 50.0,
            "category_id": category_id
        }),
    )
    .await;

    let res = app
        .client
        .post(app.url("/api/v1/prices"))
        .json(&json!({
            "type": "custom",
            "weight_max": 200.0,
            "amount": 80.0,
            "category_id": category_id
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Custom price already exists for this category");
}

#[tokio::test]
async fn test_overlapping_price_range_is_conflict() {
    let app = spawn_app().await;
    let category = create_category(&app, "Wash&Fold").await;
    let category_id = category["id"].as_i64().unwrap();

    create_price(
        &app,
        json!({
            "type": "Regular",
            "weight_min": 1.0,
            "weight_max": 5.0,
            "amount": 100.0,
            "category_id": category_id
        }),
    )
    .await;

    let res = app
        .client
        .post(app.url("/api/v1/prices"))
        .json(&json!({
            "type": "Regular",
            "weight_min": 2.0,
            "weight_max": 6.0,
            "amount": 120.0,
            "category_id": category_id
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    // An adjacent, non-overlapping range is accepted
    create_price(
        &app,
        json!({
            "type": "Regular",
            "weight_min": 5.5,
            "weight_max": 10.0,
            "amount": 180.0,
            "category_id": category_id
        }),
    )
    .await;
}

#[tokio::test]
async fn test_price_calculate_endpoint() {
    let app = spawn_app().await;
    let category = create_category(&app, "Wash&Fold").await;
    let category_id = category["id"].as_i64().unwrap();

    let price = create_price(
        &app,
        json!({
            "type": "Regular",
            "weight_min": 0.5,
            "weight_max": 5.0,
            "amount": 100.0,
            "category_id": category_id
        }),
    )
    .await;

    let found: Value = app
        .client
        .get(app.url(&format!(
            "/api/v1/prices/calculate?category_id={category_id}&weight=3.0"
        )))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(found["id"], price["id"]);
    assert_eq!(found["amount"], 100.0);

    let res = app
        .client
        .get(app.url(&format!(
            "/api/v1/prices/calculate?category_id={category_id}&weight=50.0"
        )))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body["message"],
        "No price found for weight 50kg in category 'Wash&Fold'"
    );
}

#[tokio::test]
async fn test_order_crud_flow() {
    let app = spawn_app().await;
    let category = create_category(&app, "Wash&Fold").await;
    let category_id = category["id"].as_i64().unwrap();

    // Direct order creation against a missing client is rejected up front
    let res = app
        .client
        .post(app.url("/api/v1/orders"))
        .json(&json!({
            "client_id": 1,
            "category_id": category_id,
            "total_amount": 100.0
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Client not found");

    let client: Value = {
        let res = app
            .client
            .post(app.url("/api/v1/clients"))
            .json(&json!({
                "name": "Jane",
                "contact_number": "0917-123-4567",
                "address": "123 St"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 201);
        res.json().await.unwrap()
    };
    // Normalization stripped the separators
    assert_eq!(client["contact_number"], "09171234567");
    let client_id = client["id"].as_i64().unwrap();

    let res = app
        .client
        .post(app.url("/api/v1/orders"))
        .json(&json!({
            "client_id": client_id,
            "category_id": category_id,
            "total_amount": 100.0,
            "notes": "fold separately"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);
    let order: Value = res.json().await.unwrap();
    let order_id = order["id"].as_i64().unwrap();
    assert_eq!(order["status"], "pending");

    // Status filter
    let pending: Vec<Value> = app
        .client
        .get(app.url("/api/v1/orders?status=pending"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);

    // Update status
    let res = app
        .client
        .put(app.url(&format!("/api/v1/orders/{order_id}")))
        .json(&json!({ "status": "completed" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["status"], "completed");

    // Delete → 204, then 404
    let res = app
        .client
        .delete(app.url(&format!("/api/v1/orders/{order_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 204);

    let res = app
        .client
        .get(app.url(&format!("/api/v1/orders/{order_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn test_invalid_contact_number_rejected() {
    let app = spawn_app().await;

    let res = app
        .client
        .post(app.url("/api/v1/clients"))
        .json(&json!({
            "name": "Jane",
            "contact_number": "12345",
            "address": "123 St"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Contact number must be exactly 11 digits");
}

#[tokio::test]
async fn test_category_crud_and_missing_lookups() {
    let app = spawn_app().await;

    let res = app
        .client
        .get(app.url("/api/v1/categories/99"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    let category = create_category(&app, "Ironing").await;
    let id = category["id"].as_i64().unwrap();

    let res = app
        .client
        .put(app.url(&format!("/api/v1/categories/{id}")))
        .json(&json!({ "name": "Pressing" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let renamed: Value = res.json().await.unwrap();
    assert_eq!(renamed["name"], "Pressing");

    let res = app
        .client
        .delete(app.url(&format!("/api/v1/categories/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 204);

    let listed: Vec<Value> = app
        .client
        .get(app.url("/api/v1/categories"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_price_get_includes_category() {
    let app = spawn_app().await;
    let category = create_category(&app, "Wash&Fold").await;
    let category_id = category["id"].as_i64().unwrap();

    let price = create_price(
        &app,
        json!({
            "type": "Regular",
            "weight_min": 0.5,
            "weight_max": 5.0,
            "amount": 100.0,
            "category_id": category_id
        }),
    )
    .await;
    let price_id = price["id"].as_i64().unwrap();

    let body: Value = app
        .client
        .get(app.url(&format!("/api/v1/prices/{price_id}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["type"], "Regular");
    assert_eq!(body["category"]["name"], "Wash&Fold");
}
