#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use tempfile::TempDir;
use tower::ServiceExt;

use spendwise_server::api::app_router;
use spendwise_server::build_state;
use spendwise_server::config::Config;

pub const TEST_PASSWORD: &str = "super-secret-pw";

/// Builds a router backed by a fresh temporary database. The TempDir guard
/// must stay alive for the duration of the test.
pub async fn build_test_app() -> (axum::Router, TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".to_string(),
        db_path: tmp.path().join("test.db").to_string_lossy().into_owned(),
        secret_key: "test-secret-key-1234567890".to_string(),
        token_ttl_hours: 24,
    };
    let state = build_state(&config).await.unwrap();
    (app_router(state), tmp)
}

/// Fires one request at the in-memory app and returns (status, parsed body).
pub async fn request(
    app: &axum::Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

/// Registers an account and returns its access token.
pub async fn register(app: &axum::Router, email: &str) -> String {
    let (status, body) = request(
        app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(serde_json::json!({ "email": email, "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["accessToken"].as_str().unwrap().to_string()
}

/// Creates a category and returns its id.
pub async fn create_category(
    app: &axum::Router,
    token: &str,
    name: &str,
    monthly_budget: Option<f64>,
) -> String {
    let mut payload = serde_json::json!({ "name": name });
    if let Some(budget) = monthly_budget {
        payload["monthlyBudget"] = serde_json::json!(budget);
    }
    let (status, body) = request(
        app,
        Method::POST,
        "/api/v1/categories",
        Some(token),
        Some(payload),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create category failed: {body}");
    body["id"].as_str().unwrap().to_string()
}

/// Records an expense and returns its id.
pub async fn create_expense(
    app: &axum::Router,
    token: &str,
    category_id: &str,
    amount: f64,
    date: &str,
) -> String {
    let (status, body) = request(
        app,
        Method::POST,
        "/api/v1/expenses",
        Some(token),
        Some(serde_json::json!({
            "categoryId": category_id,
            "amount": amount,
            "expenseDate": date,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create expense failed: {body}");
    body["id"].as_str().unwrap().to_string()
}

/// Finds the per-category row for `category_id` in a budget report.
pub fn category_row<'a>(
    report: &'a serde_json::Value,
    category_id: &str,
) -> &'a serde_json::Value {
    report["byCategory"]
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["categoryId"] == category_id)
        .unwrap_or_else(|| panic!("category {category_id} missing from report"))
}
