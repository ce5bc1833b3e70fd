//! HTTP-level tests for routing, authentication middleware, and the guard
//! ordering that runs before any storage access. The state carries a
//! disconnected database handle; a request that is settled by the
//! middleware, a guard, or input validation never touches storage, while
//! one that clears every guard fails with INTERNAL the moment it does.

use axum_test::TestServer;
use http::StatusCode;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use emporium_domain::user::RoleFlags;
use emporium_store::router::build_router;
use emporium_store::state::AppState;
use emporium_testing::auth::TestIdentity;

use crate::helpers::TEST_JWT_SECRET;

fn test_server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::default(),
        http: reqwest::Client::new(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        payment_session_url: "http://payment.invalid/sessions".to_owned(),
    };
    TestServer::new(build_router(state)).expect("failed to build test server")
}

#[tokio::test]
async fn should_answer_health_probes() {
    let server = test_server();
    assert_eq!(server.get("/healthz").await.status_code(), StatusCode::OK);
    assert_eq!(server.get("/readyz").await.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn should_reject_anonymous_cart_creation() {
    let server = test_server();
    let response = server.post("/carts").json(&json!({"address": "12 Main St"})).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["kind"], "UNAUTHORIZED");
}

#[tokio::test]
async fn should_treat_garbage_bearer_token_as_anonymous() {
    let server = test_server();
    let response = server
        .post("/carts")
        .authorization_bearer("not-a-jwt")
        .json(&json!({"address": "12 Main St"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_forbid_non_admin_admin_creation() {
    let server = test_server();
    let customer = TestIdentity::new("carol", RoleFlags::customer());
    let response = server
        .post("/users")
        .authorization_bearer(customer.token(TEST_JWT_SECRET))
        .json(&json!({"username": "root", "password": "hunter22"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_forbid_product_creation_by_non_seller() {
    let server = test_server();
    let customer = TestIdentity::new("carol", RoleFlags::customer());
    let response = server
        .post("/products")
        .authorization_bearer(customer.token(TEST_JWT_SECRET))
        .json(&json!({
            "name": "lamp",
            "description": "a lamp",
            "price_cents": 1999,
            "quantity": 3,
            "category": "home",
            "image_url": "https://img.example/lamp.png",
            "shipping_days": 3
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_reject_product_with_nonpositive_price() {
    let server = test_server();
    let seller = TestIdentity::new("sam", RoleFlags::seller());
    let response = server
        .post("/products")
        .authorization_bearer(seller.token(TEST_JWT_SECRET))
        .json(&json!({
            "name": "lamp",
            "description": "a lamp",
            "price_cents": 0,
            "quantity": 3,
            "category": "home",
            "image_url": "https://img.example/lamp.png",
            "shipping_days": 3
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_reject_admin_creation_with_invalid_username() {
    let server = test_server();
    let admin = TestIdentity::new("root", RoleFlags::admin());
    let response = server
        .post("/users")
        .authorization_bearer(admin.token(TEST_JWT_SECRET))
        .json(&json!({"username": "@broken", "password": "hunter22"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_reject_empty_checkout_session() {
    let server = test_server();
    let customer = TestIdentity::new("carol", RoleFlags::customer());
    let response = server
        .post("/carts/checkout-session")
        .authorization_bearer(customer.token(TEST_JWT_SECRET))
        .json(&json!({"line_items": []}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_ignore_unknown_fields_in_user_patch() {
    let server = test_server();
    let customer = TestIdentity::new("carol", RoleFlags::customer());
    // `is_admin` is not an updatable field; with nothing else in the body
    // the patch is empty and rejected before any column mapping happens.
    let response = server
        .patch("/users/carol")
        .authorization_bearer(customer.token(TEST_JWT_SECRET))
        .json(&json!({"is_admin": true}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_forbid_stock_listing_for_non_seller_owner() {
    let server = test_server();
    // The stock view is seller-only even for the account's own customer.
    let customer = TestIdentity::new("carol", RoleFlags::customer());
    let response = server
        .get("/users/carol/products")
        .authorization_bearer(customer.token(TEST_JWT_SECRET))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_let_customer_query_own_sales_views() {
    let server = test_server();
    // The sales views carry no seller-role guard; a customer asking for
    // their own (empty) sales must clear every guard and reach storage,
    // which the disconnected handle turns into INTERNAL rather than a 403.
    let customer = TestIdentity::new("carol", RoleFlags::customer());
    for path in [
        "/users/carol/interactions/seller",
        "/users/carol/interactions/seller/approved",
    ] {
        let response = server
            .get(path)
            .authorization_bearer(customer.token(TEST_JWT_SECRET))
            .await;
        assert_eq!(
            response.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "{path} should pass the guards"
        );
        let body: Value = response.json();
        assert_eq!(body["kind"], "INTERNAL");
    }
}

#[tokio::test]
async fn should_forbid_updating_another_users_account() {
    let server = test_server();
    let customer = TestIdentity::new("carol", RoleFlags::customer());
    let response = server
        .patch("/users/someone-else")
        .authorization_bearer(customer.token(TEST_JWT_SECRET))
        .json(&json!({"age": 31}))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}
