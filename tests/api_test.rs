//! Integration tests for API endpoints.
//!
//! The real router, session layer and login interceptor run against
//! hand-written in-memory services, so no database is required.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;

use store_api::api::create_router;
use store_api::api::middleware::{session_layer, PathAllowList};
use store_api::config::SessionSettings;
use store_api::domain::{
    AddressSummary, AddressView, CartView, DistrictView, NewAddress, Product, ProductSummary,
    ProfileUpdate, UserProfile, UserResponse,
};
use store_api::errors::{AppError, AppResult};
use store_api::infra::Database;
use store_api::services::{
    AddressService, CartService, DistrictService, ProductService, Services, UserService,
};
use store_api::AppState;

// =============================================================================
// Fake Services
// =============================================================================

/// Knows a single account: tom / secret123 (uid 7)
struct FakeUserService;

#[async_trait]
impl UserService for FakeUserService {
    async fn register(&self, username: String, _password: String) -> AppResult<UserResponse> {
        if username == "taken" {
            return Err(AppError::UsernameDuplicated(username));
        }
        Ok(UserResponse { uid: 8, username })
    }

    async fn login(&self, username: String, password: String) -> AppResult<UserResponse> {
        if username != "tom" {
            return Err(AppError::UserNotFound);
        }
        if password != "secret123" {
            return Err(AppError::PasswordNotMatch);
        }
        Ok(UserResponse { uid: 7, username })
    }

    async fn change_password(
        &self,
        _uid: i32,
        _username: String,
        old_password: String,
        _new_password: String,
    ) -> AppResult<()> {
        if old_password != "secret123" {
            return Err(AppError::PasswordNotMatch);
        }
        Ok(())
    }

    async fn profile(&self, uid: i32) -> AppResult<UserProfile> {
        Ok(UserProfile {
            uid,
            username: "tom".to_string(),
            phone: Some("13800000000".to_string()),
            email: None,
            gender: None,
        })
    }

    async fn change_info(&self, _uid: i32, _username: String, _info: ProfileUpdate) -> AppResult<()> {
        Ok(())
    }
}

/// Address 99 belongs to someone else
struct FakeAddressService;

fn address_view(aid: i32, uid: i32) -> AddressView {
    AddressView {
        aid,
        uid,
        name: "Tom".to_string(),
        province_name: "Hebei".to_string(),
        city_name: "Shijiazhuang".to_string(),
        area_name: "Changan".to_string(),
        zip: None,
        address: "1 Main Street".to_string(),
        phone: "13800000000".to_string(),
        tel: None,
        tag: None,
        is_default: true,
    }
}

#[async_trait]
impl AddressService for FakeAddressService {
    async fn add(&self, uid: i32, _username: String, _input: NewAddress) -> AppResult<AddressView> {
        Ok(address_view(1, uid))
    }

    async fn list(&self, uid: i32) -> AppResult<Vec<AddressSummary>> {
        Ok(vec![AddressSummary {
            aid: 1,
            uid,
            name: "Tom".to_string(),
            tag: None,
            province_name: "Hebei".to_string(),
            city_name: "Shijiazhuang".to_string(),
            area_name: "Changan".to_string(),
            address: "1 Main Street".to_string(),
            phone: "13800000000".to_string(),
            zip: None,
        }])
    }

    async fn get(&self, aid: i32, uid: i32) -> AppResult<AddressView> {
        match aid {
            99 => Err(AppError::AccessDenied),
            404 => Err(AppError::AddressNotFound),
            _ => Ok(address_view(aid, uid)),
        }
    }

    async fn set_default(&self, _aid: i32, _uid: i32, _username: String) -> AppResult<()> {
        Ok(())
    }

    async fn delete(&self, _aid: i32, _uid: i32, _username: String) -> AppResult<()> {
        Ok(())
    }
}

struct FakeCartService;

#[async_trait]
impl CartService for FakeCartService {
    async fn add(&self, _uid: i32, pid: i32, _amount: i32, _username: String) -> AppResult<()> {
        if pid == 0 {
            return Err(AppError::ProductNotFound);
        }
        Ok(())
    }

    async fn list(&self, _uid: i32) -> AppResult<Vec<CartView>> {
        Ok(vec![])
    }

    async fn increment(&self, _cid: i32, _uid: i32, _username: String) -> AppResult<i32> {
        Ok(2)
    }

    async fn selection(&self, uid: i32, cids: Vec<i32>) -> AppResult<Vec<CartView>> {
        Ok(cids
            .into_iter()
            .map(|cid| CartView {
                cid,
                uid,
                pid: 10000001,
                price: 500,
                num: 1,
                title: "Pen".to_string(),
                image: "/images/pen/".to_string(),
                real_price: 600,
            })
            .collect())
    }

    async fn remove(&self, _cid: i32, _uid: i32) -> AppResult<()> {
        Ok(())
    }
}

struct FakeProductService;

#[async_trait]
impl ProductService for FakeProductService {
    async fn hot_list(&self) -> AppResult<Vec<ProductSummary>> {
        Ok(vec![ProductSummary {
            id: 10000001,
            title: "Pen".to_string(),
            price: 600,
            image: "/images/pen/".to_string(),
        }])
    }

    async fn get(&self, id: i32) -> AppResult<Product> {
        if id != 10000001 {
            return Err(AppError::ProductNotFound);
        }
        Ok(Product {
            id,
            category_id: 1,
            item_type: "plain".to_string(),
            title: "Pen".to_string(),
            sell_point: "Writes".to_string(),
            price: 600,
            num: 10,
            image: "/images/pen/".to_string(),
            status: 1,
            priority: 1,
            created_time: Utc::now(),
            modified_time: Utc::now(),
        })
    }
}

struct FakeDistrictService;

#[async_trait]
impl DistrictService for FakeDistrictService {
    async fn list_by_parent(&self, parent: &str) -> AppResult<Vec<DistrictView>> {
        if parent != "86" {
            return Ok(vec![]);
        }
        Ok(vec![DistrictView {
            code: "110000".to_string(),
            name: "Beijing".to_string(),
        }])
    }

    async fn name_by_code(&self, _code: &str) -> AppResult<Option<String>> {
        Ok(None)
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn test_app() -> Router {
    let services = Services::new(
        Arc::new(FakeUserService),
        Arc::new(FakeAddressService),
        Arc::new(FakeCartService),
        Arc::new(FakeProductService),
        Arc::new(FakeDistrictService),
    );
    let database = Arc::new(Database::from_connection(DatabaseConnection::Disconnected));
    let state = AppState::new(&services, database);

    create_router(
        state,
        session_layer(&SessionSettings::default()),
        PathAllowList::default(),
    )
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, body)
}

fn json_request(method: &str, uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Log in as tom and return the `name=value` part of the session cookie.
async fn login(app: &Router) -> String {
    let (status, headers, _) = send(
        app,
        json_request(
            "POST",
            "/users/login",
            json!({"username": "tom", "password": "secret123"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let set_cookie = headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("login sets a session cookie");
    assert!(set_cookie.starts_with("STORE_SESSION="));
    set_cookie
        .split(';')
        .next()
        .unwrap_or_default()
        .to_string()
}

// =============================================================================
// Public Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_root_is_public() {
    let response = test_app().oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let (status, _, body) = send(&test_app(), get("/health", None)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["database"]["status"], "unhealthy");
}

#[tokio::test]
async fn test_hot_products_are_public() {
    let (status, _, body) = send(&test_app(), get("/products/hot", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], 10000001);
    assert_eq!(body[0]["title"], "Pen");
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let (status, _, body) = send(&test_app(), get("/products/5", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "PRODUCT_NOT_FOUND");
}

#[tokio::test]
async fn test_districts_default_to_provinces() {
    let (status, _, body) = send(&test_app(), get("/districts", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"code": "110000", "name": "Beijing"}]));
}

// =============================================================================
// Registration & Login Tests
// =============================================================================

#[tokio::test]
async fn test_register_returns_created() {
    let (status, _, body) = send(
        &test_app(),
        json_request(
            "POST",
            "/users/reg",
            json!({"username": "jerry", "password": "secret123"}),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"uid": 8, "username": "jerry"}));
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let (status, _, body) = send(
        &test_app(),
        json_request(
            "POST",
            "/users/reg",
            json!({"username": "taken", "password": "secret123"}),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "USERNAME_DUPLICATED");
}

#[tokio::test]
async fn test_register_short_password_is_rejected() {
    let (status, _, body) = send(
        &test_app(),
        json_request(
            "POST",
            "/users/reg",
            json!({"username": "jerry", "password": "123"}),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (status, headers, body) = send(
        &test_app(),
        json_request(
            "POST",
            "/users/login",
            json!({"username": "tom", "password": "nope-nope"}),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "PASSWORD_NOT_MATCH");
    assert!(headers.get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_login_unknown_user() {
    let (status, _, body) = send(
        &test_app(),
        json_request(
            "POST",
            "/users/login",
            json!({"username": "ghost", "password": "secret123"}),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "USER_NOT_FOUND");
}

// =============================================================================
// Interceptor Tests
// =============================================================================

#[tokio::test]
async fn test_protected_routes_require_session() {
    let app = test_app();

    for uri in ["/addresses", "/carts", "/users/me", "/unknown"] {
        let (status, _, body) = send(&app, get(uri, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_forged_cookie_is_rejected() {
    let (status, _, _) = send(
        &test_app(),
        get("/addresses", Some("STORE_SESSION=not-a-real-session")),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_cookie_opens_protected_routes() {
    let app = test_app();
    let cookie = login(&app).await;

    let (status, _, body) = send(&app, get("/users/me", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["uid"], 7);

    let (status, _, body) = send(&app, get("/addresses", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["uid"], 7);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = test_app();
    let cookie = login(&app).await;

    let (status, _, _) = send(
        &app,
        json_request("POST", "/users/logout", json!({}), Some(&cookie)),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, _) = send(&app, get("/users/me", Some(&cookie))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Address & Cart Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_foreign_address_is_forbidden() {
    let app = test_app();
    let cookie = login(&app).await;

    let (status, _, body) = send(&app, get("/addresses/99", Some(&cookie))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "ACCESS_DENIED");
}

#[tokio::test]
async fn test_add_address_validates_zip() {
    let app = test_app();
    let cookie = login(&app).await;
    let payload = json!({
        "name": "Tom",
        "province_code": "130000",
        "city_code": "130100",
        "area_code": "130102",
        "zip": "12",
        "address": "1 Main Street",
        "phone": "13800000000"
    });

    let (status, _, body) = send(
        &app,
        json_request("POST", "/addresses", payload, Some(&cookie)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Zip must be six digits");
}

#[tokio::test]
async fn test_add_address_returns_created_view() {
    let app = test_app();
    let cookie = login(&app).await;
    let payload = json!({
        "name": "Tom",
        "province_code": "130000",
        "city_code": "130100",
        "area_code": "130102",
        "address": "1 Main Street",
        "phone": "13800000000"
    });

    let (status, _, body) = send(
        &app,
        json_request("POST", "/addresses", payload, Some(&cookie)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["uid"], 7);
    assert_eq!(body["is_default"], true);
}

#[tokio::test]
async fn test_add_to_cart_rejects_zero_amount() {
    let app = test_app();
    let cookie = login(&app).await;

    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/carts",
            json!({"pid": 10000001, "amount": 0}),
            Some(&cookie),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_to_cart_rejects_huge_amount() {
    let app = test_app();
    let cookie = login(&app).await;

    let (status, _, body) = send(
        &app,
        json_request(
            "POST",
            "/carts",
            json!({"pid": 10000001, "amount": i32::MAX}),
            Some(&cookie),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_cart_increment_returns_quantity() {
    let app = test_app();
    let cookie = login(&app).await;

    let (status, _, body) = send(
        &app,
        json_request("PUT", "/carts/3/increment", json!({}), Some(&cookie)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"cid": 3, "num": 2}));
}

#[tokio::test]
async fn test_cart_selection_parses_ids() {
    let app = test_app();
    let cookie = login(&app).await;

    let (status, _, body) = send(&app, get("/carts/selection?cids=4,5", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(body[1]["cid"], 5);

    let (status, _, _) = send(&app, get("/carts/selection?cids=4,x", Some(&cookie))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
