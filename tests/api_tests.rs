use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use vehicle_rental::config::environment::EnvironmentConfig;
use vehicle_rental::repositories::fixtures::{self, BENTLEY_ID, SAFARI_JEEP_ID};
use vehicle_rental::repositories::InMemoryStore;
use vehicle_rental::routes::create_router;
use vehicle_rental::state::AppState;

const ADMIN_CODE: &str = "fleet-admin";

async fn create_test_app() -> Router {
    let config = EnvironmentConfig {
        admin_invite_code: Some(ADMIN_CODE.to_string()),
        bcrypt_cost: 4,
        ..EnvironmentConfig::default()
    };
    let store = InMemoryStore::new();
    fixtures::seed(&store, &store).await.unwrap();
    create_router(AppState::in_memory(config, store))
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
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
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn register(app: &Router, email: &str, admin_code: Option<&str>) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Aline Mukamana",
            "email": email,
            "password": "secret123",
            "confirm_password": "secret123",
            "admin_code": admin_code,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body["data"]["access_token"].as_str().unwrap().to_string()
}

fn date_in(days: i64) -> String {
    (Utc::now().date_naive() + Duration::days(days)).format("%Y-%m-%d").to_string()
}

fn card() -> Value {
    json!({
        "card_number": "4111 1111 1111 1111",
        "card_holder": "Aline Mukamana",
        "expiry_date": "12/99",
        "cvv": "123",
    })
}

/// Checkout completo hasta la reserva; devuelve el id de la reserva
async fn book_safari_jeep(app: &Router, token: &str) -> String {
    let (_, started) = send(app, Method::POST, "/api/checkout", Some(token), Some(json!({ "vehicle_id": SAFARI_JEEP_ID }))).await;
    let checkout_id = started["data"]["id"].as_str().unwrap().to_string();

    send(
        app,
        Method::PUT,
        &format!("/api/checkout/{}/dates", checkout_id),
        Some(token),
        Some(json!({ "pickup_date": date_in(10), "return_date": date_in(13) })),
    )
    .await;
    send(app, Method::POST, &format!("/api/checkout/{}/payment", checkout_id), Some(token), None).await;
    send(app, Method::POST, &format!("/api/checkout/{}/payment-method", checkout_id), Some(token), Some(card())).await;
    let (status, body) = send(app, Method::POST, &format!("/api/checkout/{}/confirm", checkout_id), Some(token), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_and_filter_vehicles() {
    let app = create_test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/vehicles", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 6);

    let (_, body) = send(&app, Method::GET, "/api/vehicles?category=suv", None, None).await;
    let suvs = body["data"].as_array().unwrap();
    assert!(!suvs.is_empty());
    assert!(suvs.iter().all(|v| v["category"] == "suv"));

    let (_, body) = send(&app, Method::GET, "/api/vehicles?category=all&search=safari", None, None).await;
    assert_eq!(body["data"][0]["id"], SAFARI_JEEP_ID.to_string());
}

#[tokio::test]
async fn test_quote_endpoint() {
    let app = create_test_app().await;
    let uri = format!(
        "/api/vehicles/{}/quote?pickup_date={}&return_date={}",
        SAFARI_JEEP_ID,
        date_in(5),
        date_in(8)
    );
    let (status, body) = send(&app, Method::GET, &uri, None, None).await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["duration_days"], 3);
    assert_eq!(body["data"]["total_price"], "897.00");
}

#[tokio::test]
async fn test_quote_rejects_reversed_dates() {
    let app = create_test_app().await;
    let uri = format!(
        "/api/vehicles/{}/quote?pickup_date={}&return_date={}",
        SAFARI_JEEP_ID,
        date_in(8),
        date_in(5)
    );
    let (status, body) = send(&app, Method::GET, &uri, None, None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_DATE_RANGE");
}

#[tokio::test]
async fn test_register_login_and_profile() {
    let app = create_test_app().await;
    register(&app, "aline@example.com", None).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "aline@example.com", "password": "secret123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["access_token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "aline@example.com");
    assert!(body["data"].get("password_hash").is_none());

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "aline@example.com", "password": "wrong-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_anonymous_checkout_requires_login_to_proceed() {
    let app = create_test_app().await;
    let (status, started) = send(&app, Method::POST, "/api/checkout", None, Some(json!({ "vehicle_id": SAFARI_JEEP_ID }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(started["data"]["step"], "summary");
    let checkout_id = started["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/checkout/{}/dates", checkout_id),
        None,
        Some(json!({ "pickup_date": date_in(3), "return_date": date_in(5) })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["quote"]["duration_days"], 2);

    let (status, body) = send(&app, Method::POST, &format!("/api/checkout/{}/payment", checkout_id), None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
    assert_eq!(body["details"]["redirect"], "/login");

    // Tras iniciar sesión el mismo checkout continúa
    let token = register(&app, "aline@example.com", None).await;
    let (status, body) = send(&app, Method::POST, &format!("/api/checkout/{}/payment", checkout_id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["step"], "payment");
}

#[tokio::test]
async fn test_full_checkout_creates_pending_paid_booking() {
    let app = create_test_app().await;
    let token = register(&app, "aline@example.com", None).await;
    let booking_id = book_safari_jeep(&app, &token).await;

    let (status, body) = send(&app, Method::GET, &format!("/api/bookings/{}", booking_id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["payment_status"], "paid");
    assert_eq!(body["data"]["total_price"], "897.00");
    assert_eq!(body["data"]["vehicle_name"], "Premium Safari Jeep");

    let (_, body) = send(&app, Method::GET, "/api/bookings?tab=upcoming", Some(&token), None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    let (_, body) = send(&app, Method::GET, "/api/bookings?tab=cancelled", Some(&token), None).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (_, body) = send(&app, Method::GET, "/api/payment-methods", Some(&token), None).await;
    assert_eq!(body["data"][0]["last4"], "1111");
}

#[tokio::test]
async fn test_unavailable_vehicle_cannot_proceed() {
    let app = create_test_app().await;
    let admin = register(&app, "boss@example.com", Some(ADMIN_CODE)).await;
    let token = register(&app, "aline@example.com", None).await;

    let (_, started) = send(&app, Method::POST, "/api/checkout", Some(&token), Some(json!({ "vehicle_id": BENTLEY_ID }))).await;
    let checkout_id = started["data"]["id"].as_str().unwrap().to_string();
    send(
        &app,
        Method::PUT,
        &format!("/api/checkout/{}/dates", checkout_id),
        Some(&token),
        Some(json!({ "pickup_date": date_in(3), "return_date": date_in(5) })),
    )
    .await;

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/admin/vehicles/{}/availability", BENTLEY_ID),
        Some(&admin),
        Some(json!({ "available": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::POST, &format!("/api/checkout/{}/payment", checkout_id), Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "VEHICLE_UNAVAILABLE");
}

#[tokio::test]
async fn test_checkout_is_private_to_its_owner() {
    let app = create_test_app().await;
    let owner = register(&app, "aline@example.com", None).await;
    let other = register(&app, "eric@example.com", None).await;

    let (_, started) = send(&app, Method::POST, "/api/checkout", Some(&owner), Some(json!({ "vehicle_id": SAFARI_JEEP_ID }))).await;
    let checkout_id = started["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, Method::GET, &format!("/api/checkout/{}", checkout_id), Some(&other), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/checkout/{}", checkout_id), Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, &format!("/api/checkout/{}", checkout_id), Some(&owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancel_paid_booking_refunds() {
    let app = create_test_app().await;
    let token = register(&app, "aline@example.com", None).await;
    let booking_id = book_safari_jeep(&app, &token).await;

    let (status, body) = send(&app, Method::POST, &format!("/api/bookings/{}/cancel", booking_id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["status"], "cancelled");
    assert_eq!(body["data"]["payment_status"], "refunded");

    let (status, _) = send(&app, Method::POST, &format!("/api/bookings/{}/cancel", booking_id), Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_admin_endpoints_require_admin() {
    let app = create_test_app().await;
    let token = register(&app, "aline@example.com", None).await;

    let (status, _) = send(&app, Method::GET, "/api/admin/dashboard", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/admin/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/admin/vehicles/{}", SAFARI_JEEP_ID), Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_dashboard_and_booking_management() {
    let app = create_test_app().await;
    let admin = register(&app, "boss@example.com", Some(ADMIN_CODE)).await;
    let token = register(&app, "aline@example.com", None).await;
    let booking_id = book_safari_jeep(&app, &token).await;

    let (status, body) = send(&app, Method::GET, "/api/admin/dashboard", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_vehicles"], 6);
    assert_eq!(body["data"]["total_bookings"], 1);
    assert_eq!(body["data"]["pending_bookings"], 1);
    assert_eq!(body["data"]["total_users"], 2);
    assert_eq!(body["data"]["total_drivers"], 4);
    assert_eq!(body["data"]["total_revenue"], "897.00");

    let (_, body) = send(&app, Method::GET, "/api/admin/bookings?status=pending&search=safari", Some(&admin), None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::GET, "/api/admin/bookings?status=bogus", Some(&admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/admin/bookings/{}/status", booking_id),
        Some(&admin),
        Some(json!({ "status": "confirmed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "confirmed");

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/admin/bookings/{}/status", booking_id),
        Some(&admin),
        Some(json!({ "status": "pending" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_admin_driver_crud() {
    let app = create_test_app().await;
    let admin = register(&app, "boss@example.com", Some(ADMIN_CODE)).await;

    let (status, body) = send(&app, Method::GET, "/api/admin/drivers?available_only=true", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let (status, body) = send(&app, Method::GET, "/api/admin/drivers?search=diane", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let diane_id = body["data"][0]["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, Method::DELETE, &format!("/api/admin/drivers/{}", diane_id), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, &format!("/api/admin/drivers/{}", diane_id), Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn vehicle_payload(daily_rate: &str) -> Value {
    json!({
        "name": "Kigali City Hopper",
        "brand": "Toyota",
        "model": "Yaris",
        "year": 2022,
        "daily_rate": daily_rate,
        "seat_count": 5,
        "transmission": "Automatic",
        "fuel_type": "Hybrid",
        "category": "economy",
        "location": "Kigali",
        "description": "Compacto para la ciudad",
        "image_url": "https://images.example.com/yaris.jpg",
    })
}

#[tokio::test]
async fn test_admin_vehicle_rate_keeps_currency_scale() {
    let app = create_test_app().await;
    let admin = register(&app, "boss@example.com", Some(ADMIN_CODE)).await;

    let (status, body) = send(&app, Method::POST, "/api/admin/vehicles", Some(&admin), Some(vehicle_payload("33.333"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = send(&app, Method::POST, "/api/admin/vehicles", Some(&admin), Some(vehicle_payload("33.33"))).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let vehicle_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/admin/vehicles/{}", vehicle_id),
        Some(&admin),
        Some(json!({ "daily_rate": "12.005" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);

    let uri = format!(
        "/api/vehicles/{}/quote?pickup_date={}&return_date={}",
        vehicle_id,
        date_in(5),
        date_in(8)
    );
    let (status, body) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["duration_days"], 3);
    assert_eq!(body["data"]["total_price"], "99.99");
}

#[tokio::test]
async fn test_saved_card_selection_and_back_clears_payment_method() {
    let app = create_test_app().await;
    let token = register(&app, "aline@example.com", None).await;

    let (status, body) = send(&app, Method::POST, "/api/payment-methods", Some(&token), Some(card())).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let saved_token = body["data"]["token"].as_str().unwrap().to_string();

    let (_, started) = send(&app, Method::POST, "/api/checkout", Some(&token), Some(json!({ "vehicle_id": SAFARI_JEEP_ID }))).await;
    let checkout_id = started["data"]["id"].as_str().unwrap().to_string();
    send(
        &app,
        Method::PUT,
        &format!("/api/checkout/{}/dates", checkout_id),
        Some(&token),
        Some(json!({ "pickup_date": date_in(10), "return_date": date_in(13) })),
    )
    .await;
    let (status, _) = send(&app, Method::POST, &format!("/api/checkout/{}/payment", checkout_id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/checkout/{}/payment-method", checkout_id),
        Some(&token),
        Some(json!({ "payment_method_token": saved_token })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["payment_method"], saved_token.as_str());

    let (status, body) = send(&app, Method::POST, &format!("/api/checkout/{}/back", checkout_id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["step"], "summary");
    assert!(body["data"]["payment_method"].is_null());

    let (status, _) = send(&app, Method::POST, &format!("/api/checkout/{}/payment", checkout_id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&app, Method::POST, &format!("/api/checkout/{}/confirm", checkout_id), Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    assert_eq!(body["details"]["field"], "payment_method");

    // Un token ajeno o inventado no se acepta
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/checkout/{}/payment-method", checkout_id),
        Some(&token),
        Some(json!({ "payment_method_token": "pm_unknown" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "payment_method");
}
