mod common;

use axum::http::StatusCode;
use chrono::Duration;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_analytics_counts_confirmed_revenue_only() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let (hotel_id, room_type_id) = app.seed_catalog(&admin, 100.0, 50.0).await;
    let guest = app.signup_and_login("stats@hotel.test").await;

    let (status, _) = app.request("POST", "/api/bookings", Some(&guest), Some(json!({
        "hotel_id": hotel_id,
        "room_type_id": room_type_id,
        "check_in": app.date_in(2),
        "check_out": app.date_in(4),
        "payment_method": "paypal",
        "payment_details": { "email": "stats@hotel.test" }
    }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.request("POST", "/api/bookings", Some(&guest), Some(json!({
        "hotel_id": hotel_id,
        "room_type_id": room_type_id,
        "check_in": app.date_in(5),
        "check_out": app.date_in(9)
    }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, report) = app.request("GET", "/api/analytics", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["total_revenue"].as_f64().unwrap(), 300.0);
    assert_eq!(report["total_bookings"], 2);
    assert_eq!(report["total_hotels"], 1);
    assert_eq!(report["occupancy_rate"].as_f64().unwrap(), 0.5);
    assert_eq!(report["popular_room_types"][0]["name"], "Deluxe");
    assert_eq!(report["popular_room_types"][0]["count"], 2);

    // The lapsed hold is counted but never earns revenue.
    app.clock.advance(Duration::minutes(15));
    let (_, all) = app.request("GET", "/api/bookings/all", Some(&admin), None).await;
    let statuses: Vec<&str> = all.as_array().unwrap().iter()
        .map(|b| b["status"].as_str().unwrap())
        .collect();
    assert!(statuses.contains(&"Cancelled"));
    assert!(statuses.contains(&"Confirmed"));

    let (_, report) = app.request("GET", "/api/analytics", Some(&admin), None).await;
    assert_eq!(report["total_revenue"].as_f64().unwrap(), 300.0);
    assert_eq!(report["total_bookings"], 2);
}

#[tokio::test]
async fn test_all_bookings_carry_their_own_hotel_and_room() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let (hotel_a, room_a) = app.seed_catalog(&admin, 100.0, 50.0).await;
    let (hotel_b, room_b) = app.seed_catalog(&admin, 200.0, 25.0).await;
    app.seed_catalog(&admin, 300.0, 10.0).await;
    let guest = app.signup_and_login("traveller@hotel.test").await;

    for (hotel_id, room_type_id) in [(&hotel_a, &room_a), (&hotel_b, &room_b)] {
        let (status, _) = app.request("POST", "/api/bookings", Some(&guest), Some(json!({
            "hotel_id": hotel_id,
            "room_type_id": room_type_id,
            "check_in": app.date_in(1),
            "check_out": app.date_in(2)
        }))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, all) = app.request("GET", "/api/bookings/all", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 2);
    for booking in all {
        assert_eq!(booking["hotel"]["id"], booking["hotel_id"]);
        assert_eq!(booking["room_type"]["id"], booking["room_type_id"]);
        let expected = if booking["hotel_id"] == hotel_a.as_str() { 150.0 } else { 225.0 };
        assert_eq!(booking["total_price"].as_f64().unwrap(), expected);
    }
}

#[tokio::test]
async fn test_admin_views_are_forbidden_to_guests() {
    let app = TestApp::new().await;
    let guest = app.signup_and_login("nosy@hotel.test").await;

    let (status, _) = app.request("GET", "/api/analytics", Some(&guest), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.request("GET", "/api/bookings/all", Some(&guest), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.request("GET", "/api/analytics", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_empty_analytics() {
    let app = TestApp::new().await;
    let admin = app.admin().await;

    let (status, report) = app.request("GET", "/api/analytics", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["total_revenue"].as_f64().unwrap(), 0.0);
    assert_eq!(report["total_bookings"], 0);
    assert_eq!(report["occupancy_rate"].as_f64().unwrap(), 0.0);
    assert!(report["popular_room_types"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_registration_rules() {
    let app = TestApp::new().await;

    assert_eq!(app.register("Ada", "ada@hotel.test", "secret-1").await, StatusCode::CREATED);
    assert_eq!(app.register("Ada Again", "ADA@hotel.test", "secret-2").await, StatusCode::CONFLICT);
    assert_eq!(app.register("", "blank@hotel.test", "secret").await, StatusCode::BAD_REQUEST);
    assert_eq!(app.register("No At", "not-an-email", "secret").await, StatusCode::BAD_REQUEST);

    let (status, _) = app.request("POST", "/api/auth/login", None, Some(json!({
        "email": "ada@hotel.test", "password": "wrong"
    }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.request("POST", "/api/auth/login", None, Some(json!({
        "email": "ghost@hotel.test", "password": "secret-1"
    }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_read_and_update() {
    let app = TestApp::new().await;
    let guest = app.signup_and_login("profile@hotel.test").await;

    let (status, me) = app.request("GET", "/api/auth/profile", Some(&guest), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "profile@hotel.test");
    assert_eq!(me["role"], "user");
    assert!(me.get("password_hash").is_none());

    let (status, me) = app.request("PUT", "/api/auth/profile", Some(&guest), Some(json!({
        "name": "Renamed", "password": "new-pass-456"
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["name"], "Renamed");

    let relogged = app.login("profile@hotel.test", "new-pass-456").await;
    let (status, _) = app.request("GET", "/api/auth/profile", Some(&relogged), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let (status, body) = app.request("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
