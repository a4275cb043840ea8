use axum::{
    body::Body,
    extract::Request,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{analytics, auth, booking, health, hotel, room_type};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Accounts
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/profile", get(auth::get_profile).put(auth::update_profile))

        // Catalog
        .route("/api/hotels", get(hotel::list_hotels).post(hotel::create_hotel))
        .route("/api/hotels/{hotel_id}", get(hotel::get_hotel).put(hotel::update_hotel).delete(hotel::delete_hotel))
        .route("/api/roomtypes", get(room_type::list_room_types).post(room_type::create_room_type))
        .route("/api/roomtypes/{room_type_id}", put(room_type::update_room_type).delete(room_type::delete_room_type))

        // Bookings
        .route("/api/bookings", get(booking::list_my_bookings).post(booking::create_booking).put(booking::pay_booking))
        .route("/api/bookings/all", get(booking::list_all_bookings))
        .route("/api/bookings/{booking_id}", delete(booking::cancel_booking))

        // Back-office
        .route("/api/analytics", get(analytics::get_analytics))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                        role = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
