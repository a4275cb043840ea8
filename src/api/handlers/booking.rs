use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::{AdminUser, AuthUser};
use crate::api::dtos::requests::{CreateBookingRequest, PayBookingRequest};
use crate::api::dtos::responses::CancelledBookingResponse;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_my_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_service.list_for_user(&principal.email).await?;
    Ok(Json(bookings))
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let stay = payload.stay()?;

    let created = match payload.payment()? {
        Some(payment) => state.booking_service.create_paid(&principal.email, stay, payment).await?,
        None => state.booking_service.create_hold(&principal.email, stay).await?,
    };

    info!("create_booking: {} is {}", created.booking.id, created.booking.status);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn pay_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
    Json(payload): Json<PayBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let reference = payload.reference()?;
    let payment = payload.payment()?;

    let paid = state.booking_service.pay_pending(&principal.email, reference, payment).await?;
    Ok(Json(paid))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_service.cancel(&principal, &booking_id).await?;
    Ok(Json(CancelledBookingResponse {
        message: "Booking cancelled".into(),
        booking,
    }))
}

pub async fn list_all_bookings(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_service.list_all().await?;
    Ok(Json(bookings))
}
