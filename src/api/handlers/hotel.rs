use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::{CreateHotelRequest, UpdateHotelRequest};
use crate::domain::models::hotel::{Hotel, HotelDetails, NewHotelParams};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_hotels(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let hotels = state.hotel_repo.list().await?;
    Ok(Json(hotels))
}

pub async fn get_hotel(
    State(state): State<Arc<AppState>>,
    Path(hotel_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let hotel = state.hotel_repo.find_by_id(&hotel_id).await?
        .ok_or(AppError::NotFound("Hotel not found".into()))?;
    let room_types = state.room_type_repo.list_by_hotel(&hotel.id).await?;
    Ok(Json(HotelDetails { hotel, room_types }))
}

pub async fn create_hotel(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateHotelRequest>,
) -> Result<impl IntoResponse, AppError> {
    let hotel = Hotel::new(NewHotelParams {
        name: payload.name.trim().to_string(),
        location: payload.location.trim().to_string(),
        description: payload.description,
        price: payload.price,
        image: payload.image.filter(|url| !url.trim().is_empty()),
    });
    validate_hotel(&hotel)?;

    let created = state.hotel_repo.create(&hotel).await?;
    info!("Created hotel: {} ({})", created.name, created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_hotel(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(hotel_id): Path<String>,
    Json(payload): Json<UpdateHotelRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut hotel = state.hotel_repo.find_by_id(&hotel_id).await?
        .ok_or(AppError::NotFound("Hotel not found".into()))?;

    if let Some(v) = payload.name { hotel.name = v.trim().to_string(); }
    if let Some(v) = payload.location { hotel.location = v.trim().to_string(); }
    if let Some(v) = payload.description { hotel.description = v; }
    if let Some(v) = payload.price { hotel.price = v; }
    if let Some(v) = payload.image { hotel.image = Some(v).filter(|url| !url.trim().is_empty()); }
    validate_hotel(&hotel)?;

    let updated = state.hotel_repo.update(&hotel).await?;
    info!("Updated hotel: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_hotel(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(hotel_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.hotel_repo.delete(&hotel_id).await?;
    info!("Deleted hotel: {}", hotel_id);
    Ok(StatusCode::NO_CONTENT)
}

fn validate_hotel(hotel: &Hotel) -> Result<(), AppError> {
    if hotel.name.is_empty() || hotel.location.is_empty() {
        return Err(AppError::Validation("Hotel name and location are required".into()));
    }
    // Must stay positive: room type prices may be 0.
    if !hotel.price.is_finite() || hotel.price <= 0.0 {
        return Err(AppError::Validation("Hotel price must be a positive number".into()));
    }
    Ok(())
}
