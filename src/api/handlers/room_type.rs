use axum::{extract::{State, Path, Query}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::{CreateRoomTypeRequest, RoomTypeQuery, UpdateRoomTypeRequest};
use crate::domain::models::hotel::Hotel;
use crate::domain::models::room_type::{RoomType, RoomTypeWithHotel};
use crate::error::AppError;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::info;

pub async fn list_room_types(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RoomTypeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let room_types = match &query.hotel_id {
        Some(hotel_id) => state.room_type_repo.list_by_hotel(hotel_id).await?,
        None => state.room_type_repo.list().await?,
    };

    let hotel_ids: HashSet<String> = room_types.iter().map(|rt| rt.hotel_id.clone()).collect();
    let hotels: HashMap<String, Hotel> = state.hotel_repo
        .find_by_ids(&hotel_ids.into_iter().collect::<Vec<_>>()).await?
        .into_iter()
        .map(|h| (h.id.clone(), h))
        .collect();

    let with_hotels: Vec<RoomTypeWithHotel> = room_types.into_iter()
        .map(|room_type| RoomTypeWithHotel {
            hotel: hotels.get(&room_type.hotel_id).cloned(),
            room_type,
        })
        .collect();

    Ok(Json(with_hotels))
}

pub async fn create_room_type(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateRoomTypeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let room_type = RoomType::new(payload.name.trim().to_string(), payload.price, payload.hotel_id);
    validate_room_type(&room_type)?;
    ensure_hotel_exists(&state, &room_type.hotel_id).await?;

    let created = state.room_type_repo.create(&room_type).await?;
    info!("Created room type: {} for hotel {}", created.name, created.hotel_id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_room_type(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(room_type_id): Path<String>,
    Json(payload): Json<UpdateRoomTypeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut room_type = state.room_type_repo.find_by_id(&room_type_id).await?
        .ok_or(AppError::NotFound("Room type not found".into()))?;

    if let Some(v) = payload.name { room_type.name = v.trim().to_string(); }
    if let Some(v) = payload.price { room_type.price = v; }
    if let Some(v) = payload.hotel_id {
        ensure_hotel_exists(&state, &v).await?;
        room_type.hotel_id = v;
    }
    validate_room_type(&room_type)?;

    let updated = state.room_type_repo.update(&room_type).await?;
    info!("Updated room type: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_room_type(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(room_type_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.room_type_repo.delete(&room_type_id).await?;
    info!("Deleted room type: {}", room_type_id);
    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_hotel_exists(state: &AppState, hotel_id: &str) -> Result<(), AppError> {
    state.hotel_repo.find_by_id(hotel_id).await?
        .map(|_| ())
        .ok_or(AppError::NotFound("Hotel not found".into()))
}

fn validate_room_type(room_type: &RoomType) -> Result<(), AppError> {
    if room_type.name.is_empty() {
        return Err(AppError::Validation("Room type name is required".into()));
    }
    if !room_type.price.is_finite() || room_type.price < 0.0 {
        return Err(AppError::Validation("Room type price must be a non-negative number".into()));
    }
    Ok(())
}
