use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::domain::services::analytics::summarize;
use crate::error::AppError;
use std::sync::Arc;

pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_service.list_all().await?;
    let hotels = state.hotel_repo.list().await?;
    Ok(Json(summarize(&bookings, hotels.len())))
}
