use std::sync::Arc;
use crate::domain::ports::{HotelRepository, RoomTypeRepository, UserRepository};
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::booking_service::BookingService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub hotel_repo: Arc<dyn HotelRepository>,
    pub room_type_repo: Arc<dyn RoomTypeRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub auth_service: Arc<AuthService>,
    pub booking_service: Arc<BookingService>,
}
