use crate::domain::models::{
    booking::Booking, hotel::Hotel, payment::PaymentDetails, room_type::RoomType, user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn create(&self, hotel: &Hotel) -> Result<Hotel, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Hotel>, AppError>;
    /// Hotels among `ids`; unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Hotel>, AppError>;
    async fn list(&self) -> Result<Vec<Hotel>, AppError>;
    async fn update(&self, hotel: &Hotel) -> Result<Hotel, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait RoomTypeRepository: Send + Sync {
    async fn create(&self, room_type: &RoomType) -> Result<RoomType, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<RoomType>, AppError>;
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<RoomType>, AppError>;
    async fn list(&self) -> Result<Vec<RoomType>, AppError>;
    async fn list_by_hotel(&self, hotel_id: &str) -> Result<Vec<RoomType>, AppError>;
    async fn update(&self, room_type: &RoomType) -> Result<RoomType, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn list_by_user(&self, user_email: &str) -> Result<Vec<Booking>, AppError>;
    async fn list_all(&self) -> Result<Vec<Booking>, AppError>;
    /// Bookings of one user for the same stay, in any status, newest first.
    async fn list_for_stay(&self, user_email: &str, hotel_id: &str, room_type_id: &str, check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> Result<Vec<Booking>, AppError>;
    /// Confirms the booking only if it is still pending and was created after `not_before`.
    async fn confirm_pending(&self, id: &str, payment: &PaymentDetails, not_before: DateTime<Utc>) -> Result<Option<Booking>, AppError>;
    /// Cancels every pending booking created at or before `cutoff`. Returns the number of rows changed.
    async fn expire_pending(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError>;
    async fn cancel(&self, id: &str) -> Result<Option<Booking>, AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn update(&self, user: &User) -> Result<User, AppError>;
}

/// Source of the current time, injected so hold expiry can be driven in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
