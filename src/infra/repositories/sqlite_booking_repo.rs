use crate::domain::{
    models::{booking::{Booking, BookingStatus}, payment::PaymentDetails},
    ports::BookingRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{types::Json, SqlitePool};
use chrono::{DateTime, Utc};

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, user_email, hotel_id, room_type_id, check_in, check_out, status, payment_method, payment_details, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.user_email).bind(&booking.hotel_id).bind(&booking.room_type_id)
            .bind(booking.check_in).bind(booking.check_out).bind(booking.status.as_str())
            .bind(booking.payment_method().map(|m| m.as_str())).bind(&booking.payment_details)
            .bind(booking.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_user(&self, user_email: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE user_email = ? ORDER BY created_at DESC").bind(user_email).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_for_stay(&self, user_email: &str, hotel_id: &str, room_type_id: &str, check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE user_email = ? AND hotel_id = ? AND room_type_id = ? AND check_in = ? AND check_out = ? ORDER BY created_at DESC"
        )
            .bind(user_email).bind(hotel_id).bind(room_type_id).bind(check_in).bind(check_out)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn confirm_pending(&self, id: &str, payment: &PaymentDetails, not_before: DateTime<Utc>) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = ?, payment_method = ?, payment_details = ?
             WHERE id = ? AND status = ? AND created_at > ?
             RETURNING *"
        )
            .bind(BookingStatus::Confirmed.as_str()).bind(payment.method().as_str()).bind(Json(payment))
            .bind(id).bind(BookingStatus::PendingPayment.as_str()).bind(not_before)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn expire_pending(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE bookings SET status = ? WHERE status = ? AND created_at <= ?")
            .bind(BookingStatus::Cancelled.as_str()).bind(BookingStatus::PendingPayment.as_str()).bind(cutoff)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected())
    }
    async fn cancel(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET status = ? WHERE id = ? RETURNING *")
            .bind(BookingStatus::Cancelled.as_str()).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
}
