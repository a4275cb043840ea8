use crate::domain::{
    models::{booking::{Booking, BookingStatus}, payment::PaymentDetails},
    ports::BookingRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use chrono::{DateTime, Utc};

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, user_email, hotel_id, room_type_id, check_in, check_out, status, payment_method, payment_details, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.user_email).bind(&booking.hotel_id).bind(&booking.room_type_id)
            .bind(booking.check_in).bind(booking.check_out).bind(booking.status.as_str())
            .bind(booking.payment_method().map(|m| m.as_str())).bind(&booking.payment_details)
            .bind(booking.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_user(&self, user_email: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE user_email = $1 ORDER BY created_at DESC").bind(user_email).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_for_stay(&self, user_email: &str, hotel_id: &str, room_type_id: &str, check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE user_email = $1 AND hotel_id = $2 AND room_type_id = $3 AND check_in = $4 AND check_out = $5 ORDER BY created_at DESC"
        )
            .bind(user_email).bind(hotel_id).bind(room_type_id).bind(check_in).bind(check_out)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn confirm_pending(&self, id: &str, payment: &PaymentDetails, not_before: DateTime<Utc>) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $1, payment_method = $2, payment_details = $3
             WHERE id = $4 AND status = $5 AND created_at > $6
             RETURNING *"
        )
            .bind(BookingStatus::Confirmed.as_str()).bind(payment.method().as_str()).bind(Json(payment))
            .bind(id).bind(BookingStatus::PendingPayment.as_str()).bind(not_before)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn expire_pending(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE bookings SET status = $1 WHERE status = $2 AND created_at <= $3")
            .bind(BookingStatus::Cancelled.as_str()).bind(BookingStatus::PendingPayment.as_str()).bind(cutoff)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected())
    }
    async fn cancel(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET status = $1 WHERE id = $2 RETURNING *")
            .bind(BookingStatus::Cancelled.as_str()).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
}
