use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, SubsecRound, Utc};
use sqlx::FromRow;
use sqlx::types::Json;
use std::fmt;
use thiserror::Error;

use crate::domain::models::{hotel::Hotel, payment::{PaymentDetails, PaymentMethod}, room_type::RoomType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    #[serde(rename = "Pending Payment")]
    PendingPayment,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Error)]
#[error("unknown booking status: {0}")]
pub struct UnknownStatus(pub String);

impl BookingStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::PendingPayment => "Pending Payment",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for BookingStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "Pending Payment" => Ok(BookingStatus::PendingPayment),
            "Confirmed" => Ok(BookingStatus::Confirmed),
            "Cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(UnknownStatus(value)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub user_email: String,
    pub hotel_id: String,
    pub room_type_id: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub status: BookingStatus,
    pub payment_details: Option<Json<PaymentDetails>>,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub user_email: String,
    pub hotel_id: String,
    pub room_type_id: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub payment: Option<PaymentDetails>,
}

impl Booking {
    /// A booking with a payment starts out confirmed, otherwise it is an unpaid hold.
    /// `created_at` is kept at millisecond precision so it can be echoed back as a lookup key.
    pub fn new(params: NewBookingParams, now: DateTime<Utc>) -> Self {
        let status = if params.payment.is_some() {
            BookingStatus::Confirmed
        } else {
            BookingStatus::PendingPayment
        };

        Self {
            id: Uuid::new_v4().to_string(),
            user_email: params.user_email,
            hotel_id: params.hotel_id,
            room_type_id: params.room_type_id,
            check_in: params.check_in,
            check_out: params.check_out,
            status,
            payment_details: params.payment.map(Json),
            created_at: now.trunc_subsecs(3),
        }
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_details.as_ref().map(|details| details.0.method())
    }
}

/// A booking as returned to callers, joined with its hotel and room type and
/// carrying the derived pricing.
#[derive(Debug, Serialize, Clone)]
pub struct BookingView {
    #[serde(flatten)]
    pub booking: Booking,
    pub payment_method: Option<PaymentMethod>,
    pub hotel: Option<Hotel>,
    pub room_type: Option<RoomType>,
    pub nights: Option<i64>,
    pub total_price: Option<f64>,
}
