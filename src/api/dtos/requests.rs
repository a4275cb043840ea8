use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

use crate::domain::models::payment::{PaymentDetails, PaymentMethod};
use crate::domain::services::booking_service::{PendingBookingRef, StayRequest};
use crate::error::AppError;

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateHotelRequest {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub image: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateHotelRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateRoomTypeRequest {
    pub name: String,
    pub price: f64,
    pub hotel_id: String,
}

#[derive(Deserialize)]
pub struct UpdateRoomTypeRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub hotel_id: Option<String>,
}

#[derive(Deserialize)]
pub struct RoomTypeQuery {
    pub hotel_id: Option<String>,
}

/// Body of `POST /api/bookings`. With a payment method the booking is confirmed
/// immediately, otherwise it is created as an unpaid hold.
#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub hotel_id: Option<String>,
    pub room_type_id: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub payment_method: Option<String>,
    pub payment_details: Option<serde_json::Value>,
}

impl CreateBookingRequest {
    pub fn stay(&self) -> Result<StayRequest, AppError> {
        let (Some(hotel_id), Some(room_type_id), Some(check_in), Some(check_out)) =
            (&self.hotel_id, &self.room_type_id, &self.check_in, &self.check_out)
        else {
            return Err(AppError::Validation("hotel_id, room_type_id, check_in, and check_out are required".into()));
        };

        Ok(StayRequest {
            hotel_id: hotel_id.clone(),
            room_type_id: room_type_id.clone(),
            check_in: parse_date("check_in", check_in)?,
            check_out: parse_date("check_out", check_out)?,
        })
    }

    pub fn payment(&self) -> Result<Option<PaymentDetails>, AppError> {
        parse_payment(self.payment_method.as_deref(), self.payment_details.clone())
    }
}

/// Body of `PUT /api/bookings`: pays a pending booking named either by `id`
/// or by the fields it was created with.
#[derive(Deserialize)]
pub struct PayBookingRequest {
    pub id: Option<String>,
    pub hotel_id: Option<String>,
    pub room_type_id: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub created_at: Option<String>,
    pub payment_method: Option<String>,
    pub payment_details: Option<serde_json::Value>,
}

impl PayBookingRequest {
    pub fn reference(&self) -> Result<PendingBookingRef, AppError> {
        if let Some(id) = &self.id {
            return Ok(PendingBookingRef::Id(id.clone()));
        }

        let (Some(hotel_id), Some(room_type_id), Some(check_in), Some(check_out), Some(created_at)) =
            (&self.hotel_id, &self.room_type_id, &self.check_in, &self.check_out, &self.created_at)
        else {
            return Err(AppError::Validation("Missing required fields for payment update".into()));
        };

        Ok(PendingBookingRef::Key {
            hotel_id: hotel_id.clone(),
            room_type_id: room_type_id.clone(),
            check_in: parse_date("check_in", check_in)?,
            check_out: parse_date("check_out", check_out)?,
            created_at: parse_date("created_at", created_at)?,
        })
    }

    pub fn payment(&self) -> Result<PaymentDetails, AppError> {
        parse_payment(self.payment_method.as_deref(), self.payment_details.clone())?
            .ok_or(AppError::Validation("payment_method and payment_details are required".into()))
    }
}

fn parse_payment(method: Option<&str>, details: Option<serde_json::Value>) -> Result<Option<PaymentDetails>, AppError> {
    match (method, details) {
        (None, None) => Ok(None),
        (None, Some(_)) => Err(AppError::Validation("payment_method is required when payment_details are given".into())),
        (Some(_), None) => Err(AppError::Validation("payment_details are required for the chosen payment_method".into())),
        (Some(method), Some(details)) => {
            let method: PaymentMethod = method.parse()?;
            PaymentDetails::parse(method, details).map(Some)
        }
    }
}

/// Accepts an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (taken as midnight UTC).
pub fn parse_date(field: &str, value: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| AppError::Validation(format!("Invalid date format for {}", field)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_date_formats() {
        let midnight = Utc.with_ymd_and_hms(2024, 1, 4, 0, 0, 0).unwrap();
        assert_eq!(parse_date("check_in", "2024-01-04").unwrap(), midnight);
        assert_eq!(parse_date("check_in", "2024-01-04T00:00:00Z").unwrap(), midnight);
        assert_eq!(parse_date("check_in", "2024-01-04T02:00:00+02:00").unwrap(), midnight);
        assert!(matches!(parse_date("check_in", "04/01/2024"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_payment_requires_both_parts() {
        assert!(parse_payment(None, None).unwrap().is_none());
        assert!(parse_payment(Some("paypal"), None).is_err());
        assert!(parse_payment(None, Some(serde_json::json!({"email": "a@b.c"}))).is_err());

        let paypal = parse_payment(Some("paypal"), Some(serde_json::json!({"email": "a@b.c"}))).unwrap();
        assert_eq!(paypal.map(|p| p.method()), Some(PaymentMethod::Paypal));
    }
}
