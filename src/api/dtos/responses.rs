use serde::Serialize;

use crate::domain::models::booking::Booking;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct CancelledBookingResponse {
    pub message: String,
    pub booking: Booking,
}
