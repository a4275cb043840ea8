use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::models::hotel::Hotel;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct RoomType {
    pub id: String,
    pub name: String,
    /// Nightly surcharge on top of the hotel's base price.
    pub price: f64,
    pub hotel_id: String,
    pub created_at: DateTime<Utc>,
}

impl RoomType {
    pub fn new(name: String, price: f64, hotel_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            price,
            hotel_id,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct RoomTypeWithHotel {
    #[serde(flatten)]
    pub room_type: RoomType,
    pub hotel: Option<Hotel>,
}
