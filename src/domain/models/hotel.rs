use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::models::room_type::RoomType;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub location: String,
    pub description: String,
    pub price: f64,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewHotelParams {
    pub name: String,
    pub location: String,
    pub description: String,
    pub price: f64,
    pub image: Option<String>,
}

impl Hotel {
    pub fn new(params: NewHotelParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            location: params.location,
            description: params.description,
            price: params.price,
            image: params.image,
            created_at: Utc::now(),
        }
    }
}

/// A hotel together with the room types it offers.
#[derive(Debug, Serialize, Clone)]
pub struct HotelDetails {
    #[serde(flatten)]
    pub hotel: Hotel,
    pub room_types: Vec<RoomType>,
}
