pub mod analytics;
pub mod auth;
pub mod booking;
pub mod health;
pub mod hotel;
pub mod room_type;
