pub mod analytics;
pub mod auth;
pub mod booking;
pub mod hotel;
pub mod payment;
pub mod room_type;
pub mod user;
