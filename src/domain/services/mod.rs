pub mod analytics;
pub mod auth_service;
pub mod booking_service;
pub mod pricing;
