use std::collections::HashMap;

use crate::domain::models::analytics::{AnalyticsReport, RoomTypeCount};
use crate::domain::models::booking::{BookingStatus, BookingView};

const DAYS_PER_YEAR: f64 = 365.0;

pub fn summarize(bookings: &[BookingView], total_hotels: usize) -> AnalyticsReport {
    let total_revenue: f64 = bookings.iter()
        .filter(|b| b.booking.status == BookingStatus::Confirmed)
        .filter_map(|b| b.total_price)
        .sum();

    let occupancy_rate = if total_hotels > 0 {
        let rate = bookings.len() as f64 / (total_hotels as f64 * DAYS_PER_YEAR) * 100.0;
        (rate * 10.0).round() / 10.0
    } else {
        0.0
    };

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for room_type in bookings.iter().filter_map(|b| b.room_type.as_ref()) {
        *counts.entry(room_type.name.as_str()).or_default() += 1;
    }
    let mut popular_room_types: Vec<RoomTypeCount> = counts.into_iter()
        .map(|(name, count)| RoomTypeCount { name: name.to_string(), count })
        .collect();
    popular_room_types.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    AnalyticsReport {
        total_revenue,
        total_bookings: bookings.len(),
        occupancy_rate,
        popular_room_types,
        total_hotels,
    }
}
