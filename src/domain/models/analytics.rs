use serde::Serialize;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RoomTypeCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AnalyticsReport {
    pub total_revenue: f64,
    pub total_bookings: usize,
    /// Percentage of hotel-nights booked over a year, one decimal place.
    pub occupancy_rate: f64,
    pub popular_room_types: Vec<RoomTypeCount>,
    pub total_hotels: usize,
}
