use chrono::{DateTime, Utc};

use crate::error::AppError;

const MS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub nights: i64,
    pub total_price: f64,
}

/// Whole nights between check-in and check-out, rounding partial days up.
pub fn nights(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i64 {
    let ms = (check_out - check_in).num_milliseconds();
    if ms > 0 {
        (ms + MS_PER_DAY - 1) / MS_PER_DAY
    } else {
        // integer division truncates toward zero, which is the ceiling for non-positive spans
        ms / MS_PER_DAY
    }
}

pub fn total_price(hotel_price: f64, room_type_price: f64, nights: i64) -> f64 {
    (hotel_price + room_type_price) * nights as f64
}

pub fn quote(hotel_price: f64, room_type_price: f64, check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> Result<Quote, AppError> {
    let nights = nights(check_in, check_out);
    if nights < 1 {
        return Err(AppError::Validation("Booking must be at least 1 night".into()));
    }
    Ok(Quote {
        nights,
        total_price: total_price(hotel_price, room_type_price, nights),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_three_night_stay() {
        let q = quote(100.0, 50.0, day(2024, 1, 1), day(2024, 1, 4)).unwrap();
        assert_eq!(q.nights, 3);
        assert_eq!(q.total_price, 450.0);
    }

    #[test]
    fn test_partial_day_rounds_up() {
        let check_in = day(2024, 3, 10);
        let check_out = check_in + Duration::days(1) + Duration::hours(2);
        assert_eq!(nights(check_in, check_out), 2);

        let q = quote(80.0, 0.0, check_in, check_in + Duration::hours(1)).unwrap();
        assert_eq!(q.nights, 1);
        assert_eq!(q.total_price, 80.0);
    }

    #[test]
    fn test_same_day_or_reversed_is_rejected() {
        let d = day(2024, 5, 5);
        assert!(matches!(quote(100.0, 50.0, d, d), Err(AppError::Validation(_))));
        assert!(matches!(quote(100.0, 50.0, d, d - Duration::days(2)), Err(AppError::Validation(_))));
        assert_eq!(nights(d, d - Duration::days(2)), -2);
    }

    #[test]
    fn test_totals_stay_positive_across_ranges() {
        let start = day(2025, 12, 28);
        for n in 1..=40 {
            let q = quote(99.5, 20.25, start, start + Duration::days(n)).unwrap();
            assert_eq!(q.nights, n);
            assert!(q.total_price > 0.0);
            assert_eq!(q.total_price, 119.75 * n as f64);
        }
    }
}
