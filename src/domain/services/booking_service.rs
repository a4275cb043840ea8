use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use chrono::{DateTime, Duration, NaiveTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::models::{
    auth::Principal,
    booking::{Booking, BookingStatus, BookingView, NewBookingParams},
    hotel::Hotel,
    payment::PaymentDetails,
    room_type::RoomType,
};
use crate::domain::ports::{BookingRepository, Clock, HotelRepository, RoomTypeRepository};
use crate::domain::services::pricing;
use crate::error::AppError;

/// How long an unpaid booking stays payable.
pub const HOLD_WINDOW_MINUTES: i64 = 10;

pub fn hold_window() -> Duration {
    Duration::minutes(HOLD_WINDOW_MINUTES)
}

pub struct StayRequest {
    pub hotel_id: String,
    pub room_type_id: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
}

/// How a caller points at one of their pending bookings.
pub enum PendingBookingRef {
    Id(String),
    Key {
        hotel_id: String,
        room_type_id: String,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
        created_at: DateTime<Utc>,
    },
}

pub struct BookingService {
    hotel_repo: Arc<dyn HotelRepository>,
    room_type_repo: Arc<dyn RoomTypeRepository>,
    booking_repo: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
}

impl BookingService {
    pub fn new(
        hotel_repo: Arc<dyn HotelRepository>,
        room_type_repo: Arc<dyn RoomTypeRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { hotel_repo, room_type_repo, booking_repo, clock }
    }

    /// Places an unpaid hold that must be paid within the hold window.
    pub async fn create_hold(&self, user_email: &str, stay: StayRequest) -> Result<BookingView, AppError> {
        self.create(user_email, stay, None).await
    }

    /// Creates a booking that is confirmed immediately with the given payment.
    pub async fn create_paid(&self, user_email: &str, stay: StayRequest, payment: PaymentDetails) -> Result<BookingView, AppError> {
        payment.validate()?;
        self.create(user_email, stay, Some(payment.redacted())).await
    }

    async fn create(&self, user_email: &str, stay: StayRequest, payment: Option<PaymentDetails>) -> Result<BookingView, AppError> {
        let now = self.clock.now();
        validate_stay(stay.check_in, stay.check_out, now)?;

        let hotel = self.hotel_repo.find_by_id(&stay.hotel_id).await?
            .ok_or(AppError::NotFound("Hotel not found".into()))?;

        let room_type = self.room_type_repo.find_by_id(&stay.room_type_id).await?
            .filter(|rt| rt.hotel_id == hotel.id)
            .ok_or(AppError::NotFound("Room type not found for this hotel".into()))?;

        let quote = pricing::quote(hotel.price, room_type.price, stay.check_in, stay.check_out)?;

        let booking = Booking::new(NewBookingParams {
            user_email: user_email.to_string(),
            hotel_id: hotel.id.clone(),
            room_type_id: room_type.id.clone(),
            check_in: stay.check_in,
            check_out: stay.check_out,
            payment,
        }, now);

        let created = self.booking_repo.create(&booking).await?;
        info!(
            booking_id = %created.id,
            status = %created.status,
            nights = quote.nights,
            "Booking created for hotel {}", hotel.id
        );

        Ok(BookingView {
            payment_method: created.payment_method(),
            booking: created,
            hotel: Some(hotel),
            room_type: Some(room_type),
            nights: Some(quote.nights),
            total_price: Some(quote.total_price),
        })
    }

    /// Confirms one of the caller's pending bookings if its hold has not lapsed.
    /// A lapsed hold answers `Expired` whether or not a sweep has already cancelled it.
    pub async fn pay_pending(&self, user_email: &str, reference: PendingBookingRef, payment: PaymentDetails) -> Result<BookingView, AppError> {
        payment.validate()?;

        let booking = self.find_owned(user_email, &reference).await?
            .ok_or_else(not_payable)?;

        let now = self.clock.now();
        let cutoff = now - hold_window();
        match hold_state(&booking, cutoff) {
            HoldState::Payable => {}
            HoldState::Lapsed => {
                self.sweep_at(now).await?;
                warn!(booking_id = %booking.id, "Payment attempted after hold window elapsed");
                return Err(AppError::Expired("Booking hold has expired and was cancelled".into()));
            }
            HoldState::Closed => return Err(not_payable()),
        }

        let confirmed = self.booking_repo.confirm_pending(&booking.id, &payment.redacted(), cutoff).await?
            .ok_or_else(not_payable)?;

        info!(booking_id = %confirmed.id, method = %payment.method(), "Pending booking paid");
        self.view(confirmed).await
    }

    async fn find_owned(&self, user_email: &str, reference: &PendingBookingRef) -> Result<Option<Booking>, AppError> {
        match reference {
            PendingBookingRef::Id(id) => {
                let booking = self.booking_repo.find_by_id(id).await?;
                Ok(booking.filter(|b| b.user_email == user_email))
            }
            PendingBookingRef::Key { hotel_id, room_type_id, check_in, check_out, created_at } => {
                let candidates = self.booking_repo
                    .list_for_stay(user_email, hotel_id, room_type_id, *check_in, *check_out).await?;
                Ok(candidates.into_iter()
                    .find(|b| b.created_at.timestamp_millis() == created_at.timestamp_millis()))
            }
        }
    }

    /// Cancels every pending booking whose hold window has elapsed.
    pub async fn sweep(&self) -> Result<u64, AppError> {
        self.sweep_at(self.clock.now()).await
    }

    async fn sweep_at(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let expired = self.booking_repo.expire_pending(now - hold_window()).await?;
        if expired > 0 {
            info!("Expired {} unpaid booking holds", expired);
        }
        Ok(expired)
    }

    pub async fn list_for_user(&self, user_email: &str) -> Result<Vec<BookingView>, AppError> {
        self.sweep().await?;
        let bookings = self.booking_repo.list_by_user(user_email).await?;
        debug!("Loaded {} bookings for user", bookings.len());
        self.views(bookings).await
    }

    pub async fn list_all(&self) -> Result<Vec<BookingView>, AppError> {
        self.sweep().await?;
        let bookings = self.booking_repo.list_all().await?;
        self.views(bookings).await
    }

    /// Marks a booking cancelled. Bookings the caller may not see are reported as missing,
    /// and cancelling twice leaves the booking untouched.
    pub async fn cancel(&self, principal: &Principal, booking_id: &str) -> Result<Booking, AppError> {
        let booking = self.booking_repo.find_by_id(booking_id).await?
            .filter(|b| principal.is_admin() || b.user_email == principal.email)
            .ok_or(AppError::NotFound("Booking not found".into()))?;

        if booking.status == BookingStatus::Cancelled {
            return Ok(booking);
        }

        let cancelled = self.booking_repo.cancel(&booking.id).await?
            .ok_or(AppError::NotFound("Booking not found".into()))?;

        info!(booking_id = %cancelled.id, by_admin = principal.is_admin(), "Booking cancelled");
        Ok(cancelled)
    }

    async fn view(&self, booking: Booking) -> Result<BookingView, AppError> {
        let hotel = self.hotel_repo.find_by_id(&booking.hotel_id).await?;
        let room_type = self.room_type_repo.find_by_id(&booking.room_type_id).await?;
        Ok(build_view(booking, hotel, room_type))
    }

    async fn views(&self, bookings: Vec<Booking>) -> Result<Vec<BookingView>, AppError> {
        let hotel_ids: HashSet<String> = bookings.iter().map(|b| b.hotel_id.clone()).collect();
        let room_type_ids: HashSet<String> = bookings.iter().map(|b| b.room_type_id.clone()).collect();

        let hotels: HashMap<String, Hotel> = self.hotel_repo
            .find_by_ids(&hotel_ids.into_iter().collect::<Vec<_>>()).await?
            .into_iter()
            .map(|h| (h.id.clone(), h))
            .collect();
        let room_types: HashMap<String, RoomType> = self.room_type_repo
            .find_by_ids(&room_type_ids.into_iter().collect::<Vec<_>>()).await?
            .into_iter()
            .map(|rt| (rt.id.clone(), rt))
            .collect();

        Ok(bookings.into_iter().map(|b| {
            let hotel = hotels.get(&b.hotel_id).cloned();
            let room_type = room_types.get(&b.room_type_id).cloned();
            build_view(b, hotel, room_type)
        }).collect())
    }
}

#[derive(Debug, PartialEq, Eq)]
enum HoldState {
    Payable,
    /// Unpaid and past the hold window, swept or not.
    Lapsed,
    /// Already paid, or cancelled by a caller before the window ran out.
    Closed,
}

fn hold_state(booking: &Booking, cutoff: DateTime<Utc>) -> HoldState {
    let lapsed = booking.created_at <= cutoff;
    match booking.status {
        BookingStatus::PendingPayment if lapsed => HoldState::Lapsed,
        BookingStatus::PendingPayment => HoldState::Payable,
        BookingStatus::Cancelled if lapsed && booking.payment_details.is_none() => HoldState::Lapsed,
        _ => HoldState::Closed,
    }
}

fn not_payable() -> AppError {
    AppError::NotFound("Pending booking not found or already paid".into())
}

/// Checks the date invariants of a new stay against the current time.
pub fn validate_stay(check_in: DateTime<Utc>, check_out: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), AppError> {
    if check_in >= check_out {
        return Err(AppError::Validation("check_out must be after check_in (at least 1 night)".into()));
    }

    let today = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    if check_in < today {
        return Err(AppError::Validation("check_in date must be today or in the future".into()));
    }
    Ok(())
}

fn build_view(booking: Booking, hotel: Option<Hotel>, room_type: Option<RoomType>) -> BookingView {
    let quote = match (&hotel, &room_type) {
        (Some(h), Some(rt)) => pricing::quote(h.price, rt.price, booking.check_in, booking.check_out).ok(),
        _ => None,
    };

    BookingView {
        payment_method: booking.payment_method(),
        booking,
        hotel,
        room_type,
        nights: quote.map(|q| q.nights),
        total_price: quote.map(|q| q.total_price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn hold(created_at: DateTime<Utc>, status: BookingStatus, paid: bool) -> Booking {
        let check_in = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
        let mut booking = Booking::new(NewBookingParams {
            user_email: "guest@example.com".into(),
            hotel_id: "h1".into(),
            room_type_id: "r1".into(),
            check_in,
            check_out: check_in + Duration::days(2),
            payment: paid.then(|| PaymentDetails::Paypal(crate::domain::models::payment::PaypalDetails {
                email: "guest@example.com".into(),
            })),
        }, created_at);
        booking.status = status;
        booking
    }

    #[test]
    fn test_hold_state_follows_window_and_status() {
        let created = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let within = created + Duration::minutes(5) - hold_window();
        let after = created + Duration::minutes(11) - hold_window();
        let on_the_edge = created;

        assert_eq!(hold_state(&hold(created, BookingStatus::PendingPayment, false), within), HoldState::Payable);
        assert_eq!(hold_state(&hold(created, BookingStatus::PendingPayment, false), on_the_edge), HoldState::Lapsed);
        assert_eq!(hold_state(&hold(created, BookingStatus::PendingPayment, false), after), HoldState::Lapsed);

        // Swept holds stay expired rather than disappearing.
        assert_eq!(hold_state(&hold(created, BookingStatus::Cancelled, false), after), HoldState::Lapsed);
        assert_eq!(hold_state(&hold(created, BookingStatus::Cancelled, false), within), HoldState::Closed);
        assert_eq!(hold_state(&hold(created, BookingStatus::Confirmed, true), after), HoldState::Closed);
        assert_eq!(hold_state(&hold(created, BookingStatus::Confirmed, true), within), HoldState::Closed);
    }

    #[test]
    fn test_validate_stay_allows_today() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 15, 30, 0).unwrap();
        let today = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        assert!(validate_stay(today, today + Duration::days(1), now).is_ok());
    }

    #[test]
    fn test_validate_stay_rejects_yesterday_and_inverted_ranges() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 5, 0).unwrap();
        let yesterday = Utc.with_ymd_and_hms(2025, 5, 31, 23, 0, 0).unwrap();
        assert!(matches!(validate_stay(yesterday, yesterday + Duration::days(2), now), Err(AppError::Validation(_))));

        let later = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
        assert!(matches!(validate_stay(later, later, now), Err(AppError::Validation(_))));
        assert!(matches!(validate_stay(later, later - Duration::days(1), now), Err(AppError::Validation(_))));
    }
}
