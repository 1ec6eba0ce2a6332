//! Booking model and related types.
//!
//! The engine only reads bookings: creation and cancellation belong to the
//! booking flow. Bookings feed the occupancy reconciler, which derives true
//! per-night occupancy from the active ones.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Created but not yet confirmed; still holds inventory.
    Pending,
    /// Confirmed and holding inventory.
    Confirmed,
    /// Guest has arrived.
    CheckedIn,
    /// Guest has departed; no longer holds inventory.
    CheckedOut,
    /// Cancelled before arrival.
    Cancelled,
    /// Guest never arrived.
    NoShow,
}

impl BookingStatus {
    /// Returns true for statuses that count toward occupancy.
    ///
    /// Only pending, confirmed, and checked-in bookings hold inventory.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            BookingStatus::Pending | BookingStatus::Confirmed | BookingStatus::CheckedIn
        )
    }
}

/// One room line within a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRoom {
    /// The room type booked.
    pub room_type_id: String,
    /// Number of rooms of this type booked on the line.
    pub quantity: u32,
    /// Adults staying in each room.
    pub adults: u32,
    /// Ages of children staying in each room.
    #[serde(default)]
    pub child_ages: Vec<u32>,
}

/// A guest booking with a half-open stay interval `[check_in, check_out)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: Uuid,
    /// The hotel booked.
    pub hotel_id: String,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Arrival date (first occupied night).
    pub check_in: NaiveDate,
    /// Departure date (never an occupied night).
    pub check_out: NaiveDate,
    /// Room lines.
    pub rooms: Vec<BookingRoom>,
}

impl Booking {
    /// Returns the number of nights in the stay.
    ///
    /// # Example
    ///
    /// ```
    /// use pricing_engine::models::{Booking, BookingStatus};
    /// use chrono::NaiveDate;
    /// use uuid::Uuid;
    ///
    /// let booking = Booking {
    ///     id: Uuid::new_v4(),
    ///     hotel_id: "htl_1".to_string(),
    ///     status: BookingStatus::Confirmed,
    ///     check_in: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
    ///     check_out: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
    ///     rooms: vec![],
    /// };
    /// assert_eq!(booking.nights(), 3);
    /// ```
    pub fn nights(&self) -> i64 {
        self.check_out
            .signed_duration_since(self.check_in)
            .num_days()
    }

    /// Returns true when this booking counts toward occupancy.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Returns true when the stay overlaps the half-open range `[start, end)`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.check_in < end && self.check_out > start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_booking(status: BookingStatus, check_in: &str, check_out: &str) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            hotel_id: "htl_1".to_string(),
            status,
            check_in: make_date(check_in),
            check_out: make_date(check_out),
            rooms: vec![BookingRoom {
                room_type_id: "rt_dbl".to_string(),
                quantity: 1,
                adults: 2,
                child_ages: vec![],
            }],
        }
    }

    #[test]
    fn test_active_statuses() {
        assert!(BookingStatus::Pending.is_active());
        assert!(BookingStatus::Confirmed.is_active());
        assert!(BookingStatus::CheckedIn.is_active());
        assert!(!BookingStatus::CheckedOut.is_active());
        assert!(!BookingStatus::Cancelled.is_active());
        assert!(!BookingStatus::NoShow.is_active());
    }

    #[test]
    fn test_nights() {
        let booking = make_booking(BookingStatus::Confirmed, "2026-03-01", "2026-03-04");
        assert_eq!(booking.nights(), 3);
    }

    #[test]
    fn test_overlaps_half_open() {
        let booking = make_booking(BookingStatus::Confirmed, "2026-03-01", "2026-03-04");

        assert!(booking.overlaps(make_date("2026-03-03"), make_date("2026-03-10")));
        assert!(booking.overlaps(make_date("2026-02-01"), make_date("2026-03-02")));
        // Checkout day itself is not an occupied night.
        assert!(!booking.overlaps(make_date("2026-03-04"), make_date("2026-03-10")));
        assert!(!booking.overlaps(make_date("2026-02-01"), make_date("2026-03-01")));
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::CheckedIn).unwrap(),
            "\"checked_in\""
        );
        let parsed: BookingStatus = serde_json::from_str("\"no_show\"").unwrap();
        assert_eq!(parsed, BookingStatus::NoShow);
    }
}
