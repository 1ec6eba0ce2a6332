//! Bookability restriction checks for a candidate stay.
//!
//! Every check runs independently and accumulates into a flag set plus an
//! ordered message list, so a rate failing several rules reports all of
//! them at once. A failed check is a normal outcome, not an error: the
//! result type carries `is_bookable` rather than the functions returning
//! `Err`.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Rate;

/// Inputs for a restriction check.
///
/// Every field is optional; absent fields fall back to documented defaults
/// (`min_adults` → 1, `required_rooms` → 1, `booking_date` → today). Checks
/// that need an absent date (release days, stay length, arrival/departure
/// closures) are skipped rather than failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestrictionContext {
    /// Number of adults in the candidate booking.
    #[serde(default)]
    pub adults: Option<u32>,
    /// Effective minimum adults, resolved by the caller.
    #[serde(default)]
    pub min_adults: Option<u32>,
    /// Candidate check-in date.
    #[serde(default)]
    pub check_in_date: Option<NaiveDate>,
    /// Candidate check-out date.
    #[serde(default)]
    pub check_out_date: Option<NaiveDate>,
    /// The date the booking would be made.
    #[serde(default)]
    pub booking_date: Option<NaiveDate>,
    /// Rooms requested.
    #[serde(default)]
    pub required_rooms: Option<u32>,
}

/// The individual restriction flags, one per check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictionFlags {
    /// The rate has a hard stop-sale.
    pub stop_sale: bool,
    /// Fewer adults than the effective minimum.
    pub below_min_adults: bool,
    /// Legacy single-occupancy stop (blocks exactly one adult).
    pub single_stop: bool,
    /// No rooms left at all.
    pub no_availability: bool,
    /// Rooms remain, but fewer than requested.
    pub insufficient_allotment: bool,
    /// Booking is inside the release window.
    pub release_days: bool,
    /// Stay is shorter than the minimum.
    pub min_stay: bool,
    /// Stay is longer than the maximum.
    pub max_stay: bool,
    /// Stays may not start on the check-in date.
    pub closed_to_arrival: bool,
    /// Stays may not end on the check-out date.
    pub closed_to_departure: bool,
}

impl RestrictionFlags {
    /// Returns true when no flag is raised.
    pub fn none_raised(&self) -> bool {
        !(self.stop_sale
            || self.below_min_adults
            || self.single_stop
            || self.no_availability
            || self.insufficient_allotment
            || self.release_days
            || self.min_stay
            || self.max_stay
            || self.closed_to_arrival
            || self.closed_to_departure)
    }
}

/// The outcome of a restriction check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestrictionResult {
    /// True iff no restriction flag was raised.
    pub is_bookable: bool,
    /// The individual flags, all checks evaluated.
    pub restrictions: RestrictionFlags,
    /// Human-readable reasons, in fixed check order.
    pub messages: Vec<String>,
}

/// Validates a candidate booking against a rate's restrictions.
///
/// All checks run; flags and messages accumulate in a fixed, deterministic
/// order: stop-sale, minimum adults, single stop, availability/allotment,
/// release days, minimum stay, maximum stay, closed to arrival, closed to
/// departure.
///
/// # Availability semantics
///
/// With a non-null `allotment`: `available = allotment - sold`; zero or
/// less raises `no_availability`, a positive remainder smaller than the
/// requested rooms raises `insufficient_allotment`. With a null allotment
/// the legacy `available` field is consulted (zero or less blocks); with
/// both absent the rate is unlimited.
///
/// # Example
///
/// ```
/// use pricing_engine::restrictions::{RestrictionContext, check_restrictions};
/// # let rate: pricing_engine::models::Rate = serde_json::from_str(r#"{
/// #   "id": "r", "hotel_id": "h", "room_type_id": "rt", "meal_plan": "BB",
/// #   "market_id": "m", "date": "2026-03-01",
/// #   "price_per_night": "100", "currency": "EUR", "stop_sale": true
/// # }"#).unwrap();
/// let result = check_restrictions(&rate, &RestrictionContext::default());
/// assert!(!result.is_bookable);
/// assert!(result.restrictions.stop_sale);
/// ```
pub fn check_restrictions(rate: &Rate, context: &RestrictionContext) -> RestrictionResult {
    let adults = context.adults;
    let min_adults = context.min_adults.unwrap_or(1);
    let required_rooms = context.required_rooms.unwrap_or(1);
    let booking_date = context
        .booking_date
        .unwrap_or_else(|| Utc::now().date_naive());

    let mut flags = RestrictionFlags::default();
    let mut messages = Vec::new();

    if rate.stop_sale {
        flags.stop_sale = true;
        messages.push("Stop sale is active for this date".to_string());
    }

    if let Some(adults) = adults {
        if adults < min_adults {
            flags.below_min_adults = true;
            messages.push(format!(
                "At least {min_adults} adults required, got {adults}"
            ));
        }

        if rate.single_stop && adults == 1 {
            flags.single_stop = true;
            messages.push("Single occupancy is stopped for this date".to_string());
        }
    }

    match rate.allotment {
        Some(allotment) => {
            let available = allotment as i64 - rate.sold as i64;
            if available <= 0 {
                flags.no_availability = true;
                messages.push("No rooms available for this date".to_string());
            } else if available < required_rooms as i64 {
                flags.insufficient_allotment = true;
                messages.push(format!(
                    "Only {available} rooms available, {required_rooms} requested"
                ));
            }
        }
        None => {
            // Legacy precomputed field; fully absent means unlimited.
            if let Some(available) = rate.available {
                if available <= 0 {
                    flags.no_availability = true;
                    messages.push("No rooms available for this date".to_string());
                }
            }
        }
    }

    if let Some(check_in) = context.check_in_date {
        let lead_days = check_in.signed_duration_since(booking_date).num_days();
        if lead_days < rate.release_days as i64 {
            flags.release_days = true;
            messages.push(format!(
                "Booking requires {} days before check-in, got {lead_days}",
                rate.release_days
            ));
        }
    }

    if let (Some(check_in), Some(check_out)) = (context.check_in_date, context.check_out_date) {
        let nights = check_out.signed_duration_since(check_in).num_days();

        if let Some(min_stay) = rate.min_stay {
            if nights < min_stay as i64 {
                flags.min_stay = true;
                messages.push(format!(
                    "Minimum stay is {min_stay} nights, got {nights}"
                ));
            }
        }

        if let Some(max_stay) = rate.max_stay {
            if nights > max_stay as i64 {
                flags.max_stay = true;
                messages.push(format!(
                    "Maximum stay is {max_stay} nights, got {nights}"
                ));
            }
        }
    }

    if rate.closed_to_arrival {
        flags.closed_to_arrival = true;
        messages.push("Closed to arrival on this date".to_string());
    }

    if rate.closed_to_departure {
        flags.closed_to_departure = true;
        messages.push("Closed to departure on this date".to_string());
    }

    RestrictionResult {
        is_bookable: flags.none_raised(),
        restrictions: flags,
        messages,
    }
}
