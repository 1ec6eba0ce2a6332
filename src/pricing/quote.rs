//! Per-rate quoting pipeline.
//!
//! Glues the engine together for a search request: each candidate rate is
//! restriction-checked, its effective settings resolved, its nightly price
//! occupancy-adjusted, and the result tier-priced for every channel. A
//! failure for one rate never aborts the search: the rate is skipped with a
//! warning and the rest are returned.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{Market, Rate, RoomType, Season};
use crate::resolver::{ResolutionScope, effective_min_adults};
use crate::restrictions::{RestrictionContext, RestrictionResult, check_restrictions};

use super::multiplier::unit_price;
use super::tier::{TierPricing, calculate_tier_pricing, effective_sales_settings};

/// A candidate stay being searched for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StayRequest {
    /// Adults per room.
    pub adults: u32,
    /// Ages of children per room.
    #[serde(default)]
    pub child_ages: Vec<u32>,
    /// Arrival date.
    pub check_in: NaiveDate,
    /// Departure date.
    pub check_out: NaiveDate,
    /// When the booking would be made; defaults to today.
    #[serde(default)]
    pub booking_date: Option<NaiveDate>,
    /// Rooms requested.
    pub required_rooms: u32,
}

/// One candidate rate with the configuration layers it resolves against.
#[derive(Debug, Clone, Copy)]
pub struct RateCandidate<'a> {
    /// The rate row being quoted.
    pub rate: &'a Rate,
    /// The room type the rate sells.
    pub room_type: Option<&'a RoomType>,
    /// The market scoping the rate.
    pub market: Option<&'a Market>,
    /// The season covering the stay date, if any.
    pub season: Option<&'a Season>,
}

impl<'a> RateCandidate<'a> {
    /// The resolution scope for this candidate.
    pub fn scope(&self) -> ResolutionScope<'a> {
        ResolutionScope {
            room_type: self.room_type,
            market: self.market,
            season: self.season,
            rate: Some(self.rate),
        }
    }
}

/// The quoted outcome for one candidate rate.
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    /// The quoted rate's id.
    pub rate_id: String,
    /// The room type sold.
    pub room_type_id: String,
    /// The currency channel prices are in.
    pub currency: String,
    /// The restriction check outcome.
    pub restriction: RestrictionResult,
    /// Occupancy-adjusted nightly price; `None` when not bookable.
    pub nightly_price: Option<Decimal>,
    /// Channel tier pricing; `None` when not bookable.
    pub pricing: Option<TierPricing>,
}

impl RateQuote {
    /// Returns true when the quote is sellable.
    pub fn is_bookable(&self) -> bool {
        self.restriction.is_bookable
    }
}

/// Quotes a single candidate rate for a stay.
///
/// Non-bookable rates still return a quote (carrying the restriction
/// reasons); only a genuine computation failure is an `Err`.
pub fn quote_rate(stay: &StayRequest, candidate: &RateCandidate<'_>) -> EngineResult<RateQuote> {
    let scope = candidate.scope();
    let min_adults = effective_min_adults(&scope).value;

    let restriction = check_restrictions(
        candidate.rate,
        &RestrictionContext {
            adults: Some(stay.adults),
            min_adults: Some(min_adults),
            check_in_date: Some(stay.check_in),
            check_out_date: Some(stay.check_out),
            booking_date: stay.booking_date,
            required_rooms: Some(stay.required_rooms),
        },
    );

    let (nightly_price, pricing) = if restriction.is_bookable {
        let adjusted = unit_price(
            &scope,
            candidate.rate.price_per_night,
            stay.adults,
            &stay.child_ages,
        )?;
        let settings = effective_sales_settings(candidate.market, candidate.season);
        let pricing = calculate_tier_pricing(adjusted, &settings)?;
        (Some(adjusted), Some(pricing))
    } else {
        (None, None)
    };

    Ok(RateQuote {
        rate_id: candidate.rate.id.clone(),
        room_type_id: candidate.rate.room_type_id.clone(),
        currency: candidate.rate.currency.clone(),
        restriction,
        nightly_price,
        pricing,
    })
}

/// Quotes every candidate rate for a stay.
///
/// A candidate whose computation fails (e.g. an unresolved multiplier
/// combination) is excluded from the results with a warning; the remaining
/// candidates are still quoted.
pub fn quote_rates(stay: &StayRequest, candidates: &[RateCandidate<'_>]) -> Vec<RateQuote> {
    candidates
        .iter()
        .filter_map(|candidate| match quote_rate(stay, candidate) {
            Ok(quote) => Some(quote),
            Err(error) => {
                tracing::warn!(
                    rate_id = %candidate.rate.id,
                    room_type_id = %candidate.rate.room_type_id,
                    %error,
                    "excluding rate from search results"
                );
                None
            }
        })
        .collect()
}
