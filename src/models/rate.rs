//! Rate model: one date-specific priced inventory row.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::room_type::{MultiplierTemplate, PricingType};

/// One priced inventory row for (hotel, room type, meal plan, market, date).
///
/// Rate rows are generated per stay date and mutated by pricing edits; the
/// `sold` counter is written only by the occupancy reconciler. A rate may
/// carry its own pricing-type and multiplier overrides, the highest-priority
/// layer of the override chain (rates have no min-adults override).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    /// Identifier assigned by the inventory store.
    pub id: String,
    /// The hotel this row belongs to.
    pub hotel_id: String,
    /// The room type being sold.
    pub room_type_id: String,
    /// Meal plan code, e.g. "BB" or "HB".
    pub meal_plan: String,
    /// The market scoping this row.
    pub market_id: String,
    /// The stay date this row prices.
    pub date: NaiveDate,
    /// Hard stop: the date is not sellable at all.
    #[serde(default)]
    pub stop_sale: bool,
    /// Legacy stop applying only to single (one adult) occupancy.
    #[serde(default)]
    pub single_stop: bool,
    /// Maximum sellable rooms; `None` means unlimited.
    #[serde(default)]
    pub allotment: Option<u32>,
    /// Rooms already sold for this date, maintained by the reconciler.
    #[serde(default)]
    pub sold: u32,
    /// Legacy precomputed availability, consulted only when `allotment` is
    /// absent. Fully absent means unlimited.
    #[serde(default)]
    pub available: Option<i64>,
    /// Minimum whole days between booking and check-in.
    #[serde(default)]
    pub release_days: u32,
    /// Minimum stay length in nights; `None` means no minimum.
    #[serde(default)]
    pub min_stay: Option<u32>,
    /// Maximum stay length in nights; `None` means no maximum.
    #[serde(default)]
    pub max_stay: Option<u32>,
    /// Stays may not start on this date.
    #[serde(default)]
    pub closed_to_arrival: bool,
    /// Stays may not end on this date.
    #[serde(default)]
    pub closed_to_departure: bool,
    /// Nightly price in `currency`.
    pub price_per_night: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Rate-level pricing type override.
    #[serde(default)]
    pub pricing_type: Option<PricingType>,
    /// Whether `multiplier_override` overrides less specific templates.
    #[serde(default)]
    pub use_multiplier_override: bool,
    /// Rate-level multiplier template override.
    #[serde(default)]
    pub multiplier_override: Option<MultiplierTemplate>,
}

impl Rate {
    /// Rooms still sellable under the allotment, ignoring the legacy field.
    ///
    /// Returns `None` when the allotment is unlimited. Oversold rows clamp
    /// to zero rather than going negative.
    pub fn remaining_allotment(&self) -> Option<u32> {
        self.allotment.map(|a| a.saturating_sub(self.sold))
    }
}
