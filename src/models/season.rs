//! Season model: a date-bounded override layer nested under a Market.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::market::{ChildAgeSettings, PricingOverride, SalesSettings};

/// A date-bounded sub-scope of a Market.
///
/// A season carries the same override shape as its market plus inherit
/// flags. An absent season, or one whose inherit flags are set, means the
/// market settings apply unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    /// Identifier assigned by the admin store.
    pub id: String,
    /// The market this season belongs to.
    pub market_id: String,
    /// First stay date covered (inclusive).
    pub start_date: NaiveDate,
    /// Last stay date covered (inclusive).
    pub end_date: NaiveDate,
    /// When true, every market-level setting applies unmodified.
    #[serde(default)]
    pub inherit_from_market: bool,
    /// When true, hotel-level child settings apply instead of this season's.
    #[serde(default)]
    pub inherit_from_hotel: bool,
    /// Per-room-type pricing overrides for the season window.
    #[serde(default)]
    pub pricing_overrides: Vec<PricingOverride>,
    /// Seasonal commercial terms; `None` inherits from the market.
    #[serde(default)]
    pub sales_settings: Option<SalesSettings>,
    /// Seasonal child age brackets; `None` inherits from the market.
    #[serde(default)]
    pub child_age_settings: Option<ChildAgeSettings>,
}

impl Season {
    /// Returns true when the given stay date falls inside this season.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Finds this season's pricing override for a room type, if any.
    ///
    /// Returns `None` when the season inherits wholesale from its market.
    pub fn pricing_override(&self, room_type_id: &str) -> Option<&PricingOverride> {
        if self.inherit_from_market {
            return None;
        }
        self.pricing_overrides.iter().find(|o| {
            o.room_type
                .as_ref()
                .is_some_and(|r| r.matches(room_type_id))
        })
    }
}
