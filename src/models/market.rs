//! Market model: per-channel sales scope and its commercial settings.
//!
//! A market scopes a hotel's inventory to one sales channel and currency and
//! carries the commercial terms (working mode, commission, markups) plus
//! per-room-type pricing overrides that sit between the RoomType defaults
//! and any Season or Rate overrides.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::room_type::{MultiplierTemplate, PricingType};

/// Reference to a room type inside an override record.
///
/// Older records store the bare id; newer ones embed the referenced object.
/// Matching must accept both shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoomTypeRef {
    /// A bare room type id.
    Id(String),
    /// An embedded room type object; only the id is relevant here.
    Embedded {
        /// The embedded document's id.
        #[serde(alias = "_id")]
        id: String,
    },
}

impl RoomTypeRef {
    /// Returns the referenced room type id regardless of shape.
    pub fn id(&self) -> &str {
        match self {
            RoomTypeRef::Id(id) => id,
            RoomTypeRef::Embedded { id } => id,
        }
    }

    /// Returns true when this reference points at the given room type id.
    pub fn matches(&self, room_type_id: &str) -> bool {
        self.id() == room_type_id
    }
}

/// Per-room-type pricing override carried by a Market or Season.
///
/// Each overridable setting pairs a value with its own "use override" flag;
/// a value is only consulted when its flag is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingOverride {
    /// The room type this override applies to.
    #[serde(default)]
    pub room_type: Option<RoomTypeRef>,
    /// Whether `min_adults` overrides the room type default.
    #[serde(default)]
    pub use_min_adults_override: bool,
    /// Overriding minimum adult count.
    #[serde(default)]
    pub min_adults: Option<u32>,
    /// Whether `pricing_type` overrides the room type default.
    #[serde(default)]
    pub use_pricing_type_override: bool,
    /// Overriding pricing type.
    #[serde(default)]
    pub pricing_type: Option<PricingType>,
    /// Whether `multiplier_override` overrides the room type template.
    #[serde(default)]
    pub use_multiplier_override: bool,
    /// Overriding multiplier template.
    #[serde(default)]
    pub multiplier_override: Option<MultiplierTemplate>,
}

/// Whether stored prices are net cost or commission-inclusive gross.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkingMode {
    /// The stored price is the hotel's net cost; markups are added on top.
    #[default]
    Net,
    /// The stored price is gross and already includes the commission.
    Commission,
}

impl std::fmt::Display for WorkingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkingMode::Net => write!(f, "net"),
            WorkingMode::Commission => write!(f, "commission"),
        }
    }
}

/// Channel markup percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Markup {
    /// B2C (direct guest) markup percent.
    #[serde(default)]
    pub b2c: Decimal,
    /// B2B (agency) markup percent.
    #[serde(default)]
    pub b2b: Decimal,
}

/// Commercial terms governing how channel prices derive from a base price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSettings {
    /// Whether the base price is net cost or commission-inclusive gross.
    #[serde(default)]
    pub working_mode: WorkingMode,
    /// Commission percent baked into gross prices (commission mode only).
    #[serde(default)]
    pub commission_rate: Decimal,
    /// Per-channel markup percentages.
    #[serde(default)]
    pub markup: Markup,
    /// Commission percent granted to agencies.
    #[serde(default)]
    pub agency_commission: Decimal,
    /// Percent of realized margin redistributed to the B2B channel (0-100).
    #[serde(default)]
    pub agency_margin_share: Decimal,
}

impl Default for SalesSettings {
    fn default() -> Self {
        SalesSettings {
            working_mode: WorkingMode::Net,
            commission_rate: Decimal::new(10, 0),
            markup: Markup::default(),
            agency_commission: Decimal::new(10, 0),
            agency_margin_share: Decimal::new(50, 0),
        }
    }
}

/// One child age bracket, mapped to a child multiplier entry by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildAgeGroup {
    /// Group id, the key into a template's `child_multipliers`.
    pub id: String,
    /// Display label, e.g. "Infant".
    pub label: String,
    /// Minimum age (inclusive).
    pub min_age: u32,
    /// Maximum age (inclusive).
    pub max_age: u32,
}

impl ChildAgeGroup {
    /// Returns true when the given age falls inside this bracket.
    pub fn contains(&self, age: u32) -> bool {
        age >= self.min_age && age <= self.max_age
    }
}

/// Child age bracket configuration for a Market or Season.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChildAgeSettings {
    /// When true, hotel-level brackets apply instead of this record's own.
    #[serde(default)]
    pub inherit_from_hotel: bool,
    /// The configured brackets.
    #[serde(default)]
    pub child_age_groups: Vec<ChildAgeGroup>,
}

/// A sales market: per hotel/channel/currency commercial scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    /// Identifier assigned by the admin store.
    pub id: String,
    /// The hotel this market belongs to.
    pub hotel_id: String,
    /// Sales channel name, e.g. "b2c-web".
    pub channel: String,
    /// ISO 4217 currency code for prices in this market.
    pub currency: String,
    /// Per-room-type pricing overrides.
    #[serde(default)]
    pub pricing_overrides: Vec<PricingOverride>,
    /// Commercial terms; `None` falls back to platform defaults.
    #[serde(default)]
    pub sales_settings: Option<SalesSettings>,
    /// Child age brackets; `None` falls back to hotel settings.
    #[serde(default)]
    pub child_age_settings: Option<ChildAgeSettings>,
}

impl Market {
    /// Finds this market's pricing override for a room type, if any.
    pub fn pricing_override(&self, room_type_id: &str) -> Option<&PricingOverride> {
        self.pricing_overrides.iter().find(|o| {
            o.room_type
                .as_ref()
                .is_some_and(|r| r.matches(room_type_id))
        })
    }
}
