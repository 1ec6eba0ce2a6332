//! Precedence chain machinery for the override resolver.
//!
//! Effective settings resolve across four configuration layers, from most to
//! least specific: Rate > Season > Market > RoomType. Each layer contributes
//! a candidate only when its own "use override" flag is active; the first
//! active layer wins. Modelling the walk as one generic chain keeps the
//! per-setting resolvers flat and lets a new layer slot in without touching
//! each of them.

use serde::{Deserialize, Serialize};

use crate::models::{Market, PricingOverride, Rate, RoomType, Season};

/// Which configuration layer supplied an effective value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideSource {
    /// The rate row's own override.
    Rate,
    /// A season-level pricing override.
    Season,
    /// A market-level pricing override.
    Market,
    /// The room type's base configuration.
    RoomType,
    /// No layer was active; the hard-coded safe default applies.
    Default,
}

impl std::fmt::Display for OverrideSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverrideSource::Rate => write!(f, "rate"),
            OverrideSource::Season => write!(f, "season"),
            OverrideSource::Market => write!(f, "market"),
            OverrideSource::RoomType => write!(f, "room_type"),
            OverrideSource::Default => write!(f, "default"),
        }
    }
}

/// An effective value together with the layer that supplied it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSetting<T> {
    /// The effective value.
    pub value: T,
    /// The layer the value came from.
    pub source: OverrideSource,
}

/// The configuration layers in scope for one resolution.
///
/// Every layer is optional: a `None` room type resolves to hard-coded safe
/// defaults rather than erroring, and absent Market/Season/Rate layers
/// simply never contribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolutionScope<'a> {
    /// The room type being priced.
    pub room_type: Option<&'a RoomType>,
    /// The market scoping the sale.
    pub market: Option<&'a Market>,
    /// The season covering the stay date, if any.
    pub season: Option<&'a Season>,
    /// The rate row being priced.
    pub rate: Option<&'a Rate>,
}

impl<'a> ResolutionScope<'a> {
    /// The room type id override records are matched against.
    ///
    /// Falls back to the rate row's room type when no RoomType record was
    /// supplied.
    pub fn room_type_id(&self) -> Option<&'a str> {
        self.room_type
            .map(|rt| rt.id.as_str())
            .or_else(|| self.rate.map(|r| r.room_type_id.as_str()))
    }

    /// The season's pricing override for the in-scope room type.
    ///
    /// `None` when there is no season, the season inherits wholesale from
    /// its market, or no override record matches.
    pub fn season_override(&self) -> Option<&'a PricingOverride> {
        let room_type_id = self.room_type_id()?;
        self.season.and_then(|s| s.pricing_override(room_type_id))
    }

    /// The market's pricing override for the in-scope room type.
    pub fn market_override(&self) -> Option<&'a PricingOverride> {
        let room_type_id = self.room_type_id()?;
        self.market.and_then(|m| m.pricing_override(room_type_id))
    }
}

/// Walks a precedence chain most-specific-first.
///
/// `layers` lists `(source, candidate)` pairs ordered from most to least
/// specific; a candidate is `Some` only when its layer's own override flag
/// is active. The first active layer wins. When none is active the
/// hard-coded `default` applies.
pub(crate) fn first_active<T>(
    setting: &'static str,
    layers: impl IntoIterator<Item = (OverrideSource, Option<T>)>,
    default: T,
) -> ResolvedSetting<T> {
    for (source, candidate) in layers {
        if let Some(value) = candidate {
            tracing::trace!(setting, %source, "override layer won");
            return ResolvedSetting { value, source };
        }
    }
    tracing::trace!(setting, "no active layer, using default");
    ResolvedSetting {
        value: default,
        source: OverrideSource::Default,
    }
}
