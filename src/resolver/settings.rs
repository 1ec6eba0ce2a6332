//! Effective-setting resolvers.
//!
//! Each function walks the Rate > Season > Market > RoomType precedence
//! chain for one setting and reports both the effective value and the layer
//! it came from. All resolvers are infallible: a missing room type yields
//! hard-coded safe defaults (min_adults = 1, unit pricing, multipliers
//! disabled, no rounding) instead of an error.

use crate::models::{ChildAgeGroup, MultiplierTemplate, PricingType, RoundingRule};

use super::chain::{OverrideSource, ResolutionScope, ResolvedSetting, first_active};

/// Resolves the effective minimum adult count.
///
/// Precedence is Season > Market > RoomType (rates carry no min-adults
/// override). Defaults to 1 when no layer is active.
///
/// # Example
///
/// ```
/// use pricing_engine::resolver::{ResolutionScope, effective_min_adults};
///
/// let resolved = effective_min_adults(&ResolutionScope::default());
/// assert_eq!(resolved.value, 1);
/// ```
pub fn effective_min_adults(scope: &ResolutionScope<'_>) -> ResolvedSetting<u32> {
    first_active(
        "min_adults",
        [
            (
                OverrideSource::Season,
                scope
                    .season_override()
                    .filter(|o| o.use_min_adults_override)
                    .and_then(|o| o.min_adults),
            ),
            (
                OverrideSource::Market,
                scope
                    .market_override()
                    .filter(|o| o.use_min_adults_override)
                    .and_then(|o| o.min_adults),
            ),
            (
                OverrideSource::RoomType,
                scope.room_type.map(|rt| rt.occupancy.min_adults),
            ),
        ],
        1,
    )
}

/// Resolves the effective pricing type.
///
/// A rate-level `pricing_type` is the highest-priority layer; its presence
/// alone makes the layer active. Defaults to unit pricing.
pub fn effective_pricing_type(scope: &ResolutionScope<'_>) -> ResolvedSetting<PricingType> {
    first_active(
        "pricing_type",
        [
            (
                OverrideSource::Rate,
                scope.rate.and_then(|r| r.pricing_type),
            ),
            (
                OverrideSource::Season,
                scope
                    .season_override()
                    .filter(|o| o.use_pricing_type_override)
                    .and_then(|o| o.pricing_type),
            ),
            (
                OverrideSource::Market,
                scope
                    .market_override()
                    .filter(|o| o.use_pricing_type_override)
                    .and_then(|o| o.pricing_type),
            ),
            (
                OverrideSource::RoomType,
                scope.room_type.map(|rt| rt.pricing_type),
            ),
        ],
        PricingType::Unit,
    )
}

/// Resolves the effective multiplier template.
///
/// A layer is active only when its override flag is set AND it actually
/// carries a template. The room type layer requires `use_multipliers`. The
/// default is `None`: multipliers disabled.
pub fn effective_multiplier_template(
    scope: &ResolutionScope<'_>,
) -> ResolvedSetting<Option<MultiplierTemplate>> {
    // A layer's candidate is itself an Option<&template>; wrapping keeps the
    // "multipliers disabled" default expressible as None.
    let resolved = first_active(
        "multiplier_template",
        [
            (
                OverrideSource::Rate,
                scope
                    .rate
                    .filter(|r| r.use_multiplier_override)
                    .and_then(|r| r.multiplier_override.as_ref())
                    .map(Some),
            ),
            (
                OverrideSource::Season,
                scope
                    .season_override()
                    .filter(|o| o.use_multiplier_override)
                    .and_then(|o| o.multiplier_override.as_ref())
                    .map(Some),
            ),
            (
                OverrideSource::Market,
                scope
                    .market_override()
                    .filter(|o| o.use_multiplier_override)
                    .and_then(|o| o.multiplier_override.as_ref())
                    .map(Some),
            ),
            (
                OverrideSource::RoomType,
                scope
                    .room_type
                    .filter(|rt| rt.use_multipliers)
                    .and_then(|rt| rt.multiplier_template.as_ref())
                    .map(Some),
            ),
        ],
        None,
    );

    ResolvedSetting {
        value: resolved.value.cloned(),
        source: resolved.source,
    }
}

/// Resolves the effective child age brackets.
///
/// Precedence is Season > Market; each layer is skipped when it opts to
/// inherit. Defaults to no configured brackets (hotel-level child settings
/// live outside this core).
pub fn effective_child_age_groups(
    scope: &ResolutionScope<'_>,
) -> ResolvedSetting<Vec<ChildAgeGroup>> {
    let season_groups = scope
        .season
        .filter(|s| !s.inherit_from_market && !s.inherit_from_hotel)
        .and_then(|s| s.child_age_settings.as_ref())
        .filter(|c| !c.inherit_from_hotel)
        .map(|c| c.child_age_groups.clone());

    let market_groups = scope
        .market
        .and_then(|m| m.child_age_settings.as_ref())
        .filter(|c| !c.inherit_from_hotel)
        .map(|c| c.child_age_groups.clone());

    first_active(
        "child_age_groups",
        [
            (OverrideSource::Season, season_groups),
            (OverrideSource::Market, market_groups),
        ],
        Vec::new(),
    )
}

/// Resolves the effective rounding rule.
///
/// The rule rides on the effective multiplier template; with multipliers
/// disabled it is `RoundingRule::None`.
pub fn effective_rounding_rule(scope: &ResolutionScope<'_>) -> ResolvedSetting<RoundingRule> {
    let template = effective_multiplier_template(scope);
    ResolvedSetting {
        value: template
            .value
            .map(|t| t.rounding_rule)
            .unwrap_or(RoundingRule::None),
        source: template.source,
    }
}
