//! Occupancy multiplier resolution for unit-priced room types.
//!
//! When a room type uses unit pricing with multipliers enabled, the nightly
//! price is scaled by an occupancy multiplier: an exact combination-table
//! match when one exists, otherwise the adult-count multiplier plus one
//! contribution per child, each child priced individually by its age-derived
//! group. A combination with no matching configuration is a hard error,
//! never a silent 1.0.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{ChildAgeGroup, MultiplierTemplate, PricingType, RoundingRule};
use crate::resolver::{
    ResolutionScope, effective_child_age_groups, effective_multiplier_template,
    effective_pricing_type,
};

/// How an occupancy multiplier was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiplierMatch {
    /// An exact combination-table entry matched.
    Combination,
    /// Combined from the adult map and per-child group lookups.
    PerGuest,
}

/// A resolved occupancy multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiplierResolution {
    /// The multiplier to apply to the unit price.
    pub multiplier: Decimal,
    /// How the multiplier was found.
    pub matched: MultiplierMatch,
}

/// Resolves the occupancy multiplier for `(adults, child_ages)`.
///
/// Lookup order:
/// 1. exact `combination_table` match on the adult and child counts;
/// 2. `adult_multipliers[adults]` plus, for each child, the multiplier of
///    the age group the child falls into.
///
/// Any gap — no adult entry, a child age outside every group, a group with
/// no multiplier — returns [`EngineError::UnresolvedMultiplier`].
///
/// # Example
///
/// ```
/// use pricing_engine::models::{MultiplierMap, MultiplierTemplate};
/// use pricing_engine::pricing::resolve_multiplier;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let template = MultiplierTemplate {
///     adult_multipliers: [("2", Decimal::from_str("1.0").unwrap())]
///         .into_iter()
///         .collect::<MultiplierMap>(),
///     ..Default::default()
/// };
///
/// let resolved = resolve_multiplier(&template, 2, &[], &[]).unwrap();
/// assert_eq!(resolved.multiplier, Decimal::from_str("1.0").unwrap());
/// ```
pub fn resolve_multiplier(
    template: &MultiplierTemplate,
    adults: u32,
    child_ages: &[u32],
    child_age_groups: &[ChildAgeGroup],
) -> EngineResult<MultiplierResolution> {
    let children = child_ages.len() as u32;

    if let Some(entry) = template.combination(adults, children) {
        return Ok(MultiplierResolution {
            multiplier: entry.multiplier,
            matched: MultiplierMatch::Combination,
        });
    }

    let adult_multiplier =
        template
            .adult_multipliers
            .get(adults)
            .ok_or(EngineError::UnresolvedMultiplier { adults, children })?;

    let mut multiplier = adult_multiplier;
    for &age in child_ages {
        let group = child_age_groups
            .iter()
            .find(|g| g.contains(age))
            .ok_or(EngineError::UnresolvedMultiplier { adults, children })?;
        let child_multiplier = template
            .child_multipliers
            .get_str(&group.id)
            .ok_or(EngineError::UnresolvedMultiplier { adults, children })?;
        multiplier += child_multiplier;
    }

    Ok(MultiplierResolution {
        multiplier,
        matched: MultiplierMatch::PerGuest,
    })
}

/// Applies a resolved multiplier to a nightly price.
///
/// The rounding rule is applied exactly once, to the final amount.
pub fn apply_multiplier(
    price_per_night: Decimal,
    resolution: &MultiplierResolution,
    rounding_rule: RoundingRule,
) -> Decimal {
    rounding_rule.apply(price_per_night * resolution.multiplier)
}

/// Computes the occupancy-adjusted unit price for a scope.
///
/// The multiplier engine only engages when the effective pricing type is
/// unit AND an effective multiplier template exists; in every other case
/// the price passes through unchanged. Errors only for a genuinely
/// unresolvable occupancy combination.
pub fn unit_price(
    scope: &ResolutionScope<'_>,
    price_per_night: Decimal,
    adults: u32,
    child_ages: &[u32],
) -> EngineResult<Decimal> {
    if effective_pricing_type(scope).value != PricingType::Unit {
        return Ok(price_per_night);
    }

    let Some(template) = effective_multiplier_template(scope).value else {
        return Ok(price_per_night);
    };

    let groups = effective_child_age_groups(scope).value;
    let resolution = resolve_multiplier(&template, adults, child_ages, &groups)?;
    Ok(apply_multiplier(
        price_per_night,
        &resolution,
        template.rounding_rule,
    ))
}
