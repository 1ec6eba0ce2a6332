//! Override resolution across the configuration hierarchy.
//!
//! Commercial configuration layers four deep: RoomType defaults, Market
//! overrides, Season overrides, and Rate-level overrides, most specific
//! last. This module resolves the effective value of each overridable
//! setting by walking that chain most-specific-first and stopping at the
//! first layer whose own override flag is active.

mod chain;
mod settings;

pub use chain::{OverrideSource, ResolutionScope, ResolvedSetting};
pub use settings::{
    effective_child_age_groups, effective_min_adults, effective_multiplier_template,
    effective_pricing_type, effective_rounding_rule,
};
