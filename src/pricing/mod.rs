//! Pricing logic: occupancy multipliers, channel tier pricing, result
//! validation, and the per-rate quoting pipeline.

mod multiplier;
mod quote;
mod tier;
mod validate;

pub use multiplier::{
    MultiplierMatch, MultiplierResolution, apply_multiplier, resolve_multiplier, unit_price,
};
pub use quote::{RateCandidate, RateQuote, StayRequest, quote_rate, quote_rates};
pub use tier::{
    ChannelBreakdown, PricingBreakdown, TierPricing, calculate_tier_pricing,
    effective_sales_settings, round2,
};
pub use validate::{MISSING_PRICING_DATA, PricingSummary, validate_pricing_summary};
