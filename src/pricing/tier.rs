//! Channel tier pricing: NET and COMMISSION working modes.
//!
//! Converts one base price into hotel cost plus B2C and B2B sell prices
//! under the market's (or season's) sales settings. The two working modes
//! are mutually exclusive algebras:
//!
//! - **NET**: the base price is the hotel's cost; channel markups are added
//!   on top of it.
//! - **COMMISSION**: the base price is gross and commission-inclusive; the
//!   cost is derived by backing the commission out, markups stack on the
//!   gross, and the B2B price gives away a configurable share of the
//!   realized margin.
//!
//! All rounding to 2 decimals happens once, at the final outputs, never on
//! intermediates.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::{Market, SalesSettings, Season, WorkingMode};

/// Rounds a final monetary output to 2 decimal places, halves away from zero.
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

const HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Per-channel pricing breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelBreakdown {
    /// The channel sell price.
    pub price: Decimal,
    /// Partner profit: sell price minus hotel cost.
    pub partner_profit: Decimal,
    /// Real margin as a percent of the sell price, 0 when the price is 0.
    pub real_margin_percent: Decimal,
}

/// Full breakdown accompanying a tier pricing result.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingBreakdown {
    /// The working mode the calculation ran under.
    pub working_mode: WorkingMode,
    /// The commission rate used (meaningful in commission mode).
    pub commission_rate: Decimal,
    /// B2C channel details.
    pub b2c: ChannelBreakdown,
    /// B2B channel details.
    pub b2b: ChannelBreakdown,
}

/// The result of a tier pricing calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct TierPricing {
    /// What the stay costs the platform (net of commission).
    pub hotel_cost: Decimal,
    /// Guest-facing B2C sell price.
    pub b2c_price: Decimal,
    /// Agency-facing B2B sell price.
    pub b2b_price: Decimal,
    /// The base price the calculation started from.
    pub base_price: Decimal,
    /// Per-channel profit and margin details.
    pub breakdown: PricingBreakdown,
}

/// Resolves the sales settings in effect for a market/season pair.
///
/// A season's settings override the market's under the same precedence rule
/// as every other setting: only when the season is present, does not inherit
/// from its market, and actually carries settings. With no market at all the
/// platform defaults apply (net mode, 10% commission, zero markups, 10%
/// agency commission, 50% margin share).
pub fn effective_sales_settings(
    market: Option<&Market>,
    season: Option<&Season>,
) -> SalesSettings {
    if let Some(season) = season {
        if !season.inherit_from_market {
            if let Some(settings) = &season.sales_settings {
                return settings.clone();
            }
        }
    }
    market
        .and_then(|m| m.sales_settings.clone())
        .unwrap_or_default()
}

/// Computes channel tier pricing for one base price.
///
/// # NET mode
///
/// `hotel_cost = base_price`; each channel price is the cost plus its
/// markup percent.
///
/// # COMMISSION mode
///
/// `base_price` is gross and commission-inclusive:
/// `hotel_cost = base / (1 + rate/100)`. The B2C markup stacks on the gross,
/// not on the derived cost. The B2B price redistributes
/// `agency_margin_share` percent of the real margin
/// (`100·rate/(100+rate)`, margin as a percent of gross) back to the
/// agency, collapsing toward `hotel_cost` at a 100% share but never below
/// it.
///
/// # Errors
///
/// Returns [`EngineError::NegativePrice`] for a negative `base_price`.
/// Missing markups are zero, never an error; `base_price = 0` yields all
/// zero outputs.
///
/// # Example
///
/// ```
/// use pricing_engine::models::SalesSettings;
/// use pricing_engine::pricing::calculate_tier_pricing;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let pricing = calculate_tier_pricing(
///     Decimal::from_str("100").unwrap(),
///     &SalesSettings::default(),
/// ).unwrap();
/// assert_eq!(pricing.hotel_cost, Decimal::from_str("100.00").unwrap());
/// ```
pub fn calculate_tier_pricing(
    base_price: Decimal,
    settings: &SalesSettings,
) -> EngineResult<TierPricing> {
    if base_price < Decimal::ZERO {
        return Err(EngineError::NegativePrice {
            field: "base_price",
            value: base_price.to_string(),
        });
    }

    if base_price.is_zero() {
        return Ok(zero_pricing(settings));
    }

    let (hotel_cost, b2c_price, b2b_price) = match settings.working_mode {
        WorkingMode::Net => {
            let hotel_cost = base_price;
            let b2c_price = round2(hotel_cost * (Decimal::ONE + settings.markup.b2c / HUNDRED));
            let b2b_price = round2(hotel_cost * (Decimal::ONE + settings.markup.b2b / HUNDRED));
            (round2(hotel_cost), b2c_price, b2b_price)
        }
        WorkingMode::Commission => {
            let hotel_cost =
                round2(base_price / (Decimal::ONE + settings.commission_rate / HUNDRED));
            let b2c_price = round2(base_price * (Decimal::ONE + settings.markup.b2c / HUNDRED));

            // Margin as a percent of gross, then the share of it given away.
            let real_margin_percent =
                HUNDRED * settings.commission_rate / (HUNDRED + settings.commission_rate);
            let gross_b2b = base_price * (Decimal::ONE + settings.markup.b2b / HUNDRED);
            let b2b_price = round2(
                gross_b2b
                    * (Decimal::ONE
                        - real_margin_percent * settings.agency_margin_share
                            / (HUNDRED * HUNDRED)),
            );
            (hotel_cost, b2c_price, b2b_price.max(hotel_cost))
        }
    };

    Ok(TierPricing {
        hotel_cost,
        b2c_price,
        b2b_price,
        base_price,
        breakdown: PricingBreakdown {
            working_mode: settings.working_mode,
            commission_rate: settings.commission_rate,
            b2c: channel_breakdown(b2c_price, hotel_cost),
            b2b: channel_breakdown(b2b_price, hotel_cost),
        },
    })
}

fn channel_breakdown(price: Decimal, hotel_cost: Decimal) -> ChannelBreakdown {
    let partner_profit = round2(price - hotel_cost);
    let real_margin_percent = if price.is_zero() {
        Decimal::ZERO
    } else {
        round2(HUNDRED * (price - hotel_cost) / price)
    };
    ChannelBreakdown {
        price,
        partner_profit,
        real_margin_percent,
    }
}

fn zero_pricing(settings: &SalesSettings) -> TierPricing {
    let zero_channel = ChannelBreakdown {
        price: Decimal::ZERO,
        partner_profit: Decimal::ZERO,
        real_margin_percent: Decimal::ZERO,
    };
    TierPricing {
        hotel_cost: Decimal::ZERO,
        b2c_price: Decimal::ZERO,
        b2b_price: Decimal::ZERO,
        base_price: Decimal::ZERO,
        breakdown: PricingBreakdown {
            working_mode: settings.working_mode,
            commission_rate: settings.commission_rate,
            b2c: zero_channel.clone(),
            b2b: zero_channel,
        },
    }
}
