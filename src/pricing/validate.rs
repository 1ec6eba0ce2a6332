//! Validation of computed pricing results.
//!
//! Downstream services hand back pricing summaries (e.g. from a booking
//! draft) that must carry the core monetary fields before a reservation can
//! be committed. Missing data raises a coded [`EngineError::ValidationFailure`];
//! an internally inconsistent total is only logged, because legacy records
//! with rounding drift are still honoured.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Failure code for a wholly absent pricing summary.
pub const MISSING_PRICING_DATA: &str = "MISSING_PRICING_DATA";

/// A pricing summary as produced by the search/booking flow.
///
/// Fields are optional on the wire; [`validate_pricing_summary`] decides
/// which ones are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingSummary {
    /// Total before discounts.
    #[serde(default)]
    pub original_total: Option<Decimal>,
    /// Total discount applied, defaults to zero.
    #[serde(default)]
    pub total_discount: Option<Decimal>,
    /// Total after discounts; what the guest pays.
    #[serde(default)]
    pub final_total: Option<Decimal>,
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency: Option<String>,
}

/// Validates that a pricing summary carries its required fields.
///
/// # Errors
///
/// - `None` summary → code [`MISSING_PRICING_DATA`];
/// - a missing required field → code `MISSING_PRICING_FIELD_<FIELD>`, e.g.
///   `MISSING_PRICING_FIELD_ORIGINALTOTAL`.
///
/// An inconsistent set of totals (`final_total` not equal to
/// `original_total - total_discount`) is logged at warn level and does NOT
/// fail validation.
pub fn validate_pricing_summary(summary: Option<&PricingSummary>) -> EngineResult<()> {
    let Some(summary) = summary else {
        return Err(EngineError::ValidationFailure {
            code: MISSING_PRICING_DATA.to_string(),
            message: "pricing summary is missing entirely".to_string(),
        });
    };

    let original_total = require_field(summary.original_total, "originalTotal")?;
    let final_total = require_field(summary.final_total, "finalTotal")?;
    let total_discount = summary.total_discount.unwrap_or(Decimal::ZERO);

    if final_total != original_total - total_discount {
        tracing::warn!(
            %original_total,
            %total_discount,
            %final_total,
            "inconsistent pricing totals, honouring stored final total"
        );
    }

    Ok(())
}

fn require_field(value: Option<Decimal>, field: &str) -> EngineResult<Decimal> {
    value.ok_or_else(|| EngineError::ValidationFailure {
        code: format!("MISSING_PRICING_FIELD_{}", field.to_uppercase()),
        message: format!("{field} is required"),
    })
}
