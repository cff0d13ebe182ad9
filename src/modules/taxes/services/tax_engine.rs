use rust_decimal::Decimal;

use crate::core::error::AppError;
use crate::core::money::{round_money, MAX_AMOUNT};
use crate::modules::taxes::models::{TaxBreakdown, TaxRegime};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;
const TWO: Decimal = Decimal::TWO;

/// TaxRuleEngine decides the GST regime for a supply and splits a nominal rate
/// into IGST or CGST + SGST.
///
/// The engine does not look rates up; callers pass the nominal rate obtained from
/// [`TaxRateService`](super::TaxRateService).
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxRuleEngine;

impl TaxRuleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Classify a supply by seller state and place of supply.
    ///
    /// Comparison is exact: no trimming, no case folding, no synonym table.
    pub fn classify(&self, jurisdiction_from: &str, jurisdiction_to: &str) -> TaxRegime {
        if jurisdiction_from.is_empty() || jurisdiction_to.is_empty() {
            TaxRegime::Unresolved
        } else if jurisdiction_from == jurisdiction_to {
            TaxRegime::IntraState
        } else {
            TaxRegime::InterState
        }
    }

    /// Compute the tax breakdown for one line.
    ///
    /// Intra-state supplies use half the nominal rate as the effective rate and
    /// split the result into two equal halves, reported as CGST and SGST at
    /// `rate / 2` each. Inter-state supplies carry the full nominal rate as IGST.
    /// An unresolved jurisdiction yields [`TaxBreakdown::zero`].
    ///
    /// # Errors
    /// * `InvalidAmount` for a negative line total or one beyond [`MAX_AMOUNT`]
    /// * `Validation` for a rate outside 0..=100
    pub fn compute_tax(
        &self,
        line_total: Decimal,
        nominal_rate: Decimal,
        jurisdiction_from: &str,
        jurisdiction_to: &str,
    ) -> Result<TaxBreakdown, AppError> {
        if line_total < Decimal::ZERO {
            return Err(AppError::invalid_amount(format!(
                "Line total must be non-negative, got: {}",
                line_total
            )));
        }
        if line_total > MAX_AMOUNT {
            return Err(AppError::invalid_amount(format!(
                "Line total exceeds the maximum amount of {}, got: {}",
                MAX_AMOUNT, line_total
            )));
        }
        self.validate_rate(nominal_rate)?;

        let breakdown = match self.classify(jurisdiction_from, jurisdiction_to) {
            TaxRegime::Unresolved => TaxBreakdown::zero(),
            TaxRegime::IntraState => {
                let half_rate = nominal_rate / TWO;
                let effective = percent_of(line_total, half_rate)?;
                let half_amount = round_money(effective / TWO);

                TaxBreakdown {
                    cgst_rate: half_rate,
                    cgst_amount: half_amount,
                    sgst_rate: half_rate,
                    sgst_amount: half_amount,
                    total_tax_amount: half_amount + half_amount,
                    ..TaxBreakdown::zero()
                }
            }
            TaxRegime::InterState => {
                let igst_amount = round_money(percent_of(line_total, nominal_rate)?);

                TaxBreakdown {
                    igst_rate: nominal_rate,
                    igst_amount,
                    total_tax_amount: igst_amount,
                    ..TaxBreakdown::zero()
                }
            }
        };

        Ok(breakdown)
    }

    /// Nominal rates are percentages in 0..=100
    pub fn validate_rate(&self, rate: Decimal) -> Result<(), AppError> {
        if rate < Decimal::ZERO {
            return Err(AppError::validation("Tax rate cannot be negative"));
        }

        if rate > HUNDRED {
            return Err(AppError::validation("Tax rate cannot exceed 100%"));
        }

        Ok(())
    }
}

fn percent_of(amount: Decimal, rate: Decimal) -> Result<Decimal, AppError> {
    amount
        .checked_mul(rate)
        .and_then(|scaled| scaled.checked_div(HUNDRED))
        .ok_or_else(|| {
            AppError::invalid_amount(format!("{}% of {} is out of range", rate, amount))
        })
}
