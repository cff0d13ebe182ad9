use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::error::{AppError, Result};

/// Decimal places used for every displayed or persisted currency amount
pub const MONEY_SCALE: u32 = 2;

/// Maximum absolute difference (0.01) at which two totals are still considered equal
pub const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Largest amount (10^15) a single line may carry
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// `left × right` as an amount. Fails instead of overflowing, and rejects products
/// beyond [`MAX_AMOUNT`].
pub fn checked_amount(left: Decimal, right: Decimal) -> Result<Decimal> {
    left.checked_mul(right)
        .filter(|amount| amount.abs() <= MAX_AMOUNT)
        .ok_or_else(|| {
            AppError::invalid_amount(format!(
                "{} × {} exceeds the maximum amount of {}",
                left, right, MAX_AMOUNT
            ))
        })
}

/// Rounds an amount to currency precision.
///
/// Midpoints round away from zero, so 0.005 becomes 0.01 (not banker's rounding).
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount for display in rupees with two decimals
pub fn format_inr(amount: Decimal) -> String {
    let rounded = round_money(amount);
    if rounded < Decimal::ZERO {
        format!("-₹{:.2}", rounded.abs())
    } else {
        format!("₹{:.2}", rounded)
    }
}
