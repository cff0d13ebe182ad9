pub mod error;
pub mod money;

pub use error::{AppError, Result};
pub use money::{checked_amount, format_inr, round_money, BALANCE_TOLERANCE, MAX_AMOUNT, MONEY_SCALE};
