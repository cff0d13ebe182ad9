mod tax_breakdown;
mod tax_rate;

pub use tax_breakdown::{TaxBreakdown, TaxRegime};
pub use tax_rate::{TaxRate, TaxRateContext};
