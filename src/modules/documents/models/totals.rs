use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Document-level sums derived from the lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentTotals {
    pub subtotal: Decimal,
    pub total_igst: Decimal,
    pub total_cgst: Decimal,
    pub total_sgst: Decimal,
    pub total_tax: Decimal,
    pub total_amount: Decimal,
}

impl DocumentTotals {
    /// Nothing to show; the totals card is not rendered
    pub fn is_zero(&self) -> bool {
        self.subtotal.is_zero() && self.total_tax.is_zero() && self.total_amount.is_zero()
    }

    /// total_tax and total_amount agree with their components
    pub fn is_consistent(&self) -> bool {
        self.total_tax == self.total_igst + self.total_cgst + self.total_sgst
            && self.total_amount == self.subtotal + self.total_tax
    }
}
