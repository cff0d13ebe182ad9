use rust_decimal::Decimal;

use crate::core::money::round_money;
use crate::modules::documents::models::{DocumentLine, DocumentTotals};

/// Folds line totals and line taxes into document totals.
///
/// Stateless: the same lines always produce the same totals.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentTotalsAggregator;

impl DocumentTotalsAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Single pass over the lines; sums keep full precision and are rounded once
    /// at the end. An empty slice yields all-zero totals.
    pub fn recalculate_totals(&self, lines: &[DocumentLine]) -> DocumentTotals {
        let mut subtotal = Decimal::ZERO;
        let mut igst = Decimal::ZERO;
        let mut cgst = Decimal::ZERO;
        let mut sgst = Decimal::ZERO;

        for line in lines {
            subtotal += line.line_total;
            igst += line.tax.igst_amount;
            cgst += line.tax.cgst_amount;
            sgst += line.tax.sgst_amount;
        }

        let subtotal = round_money(subtotal);
        let total_igst = round_money(igst);
        let total_cgst = round_money(cgst);
        let total_sgst = round_money(sgst);
        let total_tax = total_igst + total_cgst + total_sgst;

        DocumentTotals {
            subtotal,
            total_igst,
            total_cgst,
            total_sgst,
            total_tax,
            total_amount: subtotal + total_tax,
        }
    }
}
