use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a supply is taxed, decided by comparing seller state and place of supply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    /// Same state on both sides: CGST + SGST
    IntraState,
    /// Different states: IGST
    InterState,
    /// One of the jurisdictions is not known yet, nothing is computed
    Unresolved,
}

impl std::fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaxRegime::IntraState => write!(f, "intra_state"),
            TaxRegime::InterState => write!(f, "inter_state"),
            TaxRegime::Unresolved => write!(f, "unresolved"),
        }
    }
}

/// Per-line GST split. Rates are percentages, amounts are currency values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub igst_rate: Decimal,
    pub igst_amount: Decimal,
    pub cgst_rate: Decimal,
    pub cgst_amount: Decimal,
    pub sgst_rate: Decimal,
    pub sgst_amount: Decimal,
    pub total_tax_amount: Decimal,
}

impl TaxBreakdown {
    /// All rates and amounts zero
    pub fn zero() -> Self {
        Self::default()
    }

    /// Regime implied by which rates are populated
    pub fn regime(&self) -> TaxRegime {
        if self.igst_rate > Decimal::ZERO {
            TaxRegime::InterState
        } else if self.cgst_rate > Decimal::ZERO || self.sgst_rate > Decimal::ZERO {
            TaxRegime::IntraState
        } else {
            TaxRegime::Unresolved
        }
    }

    pub fn is_zero(&self) -> bool {
        self.total_tax_amount.is_zero()
            && self.igst_amount.is_zero()
            && self.cgst_amount.is_zero()
            && self.sgst_amount.is_zero()
    }

    /// Checks the sum identity and that IGST never coexists with CGST/SGST
    pub fn is_consistent(&self) -> bool {
        let sum_matches =
            self.total_tax_amount == self.igst_amount + self.cgst_amount + self.sgst_amount;

        let has_igst = self.igst_amount > Decimal::ZERO;
        let has_cgst = self.cgst_amount > Decimal::ZERO;
        let has_sgst = self.sgst_amount > Decimal::ZERO;

        let exclusive = match (has_igst, has_cgst, has_sgst) {
            (false, false, false) => true,
            (true, false, false) => true,
            (false, true, true) => self.cgst_amount == self.sgst_amount,
            _ => false,
        };

        sum_matches && exclusive
    }
}
