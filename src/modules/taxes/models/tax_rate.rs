use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Nominal GST rate row as stored by the backend rate table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TaxRate {
    pub id: i64,
    pub company_id: i64,
    /// Product-level key, takes precedence over the tax group
    pub hsn_sac_code: Option<String>,
    /// Company-level fallback key (e.g. "GST18")
    pub tax_group: Option<String>,
    /// Percentage, e.g. 18 for 18%
    pub rate: Decimal,
    pub description: Option<String>,
}

/// Lookup key for a nominal rate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxRateContext {
    pub company_id: i64,
    pub hsn_sac_code: Option<String>,
    pub tax_group: Option<String>,
}

impl TaxRateContext {
    pub fn new(company_id: i64) -> Self {
        Self {
            company_id,
            hsn_sac_code: None,
            tax_group: None,
        }
    }

    pub fn with_hsn_sac(mut self, code: impl Into<String>) -> Self {
        self.hsn_sac_code = Some(code.into());
        self
    }

    pub fn with_tax_group(mut self, group: impl Into<String>) -> Self {
        self.tax_group = Some(group.into());
        self
    }

    /// True when neither key is usable, so no lookup can match
    pub fn is_empty(&self) -> bool {
        let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
        blank(&self.hsn_sac_code) && blank(&self.tax_group)
    }
}
