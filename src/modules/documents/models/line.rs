// A document line is one product or service on an invoice, estimate, bill or
// purchase order. It keeps its own nominal GST rate and the breakdown computed
// from that rate and the document's jurisdictions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{checked_amount, AppError, Result};
use crate::modules::taxes::models::TaxBreakdown;

/// Client-side id used until the backend assigns a durable one
pub fn new_line_id() -> String {
    Uuid::new_v4().to_string()
}

/// Product chosen for a line, as returned by the product catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSelection {
    pub product_id: i64,
    pub description: String,
    pub unit_price: Decimal,
    pub hsn_sac_code: Option<String>,
    /// Nominal rate in percent from the rate lookup
    pub tax_rate: Decimal,
}

/// Represents a single line of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentLine {
    #[serde(default = "new_line_id")]
    pub id: String,

    pub product_id: Option<i64>,

    #[serde(default)]
    pub description: String,

    pub quantity: Decimal,

    pub unit_price: Decimal,

    pub hsn_sac_code: Option<String>,

    /// Nominal GST rate in percent (e.g. 18)
    #[serde(default)]
    pub tax_rate: Decimal,

    /// quantity × unit_price, kept at full precision
    #[serde(default)]
    pub line_total: Decimal,

    /// Computed split; zero until both jurisdictions are known
    #[serde(default)]
    pub tax: TaxBreakdown,
}

impl DocumentLine {
    /// Create a new line with validation
    ///
    /// # Arguments
    /// * `quantity` - Must be non-negative
    /// * `unit_price` - Must be non-negative
    /// * `tax_rate` - Nominal percentage, 0..=100
    pub fn new(
        product_id: Option<i64>,
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
        hsn_sac_code: Option<String>,
        tax_rate: Decimal,
    ) -> Result<Self> {
        Self::validate_quantity(quantity)?;
        Self::validate_unit_price(unit_price)?;
        Self::validate_tax_rate(tax_rate)?;

        let mut line = Self {
            id: new_line_id(),
            product_id,
            description: description.into(),
            quantity,
            unit_price,
            hsn_sac_code,
            tax_rate,
            line_total: Decimal::ZERO,
            tax: TaxBreakdown::zero(),
        };
        line.recompute_line_total()?;

        Ok(line)
    }

    /// Formula: line_total = quantity × unit_price
    ///
    /// # Errors
    /// `InvalidAmount` when the product is beyond [`MAX_AMOUNT`](crate::core::MAX_AMOUNT)
    pub fn recompute_line_total(&mut self) -> Result<()> {
        self.line_total = checked_amount(self.quantity, self.unit_price)?;
        Ok(())
    }

    pub fn set_quantity(&mut self, quantity: Decimal) -> Result<()> {
        Self::validate_quantity(quantity)?;
        self.line_total = checked_amount(quantity, self.unit_price)?;
        self.quantity = quantity;
        Ok(())
    }

    pub fn set_unit_price(&mut self, unit_price: Decimal) -> Result<()> {
        Self::validate_unit_price(unit_price)?;
        self.line_total = checked_amount(self.quantity, unit_price)?;
        self.unit_price = unit_price;
        Ok(())
    }

    /// Replace product-derived fields, keeping id and quantity
    pub fn select_product(&mut self, product: ProductSelection) -> Result<()> {
        Self::validate_unit_price(product.unit_price)?;
        Self::validate_tax_rate(product.tax_rate)?;
        let line_total = checked_amount(self.quantity, product.unit_price)?;

        self.product_id = Some(product.product_id);
        self.description = product.description;
        self.unit_price = product.unit_price;
        self.hsn_sac_code = product.hsn_sac_code;
        self.tax_rate = product.tax_rate;
        self.line_total = line_total;
        Ok(())
    }

    /// Lines with a positive total are the only ones the tax engine sees
    pub fn is_taxable(&self) -> bool {
        self.line_total > Decimal::ZERO
    }

    /// Numeric checks for fields deserialized from a client payload
    pub fn validate_amounts(&self) -> Result<()> {
        Self::validate_quantity(self.quantity)?;
        Self::validate_unit_price(self.unit_price)?;
        Self::validate_tax_rate(self.tax_rate)
    }

    /// Full check before submission
    pub fn validate(&self) -> Result<()> {
        self.validate_amounts()?;

        if self.product_id.is_none() && self.description.trim().is_empty() {
            return Err(AppError::validation(format!(
                "Line {} needs a product or a description",
                self.id
            )));
        }

        Ok(())
    }

    fn validate_quantity(quantity: Decimal) -> Result<()> {
        if quantity < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Quantity must be non-negative, got: {}",
                quantity
            )));
        }

        Ok(())
    }

    fn validate_unit_price(unit_price: Decimal) -> Result<()> {
        if unit_price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Unit price must be non-negative, got: {}",
                unit_price
            )));
        }

        Ok(())
    }

    fn validate_tax_rate(tax_rate: Decimal) -> Result<()> {
        if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE_HUNDRED {
            return Err(AppError::validation(format!(
                "Tax rate must be between 0 and 100, got: {}",
                tax_rate
            )));
        }

        Ok(())
    }
}
