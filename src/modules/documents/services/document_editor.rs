use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};
use crate::modules::documents::models::{Document, DocumentLine, ProductSelection};
use crate::modules::documents::services::DocumentTotalsAggregator;
use crate::modules::taxes::models::TaxBreakdown;
use crate::modules::taxes::services::TaxRuleEngine;

/// One user edit to a draft document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentEdit {
    AddLine { line: DocumentLine },
    RemoveLine { line_id: String },
    SetQuantity { line_id: String, quantity: Decimal },
    SetUnitPrice { line_id: String, unit_price: Decimal },
    SelectProduct { line_id: String, product: ProductSelection },
    SetJurisdictionFrom { state: String },
    SetJurisdictionTo { state: String },
    SetCounterparty { counterparty_id: i64 },
}

/// Reducer for draft documents: every edit is followed by a synchronous tax
/// recompute and a fresh totals aggregation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentEditor {
    engine: TaxRuleEngine,
    aggregator: DocumentTotalsAggregator,
}

impl DocumentEditor {
    pub fn new(engine: TaxRuleEngine, aggregator: DocumentTotalsAggregator) -> Self {
        Self { engine, aggregator }
    }

    /// Apply `edit` and return the updated document.
    ///
    /// Lines arriving with the document are untrusted: after the edit every line
    /// is revalidated, its total and tax recomputed, and the totals rebuilt.
    /// On error the input is dropped and nothing is returned, so a caller keeping
    /// the previous state never observes a half-applied edit.
    pub fn apply(&self, mut document: Document, edit: DocumentEdit) -> Result<Document> {
        match edit {
            DocumentEdit::AddLine { line } => {
                document.lines.push(line);
            }
            DocumentEdit::RemoveLine { line_id } => {
                let before = document.lines.len();
                document.lines.retain(|l| l.id != line_id);
                if document.lines.len() == before {
                    return Err(AppError::validation(format!("Unknown line: {}", line_id)));
                }
            }
            DocumentEdit::SetQuantity { line_id, quantity } => {
                document.line_mut(&line_id)?.set_quantity(quantity)?;
            }
            DocumentEdit::SetUnitPrice { line_id, unit_price } => {
                document.line_mut(&line_id)?.set_unit_price(unit_price)?;
            }
            DocumentEdit::SelectProduct { line_id, product } => {
                document.line_mut(&line_id)?.select_product(product)?;
            }
            DocumentEdit::SetJurisdictionFrom { state } => {
                document.jurisdiction_from = state;
            }
            DocumentEdit::SetJurisdictionTo { state } => {
                document.jurisdiction_to = state;
            }
            DocumentEdit::SetCounterparty { counterparty_id } => {
                document.counterparty_id = Some(counterparty_id);
            }
        }

        self.recompute(&mut document)?;
        Ok(document)
    }

    /// Full recompute: validate each line, then line totals, every line's tax,
    /// then document totals. Client-supplied totals and breakdowns are overwritten.
    pub fn recompute(&self, document: &mut Document) -> Result<()> {
        for line in document.lines.iter_mut() {
            line.validate_amounts()?;
            line.recompute_line_total()?;
        }
        self.retax_all(document)?;
        document.totals = self.aggregator.recalculate_totals(&document.lines);
        Ok(())
    }

    fn retax_all(&self, document: &mut Document) -> Result<()> {
        let (from, to) = jurisdictions(document);
        for line in document.lines.iter_mut() {
            self.retax_line(line, &from, &to)?;
        }
        Ok(())
    }

    fn retax_line(&self, line: &mut DocumentLine, from: &str, to: &str) -> Result<()> {
        line.tax = if line.is_taxable() {
            self.engine.compute_tax(line.line_total, line.tax_rate, from, to)?
        } else {
            TaxBreakdown::zero()
        };
        Ok(())
    }
}

fn jurisdictions(document: &Document) -> (String, String) {
    (
        document.jurisdiction_from.clone(),
        document.jurisdiction_to.clone(),
    )
}
