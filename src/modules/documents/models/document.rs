// Invoices, estimates, bills and purchase orders share one shape and differ only
// in whether the counterparty is a customer or a supplier. Status transitions
// after submission belong to the backend; locally a document is only ever a draft.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::line::DocumentLine;
use super::totals::DocumentTotals;
use crate::core::{AppError, Result};

/// Which side of the trade the counterparty is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterpartyRole {
    Customer,
    Supplier,
}

impl std::fmt::Display for CounterpartyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CounterpartyRole::Customer => write!(f, "Customer"),
            CounterpartyRole::Supplier => write!(f, "Supplier"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice,
    Estimate,
    Bill,
    PurchaseOrder,
}

impl DocumentKind {
    pub fn counterparty_role(&self) -> CounterpartyRole {
        match self {
            DocumentKind::Invoice | DocumentKind::Estimate => CounterpartyRole::Customer,
            DocumentKind::Bill | DocumentKind::PurchaseOrder => CounterpartyRole::Supplier,
        }
    }

    /// Prefix of generated and fallback document numbers
    pub fn number_prefix(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "INV",
            DocumentKind::Estimate => "EST",
            DocumentKind::Bill => "BILL",
            DocumentKind::PurchaseOrder => "PO",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Estimate => "estimate",
            DocumentKind::Bill => "bill",
            DocumentKind::PurchaseOrder => "purchase_order",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "invoice" => Ok(DocumentKind::Invoice),
            "estimate" => Ok(DocumentKind::Estimate),
            "bill" => Ok(DocumentKind::Bill),
            "purchase_order" => Ok(DocumentKind::PurchaseOrder),
            _ => Err(format!("Invalid document kind: {}", s)),
        }
    }
}

/// Document status lifecycle, owned by the backend after submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// In-memory, not yet persisted
    #[default]
    Draft,
    Submitted,
    Sent,
    Approved,
    Paid,
    Cancelled,
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStatus::Draft => write!(f, "draft"),
            DocumentStatus::Submitted => write!(f, "submitted"),
            DocumentStatus::Sent => write!(f, "sent"),
            DocumentStatus::Approved => write!(f, "approved"),
            DocumentStatus::Paid => write!(f, "paid"),
            DocumentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "draft" => Ok(DocumentStatus::Draft),
            "submitted" => Ok(DocumentStatus::Submitted),
            "sent" => Ok(DocumentStatus::Sent),
            "approved" => Ok(DocumentStatus::Approved),
            "paid" => Ok(DocumentStatus::Paid),
            "cancelled" => Ok(DocumentStatus::Cancelled),
            _ => Err(format!("Invalid document status: {}", s)),
        }
    }
}

/// A financial document being edited or already persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Durable id, assigned by the backend on submission
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub document_number: Option<String>,

    pub kind: DocumentKind,

    /// Customer or supplier, depending on `kind`
    pub counterparty_id: Option<i64>,

    pub document_date: NaiveDate,

    /// Due date for invoices and bills, expiry date for estimates and orders
    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    /// Company (seller) state
    #[serde(default)]
    pub jurisdiction_from: String,

    /// Place of supply, or supplier state for purchases
    #[serde(default)]
    pub jurisdiction_to: String,

    #[serde(default)]
    pub lines: Vec<DocumentLine>,

    #[serde(default)]
    pub totals: DocumentTotals,

    #[serde(default)]
    pub status: DocumentStatus,

    #[serde(default)]
    pub notes: Option<String>,
}

impl Document {
    /// Start an empty draft
    pub fn draft(kind: DocumentKind, document_date: NaiveDate) -> Self {
        Self {
            id: None,
            document_number: None,
            kind,
            counterparty_id: None,
            document_date,
            due_date: None,
            jurisdiction_from: String::new(),
            jurisdiction_to: String::new(),
            lines: Vec::new(),
            totals: DocumentTotals::default(),
            status: DocumentStatus::Draft,
            notes: None,
        }
    }

    pub fn line(&self, line_id: &str) -> Option<&DocumentLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    pub fn line_mut(&mut self, line_id: &str) -> Result<&mut DocumentLine> {
        self.lines
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or_else(|| AppError::validation(format!("Unknown line: {}", line_id)))
    }

    pub fn is_draft(&self) -> bool {
        self.status == DocumentStatus::Draft
    }

    /// Required-field checks run before submission
    pub fn validate_for_submission(&self) -> Result<()> {
        let role = self.kind.counterparty_role();

        if self.counterparty_id.is_none() {
            return Err(AppError::validation(format!("{} is required", role)));
        }

        if self.jurisdiction_from.trim().is_empty() {
            return Err(AppError::validation("Company state is required"));
        }

        if self.jurisdiction_to.trim().is_empty() {
            let field = match role {
                CounterpartyRole::Customer => "Place of supply",
                CounterpartyRole::Supplier => "Supplier state",
            };
            return Err(AppError::validation(format!("{} is required", field)));
        }

        if self.lines.is_empty() {
            return Err(AppError::validation(format!(
                "{} must have at least one line",
                self.kind
            )));
        }

        for line in &self.lines {
            line.validate()?;
        }

        if let Some(due_date) = self.due_date {
            if due_date < self.document_date {
                return Err(AppError::validation(format!(
                    "Due date ({}) cannot be before document date ({})",
                    due_date, self.document_date
                )));
            }
        }

        Ok(())
    }
}
