// MySQL persistence for documents, their lines and per-line tax allocations.
//
// Document numbers come from the backend's `generate_document_number` stored
// function; inserts of the document, lines and allocations share one transaction.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, MySql, MySqlPool, Transaction};

use crate::core::{AppError, Result};
use crate::modules::documents::models::{
    Document, DocumentKind, DocumentLine, DocumentStatus, DocumentTotals,
};
use crate::modules::taxes::models::TaxBreakdown;

/// What the backend hands back after a successful insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedDocument {
    pub id: i64,
    pub status: DocumentStatus,
}

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Next number in the company's sequence for this kind
    async fn generate_number(&self, company_id: i64, kind: DocumentKind) -> Result<String>;

    /// Persist a fully computed document with its lines and tax allocations
    async fn create(&self, company_id: i64, document: &Document) -> Result<PersistedDocument>;

    /// Load a document with its lines, scoped to the company
    async fn find_by_id(&self, company_id: i64, id: i64) -> Result<Option<Document>>;
}

/// Repository for document database operations
pub struct MySqlDocumentRepository {
    pool: MySqlPool,
}

impl MySqlDocumentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn insert_line(
        &self,
        tx: &mut Transaction<'_, MySql>,
        document_id: i64,
        position: usize,
        line: &DocumentLine,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO document_lines (
                document_id, position, product_id, description, quantity,
                unit_price, hsn_sac_code, tax_rate, line_total
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(document_id)
        .bind(position as i32)
        .bind(line.product_id)
        .bind(&line.description)
        .bind(line.quantity)
        .bind(line.unit_price)
        .bind(&line.hsn_sac_code)
        .bind(line.tax_rate)
        .bind(line.line_total)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create document line: {}", e)))?;

        let line_id = result.last_insert_id() as i64;
        let tax = &line.tax;

        sqlx::query(
            r#"
            INSERT INTO document_line_taxes (
                document_line_id, igst_rate, igst_amount, cgst_rate, cgst_amount,
                sgst_rate, sgst_amount, total_tax_amount
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(line_id)
        .bind(tax.igst_rate)
        .bind(tax.igst_amount)
        .bind(tax.cgst_rate)
        .bind(tax.cgst_amount)
        .bind(tax.sgst_rate)
        .bind(tax.sgst_amount)
        .bind(tax.total_tax_amount)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create tax allocation: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl DocumentRepository for MySqlDocumentRepository {
    async fn generate_number(&self, company_id: i64, kind: DocumentKind) -> Result<String> {
        let number: Option<String> =
            sqlx::query_scalar("SELECT generate_document_number(?, ?)")
                .bind(company_id)
                .bind(kind.as_str())
                .fetch_one(&self.pool)
                .await?;

        number
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| AppError::backend(format!("No {} number generated", kind)))
    }

    async fn create(&self, company_id: i64, document: &Document) -> Result<PersistedDocument> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to start transaction: {}", e)))?;

        let status = DocumentStatus::Submitted;
        let totals = &document.totals;

        let result = sqlx::query(
            r#"
            INSERT INTO documents (
                company_id, kind, document_number, counterparty_id, document_date,
                due_date, jurisdiction_from, jurisdiction_to, subtotal, total_igst,
                total_cgst, total_sgst, total_tax, total_amount, status, notes
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(company_id)
        .bind(document.kind.as_str())
        .bind(&document.document_number)
        .bind(document.counterparty_id)
        .bind(document.document_date)
        .bind(document.due_date)
        .bind(&document.jurisdiction_from)
        .bind(&document.jurisdiction_to)
        .bind(totals.subtotal)
        .bind(totals.total_igst)
        .bind(totals.total_cgst)
        .bind(totals.total_sgst)
        .bind(totals.total_tax)
        .bind(totals.total_amount)
        .bind(status.to_string())
        .bind(&document.notes)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::validation(format!(
                        "Document number '{}' already exists",
                        document.document_number.as_deref().unwrap_or_default()
                    ));
                }
            }
            AppError::Internal(format!("Failed to create document: {}", e))
        })?;

        let document_id = result.last_insert_id() as i64;

        for (position, line) in document.lines.iter().enumerate() {
            self.insert_line(&mut tx, document_id, position, line).await?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to commit transaction: {}", e)))?;

        Ok(PersistedDocument {
            id: document_id,
            status,
        })
    }

    async fn find_by_id(&self, company_id: i64, id: i64) -> Result<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, kind, document_number, counterparty_id, document_date, due_date,
                   jurisdiction_from, jurisdiction_to, subtotal, total_igst, total_cgst,
                   total_sgst, total_tax, total_amount, status, notes
            FROM documents
            WHERE id = ? AND company_id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let lines = sqlx::query_as::<_, LineRow>(
            r#"
            SELECT l.id, l.product_id, l.description, l.quantity, l.unit_price,
                   l.hsn_sac_code, l.tax_rate, l.line_total,
                   t.igst_rate, t.igst_amount, t.cgst_rate, t.cgst_amount,
                   t.sgst_rate, t.sgst_amount, t.total_tax_amount
            FROM document_lines l
            LEFT JOIN document_line_taxes t ON t.document_line_id = l.id
            WHERE l.document_id = ?
            ORDER BY l.position
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(row.into_document(lines)?))
    }
}

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: i64,
    kind: String,
    document_number: Option<String>,
    counterparty_id: Option<i64>,
    document_date: NaiveDate,
    due_date: Option<NaiveDate>,
    jurisdiction_from: String,
    jurisdiction_to: String,
    subtotal: Decimal,
    total_igst: Decimal,
    total_cgst: Decimal,
    total_sgst: Decimal,
    total_tax: Decimal,
    total_amount: Decimal,
    status: String,
    notes: Option<String>,
}

impl DocumentRow {
    fn into_document(self, lines: Vec<LineRow>) -> Result<Document> {
        let kind = self.kind.parse::<DocumentKind>().map_err(AppError::backend)?;
        let status = self
            .status
            .parse::<DocumentStatus>()
            .map_err(AppError::backend)?;

        Ok(Document {
            id: Some(self.id),
            document_number: self.document_number,
            kind,
            counterparty_id: self.counterparty_id,
            document_date: self.document_date,
            due_date: self.due_date,
            jurisdiction_from: self.jurisdiction_from,
            jurisdiction_to: self.jurisdiction_to,
            lines: lines.into_iter().map(LineRow::into_line).collect(),
            totals: DocumentTotals {
                subtotal: self.subtotal,
                total_igst: self.total_igst,
                total_cgst: self.total_cgst,
                total_sgst: self.total_sgst,
                total_tax: self.total_tax,
                total_amount: self.total_amount,
            },
            status,
            notes: self.notes,
        })
    }
}

#[derive(Debug, FromRow)]
struct LineRow {
    id: i64,
    product_id: Option<i64>,
    description: String,
    quantity: Decimal,
    unit_price: Decimal,
    hsn_sac_code: Option<String>,
    tax_rate: Decimal,
    line_total: Decimal,
    igst_rate: Option<Decimal>,
    igst_amount: Option<Decimal>,
    cgst_rate: Option<Decimal>,
    cgst_amount: Option<Decimal>,
    sgst_rate: Option<Decimal>,
    sgst_amount: Option<Decimal>,
    total_tax_amount: Option<Decimal>,
}

impl LineRow {
    fn into_line(self) -> DocumentLine {
        DocumentLine {
            id: self.id.to_string(),
            product_id: self.product_id,
            description: self.description,
            quantity: self.quantity,
            unit_price: self.unit_price,
            hsn_sac_code: self.hsn_sac_code,
            tax_rate: self.tax_rate,
            line_total: self.line_total,
            tax: TaxBreakdown {
                igst_rate: self.igst_rate.unwrap_or_default(),
                igst_amount: self.igst_amount.unwrap_or_default(),
                cgst_rate: self.cgst_rate.unwrap_or_default(),
                cgst_amount: self.cgst_amount.unwrap_or_default(),
                sgst_rate: self.sgst_rate.unwrap_or_default(),
                sgst_amount: self.sgst_amount.unwrap_or_default(),
                total_tax_amount: self.total_tax_amount.unwrap_or_default(),
            },
        }
    }
}
