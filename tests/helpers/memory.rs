// In-memory repositories

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use bizbooks::core::{AppError, Result};
use bizbooks::modules::documents::models::{Document, DocumentKind, DocumentStatus};
use bizbooks::modules::documents::repositories::{DocumentRepository, PersistedDocument};
use bizbooks::modules::ledger::models::{AccountBalance, BalanceSheetData, LedgerEntry};
use bizbooks::modules::ledger::LedgerRepository;
use bizbooks::modules::taxes::{TaxRate, TaxRateContext, TaxRateRepository};

/// Rates keyed by HSN/SAC code and by tax group, with HSN/SAC winning
#[derive(Default)]
pub struct InMemoryTaxRateRepository {
    rates: Vec<TaxRate>,
}

impl InMemoryTaxRateRepository {
    pub fn new(rates: Vec<TaxRate>) -> Self {
        Self { rates }
    }
}

#[async_trait]
impl TaxRateRepository for InMemoryTaxRateRepository {
    async fn find_rate(&self, context: &TaxRateContext) -> Result<Option<TaxRate>> {
        let company = self.rates.iter().filter(|r| r.company_id == context.company_id);

        if let Some(code) = context.hsn_sac_code.as_deref() {
            if let Some(rate) = company
                .clone()
                .find(|r| r.hsn_sac_code.as_deref() == Some(code))
            {
                return Ok(Some(rate.clone()));
            }
        }

        if let Some(group) = context.tax_group.as_deref() {
            return Ok(company
                .filter(|r| r.hsn_sac_code.is_none())
                .find(|r| r.tax_group.as_deref() == Some(group))
                .cloned());
        }

        Ok(None)
    }
}

/// How the fake backend answers number generation
#[derive(Debug, Clone)]
pub enum NumberingBehavior {
    Sequence,
    Fail,
    Empty,
}

struct StoredDocument {
    company_id: i64,
    document: Document,
}

/// Documents stored in a map, numbered per company and kind
pub struct InMemoryDocumentRepository {
    numbering: NumberingBehavior,
    sequence: Mutex<HashMap<(i64, DocumentKind), u32>>,
    documents: Mutex<Vec<StoredDocument>>,
}

impl InMemoryDocumentRepository {
    pub fn new(numbering: NumberingBehavior) -> Self {
        Self {
            numbering,
            sequence: Mutex::new(HashMap::new()),
            documents: Mutex::new(Vec::new()),
        }
    }

    pub fn stored(&self) -> Vec<Document> {
        self.documents
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.document.clone())
            .collect()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn generate_number(&self, company_id: i64, kind: DocumentKind) -> Result<String> {
        match self.numbering {
            NumberingBehavior::Fail => Err(AppError::backend("sequence unavailable")),
            NumberingBehavior::Empty => Ok(String::new()),
            NumberingBehavior::Sequence => {
                let mut sequence = self.sequence.lock().unwrap();
                let next = sequence.entry((company_id, kind)).or_insert(0);
                *next += 1;
                Ok(format!("{}/2025-26/{:04}", kind.number_prefix(), next))
            }
        }
    }

    async fn create(&self, company_id: i64, document: &Document) -> Result<PersistedDocument> {
        let mut documents = self.documents.lock().unwrap();
        let id = documents.len() as i64 + 1;

        let mut stored = document.clone();
        stored.id = Some(id);
        stored.status = DocumentStatus::Submitted;
        documents.push(StoredDocument {
            company_id,
            document: stored,
        });

        Ok(PersistedDocument {
            id,
            status: DocumentStatus::Submitted,
        })
    }

    async fn find_by_id(&self, company_id: i64, id: i64) -> Result<Option<Document>> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.company_id == company_id && s.document.id == Some(id))
            .map(|s| s.document.clone()))
    }
}

/// Flat balance rows and posted entries per company
#[derive(Default)]
pub struct InMemoryLedgerRepository {
    balances: HashMap<i64, Vec<AccountBalance>>,
    entries: HashMap<(i64, i64), Vec<LedgerEntry>>,
}

impl InMemoryLedgerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balances(mut self, company_id: i64, rows: Vec<AccountBalance>) -> Self {
        self.balances.insert(company_id, rows);
        self
    }

    pub fn with_entries(
        mut self,
        company_id: i64,
        account_id: i64,
        entries: Vec<LedgerEntry>,
    ) -> Self {
        self.entries.insert((company_id, account_id), entries);
        self
    }

    fn account_entries(
        &self,
        company_id: i64,
        account_id: i64,
    ) -> impl Iterator<Item = &LedgerEntry> {
        self.entries
            .get(&(company_id, account_id))
            .into_iter()
            .flatten()
    }
}

#[async_trait]
impl LedgerRepository for InMemoryLedgerRepository {
    async fn balance_sheet(
        &self,
        company_id: i64,
        as_of: NaiveDate,
    ) -> Result<Option<BalanceSheetData>> {
        let rows = self.balances.get(&company_id).cloned().unwrap_or_default();
        BalanceSheetData::assemble(as_of, rows)
    }

    async fn opening_balance(
        &self,
        company_id: i64,
        account_id: i64,
        before: NaiveDate,
    ) -> Result<Decimal> {
        Ok(self
            .account_entries(company_id, account_id)
            .filter(|e| e.entry_date < before)
            .map(|e| e.debit - e.credit)
            .sum())
    }

    async fn entries(
        &self,
        company_id: i64,
        account_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<LedgerEntry>> {
        Ok(self
            .account_entries(company_id, account_id)
            .filter(|e| e.entry_date >= start_date && e.entry_date <= end_date)
            .cloned()
            .collect())
    }
}
