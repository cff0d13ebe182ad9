use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::MySqlPool;

use crate::core::error::AppError;
use crate::modules::ledger::models::{AccountBalance, BalanceSheetData, LedgerEntry};

/// Read access to account balances and posted entries
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Balance sheet tree as of a date; `None` when the company has no balances
    async fn balance_sheet(
        &self,
        company_id: i64,
        as_of: NaiveDate,
    ) -> Result<Option<BalanceSheetData>, AppError>;

    /// Balance of an account before `before` (exclusive)
    async fn opening_balance(
        &self,
        company_id: i64,
        account_id: i64,
        before: NaiveDate,
    ) -> Result<Decimal, AppError>;

    /// Entries in posting order, both bounds inclusive
    async fn entries(
        &self,
        company_id: i64,
        account_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<LedgerEntry>, AppError>;
}

pub struct MySqlLedgerRepository {
    pool: MySqlPool,
}

impl MySqlLedgerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerRepository for MySqlLedgerRepository {
    async fn balance_sheet(
        &self,
        company_id: i64,
        as_of: NaiveDate,
    ) -> Result<Option<BalanceSheetData>, AppError> {
        // Procedure returns one flat row per account with its parent link
        let rows = sqlx::query_as::<_, AccountBalance>("CALL get_balance_sheet(?, ?)")
            .bind(company_id)
            .bind(as_of)
            .fetch_all(&self.pool)
            .await?;

        BalanceSheetData::assemble(as_of, rows)
    }

    async fn opening_balance(
        &self,
        company_id: i64,
        account_id: i64,
        before: NaiveDate,
    ) -> Result<Decimal, AppError> {
        let balance: Option<Decimal> = sqlx::query_scalar(
            r#"
            SELECT SUM(debit - credit)
            FROM ledger_entries
            WHERE company_id = ? AND account_id = ? AND entry_date < ?
            "#,
        )
        .bind(company_id)
        .bind(account_id)
        .bind(before)
        .fetch_one(&self.pool)
        .await?;

        Ok(balance.unwrap_or_default())
    }

    async fn entries(
        &self,
        company_id: i64,
        account_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<LedgerEntry>, AppError> {
        let entries = sqlx::query_as::<_, LedgerEntry>(
            r#"
            SELECT entry_date, reference, description, debit, credit, running_balance
            FROM ledger_entries
            WHERE company_id = ? AND account_id = ? AND entry_date BETWEEN ? AND ?
            ORDER BY entry_date, id
            "#,
        )
        .bind(company_id)
        .bind(account_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
