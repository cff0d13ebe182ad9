use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One posted movement on an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct LedgerEntry {
    pub entry_date: NaiveDate,
    pub reference: Option<String>,
    pub description: String,
    pub debit: Decimal,
    pub credit: Decimal,
    /// Balance after this entry: previous + debit - credit
    pub running_balance: Decimal,
}

/// Ordered entries for one account over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountLedger {
    pub account_id: i64,
    pub opening_balance: Decimal,
    pub entries: Vec<LedgerEntry>,
    pub total_debits: Decimal,
    pub total_credits: Decimal,
    pub closing_balance: Decimal,
}

impl AccountLedger {
    /// Build a ledger, recomputing every running balance from the opening balance.
    /// Entries are expected in posting order.
    pub fn from_entries(
        account_id: i64,
        opening_balance: Decimal,
        entries: Vec<LedgerEntry>,
    ) -> Self {
        let mut balance = opening_balance;
        let mut total_debits = Decimal::ZERO;
        let mut total_credits = Decimal::ZERO;
        let entries: Vec<LedgerEntry> = entries
            .into_iter()
            .map(|mut entry| {
                total_debits += entry.debit;
                total_credits += entry.credit;
                balance = balance + entry.debit - entry.credit;
                entry.running_balance = balance;
                entry
            })
            .collect();

        Self {
            account_id,
            opening_balance,
            entries,
            total_debits,
            total_credits,
            closing_balance: balance,
        }
    }
}
