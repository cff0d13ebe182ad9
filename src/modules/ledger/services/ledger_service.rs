use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::core::{format_inr, AppError, Result};
use crate::modules::ledger::models::{AccountLedger, BalanceSheetState};
use crate::modules::ledger::repositories::LedgerRepository;
use crate::modules::ledger::services::LedgerBalanceView;

/// Longest range accepted for an account ledger query, in days
pub const MAX_LEDGER_RANGE_DAYS: i64 = 366;

/// How long a balance sheet may take before the caller is told it is still loading
pub const DEFAULT_REPORT_TIMEOUT: Duration = Duration::from_secs(30);

/// Service for balance sheet and account ledger queries
pub struct LedgerService {
    repository: Arc<dyn LedgerRepository>,
    view: LedgerBalanceView,
    report_timeout: Duration,
}

impl LedgerService {
    pub fn new(repository: Arc<dyn LedgerRepository>, view: LedgerBalanceView) -> Self {
        Self {
            repository,
            view,
            report_timeout: DEFAULT_REPORT_TIMEOUT,
        }
    }

    pub fn with_report_timeout(mut self, report_timeout: Duration) -> Self {
        self.report_timeout = report_timeout;
        self
    }

    /// Fetch the balance sheet as of a date and verify it.
    ///
    /// An unbalanced sheet is logged and returned as is. A backend that does not
    /// answer within the report timeout yields [`BalanceSheetState::Loading`].
    pub async fn balance_sheet(
        &self,
        company_id: i64,
        as_of: NaiveDate,
    ) -> Result<BalanceSheetState> {
        let fetch = self.repository.balance_sheet(company_id, as_of);
        let data = match tokio::time::timeout(self.report_timeout, fetch).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(
                    company_id,
                    as_of = %as_of,
                    timeout_ms = self.report_timeout.as_millis() as u64,
                    "Balance sheet not ready in time"
                );
                return Ok(BalanceSheetState::Loading);
            }
        };
        let state = self.view.state(data);

        match state.report() {
            Some(report) if !report.check.is_balanced => {
                warn!(
                    company_id,
                    as_of = %as_of,
                    total_assets = %report.check.total_assets,
                    total_liabilities_and_equity = %report.check.total_liabilities_and_equity,
                    difference = %format_inr(report.check.difference),
                    "Balance sheet is not balanced"
                );
            }
            Some(_) => {
                info!(company_id, as_of = %as_of, "Balance sheet generated");
            }
            None => {
                info!(company_id, as_of = %as_of, "No balance sheet data");
            }
        }

        Ok(state)
    }

    /// Entries for one account with running balances
    ///
    /// # Errors
    /// Returns a validation error if `start_date > end_date` or the range exceeds
    /// [`MAX_LEDGER_RANGE_DAYS`].
    pub async fn account_ledger(
        &self,
        company_id: i64,
        account_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<AccountLedger> {
        validate_date_range(start_date, end_date)?;

        let opening = self
            .repository
            .opening_balance(company_id, account_id, start_date)
            .await?;
        let entries = self
            .repository
            .entries(company_id, account_id, start_date, end_date)
            .await?;
        let reported_closing = entries.last().map(|e| e.running_balance);

        let ledger = AccountLedger::from_entries(account_id, opening, entries);

        if let Some(reported) = reported_closing {
            if reported != ledger.closing_balance {
                warn!(
                    company_id,
                    account_id,
                    reported = %reported,
                    recomputed = %ledger.closing_balance,
                    "Backend running balance differs from recomputed balance"
                );
            }
        }

        Ok(ledger)
    }
}

/// Check that a ledger query range is ordered and not excessively long
pub fn validate_date_range(start_date: NaiveDate, end_date: NaiveDate) -> Result<()> {
    if start_date > end_date {
        return Err(AppError::validation(format!(
            "start_date ({}) must be before or equal to end_date ({})",
            start_date, end_date
        )));
    }

    let days = (end_date - start_date).num_days();
    if days > MAX_LEDGER_RANGE_DAYS {
        return Err(AppError::validation(format!(
            "Date range too large: {} days (maximum {} days)",
            days, MAX_LEDGER_RANGE_DAYS
        )));
    }

    Ok(())
}
