use std::collections::HashSet;
use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::AppError;
use crate::middleware::CompanyId;
use crate::modules::ledger::models::{BalanceSheetRow, BalanceSheetState};
use crate::modules::ledger::services::{LedgerBalanceView, LedgerService};

/// Query parameters for the balance sheet endpoint
#[derive(Debug, Deserialize)]
pub struct BalanceSheetQuery {
    /// Format: YYYY-MM-DD, defaults to today (UTC)
    pub as_of: Option<String>,
    /// Comma-separated account ids whose children should be listed
    #[serde(default)]
    pub expand: Option<String>,
}

/// Query parameters for the account entries endpoint (both dates inclusive)
#[derive(Debug, Deserialize)]
pub struct LedgerEntriesQuery {
    pub start_date: String,
    pub end_date: String,
}

/// Display rows per section
#[derive(Debug, Default, Serialize)]
pub struct BalanceSheetRows {
    pub assets: Vec<BalanceSheetRow>,
    pub liabilities: Vec<BalanceSheetRow>,
    pub equity: Vec<BalanceSheetRow>,
}

#[derive(Debug, Serialize)]
pub struct BalanceSheetResponse {
    pub balance_sheet: BalanceSheetState,
    pub rows: BalanceSheetRows,
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::validation(format!(
            "Invalid {} format: '{}'. Expected YYYY-MM-DD",
            field, value
        ))
    })
}

fn parse_expanded(value: Option<&str>) -> Result<HashSet<i64>, AppError> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse::<i64>()
                .map_err(|_| AppError::validation(format!("Invalid account id in expand: '{}'", id)))
        })
        .collect()
}

/// GET /ledger/balance-sheet
pub async fn get_balance_sheet(
    service: web::Data<Arc<LedgerService>>,
    company_id: CompanyId,
    query: web::Query<BalanceSheetQuery>,
) -> Result<HttpResponse, AppError> {
    let as_of = match query.as_of.as_deref() {
        Some(value) => parse_date("as_of", value)?,
        None => Utc::now().date_naive(),
    };
    let expanded = parse_expanded(query.expand.as_deref())?;

    let state = service.balance_sheet(company_id.0, as_of).await?;

    let view = LedgerBalanceView::new();
    let rows = match state.report() {
        Some(report) => BalanceSheetRows {
            assets: view.visible_rows(report.data.assets.values(), &expanded),
            liabilities: view.visible_rows(report.data.liabilities.values(), &expanded),
            equity: view.visible_rows(report.data.equity.nodes(), &expanded),
        },
        None => BalanceSheetRows::default(),
    };

    // 202 tells the client to ask again later
    let mut response = match state {
        BalanceSheetState::Loading => HttpResponse::Accepted(),
        _ => HttpResponse::Ok(),
    };

    Ok(response.json(BalanceSheetResponse {
        balance_sheet: state,
        rows,
    }))
}

/// GET /ledger/accounts/{id}/entries
pub async fn get_account_entries(
    service: web::Data<Arc<LedgerService>>,
    company_id: CompanyId,
    path: web::Path<i64>,
    query: web::Query<LedgerEntriesQuery>,
) -> Result<HttpResponse, AppError> {
    let start_date = parse_date("start_date", &query.start_date)?;
    let end_date = parse_date("end_date", &query.end_date)?;

    let ledger = service
        .account_ledger(company_id.0, path.into_inner(), start_date, end_date)
        .await?;

    Ok(HttpResponse::Ok().json(ledger))
}

/// Configure ledger routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/ledger")
            .route("/balance-sheet", web::get().to(get_balance_sheet))
            .route("/accounts/{id}/entries", web::get().to(get_account_entries)),
    );
}
