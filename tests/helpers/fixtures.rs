// Test data builders

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use bizbooks::modules::documents::models::{Document, DocumentKind, DocumentLine};
use bizbooks::modules::ledger::models::{AccountBalance, LedgerEntry};
use bizbooks::modules::taxes::TaxRate;

pub const COMPANY_ID: i64 = 7;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn line(
    description: &str,
    quantity: Decimal,
    unit_price: Decimal,
    rate: Decimal,
) -> DocumentLine {
    DocumentLine::new(None, description, quantity, unit_price, None, rate).unwrap()
}

/// Invoice from West Bengal to `place_of_supply` with two lines (1000 and 500 at 18%)
pub fn invoice_to(place_of_supply: &str) -> Document {
    let mut doc = Document::draft(DocumentKind::Invoice, date(2025, 4, 1));
    doc.counterparty_id = Some(42);
    doc.jurisdiction_from = "West Bengal".to_string();
    doc.jurisdiction_to = place_of_supply.to_string();
    doc.due_date = Some(date(2025, 4, 30));
    doc.lines = vec![
        line("Office chair", dec!(2), dec!(500), dec!(18)),
        line("Desk lamp", dec!(1), dec!(500), dec!(18)),
    ];
    doc
}

pub fn tax_rate(
    id: i64,
    hsn_sac_code: Option<&str>,
    tax_group: Option<&str>,
    rate: Decimal,
) -> TaxRate {
    TaxRate {
        id,
        company_id: COMPANY_ID,
        hsn_sac_code: hsn_sac_code.map(str::to_string),
        tax_group: tax_group.map(str::to_string),
        rate,
        description: None,
    }
}

pub fn account(
    account_id: i64,
    parent_id: Option<i64>,
    section: &str,
    bucket: Option<&str>,
    name: &str,
    total: Decimal,
) -> AccountBalance {
    AccountBalance {
        account_id,
        parent_id,
        section: section.to_string(),
        bucket: bucket.map(str::to_string),
        account_code: format!("{}", 1000 + account_id),
        account_name: name.to_string(),
        total,
    }
}

/// Assets 500,000 against liabilities 300,000 and equity 199,500
pub fn unbalanced_rows() -> Vec<AccountBalance> {
    vec![
        account(1, None, "asset", Some("current_assets"), "Current Assets", dec!(350000)),
        account(2, Some(1), "asset", None, "Cash", dec!(150000)),
        account(3, Some(1), "asset", None, "Receivables", dec!(200000)),
        account(4, Some(1), "asset", None, "Prepaid", dec!(0)),
        account(5, None, "asset", Some("fixed_assets"), "Fixed Assets", dec!(150000)),
        account(6, None, "liability", Some("current_liabilities"), "Creditors", dec!(300000)),
        account(7, None, "equity", Some("share_capital"), "Share Capital", dec!(100000)),
        account(8, None, "equity", Some("reserves_and_surplus"), "Reserves", dec!(90000)),
        account(9, None, "equity", Some("current_period_profit"), "Profit", dec!(9500)),
    ]
}

/// Same sheet with profit corrected to 10,000
pub fn balanced_rows() -> Vec<AccountBalance> {
    let mut rows = unbalanced_rows();
    if let Some(profit) = rows.iter_mut().find(|r| r.account_id == 9) {
        profit.total = dec!(10000);
    }
    rows
}

pub fn entry(entry_date: NaiveDate, debit: Decimal, credit: Decimal) -> LedgerEntry {
    LedgerEntry {
        entry_date,
        reference: None,
        description: "Posting".to_string(),
        debit,
        credit,
        running_balance: Decimal::ZERO,
    }
}
