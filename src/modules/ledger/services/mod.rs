pub mod balance_view;
pub mod ledger_service;

pub use balance_view::LedgerBalanceView;
pub use ledger_service::{
    validate_date_range, LedgerService, DEFAULT_REPORT_TIMEOUT, MAX_LEDGER_RANGE_DAYS,
};
