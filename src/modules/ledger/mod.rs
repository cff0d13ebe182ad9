// Ledger module: balance sheet verification and account ledgers

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{AccountLedger, BalanceCheck, BalanceSheetData, BalanceSheetNode, BalanceSheetState};
pub use repositories::{LedgerRepository, MySqlLedgerRepository};
pub use services::{LedgerBalanceView, LedgerService};
