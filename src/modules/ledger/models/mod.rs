mod balance_sheet;
mod ledger_entry;

pub use balance_sheet::{
    AccountBalance, AccountSection, BalanceCheck, BalanceSheetData, BalanceSheetNode,
    BalanceSheetReport, BalanceSheetRow, BalanceSheetState, EquitySection,
};
pub use ledger_entry::{AccountLedger, LedgerEntry};
