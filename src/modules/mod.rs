pub mod documents;
pub mod health;
pub mod ledger;
pub mod taxes;
