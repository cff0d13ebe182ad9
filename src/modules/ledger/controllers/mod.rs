mod ledger_controller;

pub use ledger_controller::configure;
