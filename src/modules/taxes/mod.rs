pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{TaxBreakdown, TaxRate, TaxRateContext, TaxRegime};
pub use repositories::{MySqlTaxRateRepository, TaxRateRepository};
pub use services::{TaxRateService, TaxRuleEngine};
