pub mod rate_service;
pub mod tax_engine;

pub use rate_service::{RateLookupOutcome, RateRequestToken, TaxRateService};
pub use tax_engine::TaxRuleEngine;
