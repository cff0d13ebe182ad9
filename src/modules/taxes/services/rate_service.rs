use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::core::error::AppError;
use crate::modules::taxes::models::{TaxRate, TaxRateContext};
use crate::modules::taxes::repositories::TaxRateRepository;

/// Ticket handed out when a lookup starts; larger is newer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RateRequestToken(pub u64);

/// Result of a guarded lookup
#[derive(Debug, Clone, PartialEq)]
pub enum RateLookupOutcome {
    /// Response belongs to the newest request for its slot
    Current(Option<TaxRate>),
    /// A newer request for the same slot was issued while this one was in flight
    Stale {
        token: RateRequestToken,
        latest: RateRequestToken,
    },
}

impl RateLookupOutcome {
    /// Nominal rate if current and found
    pub fn rate(&self) -> Option<Decimal> {
        match self {
            RateLookupOutcome::Current(Some(rate)) => Some(rate.rate),
            _ => None,
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, RateLookupOutcome::Stale { .. })
    }
}

/// Rate lookups keyed by slot (usually a line id), where only the most recently
/// issued request per slot may deliver a result.
pub struct TaxRateService {
    repository: Arc<dyn TaxRateRepository>,
    next_token: Mutex<u64>,
    latest: Mutex<HashMap<String, RateRequestToken>>,
}

impl TaxRateService {
    pub fn new(repository: Arc<dyn TaxRateRepository>) -> Self {
        Self {
            repository,
            next_token: Mutex::new(0),
            latest: Mutex::new(HashMap::new()),
        }
    }

    /// Issue a new token for `slot`, superseding any earlier one
    pub fn begin(&self, slot: &str) -> RateRequestToken {
        let token = {
            let mut counter = lock(&self.next_token);
            *counter += 1;
            RateRequestToken(*counter)
        };

        lock(&self.latest).insert(slot.to_string(), token);
        token
    }

    /// Newest token issued for `slot`
    pub fn latest_token(&self, slot: &str) -> Option<RateRequestToken> {
        lock(&self.latest).get(slot).copied()
    }

    /// Whether `token` is still the newest for `slot`
    pub fn is_current(&self, slot: &str, token: RateRequestToken) -> bool {
        self.latest_token(slot) == Some(token)
    }

    /// Classify a finished response against the newest token for its slot
    pub fn settle(
        &self,
        slot: &str,
        token: RateRequestToken,
        rate: Option<TaxRate>,
    ) -> RateLookupOutcome {
        match self.latest_token(slot) {
            Some(latest) if latest != token => {
                warn!(
                    slot = %slot,
                    token = token.0,
                    latest = latest.0,
                    "Discarding stale tax rate response"
                );
                RateLookupOutcome::Stale { token, latest }
            }
            _ => RateLookupOutcome::Current(rate),
        }
    }

    /// Look up a rate for `slot`, discarding the answer if superseded meanwhile
    pub async fn lookup(
        &self,
        slot: &str,
        context: &TaxRateContext,
    ) -> Result<RateLookupOutcome, AppError> {
        let token = self.begin(slot);
        let rate = self.current_rate(context).await?;
        Ok(self.settle(slot, token, rate))
    }

    /// Unguarded lookup, for one-shot callers
    pub async fn current_rate(
        &self,
        context: &TaxRateContext,
    ) -> Result<Option<TaxRate>, AppError> {
        if context.is_empty() {
            debug!(company_id = context.company_id, "Empty tax rate context");
            return Ok(None);
        }

        let rate = self.repository.find_rate(context).await?;
        if rate.is_none() {
            warn!(
                company_id = context.company_id,
                hsn_sac_code = ?context.hsn_sac_code,
                tax_group = ?context.tax_group,
                "No tax rate configured, line will carry zero tax"
            );
        }

        Ok(rate)
    }

    /// Forget a slot, e.g. after its line was removed
    pub fn release(&self, slot: &str) {
        lock(&self.latest).remove(slot);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
