use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::error::AppError;
use crate::modules::taxes::models::{TaxRate, TaxRateContext};

/// Source of nominal GST rates
#[async_trait]
pub trait TaxRateRepository: Send + Sync {
    /// Resolve the nominal rate for a context.
    ///
    /// An HSN/SAC match wins over a tax-group match; `None` when neither matches.
    async fn find_rate(&self, context: &TaxRateContext) -> Result<Option<TaxRate>, AppError>;
}

pub struct MySqlTaxRateRepository {
    pool: MySqlPool,
}

impl MySqlTaxRateRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn find_by_hsn_sac(
        &self,
        company_id: i64,
        code: &str,
    ) -> Result<Option<TaxRate>, AppError> {
        let rate = sqlx::query_as::<_, TaxRate>(
            r#"
            SELECT id, company_id, hsn_sac_code, tax_group, rate, description
            FROM tax_rates
            WHERE company_id = ? AND hsn_sac_code = ? AND is_active = TRUE
            ORDER BY updated_at DESC
            LIMIT 1
            "#,
        )
        .bind(company_id)
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rate)
    }

    async fn find_by_tax_group(
        &self,
        company_id: i64,
        group: &str,
    ) -> Result<Option<TaxRate>, AppError> {
        let rate = sqlx::query_as::<_, TaxRate>(
            r#"
            SELECT id, company_id, hsn_sac_code, tax_group, rate, description
            FROM tax_rates
            WHERE company_id = ? AND tax_group = ? AND hsn_sac_code IS NULL AND is_active = TRUE
            ORDER BY updated_at DESC
            LIMIT 1
            "#,
        )
        .bind(company_id)
        .bind(group)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rate)
    }
}

#[async_trait]
impl TaxRateRepository for MySqlTaxRateRepository {
    async fn find_rate(&self, context: &TaxRateContext) -> Result<Option<TaxRate>, AppError> {
        if let Some(code) = context.hsn_sac_code.as_deref().filter(|c| !c.trim().is_empty()) {
            if let Some(rate) = self.find_by_hsn_sac(context.company_id, code).await? {
                return Ok(Some(rate));
            }
        }

        if let Some(group) = context.tax_group.as_deref().filter(|g| !g.trim().is_empty()) {
            return self.find_by_tax_group(context.company_id, group).await;
        }

        Ok(None)
    }
}
