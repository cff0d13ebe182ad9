//! Tax controller for HTTP endpoints
//!
//! Exposes the GST split for a single line and the nominal rate lookup. A rate
//! lookup tagged with a `line_id` is guarded: when the same line issues a newer
//! lookup before this one answers, the answer is flagged stale.

use std::sync::Arc;

use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::error::AppError;
use crate::middleware::CompanyId;
use crate::modules::taxes::models::{TaxBreakdown, TaxRate, TaxRateContext, TaxRegime};
use crate::modules::taxes::services::{RateLookupOutcome, TaxRateService, TaxRuleEngine};

#[derive(Debug, Deserialize)]
pub struct ComputeTaxRequest {
    pub line_total: Decimal,
    /// Nominal rate in percent
    pub rate: Decimal,
    #[serde(default)]
    pub jurisdiction_from: String,
    #[serde(default)]
    pub jurisdiction_to: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ComputeTaxResponse {
    pub regime: TaxRegime,
    pub tax: TaxBreakdown,
}

#[derive(Debug, Deserialize)]
pub struct RateQuery {
    pub hsn_sac_code: Option<String>,
    pub tax_group: Option<String>,
    /// Document line the rate is for
    pub line_id: Option<String>,
}

/// Answer to a lookup tagged with a line id
#[derive(Debug, Serialize, Deserialize)]
pub struct LineRateResponse {
    pub line_id: String,
    /// A newer lookup for the same line was issued; this answer must be dropped
    pub stale: bool,
    pub rate: Option<TaxRate>,
}

/// Compute the GST split for one line
/// POST /taxes/compute
pub async fn compute_tax(
    engine: web::Data<TaxRuleEngine>,
    request: web::Json<ComputeTaxRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let regime = engine.classify(&request.jurisdiction_from, &request.jurisdiction_to);
    let tax = engine.compute_tax(
        request.line_total,
        request.rate,
        &request.jurisdiction_from,
        &request.jurisdiction_to,
    )?;

    Ok(HttpResponse::Ok().json(ComputeTaxResponse { regime, tax }))
}

/// Resolve the nominal rate for the caller's company
/// GET /taxes/rates
pub async fn get_rate(
    service: web::Data<Arc<TaxRateService>>,
    company_id: CompanyId,
    query: web::Query<RateQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let context = TaxRateContext {
        company_id: company_id.0,
        hsn_sac_code: query.hsn_sac_code,
        tax_group: query.tax_group,
    };

    if context.is_empty() {
        return Err(AppError::validation(
            "Either hsn_sac_code or tax_group is required",
        ));
    }

    let line_id = match query.line_id.filter(|id| !id.trim().is_empty()) {
        Some(line_id) => line_id,
        None => {
            let rate = service
                .current_rate(&context)
                .await?
                .ok_or_else(|| AppError::not_found("Tax rate not configured"))?;
            return Ok(HttpResponse::Ok().json(rate));
        }
    };

    let response = match service.lookup(&line_id, &context).await? {
        RateLookupOutcome::Current(Some(rate)) => LineRateResponse {
            line_id,
            stale: false,
            rate: Some(rate),
        },
        RateLookupOutcome::Current(None) => {
            return Err(AppError::not_found("Tax rate not configured"));
        }
        RateLookupOutcome::Stale { .. } => LineRateResponse {
            line_id,
            stale: true,
            rate: None,
        },
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Configure tax routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/taxes")
            .route("/compute", web::post().to(compute_tax))
            .route("/rates", web::get().to(get_rate)),
    );
}
