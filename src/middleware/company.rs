use actix_web::{dev::Payload, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::core::AppError;

/// Header carrying the tenant (company) every request is scoped to
pub const COMPANY_HEADER: &str = "X-Company-ID";

/// Company the request acts on, extracted from `X-Company-ID`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompanyId(pub i64);

impl FromRequest for CompanyId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_company_id(req))
    }
}

fn parse_company_id(req: &HttpRequest) -> Result<CompanyId, AppError> {
    let raw = req
        .headers()
        .get(COMPANY_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::validation(format!("Missing {} header", COMPANY_HEADER)))?;

    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(CompanyId(id)),
        _ => Err(AppError::validation(format!(
            "Invalid {} header: {}",
            COMPANY_HEADER, raw
        ))),
    }
}
