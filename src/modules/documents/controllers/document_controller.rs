use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::middleware::CompanyId;
use crate::modules::documents::models::Document;
use crate::modules::documents::services::{DocumentEdit, DocumentService};
use crate::modules::taxes::TaxRateService;

/// Body of an edit request: the current draft plus the edit to apply
#[derive(Debug, Deserialize)]
pub struct ApplyEditRequest {
    pub document: Document,
    pub edit: DocumentEdit,
}

/// Recompute taxes and totals for a draft
/// POST /documents/preview
pub async fn preview_document(
    service: web::Data<Arc<DocumentService>>,
    request: web::Json<Document>,
) -> Result<HttpResponse, AppError> {
    let document = service.preview(request.into_inner())?;
    Ok(HttpResponse::Ok().json(document))
}

/// Apply one edit to a draft and return the recomputed draft.
/// A removed line's pending rate lookup is forgotten.
/// POST /documents/edit
pub async fn edit_document(
    service: web::Data<Arc<DocumentService>>,
    rates: web::Data<Arc<TaxRateService>>,
    request: web::Json<ApplyEditRequest>,
) -> Result<HttpResponse, AppError> {
    let ApplyEditRequest { document, edit } = request.into_inner();
    let removed = match &edit {
        DocumentEdit::RemoveLine { line_id } => Some(line_id.clone()),
        _ => None,
    };

    let document = service.editor().apply(document, edit)?;
    if let Some(line_id) = removed {
        rates.release(&line_id);
    }

    Ok(HttpResponse::Ok().json(document))
}

/// Submit a draft for persistence
/// POST /documents
pub async fn submit_document(
    service: web::Data<Arc<DocumentService>>,
    rates: web::Data<Arc<TaxRateService>>,
    company_id: CompanyId,
    request: web::Json<Document>,
) -> Result<HttpResponse, AppError> {
    let document = request.into_inner();
    let line_ids: Vec<String> = document.lines.iter().map(|l| l.id.clone()).collect();

    let submitted = service.submit(company_id.0, document).await?;
    for line_id in &line_ids {
        rates.release(line_id);
    }

    Ok(HttpResponse::Created().json(submitted))
}

/// Get document by ID
/// GET /documents/{id}
pub async fn get_document(
    service: web::Data<Arc<DocumentService>>,
    company_id: CompanyId,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let document = service.get(company_id.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(document))
}

/// Configure document routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/documents")
            .route("", web::post().to(submit_document))
            .route("/preview", web::post().to(preview_document))
            .route("/edit", web::post().to(edit_document))
            .route("/{id}", web::get().to(get_document)),
    );
}
