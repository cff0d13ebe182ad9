use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::error::AppError;
use crate::modules::documents::models::{Document, DocumentKind, DocumentStatus, DocumentTotals};
use crate::modules::documents::repositories::DocumentRepository;
use crate::modules::documents::services::numbering::fallback_document_number;
use crate::modules::documents::services::DocumentEditor;

/// Response returned after a document has been persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedDocument {
    pub id: i64,
    pub document_number: String,
    pub kind: DocumentKind,
    pub status: DocumentStatus,
    pub totals: DocumentTotals,
    /// True when the backend sequence failed and a timestamp number was used
    pub number_fallback: bool,
}

/// Service for document business logic
pub struct DocumentService {
    repository: Arc<dyn DocumentRepository>,
    editor: DocumentEditor,
}

impl DocumentService {
    pub fn new(repository: Arc<dyn DocumentRepository>, editor: DocumentEditor) -> Self {
        Self { repository, editor }
    }

    pub fn editor(&self) -> &DocumentEditor {
        &self.editor
    }

    /// Recompute line taxes and totals without persisting
    pub fn preview(&self, mut document: Document) -> Result<Document, AppError> {
        self.editor.recompute(&mut document)?;
        Ok(document)
    }

    /// Validate, recompute, number and persist a draft.
    ///
    /// Client-sent totals are ignored. A failing number sequence does not block
    /// submission; a `<PREFIX>-<millis>` number is used instead. No retries.
    pub async fn submit(
        &self,
        company_id: i64,
        mut document: Document,
    ) -> Result<SubmittedDocument, AppError> {
        if !document.is_draft() {
            return Err(AppError::validation(format!(
                "Only drafts can be submitted, document is {}",
                document.status
            )));
        }

        document.validate_for_submission()?;
        self.editor.recompute(&mut document)?;

        let (document_number, number_fallback) = match self
            .repository
            .generate_number(company_id, document.kind)
            .await
        {
            Ok(number) if !number.trim().is_empty() => (number, false),
            Ok(_) => {
                warn!(
                    company_id,
                    kind = %document.kind,
                    "Empty document number from backend, using fallback"
                );
                (fallback_document_number(document.kind, Utc::now()), true)
            }
            Err(err) => {
                warn!(
                    company_id,
                    kind = %document.kind,
                    error = %err,
                    "Document number generation failed, using fallback"
                );
                (fallback_document_number(document.kind, Utc::now()), true)
            }
        };
        document.document_number = Some(document_number.clone());

        let persisted = self.repository.create(company_id, &document).await?;

        info!(
            company_id,
            document_id = persisted.id,
            document_number = %document_number,
            kind = %document.kind,
            total_amount = %document.totals.total_amount,
            "Document submitted"
        );

        Ok(SubmittedDocument {
            id: persisted.id,
            document_number,
            kind: document.kind,
            status: persisted.status,
            totals: document.totals,
            number_fallback,
        })
    }

    /// Get a persisted document by ID
    pub async fn get(&self, company_id: i64, id: i64) -> Result<Document, AppError> {
        self.repository
            .find_by_id(company_id, id)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))
    }
}

// Service flows with in-memory repositories are in tests/integration/document_flow_test.rs
