pub mod document_editor;
pub mod document_service;
pub mod numbering;
pub mod totals_aggregator;

pub use document_editor::{DocumentEdit, DocumentEditor};
pub use document_service::{DocumentService, SubmittedDocument};
pub use numbering::fallback_document_number;
pub use totals_aggregator::DocumentTotalsAggregator;
