// Documents module: invoices, estimates, bills and purchase orders

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Document, DocumentKind, DocumentLine, DocumentStatus, DocumentTotals};
pub use repositories::{DocumentRepository, MySqlDocumentRepository};
pub use services::{DocumentEdit, DocumentEditor, DocumentService, DocumentTotalsAggregator};
