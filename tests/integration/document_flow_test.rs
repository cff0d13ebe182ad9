//! Integration tests for the document lifecycle
//!
//! Draft edits go through the reducer, submission recomputes everything server-side,
//! and a failing number sequence falls back to a timestamp number.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use bizbooks::core::AppError;
use bizbooks::modules::documents::models::{
    Document, DocumentKind, DocumentStatus, ProductSelection,
};
use bizbooks::modules::documents::{DocumentEdit, DocumentEditor, DocumentService};
use helpers::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn service(numbering: NumberingBehavior) -> (DocumentService, Arc<InMemoryDocumentRepository>) {
    let repository = Arc::new(InMemoryDocumentRepository::new(numbering));
    let service = DocumentService::new(repository.clone(), DocumentEditor::default());
    (service, repository)
}

#[tokio::test]
async fn test_submit_intra_state_invoice() {
    let (service, repository) = service(NumberingBehavior::Sequence);

    let submitted = service
        .submit(COMPANY_ID, invoice_to("West Bengal"))
        .await
        .unwrap();

    assert_eq!(submitted.document_number, "INV/2025-26/0001");
    assert!(!submitted.number_fallback);
    assert_eq!(submitted.status, DocumentStatus::Submitted);
    assert_eq!(submitted.totals.subtotal, dec!(1500));
    assert_eq!(submitted.totals.total_cgst, dec!(67.50));
    assert_eq!(submitted.totals.total_sgst, dec!(67.50));
    assert_eq!(submitted.totals.total_igst, Decimal::ZERO);
    assert_eq!(submitted.totals.total_amount, dec!(1635));

    let stored = repository.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].lines[0].tax.cgst_amount, dec!(45));
    assert_eq!(stored[0].lines[1].tax.cgst_amount, dec!(22.50));
}

#[tokio::test]
async fn test_submit_ignores_client_totals() {
    let (service, _) = service(NumberingBehavior::Sequence);

    let mut doc = invoice_to("Maharashtra");
    doc.totals.total_amount = dec!(1);
    doc.lines[0].line_total = dec!(5);
    doc.lines[0].tax.cgst_amount = dec!(999);

    let submitted = service.submit(COMPANY_ID, doc).await.unwrap();

    assert_eq!(submitted.totals.subtotal, dec!(1500));
    assert_eq!(submitted.totals.total_igst, dec!(270));
    assert_eq!(submitted.totals.total_cgst, Decimal::ZERO);
    assert_eq!(submitted.totals.total_amount, dec!(1770));
}

#[tokio::test]
async fn test_number_failure_falls_back_to_timestamp() {
    let (service, repository) = service(NumberingBehavior::Fail);

    let submitted = service
        .submit(COMPANY_ID, invoice_to("West Bengal"))
        .await
        .unwrap();

    assert!(submitted.number_fallback);
    let millis = submitted
        .document_number
        .strip_prefix("INV-")
        .expect("fallback prefix");
    assert!(millis.parse::<i64>().unwrap() > 0);
    assert_eq!(
        repository.stored()[0].document_number.as_deref(),
        Some(submitted.document_number.as_str())
    );
}

#[tokio::test]
async fn test_empty_number_falls_back_with_kind_prefix() {
    let (service, _) = service(NumberingBehavior::Empty);

    let mut doc = invoice_to("Kerala");
    doc.kind = DocumentKind::PurchaseOrder;

    let submitted = service.submit(COMPANY_ID, doc).await.unwrap();

    assert!(submitted.number_fallback);
    assert!(submitted.document_number.starts_with("PO-"));
}

#[tokio::test]
async fn test_numbers_are_sequential_per_kind() {
    let (service, _) = service(NumberingBehavior::Sequence);

    let first = service.submit(COMPANY_ID, invoice_to("Goa")).await.unwrap();
    let second = service.submit(COMPANY_ID, invoice_to("Goa")).await.unwrap();
    let mut bill = invoice_to("Goa");
    bill.kind = DocumentKind::Bill;
    let third = service.submit(COMPANY_ID, bill).await.unwrap();

    assert_eq!(first.document_number, "INV/2025-26/0001");
    assert_eq!(second.document_number, "INV/2025-26/0002");
    assert_eq!(third.document_number, "BILL/2025-26/0001");
}

#[tokio::test]
async fn test_missing_place_of_supply_is_rejected() {
    let (service, repository) = service(NumberingBehavior::Sequence);

    let err = service
        .submit(COMPANY_ID, invoice_to(""))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(err.to_string().contains("Place of supply is required"));
    assert!(repository.stored().is_empty());
}

#[tokio::test]
async fn test_bill_without_supplier_is_rejected() {
    let (service, _) = service(NumberingBehavior::Sequence);

    let mut bill = invoice_to("Goa");
    bill.kind = DocumentKind::Bill;
    bill.counterparty_id = None;

    let err = service.submit(COMPANY_ID, bill).await.unwrap_err();
    assert!(err.to_string().contains("Supplier is required"));
}

#[tokio::test]
async fn test_due_date_before_document_date_is_rejected() {
    let (service, _) = service(NumberingBehavior::Sequence);

    let mut doc = invoice_to("Goa");
    doc.due_date = Some(date(2025, 3, 1));

    assert!(service.submit(COMPANY_ID, doc).await.is_err());
}

#[tokio::test]
async fn test_submitted_document_cannot_be_resubmitted() {
    let (service, _) = service(NumberingBehavior::Sequence);

    let mut doc = invoice_to("Goa");
    doc.status = DocumentStatus::Submitted;

    let err = service.submit(COMPANY_ID, doc).await.unwrap_err();
    assert!(err.to_string().contains("Only drafts can be submitted"));
}

#[tokio::test]
async fn test_get_is_scoped_to_company() {
    let (service, _) = service(NumberingBehavior::Sequence);

    let submitted = service
        .submit(COMPANY_ID, invoice_to("Goa"))
        .await
        .unwrap();

    let found = service.get(COMPANY_ID, submitted.id).await.unwrap();
    assert_eq!(found.document_number, Some(submitted.document_number));

    let err = service.get(COMPANY_ID + 1, submitted.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn test_edit_sequence_keeps_totals_in_step() {
    let editor = DocumentEditor::default();
    let mut doc = Document::draft(DocumentKind::Estimate, date(2025, 5, 2));

    let blank = line("", dec!(1), dec!(0), dec!(0));
    let line_id = blank.id.clone();
    doc = editor.apply(doc, DocumentEdit::AddLine { line: blank }).unwrap();
    assert!(doc.totals.is_zero());

    doc = editor
        .apply(
            doc,
            DocumentEdit::SelectProduct {
                line_id: line_id.clone(),
                product: ProductSelection {
                    product_id: 301,
                    description: "Annual maintenance".to_string(),
                    unit_price: dec!(2500),
                    hsn_sac_code: Some("998713".to_string()),
                    tax_rate: dec!(18),
                },
            },
        )
        .unwrap();
    assert_eq!(doc.totals.subtotal, dec!(2500));
    assert_eq!(doc.totals.total_tax, Decimal::ZERO);

    doc = editor
        .apply(doc, DocumentEdit::SetJurisdictionFrom { state: "Karnataka".into() })
        .unwrap();
    doc = editor
        .apply(doc, DocumentEdit::SetJurisdictionTo { state: "Tamil Nadu".into() })
        .unwrap();
    assert_eq!(doc.totals.total_igst, dec!(450));

    doc = editor
        .apply(doc, DocumentEdit::SetQuantity { line_id: line_id.clone(), quantity: dec!(2) })
        .unwrap();
    assert_eq!(doc.totals.total_igst, dec!(900));
    assert_eq!(doc.totals.total_amount, dec!(5900));

    doc = editor
        .apply(doc, DocumentEdit::RemoveLine { line_id })
        .unwrap();
    assert!(doc.lines.is_empty());
    assert!(doc.totals.is_zero());
}

#[test]
fn test_failed_edit_leaves_previous_state_usable() {
    let editor = DocumentEditor::default();
    let doc = invoice_to("Goa");
    let line_id = doc.lines[0].id.clone();
    let before = editor.apply(doc, DocumentEdit::SetCounterparty { counterparty_id: 9 }).unwrap();

    let result = editor.apply(
        before.clone(),
        DocumentEdit::SetUnitPrice { line_id, unit_price: dec!(-1) },
    );

    assert!(result.is_err());
    assert_eq!(before.counterparty_id, Some(9));
    assert_eq!(before.totals.subtotal, dec!(1500));
}
