use chrono::{DateTime, Utc};

use crate::modules::documents::models::DocumentKind;

/// Client-side number used when the backend sequence call fails,
/// e.g. `INV-1743465600000`
pub fn fallback_document_number(kind: DocumentKind, now: DateTime<Utc>) -> String {
    format!("{}-{}", kind.number_prefix(), now.timestamp_millis())
}
