mod document;
mod line;
mod totals;

pub use document::{CounterpartyRole, Document, DocumentKind, DocumentStatus};
pub use line::{new_line_id, DocumentLine, ProductSelection};
pub use totals::DocumentTotals;
