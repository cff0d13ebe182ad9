//! Bizbooks GST document and ledger service library
//!
//! Tax computation, document totals and balance sheet verification for a
//! multi-tenant small-business accounting backend.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::documents;
pub use modules::ledger;
pub use modules::taxes;
