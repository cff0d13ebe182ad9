// Test helpers shared by integration and contract tests
//
// Repositories are in-memory implementations of the repository traits, so the
// services and HTTP handlers run unchanged without a database.
//
// Usage:
//   #[path = "../helpers/mod.rs"]
//   mod helpers;
//   use helpers::*;

#![allow(dead_code)]

pub mod fixtures;
pub mod memory;

pub use fixtures::*;
pub use memory::*;
