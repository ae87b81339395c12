//! Shared domain types and run configuration.

pub mod types;

pub use types::*;
