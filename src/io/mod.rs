//! Input/output helpers.
//!
//! - CSV exports of the merged table and single weekly series (`export`)

pub mod export;

pub use export::*;
