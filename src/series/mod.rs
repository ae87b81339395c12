//! The weekly-series pipeline.
//!
//! Each submodule is one stage, and every stage is a pure function from
//! input table(s) to output table(s): no I/O, no shared state, safe to call
//! repeatedly from any number of callers.
//!
//! Stage order: `parse` → `week` → `aggregate` → `filter` → `validate` →
//! `align` → `stats`.

pub mod aggregate;
pub mod align;
pub mod filter;
pub mod parse;
pub mod stats;
pub mod validate;
pub mod week;

pub use aggregate::*;
pub use align::*;
pub use filter::*;
pub use parse::*;
pub use stats::*;
pub use validate::*;
pub use week::*;
