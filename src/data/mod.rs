//! External data sources.

pub mod eia;

pub use eia::*;
