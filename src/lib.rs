//! `eia-weekly` library crate.
//!
//! The binary (`eiaw`) is a thin wrapper around this library so that:
//!
//! - the whole pipeline is testable without spawning processes or a network
//! - modules are reusable (e.g., a future dashboard front-end, notebooks)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod series;
