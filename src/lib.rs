//! `covid-dash` library crate.
//!
//! The binary (`covid-dash`) is a thin wrapper around this library so that:
//!
//! - the load/filter/aggregate pipeline is testable without a terminal
//! - the query functions are reusable by other front-ends
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod query;
pub mod report;
pub mod tui;
