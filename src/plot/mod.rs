//! Chart data preparation, shared by the TUI and the JSON summary.

pub mod series;

pub use series::*;
