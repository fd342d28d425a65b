//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the loaded data (`Record`, `Dataset`)
//! - user-driven inputs (`Selection`, `LatestRule`, `DashConfig`)
//! - derived outputs (`Metrics`, `DatasetStats`)

pub mod types;

pub use types::*;
