//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - memoized loading keyed by source path (`cache`)
//! - latest-snapshot CSV export (`export`)

pub mod cache;
pub mod export;
pub mod ingest;

pub use cache::*;
pub use export::*;
pub use ingest::*;
