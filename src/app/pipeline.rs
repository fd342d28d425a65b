//! Shared dashboard pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! filter -> latest per country -> metrics -> chart series
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use serde::Serialize;
use tracing::debug;

use crate::domain::{Dataset, LatestRule, Metrics, Record, Selection};
use crate::plot::{CountrySeries, ScatterPoint, SeriesField, scatter_points, time_series};
use crate::query::{aggregate_metrics, filter, latest_per_country};

/// All computed outputs for one selection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardData {
    pub metrics: Metrics,
    pub latest: Vec<Record>,
    pub cases: Vec<CountrySeries>,
    pub new_deaths: Vec<CountrySeries>,
    pub scatter: Vec<ScatterPoint>,
    pub filtered_rows: usize,
}

/// Run the full pipeline for `selection` and return owned results.
pub fn run(dataset: &Dataset, selection: &Selection, rule: LatestRule) -> DashboardData {
    let view = filter(dataset, selection);
    let snapshot = latest_per_country(&view, rule);
    let metrics = aggregate_metrics(&snapshot, selection);

    debug!(
        selected = selection.len(),
        rows = view.len(),
        latest = snapshot.len(),
        rule = ?rule,
        "recomputed dashboard"
    );

    DashboardData {
        metrics,
        latest: snapshot.to_owned_rows(),
        cases: time_series(&view, SeriesField::TotalCases),
        new_deaths: time_series(&view, SeriesField::NewDeaths),
        scatter: scatter_points(&snapshot),
        filtered_rows: view.len(),
    }
}
