//! Plot-ready series built from a filtered view or a latest snapshot.
//!
//! Renderers only see plain `(f64, f64)` points and bounds. Dates become
//! "days since the common era" on the x axis so they can share a numeric
//! coordinate system with everything else.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::Record;
use crate::query::{FilteredView, LatestSnapshot};

/// Which record field a time series plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeriesField {
    TotalCases,
    NewDeaths,
}

impl SeriesField {
    pub fn display_name(self) -> &'static str {
        match self {
            SeriesField::TotalCases => "total cases",
            SeriesField::NewDeaths => "new deaths",
        }
    }

    fn value(self, record: &Record) -> u64 {
        match self {
            SeriesField::TotalCases => record.total_cases,
            SeriesField::NewDeaths => record.new_deaths,
        }
    }
}

/// One country's values over time, sorted by date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySeries {
    pub country: String,
    pub points: Vec<(NaiveDate, u64)>,
}

impl CountrySeries {
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|&(d, v)| (date_to_x(d), v as f64))
            .collect()
    }
}

/// One country's latest totals for the cases-vs-deaths scatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScatterPoint {
    pub country: String,
    pub total_cases: u64,
    pub total_deaths: u64,
    pub population: u64,
}

/// Build one series per country (first-appearance order), each sorted by date.
pub fn time_series(view: &FilteredView<'_>, field: SeriesField) -> Vec<CountrySeries> {
    let mut out: Vec<CountrySeries> = Vec::new();
    for record in view.iter() {
        let point = (record.date, field.value(record));
        match out.iter_mut().find(|s| s.country == record.country) {
            Some(series) => series.points.push(point),
            None => out.push(CountrySeries {
                country: record.country.clone(),
                points: vec![point],
            }),
        }
    }

    for series in &mut out {
        // Stable: rows sharing a date keep file order.
        series.points.sort_by_key(|&(d, _)| d);
    }
    out
}

pub fn scatter_points(snapshot: &LatestSnapshot<'_>) -> Vec<ScatterPoint> {
    snapshot
        .rows
        .iter()
        .map(|r| ScatterPoint {
            country: r.country.clone(),
            total_cases: r.total_cases,
            total_deaths: r.total_deaths,
            population: r.population,
        })
        .collect()
}

pub fn date_to_x(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() {
        return None;
    }
    let days = x.round();
    if days < f64::from(i32::MIN) || days > f64::from(i32::MAX) {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(days as i32)
}

/// Padded axis bounds `(x, y)` covering every point.
///
/// Degenerate ranges (a single date, all-equal values) are widened so the
/// chart still has a drawable area. Returns `None` when there are no points.
pub fn bounds(points: &[(f64, f64)]) -> Option<([f64; 2], [f64; 2])> {
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);

    for &(x, y) in points {
        if !(x.is_finite() && y.is_finite()) {
            continue;
        }
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if !(x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite()) {
        return None;
    }

    Some((pad_range(x_min, x_max), pad_range(y_min, y_max)))
}

fn pad_range(lo: f64, hi: f64) -> [f64; 2] {
    if hi <= lo {
        let half = (lo.abs() * 0.05).max(1.0);
        return [lo - half, hi + half];
    }
    let pad = (hi - lo) * 0.05;
    [lo - pad, hi + pad]
}
