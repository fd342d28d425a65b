//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the query pipeline
//! - exported to JSON/CSV
//! - rendered by either front-end (TUI or plain-text report)

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Countries the dashboard selects when the user does not pass `--country`.
pub const DEFAULT_COUNTRIES: [&str; 2] = ["India", "United States"];

/// One country/date observation row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub country: String,
    pub date: NaiveDate,
    pub total_cases: u64,
    pub new_deaths: u64,
    pub total_deaths: u64,
    pub population: u64,
}

/// Summary stats about a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub rows: usize,
    pub countries: usize,
    pub date_min: Option<NaiveDate>,
    pub date_max: Option<NaiveDate>,
}

/// All records of one source file, in file order.
///
/// A `Dataset` is immutable once built; the query layer only ever borrows from it.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: PathBuf,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(source: impl Into<PathBuf>, records: Vec<Record>) -> Self {
        Self {
            source: source.into(),
            records,
        }
    }

    pub fn source(&self) -> &std::path::Path {
        &self.source
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct countries in order of first appearance.
    pub fn countries(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.country.as_str()))
            .map(|r| r.country.as_str())
            .collect()
    }

    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            rows: self.records.len(),
            countries: self.countries().len(),
            date_min: self.records.iter().map(|r| r.date).min(),
            date_max: self.records.iter().map(|r| r.date).max(),
        }
    }
}

/// The set of countries the user chose to display.
///
/// Backed by an ordered set so duplicates collapse and iteration is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    countries: BTreeSet<String>,
}

impl Selection {
    pub fn new<I, S>(countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            countries: countries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, country: &str) -> bool {
        self.countries.contains(country)
    }

    /// Add the country if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, country: &str) -> bool {
        if self.countries.remove(country) {
            false
        } else {
            self.countries.insert(country.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.countries.clear();
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.countries.iter().map(String::as_str)
    }
}

/// How the "latest" record of a country is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LatestRule {
    /// Greatest date wins; duplicate dates resolve to the later row in the file.
    #[default]
    ByDate,
    /// Last row of the country in file order, whatever its date.
    FileOrder,
}

impl LatestRule {
    pub fn display_name(self) -> &'static str {
        match self {
            LatestRule::ByDate => "latest by date",
            LatestRule::FileOrder => "last in file",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            LatestRule::ByDate => LatestRule::FileOrder,
            LatestRule::FileOrder => LatestRule::ByDate,
        }
    }
}

/// Headline numbers for the current selection.
///
/// Totals are `u128` so summing any number of `u64` rows cannot overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub total_cases: u128,
    pub total_deaths: u128,
    pub country_count: usize,
}

/// Runtime configuration for a dashboard session.
///
/// This is derived from CLI flags (plus environment and defaults).
#[derive(Debug, Clone)]
pub struct DashConfig {
    pub csv_path: PathBuf,
    pub countries: Vec<String>,
    pub latest_rule: LatestRule,
    pub export_path: Option<PathBuf>,
    pub json: bool,
}

impl DashConfig {
    pub fn selection(&self) -> Selection {
        Selection::new(self.countries.iter().cloned())
    }
}
