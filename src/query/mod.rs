//! Selection queries over a loaded dataset.
//!
//! Everything here is a pure function over borrowed data:
//!
//! `Dataset` --filter--> `FilteredView` --latest_per_country--> `LatestSnapshot`
//! --aggregate_metrics--> `Metrics`
//!
//! The pipeline is cheap enough to re-run in full whenever the selection changes.

use std::collections::BTreeMap;

use crate::domain::{Dataset, LatestRule, Metrics, Record, Selection};

/// Records of the selected countries, borrowed from the dataset in file order.
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    pub records: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }
}

/// One record per country present in a view, ordered by country.
#[derive(Debug, Clone, Default)]
pub struct LatestSnapshot<'a> {
    pub rows: Vec<&'a Record>,
}

impl<'a> LatestSnapshot<'a> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, country: &str) -> Option<&'a Record> {
        self.rows.iter().copied().find(|r| r.country == country)
    }

    pub fn to_owned_rows(&self) -> Vec<Record> {
        self.rows.iter().map(|r| (*r).clone()).collect()
    }
}

/// Keep only records whose country is in `selection`.
///
/// An empty selection yields an empty view.
pub fn filter<'a>(dataset: &'a Dataset, selection: &Selection) -> FilteredView<'a> {
    if selection.is_empty() {
        return FilteredView::default();
    }

    FilteredView {
        records: dataset
            .records()
            .iter()
            .filter(|r| selection.contains(&r.country))
            .collect(),
    }
}

/// Pick the latest record of every country present in `view`.
///
/// With `LatestRule::ByDate` the greatest date wins and a duplicate date
/// resolves to the later row; with `LatestRule::FileOrder` the last row wins.
pub fn latest_per_country<'a>(view: &FilteredView<'a>, rule: LatestRule) -> LatestSnapshot<'a> {
    let mut latest: BTreeMap<&'a str, &'a Record> = BTreeMap::new();

    for record in view.iter() {
        latest
            .entry(record.country.as_str())
            .and_modify(|current| {
                let replace = match rule {
                    LatestRule::ByDate => record.date >= current.date,
                    LatestRule::FileOrder => true,
                };
                if replace {
                    *current = record;
                }
            })
            .or_insert(record);
    }

    LatestSnapshot {
        rows: latest.into_values().collect(),
    }
}

/// Sum the snapshot and count the selection.
///
/// `country_count` is the selection size, so countries without any rows still count.
pub fn aggregate_metrics(snapshot: &LatestSnapshot<'_>, selection: &Selection) -> Metrics {
    Metrics {
        total_cases: snapshot.rows.iter().map(|r| u128::from(r.total_cases)).sum(),
        total_deaths: snapshot.rows.iter().map(|r| u128::from(r.total_deaths)).sum(),
        country_count: selection.len(),
    }
}
