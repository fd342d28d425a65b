//! Reporting utilities: formatted text and JSON summaries.

use serde::Serialize;

use crate::app::pipeline::DashboardData;
use crate::domain::{Dataset, DatasetStats, LatestRule, Metrics, Record, Selection};
use crate::error::{AppError, EXIT_RUNTIME};

pub mod format;

pub use format::*;

/// Machine-readable counterpart of `format_summary`.
#[derive(Debug, Serialize)]
pub struct SummaryJson<'a> {
    pub source: String,
    pub dataset: DatasetStats,
    pub selection: Vec<&'a str>,
    pub latest_rule: LatestRule,
    pub metrics: Metrics,
    pub latest: &'a [Record],
}

pub fn summary_json(
    dataset: &Dataset,
    selection: &Selection,
    rule: LatestRule,
    data: &DashboardData,
) -> Result<String, AppError> {
    let summary = SummaryJson {
        source: dataset.source().display().to_string(),
        dataset: dataset.stats(),
        selection: selection.iter().collect(),
        latest_rule: rule,
        metrics: data.metrics,
        latest: &data.latest,
    };
    serde_json::to_string_pretty(&summary)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to serialize summary: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline;
    use crate::io::read_dataset;

    #[test]
    fn json_summary_carries_metrics_and_rows() {
        let csv = "country,date,total_cases,new_deaths,total_deaths,population\n\
                   A,2021-01-01,10,1,1,1000\n\
                   A,2021-01-02,20,2,3,1000\n\
                   B,2021-01-01,5,0,0,500\n";
        let ds = read_dataset(csv.as_bytes(), "inline.csv").unwrap();
        let selection = Selection::new(["A", "B"]);
        let data = pipeline::run(&ds, &selection, LatestRule::ByDate);

        let json = summary_json(&ds, &selection, LatestRule::ByDate, &data).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(v["metrics"]["total_cases"], 25);
        assert_eq!(v["metrics"]["total_deaths"], 3);
        assert_eq!(v["metrics"]["country_count"], 2);
        assert_eq!(v["latest_rule"], "by-date");
        assert_eq!(v["latest"][0]["date"], "2021-01-02");
        assert_eq!(v["dataset"]["rows"], 3);
        assert_eq!(v["selection"][1], "B");
    }
}
