//! Formatted terminal output for the non-interactive commands.
//!
//! We keep formatting code in one place so:
//! - the query code stays clean and testable
//! - output changes are localized (important for snapshot-style tests)

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::app::pipeline::DashboardData;
use crate::domain::{Dataset, LatestRule, Record, Selection};

/// Format the full summary: dataset info, KPIs, and the latest-snapshot table.
pub fn format_summary(
    dataset: &Dataset,
    selection: &Selection,
    rule: LatestRule,
    data: &DashboardData,
) -> String {
    let mut out = String::new();
    let stats = dataset.stats();

    out.push_str("=== covid-dash - COVID-19 Data Dashboard ===\n");
    out.push_str(&format!("Source: {}\n", dataset.source().display()));
    out.push_str(&format!(
        "Rows: {} | countries: {} | dates: {}\n",
        stats.rows,
        stats.countries,
        fmt_date_range(stats.date_min, stats.date_max),
    ));

    let selected: Vec<&str> = selection.iter().collect();
    out.push_str(&format!(
        "Selection: {}\n",
        if selected.is_empty() { "(none)".to_string() } else { selected.join(", ") }
    ));
    let missing: Vec<&str> = selection
        .iter()
        .filter(|c| !data.latest.iter().any(|r| r.country == *c))
        .collect();
    if !missing.is_empty() {
        out.push_str(&format!("  (no rows for: {})\n", missing.join(", ")));
    }
    out.push_str(&format!("Latest: {}\n", rule.display_name()));

    out.push('\n');
    out.push_str(&format!(
        "Total Cases (Latest):  {}\n",
        fmt_thousands(data.metrics.total_cases)
    ));
    out.push_str(&format!(
        "Total Deaths (Latest): {}\n",
        fmt_thousands(data.metrics.total_deaths)
    ));
    out.push_str(&format!("Countries Selected:    {}\n", data.metrics.country_count));

    out.push('\n');
    out.push_str("Latest per country:\n");
    out.push_str(&format_latest_table(&data.latest));

    out
}

/// Format the latest-snapshot rows as a fixed-width table.
pub fn format_latest_table(rows: &[Record]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<24} {:<10} {:>15} {:>12} {:>13} {:>15}\n",
            "country", "date", "total_cases", "new_deaths", "total_deaths", "population"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<24} {:-<10} {:-<15} {:-<12} {:-<13} {:-<15}\n",
            "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    if rows.is_empty() {
        out.push_str("(no rows)\n");
        return out;
    }

    for r in rows {
        out.push_str(
            format!(
                "{:<24} {:<10} {:>15} {:>12} {:>13} {:>15}\n",
                truncate(&r.country, 24),
                r.date,
                fmt_thousands(r.total_cases.into()),
                fmt_thousands(r.new_deaths.into()),
                fmt_thousands(r.total_deaths.into()),
                fmt_thousands(r.population.into()),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// List every country with its row count and date range.
pub fn format_countries(dataset: &Dataset) -> String {
    let mut per_country: BTreeMap<&str, (usize, NaiveDate, NaiveDate)> = BTreeMap::new();
    for r in dataset.records() {
        per_country
            .entry(r.country.as_str())
            .and_modify(|(n, lo, hi)| {
                *n += 1;
                *lo = (*lo).min(r.date);
                *hi = (*hi).max(r.date);
            })
            .or_insert((1, r.date, r.date));
    }

    let mut out = String::new();
    out.push_str(&format!("{:<24} {:>6}  {}\n", "country", "rows", "dates"));
    out.push_str(&format!("{:-<24} {:-<6}  {:-<23}\n", "", "", ""));
    for country in dataset.countries() {
        if let Some((n, lo, hi)) = per_country.get(country) {
            out.push_str(&format!(
                "{:<24} {:>6}  {}\n",
                truncate(country, 24),
                n,
                fmt_date_range(Some(*lo), Some(*hi))
            ));
        }
    }
    out
}

/// `1234567` -> `1,234,567`.
pub fn fmt_thousands(v: u128) -> String {
    let digits = v.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn fmt_date_range(lo: Option<NaiveDate>, hi: Option<NaiveDate>) -> String {
    match (lo, hi) {
        (Some(lo), Some(hi)) => format!("{lo} .. {hi}"),
        _ => "-".to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
