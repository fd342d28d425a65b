//! CSV ingest and normalization.
//!
//! This module is responsible for turning a COVID statistics CSV into a
//! `Dataset` of typed `Record`s.
//!
//! Design goals:
//! - **Strict schema** for the six required columns (clear errors + exit code 2)
//! - **Fail fast**: the first unparsable value aborts the load, with line/column context
//! - **Deterministic behavior**: records keep file order, nothing is reordered here
//! - **Separation of concerns**: no filtering or aggregation logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use tracing::{debug, info};

use crate::domain::{Dataset, Record};

/// Columns every input file must provide (matched case-insensitively).
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "country",
    "date",
    "total_cases",
    "new_deaths",
    "total_deaths",
    "population",
];

/// Why a dataset could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The source file does not exist.
    SourceMissing { path: PathBuf },
    /// The source exists but could not be opened or read.
    Io { path: PathBuf, message: String },
    /// The CSV itself is malformed (bad quoting, invalid UTF-8, ...).
    Csv { line: Option<u64>, message: String },
    /// A required column is absent from the header row.
    MissingColumn { column: &'static str },
    /// Two header cells normalize to the same required column.
    DuplicateColumn { column: &'static str },
    /// A cell could not be parsed into its typed field.
    InvalidValue {
        line: usize,
        column: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::SourceMissing { path } => {
                write!(f, "Data file not found: {}", path.display())
            }
            LoadError::Io { path, message } => {
                write!(f, "Failed to read '{}': {message}", path.display())
            }
            LoadError::Csv {
                line: Some(line),
                message,
            } => write!(f, "CSV parse error on line {line}: {message}"),
            LoadError::Csv { line: None, message } => write!(f, "CSV parse error: {message}"),
            LoadError::MissingColumn { column } => {
                write!(f, "Missing required column: `{column}`")
            }
            LoadError::DuplicateColumn { column } => {
                write!(f, "Column `{column}` appears more than once in the header")
            }
            LoadError::InvalidValue {
                line,
                column,
                value,
                reason,
            } => write!(f, "Line {line}: invalid `{column}` value '{value}' ({reason})"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::Csv {
            line: err.position().map(|p| p.line()),
            message: err.to_string(),
        }
    }
}

/// Resolved header positions of the required columns.
#[derive(Debug, Clone, Copy)]
struct Columns {
    country: usize,
    date: usize,
    total_cases: usize,
    new_deaths: usize,
    total_deaths: usize,
    population: usize,
}

/// Load a dataset from a CSV file on disk.
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoadError::SourceMissing {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        },
    })?;

    let dataset = read_dataset(file, path)?;
    info!(
        path = %path.display(),
        rows = dataset.len(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Parse a dataset from any CSV reader. `source` is recorded on the result for display.
pub fn read_dataset<R: Read>(reader: R, source: impl Into<PathBuf>) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = resolve_columns(&build_header_map(&headers)?)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row = result?;
        // +2: records start after the header, and CSV lines are 1-based.
        let line = row
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);
        records.push(parse_row(&row, columns, line)?);
    }

    debug!(rows = records.len(), "parsed csv rows");
    Ok(Dataset::new(source, records))
}

/// Map normalized header names to their position.
///
/// Duplicate optional columns keep their first position; a duplicate required
/// column is ambiguous and rejected.
fn build_header_map(headers: &StringRecord) -> Result<HashMap<String, usize>, LoadError> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        let name = normalize_header_name(name);
        if map.contains_key(&name) {
            if let Some(column) = REQUIRED_COLUMNS.iter().copied().find(|c| *c == name) {
                return Err(LoadError::DuplicateColumn { column });
            }
            debug!(column = %name, "ignoring repeated header column");
            continue;
        }
        map.insert(name, idx);
    }
    Ok(map)
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, schema validation will incorrectly
    // report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn resolve_columns(header_map: &HashMap<String, usize>) -> Result<Columns, LoadError> {
    let find = |column: &'static str| {
        header_map
            .get(column)
            .copied()
            .ok_or(LoadError::MissingColumn { column })
    };

    Ok(Columns {
        country: find("country")?,
        date: find("date")?,
        total_cases: find("total_cases")?,
        new_deaths: find("new_deaths")?,
        total_deaths: find("total_deaths")?,
        population: find("population")?,
    })
}

fn parse_row(row: &StringRecord, columns: Columns, line: usize) -> Result<Record, LoadError> {
    let invalid = |column: &'static str, value: &str, reason: &'static str| LoadError::InvalidValue {
        line,
        column,
        value: value.to_string(),
        reason,
    };

    let short = [
        ("country", columns.country),
        ("date", columns.date),
        ("total_cases", columns.total_cases),
        ("new_deaths", columns.new_deaths),
        ("total_deaths", columns.total_deaths),
        ("population", columns.population),
    ]
    .into_iter()
    .find(|&(_, idx)| idx >= row.len());
    if let Some((column, _)) = short {
        return Err(invalid(column, "", "row has too few fields"));
    }

    let country = cell(row, columns.country);
    if country.is_empty() {
        return Err(invalid("country", country, "empty country"));
    }

    let raw_date = cell(row, columns.date);
    let date = parse_date(raw_date).ok_or_else(|| invalid("date", raw_date, "unrecognized date"))?;

    let count = |column: &'static str, idx: usize| {
        let raw = cell(row, idx);
        parse_count(raw).map_err(|reason| invalid(column, raw, reason))
    };

    let total_cases = count("total_cases", columns.total_cases)?;
    let new_deaths = count("new_deaths", columns.new_deaths)?;
    let total_deaths = count("total_deaths", columns.total_deaths)?;
    let population = count("population", columns.population)?;
    if population == 0 {
        return Err(invalid("population", cell(row, columns.population), "must be > 0"));
    }

    Ok(Record {
        country: country.to_string(),
        date,
        total_cases,
        new_deaths,
        total_deaths,
        population,
    })
}

fn cell(row: &StringRecord, idx: usize) -> &str {
    row.get(idx).map(str::trim).unwrap_or("")
}

/// Parse a calendar date.
///
/// ISO dates are the norm, but spreadsheet exports often use `DD/MM/YYYY` and
/// pandas writes full timestamps. The time part is dropped.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    const DATE_FMTS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];
    const DATETIME_FMTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    DATETIME_FMTS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

/// Parse a non-negative count. Integral floats (`1200.0`) are accepted.
fn parse_count(s: &str) -> Result<u64, &'static str> {
    if s.is_empty() {
        return Err("missing value");
    }
    if let Ok(v) = s.parse::<u64>() {
        return Ok(v);
    }

    let v = s.parse::<f64>().map_err(|_| "not a number")?;
    if !v.is_finite() {
        return Err("not a finite number");
    }
    if v < 0.0 {
        return Err("negative count");
    }
    if v.fract() != 0.0 {
        return Err("fractional count");
    }
    if v >= u64::MAX as f64 {
        return Err("count too large");
    }
    Ok(v as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "country,date,total_cases,new_deaths,total_deaths,population";

    fn read(body: &str) -> Result<Dataset, LoadError> {
        read_dataset(body.as_bytes(), "inline.csv")
    }

    #[test]
    fn loads_rows_in_file_order() {
        let csv = format!(
            "{HEADER}\nA,2021-01-01,10,1,1,1000\nA,2021-01-02,20,2,3,1000\nB,2021-01-01,5,0,0,500\n"
        );
        let ds = read(&csv).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records()[1].country, "A");
        assert_eq!(ds.records()[1].date, NaiveDate::from_ymd_opt(2021, 1, 2).unwrap());
        assert_eq!(ds.records()[1].total_deaths, 3);
        assert_eq!(ds.records()[2].population, 500);
        assert_eq!(ds.countries(), vec!["A", "B"]);
    }

    #[test]
    fn header_matching_ignores_case_order_bom_and_extras() {
        let csv = "\u{feff}Population,iso_code,Date,Country,Total_Cases,Total_Deaths,New_Deaths\n\
                   1000,AAA,2021-03-01,A,7,2,1\n";
        let ds = read(csv).unwrap();
        let r = &ds.records()[0];
        assert_eq!(r.country, "A");
        assert_eq!(r.total_cases, 7);
        assert_eq!(r.total_deaths, 2);
        assert_eq!(r.new_deaths, 1);
        assert_eq!(r.population, 1000);
    }

    #[test]
    fn missing_column_is_reported() {
        let err = read("country,date,total_cases,new_deaths,population\n").unwrap_err();
        assert_eq!(err, LoadError::MissingColumn { column: "total_deaths" });
    }

    #[test]
    fn repeated_required_header_is_rejected() {
        let err = read(&format!("{HEADER},Country \nA,2021-01-01,1,0,0,10,B\n")).unwrap_err();
        assert_eq!(err, LoadError::DuplicateColumn { column: "country" });
    }

    #[test]
    fn repeated_extra_header_keeps_first() {
        let ds = read(&format!("{HEADER},iso_code,ISO_CODE\nA,2021-01-01,1,0,0,10,AAA,BBB\n")).unwrap();
        assert_eq!(ds.records()[0].country, "A");
    }

    #[test]
    fn short_row_names_the_first_absent_column() {
        let csv = format!("{HEADER}\nA,2021-01-01,1,0,0,10\nB,2021-01-01,1\n");
        match read(&csv).unwrap_err() {
            LoadError::InvalidValue { line, column, reason, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, "new_deaths");
                assert_eq!(reason, "row has too few fields");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn undecodable_bytes_are_a_csv_error() {
        let mut body = format!("{HEADER}\nA,2021-01-01,").into_bytes();
        body.extend_from_slice(b"\xff\xfe,0,0,10\n");
        let err = read_dataset(&body[..], "bytes.csv").unwrap_err();
        assert!(matches!(err, LoadError::Csv { .. }), "unexpected error: {err:?}");
        assert!(err.to_string().starts_with("CSV parse error"));
    }

    #[test]
    fn header_only_file_is_an_empty_dataset() {
        let ds = read(&format!("{HEADER}\n")).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.stats().date_min, None);
    }

    #[test]
    fn bad_date_reports_line_and_column() {
        let csv = format!("{HEADER}\nA,2021-01-01,1,0,0,10\nA,yesterday,1,0,0,10\n");
        match read(&csv).unwrap_err() {
            LoadError::InvalidValue { line, column, value, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, "date");
                assert_eq!(value, "yesterday");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn counts_accept_integral_floats_only() {
        let ok = read(&format!("{HEADER}\nA,2021-01-01,1200.0,3,4.0,10\n")).unwrap();
        assert_eq!(ok.records()[0].total_cases, 1200);
        assert_eq!(ok.records()[0].total_deaths, 4);

        for bad in ["1.5", "-3", "abc", ""] {
            let csv = format!("{HEADER}\nA,2021-01-01,{bad},0,0,10\n");
            assert!(
                matches!(
                    read(&csv),
                    Err(LoadError::InvalidValue { column: "total_cases", .. })
                ),
                "expected failure for {bad:?}"
            );
        }
    }

    #[test]
    fn zero_population_is_rejected() {
        let csv = format!("{HEADER}\nA,2021-01-01,1,0,0,0\n");
        assert!(matches!(
            read(&csv),
            Err(LoadError::InvalidValue { column: "population", .. })
        ));
    }

    #[test]
    fn empty_country_is_rejected() {
        let csv = format!("{HEADER}\n,2021-01-01,1,0,0,10\n");
        assert!(matches!(
            read(&csv),
            Err(LoadError::InvalidValue { column: "country", .. })
        ));
    }

    #[test]
    fn parse_date_formats() {
        let want = NaiveDate::from_ymd_opt(2021, 3, 4).unwrap();
        for s in ["2021-03-04", "2021/03/04", "04/03/2021", "04-03-2021", "2021-03-04 00:00:00", "2021-03-04T12:30:00"] {
            assert_eq!(parse_date(s), Some(want), "format {s}");
        }
        assert_eq!(parse_date("2021-13-01"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn missing_file_is_source_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        assert_eq!(
            load_dataset(&path).unwrap_err(),
            LoadError::SourceMissing { path: path.clone() }
        );
    }

    #[test]
    fn load_dataset_reads_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "India,2021-01-01,100,1,10,1380000000").unwrap();
        file.flush().unwrap();

        let ds = load_dataset(file.path()).unwrap();
        assert_eq!(ds.source(), file.path());
        assert_eq!(ds.records()[0].country, "India");
        assert_eq!(ds.records()[0].population, 1_380_000_000);
    }
}
