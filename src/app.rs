//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - loads the data file (memoized)
//! - runs the dashboard pipeline for the selection
//! - prints reports or launches the TUI
//! - writes optional exports

use clap::Parser;
use tracing::warn;

use crate::cli::{Command, DashArgs, DataArgs, SummaryArgs};
use crate::domain::DashConfig;
use crate::error::AppError;
use crate::io::DatasetCache;
use crate::logging::{self, LogTarget};

pub mod pipeline;

/// Entry point for the `covid-dash` binary.
pub fn run() -> Result<(), AppError> {
    // A `.env` next to the binary may set `COVID_DASH_CSV` / `RUST_LOG`.
    dotenvy::dotenv().ok();

    // We want `covid-dash` and `covid-dash -c Chile` to behave like `covid-dash tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Summary(args) => handle_summary(args),
        Command::Countries(args) => handle_countries(args),
    }
}

fn handle_tui(args: DashArgs) -> Result<(), AppError> {
    let target = match &args.data.log_file {
        Some(path) => LogTarget::File(path),
        None => LogTarget::Off,
    };
    logging::init(target)?;

    let config = dash_config_from_args(&args, false);
    crate::tui::run(config)
}

fn handle_summary(args: SummaryArgs) -> Result<(), AppError> {
    init_cli_logging(&args.dash.data)?;
    let config = dash_config_from_args(&args.dash, args.json);

    let mut cache = DatasetCache::new();
    let dataset = cache.get_or_load(&config.csv_path)?;
    let selection = config.selection();
    let data = pipeline::run(&dataset, &selection, config.latest_rule);

    for country in selection.iter() {
        if !data.latest.iter().any(|r| r.country == country) {
            warn!(country, "selected country has no rows in the data file");
        }
    }

    if config.json {
        println!(
            "{}",
            crate::report::summary_json(&dataset, &selection, config.latest_rule, &data)?
        );
    } else {
        print!(
            "{}",
            crate::report::format_summary(&dataset, &selection, config.latest_rule, &data)
        );
    }

    if let Some(path) = &config.export_path {
        crate::io::write_snapshot_csv(path, &data.latest)?;
    }

    Ok(())
}

fn handle_countries(args: DataArgs) -> Result<(), AppError> {
    init_cli_logging(&args)?;
    let mut cache = DatasetCache::new();
    print!("{}", countries_report(&mut cache, &args)?);
    Ok(())
}

fn countries_report(cache: &mut DatasetCache, args: &DataArgs) -> Result<String, AppError> {
    let dataset = cache.get_or_load(&args.file)?;
    Ok(crate::report::format_countries(&dataset))
}

fn init_cli_logging(args: &DataArgs) -> Result<(), AppError> {
    let target = match &args.log_file {
        Some(path) => LogTarget::File(path),
        None => LogTarget::Stderr,
    };
    logging::init(target)?;
    Ok(())
}

pub fn dash_config_from_args(args: &DashArgs, json: bool) -> DashConfig {
    DashConfig {
        csv_path: args.data.file.clone(),
        countries: args.countries_or_default(),
        latest_rule: args.latest_rule,
        export_path: args.export.clone(),
        json,
    }
}

/// Rewrite argv so `covid-dash` defaults to `covid-dash tui`.
///
/// Rules:
/// - `covid-dash`                     -> `covid-dash tui`
/// - `covid-dash -c Chile ...`        -> `covid-dash tui -c Chile ...`
/// - `covid-dash --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "summary" | "countries");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs_tui() {
        assert_eq!(rewrite_args(argv(&["covid-dash"])), argv(&["covid-dash", "tui"]));
    }

    #[test]
    fn leading_flags_are_tui_flags() {
        assert_eq!(
            rewrite_args(argv(&["covid-dash", "-c", "Chile"])),
            argv(&["covid-dash", "tui", "-c", "Chile"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        for args in [
            &["covid-dash", "summary", "--json"][..],
            &["covid-dash", "--help"][..],
            &["covid-dash", "countries"][..],
        ] {
            assert_eq!(rewrite_args(argv(args)), argv(args));
        }
    }

    #[test]
    fn config_uses_default_countries() {
        let cli = crate::cli::Cli::parse_from(["covid-dash", "tui", "-f", "a.csv", "--export", "out.csv"]);
        let Command::Tui(args) = cli.command else {
            panic!("expected tui");
        };
        let config = dash_config_from_args(&args, false);
        assert_eq!(config.csv_path.to_str(), Some("a.csv"));
        assert_eq!(config.selection().len(), 2);
        assert!(config.selection().contains("India"));
        assert_eq!(config.export_path.as_deref().and_then(|p| p.to_str()), Some("out.csv"));
    }

    #[test]
    fn countries_listing_goes_through_the_cache() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "country,date,total_cases,new_deaths,total_deaths,population\n\
             Chile,2021-01-01,10,1,1,19000000\n"
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let cli = crate::cli::Cli::parse_from(["covid-dash", "countries", "-f", path.as_str()]);
        let Command::Countries(args) = cli.command else {
            panic!("expected countries");
        };

        let mut cache = DatasetCache::new();
        let first = countries_report(&mut cache, &args).unwrap();
        let second = countries_report(&mut cache, &args).unwrap();
        assert!(first.contains("Chile"));
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }
}
