//! Command-line parsing for the COVID-19 dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the query and rendering code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_COUNTRIES, LatestRule};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "covid-dash", version, about = "COVID-19 data dashboard (CSV-based)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard.
    Tui(DashArgs),
    /// Print dataset info, headline metrics, and the latest row per selected country.
    Summary(SummaryArgs),
    /// List the countries in the data file.
    Countries(DataArgs),
}

/// Options shared by every command that reads the data file.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// CSV file with columns country,date,total_cases,new_deaths,total_deaths,population.
    #[arg(short = 'f', long = "file", env = "COVID_DASH_CSV", default_value = "covid_data.csv")]
    pub file: PathBuf,

    /// Write logs to this file (the TUI logs nowhere otherwise).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Options for choosing what to show.
#[derive(Debug, Args, Clone)]
pub struct DashArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Country to select (repeat for several). Defaults to India and United States.
    #[arg(short = 'c', long = "country", value_name = "NAME")]
    pub countries: Vec<String>,

    /// How to pick each country's latest row.
    #[arg(long = "latest", value_enum, default_value_t = LatestRule::ByDate)]
    pub latest_rule: LatestRule,

    /// Export the latest-per-country snapshot to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

impl DashArgs {
    /// Selected countries, falling back to the defaults when none were passed.
    pub fn countries_or_default(&self) -> Vec<String> {
        if self.countries.is_empty() {
            DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect()
        } else {
            self.countries.clone()
        }
    }
}

/// Options for the `summary` command.
#[derive(Debug, Args, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub dash: DashArgs,

    /// Print JSON instead of the text report.
    #[arg(long)]
    pub json: bool,
}
