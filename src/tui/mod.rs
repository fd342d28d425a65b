//! Ratatui-based terminal dashboard.
//!
//! Layout: a header with the dataset info and three headline tiles, a country
//! multiselect on the left, and one of three charts on the right. Every
//! selection change re-runs the whole pipeline.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use tracing::{info, warn};

use crate::app::pipeline::{self, DashboardData};
use crate::domain::{DashConfig, Dataset, LatestRule, Selection};
use crate::error::{AppError, EXIT_RUNTIME};
use crate::io::DatasetCache;
use crate::plot::{self, CountrySeries, x_to_date};
use crate::report::{fmt_date_range, fmt_thousands};

mod plotters_chart;

use plotters_chart::{DashPlottersChart, PlotSeries};

/// High-contrast series colors; a country keeps its color across charts.
const PALETTE: [(u8, u8, u8); 8] = [
    (0, 255, 255),
    (255, 165, 0),
    (0, 255, 0),
    (255, 0, 255),
    (255, 255, 0),
    (100, 149, 237),
    (255, 99, 71),
    (255, 255, 255),
];

/// Start the TUI.
pub fn run(config: DashConfig) -> Result<(), AppError> {
    // Load before touching the terminal so load errors print normally.
    let mut cache = DatasetCache::new();
    let dataset = cache.get_or_load(&config.csv_path)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config, dataset);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(
                EXIT_RUNTIME,
                format!("Failed to enter alternate screen: {e}"),
            ));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Which chart the main pane shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChartKind {
    Cases,
    NewDeaths,
    CasesVsDeaths,
}

impl ChartKind {
    fn title(self) -> &'static str {
        match self {
            ChartKind::Cases => "Total Cases Over Time",
            ChartKind::NewDeaths => "New Deaths Over Time",
            ChartKind::CasesVsDeaths => "Total Cases vs Total Deaths",
        }
    }

    fn next(self) -> Self {
        match self {
            ChartKind::Cases => ChartKind::NewDeaths,
            ChartKind::NewDeaths => ChartKind::CasesVsDeaths,
            ChartKind::CasesVsDeaths => ChartKind::Cases,
        }
    }
}

struct App {
    config: DashConfig,
    dataset: Arc<Dataset>,
    /// Dataset countries, then selected countries the dataset lacks.
    countries: Vec<String>,
    cursor: usize,
    selection: Selection,
    rule: LatestRule,
    chart: ChartKind,
    status: String,
    data: DashboardData,
}

impl App {
    fn new(config: DashConfig, dataset: Arc<Dataset>) -> Self {
        let selection = config.selection();
        let mut countries: Vec<String> = dataset.countries().into_iter().map(str::to_string).collect();
        for country in selection.iter() {
            if !countries.iter().any(|c| c == country) {
                warn!(country, "selected country has no rows in the data file");
                countries.push(country.to_string());
            }
        }

        let rule = config.latest_rule;
        let mut app = Self {
            config,
            dataset,
            countries,
            cursor: 0,
            selection,
            rule,
            chart: ChartKind::Cases,
            status: String::new(),
            data: DashboardData::default(),
        };
        app.recompute();
        app.status = format!("Loaded {} rows.", app.dataset.len());
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Apply one key press. Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < self.countries.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(country) = self.countries.get(self.cursor).cloned() {
                    let selected = self.selection.toggle(&country);
                    self.recompute();
                    self.status = format!(
                        "{} {country}.",
                        if selected { "Selected" } else { "Deselected" }
                    );
                }
            }
            KeyCode::Char('a') => {
                self.selection = Selection::new(self.countries.iter().cloned());
                self.recompute();
                self.status = "Selected all countries.".to_string();
            }
            KeyCode::Char('c') => {
                self.selection.clear();
                self.recompute();
                self.status = "Cleared selection.".to_string();
            }
            KeyCode::Tab => self.chart = self.chart.next(),
            KeyCode::Char('1') => self.chart = ChartKind::Cases,
            KeyCode::Char('2') => self.chart = ChartKind::NewDeaths,
            KeyCode::Char('3') => self.chart = ChartKind::CasesVsDeaths,
            KeyCode::Char('l') => {
                self.rule = self.rule.toggle();
                self.recompute();
                self.status = format!("latest: {}", self.rule.display_name());
            }
            KeyCode::Char('e') => self.export(),
            _ => {}
        }

        false
    }

    fn recompute(&mut self) {
        self.data = pipeline::run(&self.dataset, &self.selection, self.rule);
    }

    fn export(&mut self) {
        let Some(path) = &self.config.export_path else {
            self.status = "No export path (start with --export <csv>).".to_string();
            return;
        };
        match crate::io::write_snapshot_csv(path, &self.data.latest) {
            Ok(()) => {
                info!(path = %path.display(), "snapshot exported from dashboard");
                self.status = format!("Exported {} rows to {}", self.data.latest.len(), path.display());
            }
            Err(err) => {
                self.status = format!("Export failed: {err}");
            }
        }
    }

    fn color_of(&self, country: &str) -> (u8, u8, u8) {
        let idx = self.countries.iter().position(|c| c == country).unwrap_or(0);
        PALETTE[idx % PALETTE.len()]
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_kpis(frame, chunks[1]);
        self.draw_body(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let stats = self.dataset.stats();
        let lines = vec![
            Line::from(vec![
                Span::styled("covid-dash", Style::default().fg(Color::Cyan)),
                Span::raw(" | COVID-19 Data Dashboard"),
            ]),
            Line::from(Span::styled(
                format!(
                    "source: {} | rows: {} | dates: {} | {}",
                    self.dataset.source().display(),
                    stats.rows,
                    fmt_date_range(stats.date_min, stats.date_max),
                    self.rule.display_name(),
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_kpis(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let tiles = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        let m = &self.data.metrics;
        let values = [
            ("Total Cases (Latest)", fmt_thousands(m.total_cases)),
            ("Total Deaths (Latest)", fmt_thousands(m.total_deaths)),
            ("Countries Selected", m.country_count.to_string()),
        ];

        for ((title, value), rect) in values.into_iter().zip(tiles.iter()) {
            let p = Paragraph::new(value)
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::BOLD))
                .block(Block::default().title(title).borders(Borders::ALL));
            frame.render_widget(p, *rect);
        }
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(0)])
            .split(area);

        self.draw_countries(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
    }

    fn draw_countries(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .countries
            .iter()
            .map(|c| {
                let mark = if self.selection.contains(c) { "[x]" } else { "[ ]" };
                let (r, g, b) = self.color_of(c);
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{mark} ")),
                    Span::styled(c.clone(), Style::default().fg(Color::Rgb(r, g, b))),
                ]))
            })
            .collect();

        let title = format!("Countries ({}/{})", self.selection.len(), self.countries.len());
        let list = List::new(items)
            .block(Block::default().title(title).borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        if !self.countries.is_empty() {
            state.select(Some(self.cursor));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title(self.chart.title()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.is_empty() {
            return;
        }
        frame.render_widget(Clear, inner);

        let spec = self.chart_spec();
        let all_points: Vec<(f64, f64)> = spec
            .lines
            .iter()
            .chain(spec.markers.iter())
            .flat_map(|s| s.points.iter().copied())
            .collect();

        let Some((x_bounds, y_bounds)) = plot::bounds(&all_points) else {
            let msg = Paragraph::new("No data for the current selection.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        // Last row of the pane is the legend.
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let (chart_rect, insets) = chart_layout(rows[0]);
        let widget = DashPlottersChart {
            lines: &spec.lines,
            markers: &spec.markers,
            x_bounds,
            y_bounds,
            x_label: spec.x_label,
            y_label: spec.y_label,
            fmt_x: spec.fmt_x,
            fmt_y: fmt_axis_count,
        };
        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, rows[0], chart_rect, insets, &spec, x_bounds, y_bounds);
        }

        frame.render_widget(Paragraph::new(self.legend()), rows[1]);
    }

    fn chart_spec(&self) -> ChartSpec {
        match self.chart {
            ChartKind::Cases => ChartSpec {
                lines: self.line_series(&self.data.cases),
                markers: Vec::new(),
                x_label: "date",
                y_label: "total cases",
                fmt_x: fmt_axis_date,
            },
            ChartKind::NewDeaths => ChartSpec {
                lines: self.line_series(&self.data.new_deaths),
                markers: Vec::new(),
                x_label: "date",
                y_label: "new deaths",
                fmt_x: fmt_axis_date,
            },
            ChartKind::CasesVsDeaths => ChartSpec {
                lines: Vec::new(),
                markers: self
                    .data
                    .scatter
                    .iter()
                    .map(|p| PlotSeries {
                        points: vec![(p.total_cases as f64, p.total_deaths as f64)],
                        rgb: self.color_of(&p.country),
                    })
                    .collect(),
                x_label: "total cases",
                y_label: "total deaths",
                fmt_x: fmt_axis_count,
            },
        }
    }

    fn line_series(&self, series: &[CountrySeries]) -> Vec<PlotSeries> {
        series
            .iter()
            .map(|s| PlotSeries {
                points: s.xy(),
                rgb: self.color_of(&s.country),
            })
            .collect()
    }

    fn legend(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for row in &self.data.latest {
            let (r, g, b) = self.color_of(&row.country);
            let label = match self.chart {
                ChartKind::CasesVsDeaths => {
                    format!("■ {} (pop {})  ", row.country, fmt_compact(row.population as f64))
                }
                _ => format!("■ {}  ", row.country),
            };
            spans.push(Span::styled(label, Style::default().fg(Color::Rgb(r, g, b))));
        }
        Line::from(spans)
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ move  space toggle  a all  c clear  tab/1-3 chart  l latest  e export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Series and axis setup for the chart currently on screen.
struct ChartSpec {
    lines: Vec<PlotSeries>,
    markers: Vec<PlotSeries>,
    x_label: &'static str,
    y_label: &'static str,
    fmt_x: fn(f64) -> String,
}

fn fmt_axis_date(v: f64) -> String {
    x_to_date(v)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn fmt_axis_count(v: f64) -> String {
    fmt_compact(v)
}

/// Short human form for axis ticks: `1234567.0` -> `1.2M`.
fn fmt_compact(v: f64) -> String {
    let a = v.abs();
    if a >= 1e9 {
        format!("{:.1}B", v / 1e9)
    } else if a >= 1e6 {
        format!("{:.1}M", v / 1e6)
    } else if a >= 1e3 {
        format!("{:.1}k", v / 1e3)
    } else {
        format!("{v:.0}")
    }
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    spec: &ChartSpec,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
) {
    let ticks = 4usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = (spec.fmt_x)(x_val);
        let label_len = label.chars().count() as u16;
        let start = x
            .saturating_sub(label_len / 2)
            .min((inner.x + inner.width).saturating_sub(label_len));
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = fmt_axis_count(y_val);
        let label_len = label.chars().count() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label_len);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new(spec.x_label)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new(spec.y_label)
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: (insets.left + insets.right).min(inner.width),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::read_dataset;
    use ratatui::backend::TestBackend;

    const CSV: &str = "country,date,total_cases,new_deaths,total_deaths,population\n\
                       India,2021-01-01,100,1,10,1380000000\n\
                       India,2021-01-02,150,2,12,1380000000\n\
                       United States,2021-01-01,300,5,20,331000000\n\
                       Chile,2021-01-02,50,0,3,19000000\n";

    fn app_with(export_path: Option<std::path::PathBuf>) -> App {
        let dataset = Arc::new(read_dataset(CSV.as_bytes(), "covid_data.csv").unwrap());
        let config = DashConfig {
            csv_path: "covid_data.csv".into(),
            countries: vec!["India".to_string(), "United States".to_string()],
            latest_rule: LatestRule::ByDate,
            export_path,
            json: false,
        };
        App::new(config, dataset)
    }

    #[test]
    fn starts_with_configured_selection() {
        let app = app_with(None);
        assert_eq!(app.countries, vec!["India", "United States", "Chile"]);
        assert_eq!(app.data.metrics.total_cases, 450);
        assert_eq!(app.data.metrics.total_deaths, 32);
        assert_eq!(app.data.metrics.country_count, 2);
    }

    #[test]
    fn toggling_recomputes_metrics() {
        let mut app = app_with(None);
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Down);
        assert!(!app.handle_key(KeyCode::Char(' ')));
        assert!(app.selection.contains("Chile"));
        assert_eq!(app.data.metrics.total_cases, 500);
        assert_eq!(app.data.metrics.country_count, 3);

        app.handle_key(KeyCode::Char('c'));
        assert_eq!(app.data.metrics.total_cases, 0);
        assert_eq!(app.data.metrics.country_count, 0);

        app.handle_key(KeyCode::Char('a'));
        assert_eq!(app.data.metrics.country_count, 3);
    }

    #[test]
    fn cursor_stays_in_range() {
        let mut app = app_with(None);
        app.handle_key(KeyCode::Up);
        assert_eq!(app.cursor, 0);
        for _ in 0..10 {
            app.handle_key(KeyCode::Down);
        }
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn selected_country_without_rows_is_listed_and_counted() {
        let dataset = Arc::new(read_dataset(CSV.as_bytes(), "covid_data.csv").unwrap());
        let config = DashConfig {
            csv_path: "covid_data.csv".into(),
            countries: vec!["Atlantis".to_string(), "Chile".to_string()],
            latest_rule: LatestRule::ByDate,
            export_path: None,
            json: false,
        };
        let app = App::new(config, dataset);
        assert_eq!(app.countries.last().map(String::as_str), Some("Atlantis"));
        assert_eq!(app.data.metrics.country_count, 2);
        assert_eq!(app.data.metrics.total_cases, 50);
    }

    #[test]
    fn chart_keys_and_quit() {
        let mut app = app_with(None);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.chart, ChartKind::NewDeaths);
        app.handle_key(KeyCode::Char('3'));
        assert_eq!(app.chart, ChartKind::CasesVsDeaths);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.chart, ChartKind::Cases);
        app.handle_key(KeyCode::Char('l'));
        assert_eq!(app.rule, LatestRule::FileOrder);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn export_writes_when_configured() {
        let mut app = app_with(None);
        app.handle_key(KeyCode::Char('e'));
        assert!(app.status.starts_with("No export path"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latest.csv");
        let mut app = app_with(Some(path.clone()));
        app.handle_key(KeyCode::Char('e'));
        assert!(app.status.starts_with("Exported 2 rows"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("India,2021-01-02,150,2,12,1380000000"));
    }

    #[test]
    fn empty_selection_draws_without_panicking() {
        let mut app = app_with(None);
        app.handle_key(KeyCode::Char('c'));

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content.iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("No data for the current selection."));
        assert!(text.contains("Countries Selected"));
    }

    #[test]
    fn short_terminals_draw_every_chart() {
        let mut app = app_with(None);
        for (width, height) in [(80, 3), (45, 1), (45, 2), (45, 3), (45, 5), (45, 7), (20, 10)] {
            for key in ['1', '2', '3'] {
                app.handle_key(KeyCode::Char(key));
                let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
                terminal.draw(|f| app.draw(f)).unwrap();
            }
        }
    }

    #[test]
    fn chart_widget_ignores_empty_area() {
        let mut buf = ratatui::buffer::Buffer::empty(Rect::new(0, 0, 45, 2));
        let widget = DashPlottersChart {
            lines: &[],
            markers: &[],
            x_bounds: [0.0, 1.0],
            y_bounds: [0.0, 1.0],
            x_label: "x",
            y_label: "y",
            fmt_x: fmt_axis_count,
            fmt_y: fmt_axis_count,
        };
        ratatui::widgets::Widget::render(widget, Rect::new(0, 2, 45, 0), &mut buf);
        assert!(buf.content.iter().all(|cell| cell.symbol() == " "));
    }

    #[test]
    fn compact_numbers() {
        assert_eq!(fmt_compact(950.0), "950");
        assert_eq!(fmt_compact(12_500.0), "12.5k");
        assert_eq!(fmt_compact(1_380_000_000.0), "1.4B");
        assert_eq!(fmt_compact(2_000_000.0), "2.0M");
    }

    #[test]
    fn date_ticks_format_as_dates() {
        let d = chrono::NaiveDate::from_ymd_opt(2021, 1, 2).unwrap();
        assert_eq!(fmt_axis_date(plot::date_to_x(d)), "2021-01-02");
    }
}
