//! One dashboard interaction: validate, fetch, chart
//!
//! The [`Dashboard`] takes the raw field values, validates them, asks the
//! [`TrendFetcher`] for data and turns the result into an [`Outcome`]. Every
//! failure path leaves a user-visible message on the [`Notifier`] and ends the
//! cycle without affecting the next one.

pub mod chart;

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::DashboardConfig;
use crate::input::{require_keywords, validate_range};
use crate::notify::{Notifier, FETCHING_MESSAGE, NO_DATA_WARNING};
use crate::trends::{Pacer, TrendFetcher, TrendSource};
use crate::utils::error::RenderError;

pub use chart::{ChartSpec, ChartSummary};

/// Raw values of the dashboard's input widgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardInput {
    /// Comma-separated keyword field
    pub keywords: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DashboardInput {
    /// Inputs pre-filled with the configured defaults
    pub fn defaults(config: &DashboardConfig) -> Self {
        Self {
            keywords: config.default_keywords.clone(),
            start: config.default_start,
            end: config.default_end,
        }
    }
}

/// How one interaction cycle ended
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Start date after end date; nothing was fetched
    InvalidRange,

    /// Keyword field parsed to nothing; nothing was fetched
    NoKeywords,

    /// Fetch failed, was exhausted, or returned an empty table
    NoData,

    /// Data ready to draw
    Chart(ChartSpec),
}

/// Chart presentation settings
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub title: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl From<&DashboardConfig> for ChartOptions {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            title: config.chart_title.clone(),
            path: config.chart_path.clone(),
            width: config.chart_width,
            height: config.chart_height,
        }
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::from(&DashboardConfig::default())
    }
}

/// Validates input, fetches trends and prepares the chart
pub struct Dashboard<S, P> {
    fetcher: TrendFetcher<S, P>,
    chart: ChartOptions,
}

impl<S: TrendSource, P: Pacer> Dashboard<S, P> {
    pub fn new(fetcher: TrendFetcher<S, P>, chart: ChartOptions) -> Self {
        Self { fetcher, chart }
    }

    pub fn fetcher(&self) -> &TrendFetcher<S, P> {
        &self.fetcher
    }

    pub fn chart_options(&self) -> &ChartOptions {
        &self.chart
    }

    /// Run one interaction cycle
    pub async fn run(&self, input: &DashboardInput, notifier: &dyn Notifier) -> Outcome {
        let range = match validate_range(input.start, input.end) {
            Ok(range) => range,
            Err(e) => {
                debug!(start = %input.start, end = %input.end, "Rejected date range");
                notifier.error(&e.to_string());
                return Outcome::InvalidRange;
            }
        };

        let keywords = match require_keywords(&input.keywords) {
            Ok(keywords) => keywords,
            Err(e) => {
                notifier.info(&e.to_string());
                return Outcome::NoKeywords;
            }
        };

        let timeframe = range.timeframe();
        info!(keywords = %keywords, timeframe = %timeframe, "Fetching trends");
        notifier.info(FETCHING_MESSAGE);

        match self.fetcher.fetch(&keywords, &timeframe, notifier).await {
            Some(table) if !table.is_empty() => {
                Outcome::Chart(ChartSpec::from_table(&table, self.chart.title.as_str()))
            }
            _ => {
                notifier.warning(NO_DATA_WARNING);
                Outcome::NoData
            }
        }
    }

    /// Write the chart to the configured path and return the summary table
    pub fn render(&self, spec: &ChartSpec) -> Result<ChartSummary, RenderError> {
        self.render_to(spec, &self.chart.path)
    }

    /// Write the chart to `path` and return the summary table
    pub fn render_to(&self, spec: &ChartSpec, path: &Path) -> Result<ChartSummary, RenderError> {
        chart::render_svg(spec, path, (self.chart.width, self.chart.height))?;
        info!(path = %path.display(), series = spec.series.len(), "Chart written");
        Ok(spec.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TrendRow, TrendTable};
    use crate::notify::{Notification, RecordingNotifier};
    use crate::trends::{RecordingPacer, TrendRequest};
    use crate::utils::error::FetchError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Always answers with the same table
    struct FixedSource {
        table: TrendTable,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TrendSource for FixedSource {
        async fn interest_over_time(
            &self,
            _request: &TrendRequest,
        ) -> Result<TrendTable, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.table.clone())
        }
    }

    fn dashboard(table: TrendTable) -> Dashboard<FixedSource, RecordingPacer> {
        let source = FixedSource {
            table,
            calls: AtomicUsize::new(0),
        };
        Dashboard::new(
            TrendFetcher::with_pacer(source, RecordingPacer::new()),
            ChartOptions::default(),
        )
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    fn input(keywords: &str, start: NaiveDate, end: NaiveDate) -> DashboardInput {
        DashboardInput {
            keywords: keywords.to_string(),
            start,
            end,
        }
    }

    fn one_row_table() -> TrendTable {
        TrendTable::from_rows(
            vec!["2BHK".into()],
            vec![TrendRow {
                date: date(1),
                values: vec![50],
                is_partial: false,
            }],
        )
    }

    #[tokio::test]
    async fn test_invalid_range_never_fetches() {
        let dashboard = dashboard(one_row_table());
        let notifier = RecordingNotifier::new();

        let outcome = dashboard
            .run(&input("2BHK", date(30), date(1)), &notifier)
            .await;

        assert_eq!(outcome, Outcome::InvalidRange);
        assert_eq!(dashboard.fetcher().source().calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            notifier.errors(),
            vec!["Start date must be before end date".to_string()]
        );
    }

    #[tokio::test]
    async fn test_empty_keywords_never_fetch() {
        let dashboard = dashboard(one_row_table());
        let notifier = RecordingNotifier::new();

        let outcome = dashboard.run(&input(" , ", date(1), date(30)), &notifier).await;

        assert_eq!(outcome, Outcome::NoKeywords);
        assert_eq!(dashboard.fetcher().source().calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            notifier.events(),
            vec![Notification::Info(
                "Enter at least one keyword to fetch trends.".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_empty_table_shows_no_data() {
        let dashboard = dashboard(TrendTable::new(vec!["2BHK".into()]));
        let notifier = RecordingNotifier::new();

        let outcome = dashboard.run(&input("2BHK", date(1), date(30)), &notifier).await;

        assert_eq!(outcome, Outcome::NoData);
        assert_eq!(notifier.warnings(), vec![NO_DATA_WARNING.to_string()]);
    }

    #[tokio::test]
    async fn test_chart_outcome() {
        let dashboard = dashboard(one_row_table());
        let notifier = RecordingNotifier::new();

        let outcome = dashboard.run(&input("2BHK", date(1), date(1)), &notifier).await;

        let spec = match outcome {
            Outcome::Chart(spec) => spec,
            other => panic!("expected a chart, got {other:?}"),
        };
        assert_eq!(spec.title, "Google Search Trends");
        assert_eq!(spec.series.len(), 1);
        assert_eq!(
            notifier.events(),
            vec![Notification::Info(FETCHING_MESSAGE.to_string())]
        );
    }

    #[tokio::test]
    async fn test_render_to_file() {
        let dashboard = dashboard(one_row_table());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");

        let spec = ChartSpec::from_table(&one_row_table(), "t");
        let summary = dashboard.render_to(&spec, &path).unwrap();

        assert_eq!(summary.rows.len(), 1);
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("2BHK"));
    }

    #[test]
    fn test_defaults_from_config() {
        let input = DashboardInput::defaults(&DashboardConfig::default());
        assert_eq!(input.keywords, "2BHK,3BHK,1BHK,farmhouse");
        assert_eq!(input.start, date(1));
        assert_eq!(input.end, date(30));
    }
}
