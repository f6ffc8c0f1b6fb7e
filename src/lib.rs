//! trendwatch - Search Interest Trend Dashboard
//!
//! Fetches interest-over-time data for a set of keywords and a date range from
//! the trends service and renders it as a line chart.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`input`] - Keyword and date-range validation
//! - [`models`] - Keyword sets, date ranges, timeframes and trend tables
//! - [`trends`] - Trends service client and the retrying fetcher
//! - [`dashboard`] - One interaction cycle and chart rendering
//! - [`notify`] - User-visible warnings and errors
//! - [`utils`] - Retry policy, domain errors and helpers
//!
//! # Example
//!
//! ```no_run
//! use trendwatch::config::Config;
//! use trendwatch::dashboard::{ChartOptions, Dashboard, DashboardInput, Outcome};
//! use trendwatch::notify::ConsoleNotifier;
//! use trendwatch::trends::{TrendFetcher, TrendsClient};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = TrendsClient::new(&config.trends)?;
//!     let fetcher = TrendFetcher::new(client).with_retry(config.retry());
//!     let dashboard = Dashboard::new(fetcher, ChartOptions::from(&config.dashboard));
//!
//!     let input = DashboardInput::defaults(&config.dashboard);
//!     if let Outcome::Chart(spec) = dashboard.run(&input, &ConsoleNotifier).await {
//!         println!("{}", dashboard.render(&spec)?);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dashboard;
pub mod error;
pub mod input;
pub mod models;
pub mod notify;
pub mod trends;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::dashboard::{Dashboard, DashboardInput, Outcome};
    pub use crate::error::{Error, ErrorCategory, TrendwatchErrorTrait};
    pub use crate::models::{DateRange, KeywordSet, Timeframe, TrendTable};
    pub use crate::notify::{ConsoleNotifier, Notifier};
    pub use crate::trends::{TrendFetcher, TrendSource, TrendsClient};
}

// Direct re-exports for convenience
pub use models::{DateRange, KeywordSet, Timeframe, TrendRow, TrendTable};
