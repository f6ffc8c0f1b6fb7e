use anyhow::{Context, Result};
use std::path::PathBuf;

use trendwatch::config::Config;
use trendwatch::dashboard::DashboardInput;
use trendwatch::input::parse_date;
use trendwatch::notify::ConsoleNotifier;

use super::{build_dashboard, present};

/// One fetch-and-chart cycle from command-line values
///
/// Missing values fall back to the configured dashboard defaults.
pub async fn fetch(
    config: &Config,
    keywords: Option<String>,
    start: Option<String>,
    end: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let defaults = DashboardInput::defaults(&config.dashboard);

    let input = DashboardInput {
        keywords: keywords.unwrap_or(defaults.keywords),
        start: match start {
            Some(s) => parse_date(&s).context("Invalid --start")?,
            None => defaults.start,
        },
        end: match end {
            Some(s) => parse_date(&s).context("Invalid --end")?,
            None => defaults.end,
        },
    };

    let dashboard = build_dashboard(config)?;
    let notifier = ConsoleNotifier;

    let outcome = dashboard.run(&input, &notifier).await;
    present(&dashboard, &outcome, output.as_deref(), &notifier);

    Ok(())
}
