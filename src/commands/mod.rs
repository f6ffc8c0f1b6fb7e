pub mod fetch;
pub mod interactive;

use anyhow::{Context, Result};
use std::path::Path;

use trendwatch::config::Config;
use trendwatch::dashboard::{ChartOptions, Dashboard, Outcome};
use trendwatch::error::{Error, TrendwatchErrorTrait};
use trendwatch::notify::Notifier;
use trendwatch::trends::{RequestScope, TokioPacer, TrendFetcher, TrendsClient};

// Re-export command functions for convenience
pub use fetch::fetch;
pub use interactive::interactive;

/// Build a dashboard around a fresh, short-lived client
pub fn build_dashboard(config: &Config) -> Result<Dashboard<TrendsClient, TokioPacer>> {
    let client = TrendsClient::new(&config.trends).context("Failed to create trends client")?;
    let fetcher = TrendFetcher::new(client)
        .with_retry(config.retry())
        .with_scope(RequestScope::from(&config.trends));

    Ok(Dashboard::new(fetcher, ChartOptions::from(&config.dashboard)))
}

/// Show a finished cycle: chart file plus summary on success
///
/// Messages for the other outcomes were already emitted during the cycle.
pub fn present(
    dashboard: &Dashboard<TrendsClient, TokioPacer>,
    outcome: &Outcome,
    output: Option<&Path>,
    notifier: &dyn Notifier,
) {
    let Outcome::Chart(spec) = outcome else {
        return;
    };

    let path = output.unwrap_or(dashboard.chart_options().path.as_path());
    println!("\nSearch Trends Over Time");
    println!("=======================");

    match dashboard.render_to(spec, path) {
        Ok(summary) => {
            print!("{summary}");
            println!("\nChart: {} ({} series)", path.display(), spec.series.len());
        }
        Err(e) => {
            let e = Error::from(e);
            tracing::error!(
                error = %e,
                category = e.category().label(),
                path = %path.display(),
                "Failed to render chart"
            );
            notifier.error(&format!("Failed to render chart: {e}"));
        }
    }
}
