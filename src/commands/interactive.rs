use anyhow::{Context, Result};
use dialoguer::{Confirm, Input};

use trendwatch::config::Config;
use trendwatch::dashboard::DashboardInput;
use trendwatch::input::parse_date;
use trendwatch::models::DATE_FORMAT;
use trendwatch::notify::ConsoleNotifier;

use super::{build_dashboard, present};

/// Prompt, fetch, chart, repeat until the user stops
///
/// Each cycle gets its own client. A failed cycle only prints its message;
/// the session carries on with the last entered values as new defaults.
pub async fn interactive(config: &Config) -> Result<()> {
    println!("Property Search Trend Analyzer");
    println!("==============================");

    let notifier = ConsoleNotifier;
    let mut current = DashboardInput::defaults(&config.dashboard);

    loop {
        current = prompt_input(&current)?;

        let dashboard = build_dashboard(config)?;
        let outcome = dashboard.run(&current, &notifier).await;
        present(&dashboard, &outcome, None, &notifier);

        let again = Confirm::new()
            .with_prompt("Run another query?")
            .default(true)
            .interact()
            .context("Failed to read answer")?;
        if !again {
            break;
        }
    }

    Ok(())
}

fn prompt_input(previous: &DashboardInput) -> Result<DashboardInput> {
    let keywords: String = Input::new()
        .with_prompt("Enter keywords (comma separated)")
        .default(previous.keywords.clone())
        .allow_empty(true)
        .interact_text()
        .context("Failed to read keywords")?;

    let start = prompt_date("Start date", previous.start.format(DATE_FORMAT).to_string())?;
    let end = prompt_date("End date", previous.end.format(DATE_FORMAT).to_string())?;

    Ok(DashboardInput {
        keywords,
        start,
        end,
    })
}

fn prompt_date(prompt: &str, default: String) -> Result<chrono::NaiveDate> {
    let text: String = Input::new()
        .with_prompt(prompt)
        .default(default)
        .validate_with(|s: &String| parse_date(s).map(|_| ()).map_err(|e| e.to_string()))
        .interact_text()
        .with_context(|| format!("Failed to read {prompt}"))?;

    Ok(parse_date(&text)?)
}
