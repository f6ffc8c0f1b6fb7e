//! Common test utilities
#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use serde_json::json;
use trendwatch::config::TrendsConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const EXPLORE_PAGE: &str = "/trends/explore/";
pub const EXPLORE_API: &str = "/trends/api/explore";
pub const MULTILINE_API: &str = "/trends/api/widgetdata/multiline";

/// Client configuration pointed at a mock server
pub fn trends_config(server: &MockServer) -> TrendsConfig {
    TrendsConfig {
        base_url: server.uri(),
        request_timeout_secs: 5,
        ..Default::default()
    }
}

/// Explore response carrying a TIMESERIES widget, with the anti-XSSI prefix
pub fn explore_body() -> String {
    let body = json!({
        "widgets": [
            {
                "id": "TIMESERIES",
                "token": "test-token",
                "request": {"time": "2025-04-01 2025-04-30", "resolution": "DAY"}
            },
            {"id": "GEO_MAP", "token": "geo-token", "request": {}}
        ]
    });
    format!(")]}}'\n{body}")
}

/// Multiline response with `days` rows starting at `start`, one value per keyword
pub fn timeseries_body(keywords: usize, start: NaiveDate, days: i64) -> String {
    let rows: Vec<_> = (0..days)
        .map(|offset| {
            let date = start + Duration::days(offset);
            let time = date
                .and_hms_opt(0, 0, 0)
                .expect("midnight is valid")
                .and_utc()
                .timestamp();
            let values: Vec<i64> = (0..keywords as i64)
                .map(|k| (offset * 3 + k * 7) % 101)
                .collect();
            json!({
                "time": time.to_string(),
                "formattedTime": date.format("%b %-d, %Y").to_string(),
                "value": values,
                "hasData": vec![true; keywords],
            })
        })
        .collect();

    format!(")]}}',\n{}", json!({"default": {"timelineData": rows, "averages": []}}))
}

pub fn april(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, day).expect("valid April date")
}

/// Mount the session page and a successful explore response
pub async fn mount_session_and_explore(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(EXPLORE_PAGE))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(EXPLORE_API))
        .respond_with(ResponseTemplate::new(200).set_body_string(explore_body()))
        .mount(server)
        .await;
}
