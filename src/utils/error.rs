//! Error types for the trends fetcher and input handling
//!
//! This module defines the domain-specific error enums used throughout the crate.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while talking to the trends service
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream signalled too many requests (HTTP 429)
    #[error("Too many requests: the trends service rate limit was exceeded")]
    RateLimit,

    /// Non-success status other than 429
    #[error("Trends service returned status {0}")]
    ServerError(u16),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Body was not the JSON shape we expect
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Explore response did not contain the interest-over-time widget
    #[error("Explore response has no TIMESERIES widget")]
    MissingWidget,

    /// Invalid service URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configured header text that HTTP cannot carry
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

impl FetchError {
    /// Map a transport error, separating timeouts from other failures
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

/// Errors produced while validating user input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Start date after end date
    #[error("Start date must be before end date")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Date text not in `YYYY-MM-DD` form
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Timeframe text not made of two dates
    #[error("Invalid timeframe '{0}': expected 'YYYY-MM-DD YYYY-MM-DD'")]
    InvalidTimeframe(String),

    /// No usable keyword after parsing
    #[error("Enter at least one keyword to fetch trends.")]
    NoKeywords,
}

/// Errors produced while drawing the chart
#[derive(Error, Debug)]
pub enum RenderError {
    /// Nothing to draw
    #[error("Chart has no data points")]
    EmptyChart,

    /// Backend failure from the drawing library
    #[error("Drawing failed: {0}")]
    Drawing(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_header_message() {
        let err = FetchError::InvalidHeader("bad\nagent".into());
        assert!(err.to_string().starts_with("Invalid header value"));
    }

    #[test]
    fn test_invalid_range_message() {
        let err = InputError::InvalidRange {
            start: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        };
        assert_eq!(err.to_string(), "Start date must be before end date");
    }
}
