//! Unified error handling for the trendwatch crate
//!
//! This module provides a unified error type that consolidates all domain-specific
//! errors into a single `Error` enum, while keeping the domain errors usable on
//! their own.
//!
//! # Architecture
//!
//! - [`TrendwatchErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! # Usage
//!
//! ```rust
//! use trendwatch::error::{Error, ErrorCategory, TrendwatchErrorTrait};
//! use trendwatch::utils::error::FetchError;
//!
//! let err = Error::from(FetchError::RateLimit);
//! assert!(err.is_recoverable());
//! assert_eq!(err.category(), ErrorCategory::Network);
//! ```

use thiserror::Error;

pub use crate::utils::error::{FetchError, InputError, RenderError};

/// Common trait for all trendwatch error types
pub trait TrendwatchErrorTrait: std::error::Error {
    /// Check if this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout, rate limit)
    Network,
    /// Response decoding errors
    Parsing,
    /// User input errors (dates, keywords)
    Input,
    /// Configuration and validation errors
    Config,
    /// Chart rendering and output errors
    Render,
}

impl ErrorCategory {
    /// Short human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Network => "network error",
            Self::Parsing => "parsing error",
            Self::Input => "input error",
            Self::Config => "configuration error",
            Self::Render => "render error",
        }
    }
}

impl TrendwatchErrorTrait for FetchError {
    fn is_recoverable(&self) -> bool {
        // Only rate limiting is retried by the fetcher
        matches!(self, Self::RateLimit)
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedResponse(_) | Self::MissingWidget => ErrorCategory::Parsing,
            Self::InvalidUrl(_) | Self::InvalidHeader(_) => ErrorCategory::Config,
            _ => ErrorCategory::Network,
        }
    }
}

impl TrendwatchErrorTrait for InputError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Input
    }
}

impl TrendwatchErrorTrait for RenderError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Render
    }
}

/// Unified error type for the trendwatch crate
#[derive(Error, Debug)]
pub enum Error {
    /// Trends service errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Input validation errors
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Chart rendering errors
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl TrendwatchErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_recoverable(),
            Self::Input(e) => e.is_recoverable(),
            Self::Render(e) => e.is_recoverable(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch(e) => e.category(),
            Self::Input(e) => e.category(),
            Self::Render(e) => e.category(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category() {
        let fetch_err = Error::Fetch(FetchError::Timeout);
        assert_eq!(fetch_err.category(), ErrorCategory::Network);

        let parse_err = Error::Fetch(FetchError::MissingWidget);
        assert_eq!(parse_err.category(), ErrorCategory::Parsing);

        let config_err = Error::Fetch(FetchError::InvalidHeader("bad\nagent".into()));
        assert_eq!(config_err.category(), ErrorCategory::Config);

        let input_err = Error::Input(InputError::NoKeywords);
        assert_eq!(input_err.category(), ErrorCategory::Input);
    }

    #[test]
    fn test_only_rate_limit_is_recoverable() {
        assert!(Error::Fetch(FetchError::RateLimit).is_recoverable());
        assert!(!Error::Fetch(FetchError::Timeout).is_recoverable());
        assert!(!Error::Fetch(FetchError::ServerError(500)).is_recoverable());
    }

    #[test]
    fn test_render_error_conversion() {
        let unified: Error = RenderError::EmptyChart.into();
        assert!(matches!(unified, Error::Render(_)));
        assert_eq!(unified.category().label(), "render error");
        assert!(!unified.is_recoverable());
    }
}
