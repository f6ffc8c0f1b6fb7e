//! Trend fetcher: bounded retry on rate limiting
//!
//! Each attempt is classified into an [`AttemptOutcome`] and the loop matches
//! on it:
//! - `Success` returns the table at once, even when it is empty
//! - `RateLimited` warns the user, cools down, and tries again
//! - `Fatal` reports the error and stops after that single attempt
//!
//! At most `max_retries` requests are issued. Exhaustion yields `None`.

use tracing::{debug, error, info, warn};

use super::pacer::{Pacer, TokioPacer};
use super::payload::{RequestScope, TrendRequest};
use super::TrendSource;
use crate::models::{KeywordSet, Timeframe, TrendTable};
use crate::notify::{Notifier, RATE_LIMIT_WARNING};
use crate::utils::error::FetchError;
use crate::utils::retry::RetryConfig;

/// Classified result of one request attempt
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    Success(TrendTable),
    RateLimited,
    Fatal(String),
}

impl From<Result<TrendTable, FetchError>> for AttemptOutcome {
    fn from(result: Result<TrendTable, FetchError>) -> Self {
        match result {
            Ok(table) => Self::Success(table),
            Err(FetchError::RateLimit) => Self::RateLimited,
            Err(e) => Self::Fatal(e.to_string()),
        }
    }
}

/// Fetches interest-over-time tables from a [`TrendSource`]
pub struct TrendFetcher<S, P = TokioPacer> {
    source: S,
    pacer: P,
    retry: RetryConfig,
    scope: RequestScope,
}

impl<S: TrendSource> TrendFetcher<S, TokioPacer> {
    /// Fetcher with real pauses and default retry policy
    pub fn new(source: S) -> Self {
        Self::with_pacer(source, TokioPacer)
    }
}

impl<S: TrendSource, P: Pacer> TrendFetcher<S, P> {
    pub fn with_pacer(source: S, pacer: P) -> Self {
        Self {
            source,
            pacer,
            retry: RetryConfig::default(),
            scope: RequestScope::default(),
        }
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: RequestScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    pub fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    /// Fetch interest over time for `keywords` across `timeframe`
    ///
    /// Returns `None` when the keyword set is empty, when a non-rate-limit
    /// error occurs, or when every attempt was rate limited.
    pub async fn fetch(
        &self,
        keywords: &KeywordSet,
        timeframe: &Timeframe,
        notifier: &dyn Notifier,
    ) -> Option<TrendTable> {
        if keywords.is_empty() {
            debug!("No keywords given, skipping fetch");
            return None;
        }

        let mut attempt: u32 = 0;

        while attempt < self.retry.max_retries {
            let request = TrendRequest::new(keywords.clone(), *timeframe, self.scope.clone());

            self.pacer.pause(self.retry.pre_request_delay).await;

            info!(
                attempt = attempt + 1,
                max_retries = self.retry.max_retries,
                keywords = keywords.len(),
                timeframe = %timeframe,
                "Requesting interest over time"
            );

            match AttemptOutcome::from(self.source.interest_over_time(&request).await) {
                AttemptOutcome::Success(table) => {
                    info!(rows = table.len(), attempt = attempt + 1, "Trend data received");
                    return Some(table);
                }
                AttemptOutcome::RateLimited => {
                    attempt += 1;
                    let cooldown = self.retry.cooldown_for(attempt);
                    warn!(
                        attempt = attempt,
                        cooldown_secs = cooldown.as_secs_f64(),
                        "Rate limited by trends service"
                    );
                    notifier.warning(RATE_LIMIT_WARNING);
                    self.pacer.pause(cooldown).await;
                }
                AttemptOutcome::Fatal(message) => {
                    error!(error = %message, attempt = attempt + 1, "Trend fetch failed");
                    notifier.error(&format!("Unexpected error: {message}"));
                    return None;
                }
            }
        }

        warn!(
            max_retries = self.retry.max_retries,
            "Giving up after repeated rate limiting"
        );
        None
    }
}
