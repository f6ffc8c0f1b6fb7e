//! HTTP client for the trends service
//!
//! A client is constructed explicitly for one dashboard interaction and owns
//! everything the service session needs:
//! - Locale (`hl`) and timezone offset (`tz`), fixed at construction
//! - A cookie store, primed once per client from the explore page
//! - Browser-like request headers
//! - A configurable base URL so tests can point it at a mock server

use async_trait::async_trait;
use reqwest::{header::HeaderMap, Client, Response, StatusCode};
use tokio::sync::OnceCell;
use tracing::{debug, instrument};
use url::Url;

use super::headers::{build_trends_headers, hl_region};
use super::payload::{parse_explore, parse_multiline, TrendRequest, Widget};
use super::TrendSource;
use crate::config::TrendsConfig;
use crate::models::TrendTable;
use crate::utils::error::FetchError;

const EXPLORE_PAGE_PATH: &str = "trends/explore/";
const EXPLORE_API_PATH: &str = "trends/api/explore";
const MULTILINE_API_PATH: &str = "trends/api/widgetdata/multiline";

/// Trends service client
pub struct TrendsClient {
    /// HTTP client with cookie store and timeout
    client: Client,

    /// Service root
    base_url: Url,

    /// Host language
    hl: String,

    /// Timezone offset in minutes
    tz: i32,

    /// Headers sent with every API call
    headers: HeaderMap,

    /// Set once the session cookies have been primed
    session: OnceCell<()>,
}

impl TrendsClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` for a bad base URL,
    /// `FetchError::InvalidHeader` for a user agent HTTP cannot carry, and
    /// `FetchError::Http` if the HTTP client cannot be created
    pub fn new(config: &TrendsConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {e}", config.base_url)))?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .gzip(true)
            .cookie_store(true)
            .build()?;

        let referer = join(&base_url, EXPLORE_PAGE_PATH)?;
        let headers = build_trends_headers(&config.user_agent, &config.hl, referer.as_str())?;

        Ok(Self {
            client,
            base_url,
            hl: config.hl.clone(),
            tz: config.tz,
            headers,
            session: OnceCell::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Prime session cookies from the explore page, once per client
    ///
    /// Rate limiting here is reported like any other 429; other failures are
    /// logged and the API calls are attempted anyway.
    async fn ensure_session(&self) -> Result<(), FetchError> {
        let url = join(&self.base_url, EXPLORE_PAGE_PATH)?;

        self.session
            .get_or_try_init(|| async {
                let region = hl_region(&self.hl);
                debug!(url = %url, geo = %region, "Priming trends session cookies");

                match self
                    .client
                    .get(url)
                    .query(&[("geo", region)])
                    .headers(self.headers.clone())
                    .send()
                    .await
                {
                    Ok(response) if response.status() == StatusCode::TOO_MANY_REQUESTS => {
                        Err(FetchError::RateLimit)
                    }
                    Ok(response) => {
                        debug!(status = %response.status(), "Session priming finished");
                        Ok(())
                    }
                    Err(e) => {
                        debug!(error = %e, "Session priming failed, continuing without cookies");
                        Ok(())
                    }
                }
            })
            .await
            .map(|_| ())
    }

    /// Resolve the interest-over-time widget for a request
    #[instrument(skip(self, request), fields(keywords = %request.keywords))]
    pub async fn explore(&self, request: &TrendRequest) -> Result<Widget, FetchError> {
        let url = join(&self.base_url, EXPLORE_API_PATH)?;
        let req = request.explore_req()?;
        let tz = self.tz.to_string();

        let response = self
            .client
            .post(url)
            .query(&[("hl", self.hl.as_str()), ("tz", tz.as_str()), ("req", req.as_str())])
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        let body = read_body(response).await?;
        parse_explore(&body)
    }

    /// Download the rows behind an interest-over-time widget
    #[instrument(skip(self, widget, request))]
    pub async fn multiline(
        &self,
        widget: &Widget,
        request: &TrendRequest,
    ) -> Result<TrendTable, FetchError> {
        let url = join(&self.base_url, MULTILINE_API_PATH)?;
        let req = serde_json::to_string(&widget.request)
            .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;
        let token = widget.token.as_deref().ok_or(FetchError::MissingWidget)?;
        let tz = self.tz.to_string();

        let response = self
            .client
            .get(url)
            .query(&[("req", req.as_str()), ("token", token), ("tz", tz.as_str())])
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        let body = read_body(response).await?;
        parse_multiline(&body, &request.keywords)
    }
}

#[async_trait]
impl TrendSource for TrendsClient {
    async fn interest_over_time(&self, request: &TrendRequest) -> Result<TrendTable, FetchError> {
        self.ensure_session().await?;
        let widget = self.explore(request).await?;
        self.multiline(&widget, request).await
    }
}

/// Map status codes and read the body text
async fn read_body(response: Response) -> Result<String, FetchError> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(FetchError::RateLimit);
    }
    if !status.is_success() {
        return Err(FetchError::ServerError(status.as_u16()));
    }

    response.text().await.map_err(FetchError::from_transport)
}

fn join(base: &Url, path: &str) -> Result<Url, FetchError> {
    base.join(path)
        .map_err(|e| FetchError::InvalidUrl(format!("{base}{path}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = TrendsClient::new(&TrendsConfig::default());
        assert!(client.is_ok());

        let client = client.unwrap();
        assert_eq!(client.base_url().as_str(), "https://trends.google.com/");
        assert_eq!(client.tz, 330);
    }

    #[test]
    fn test_invalid_base_url() {
        let config = TrendsConfig {
            base_url: "::not a url::".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            TrendsClient::new(&config),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_invalid_user_agent() {
        let config = TrendsConfig {
            user_agent: "trendwatch\r\nX-Injected: 1".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            TrendsClient::new(&config),
            Err(FetchError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_endpoint_join() {
        let base = Url::parse("http://127.0.0.1:8080").unwrap();
        assert_eq!(
            join(&base, MULTILINE_API_PATH).unwrap().as_str(),
            "http://127.0.0.1:8080/trends/api/widgetdata/multiline"
        );
    }
}
