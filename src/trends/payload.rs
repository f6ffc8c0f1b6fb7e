//! Wire payloads for the trends service
//!
//! Two calls are needed per fetch: the explore call turns the comparison
//! request into a set of widgets, and the widget data call returns the
//! interest-over-time rows for the `TIMESERIES` widget.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::TrendsConfig;
use crate::models::{KeywordSet, Timeframe, TrendRow, TrendTable};
use crate::utils::error::FetchError;
use crate::utils::strip_xssi_prefix;

/// Widget id carrying interest-over-time data
pub const TIMESERIES_WIDGET: &str = "TIMESERIES";

/// Request fields that stay fixed for every fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestScope {
    /// Category id (0 = all categories)
    pub category: u32,

    /// Region code
    pub geo: String,

    /// Sub-property filter (empty = web search)
    pub gprop: String,
}

impl Default for RequestScope {
    fn default() -> Self {
        Self::from(&TrendsConfig::default())
    }
}

impl From<&TrendsConfig> for RequestScope {
    fn from(config: &TrendsConfig) -> Self {
        Self {
            category: config.category,
            geo: config.geo.clone(),
            gprop: config.gprop.clone(),
        }
    }
}

/// Fully built interest-over-time request
#[derive(Debug, Clone, PartialEq)]
pub struct TrendRequest {
    pub keywords: KeywordSet,
    pub timeframe: Timeframe,
    pub scope: RequestScope,
}

#[derive(Debug, Serialize)]
struct ComparisonItem<'a> {
    keyword: &'a str,
    time: String,
    geo: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExploreRequest<'a> {
    comparison_item: Vec<ComparisonItem<'a>>,
    category: u32,
    property: &'a str,
}

impl TrendRequest {
    pub fn new(keywords: KeywordSet, timeframe: Timeframe, scope: RequestScope) -> Self {
        Self {
            keywords,
            timeframe,
            scope,
        }
    }

    /// JSON value of the explore call's `req` parameter
    pub fn explore_req(&self) -> Result<String, FetchError> {
        let time = self.timeframe.to_string();
        let request = ExploreRequest {
            comparison_item: self
                .keywords
                .iter()
                .map(|keyword| ComparisonItem {
                    keyword,
                    time: time.clone(),
                    geo: &self.scope.geo,
                })
                .collect(),
            category: self.scope.category,
            property: &self.scope.gprop,
        };

        serde_json::to_string(&request).map_err(|e| FetchError::MalformedResponse(e.to_string()))
    }
}

/// One widget returned by the explore call
#[derive(Debug, Clone, Deserialize)]
pub struct Widget {
    pub id: String,

    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub request: Value,
}

#[derive(Debug, Deserialize)]
struct ExploreResponse {
    #[serde(default)]
    widgets: Vec<Widget>,
}

/// Pick the interest-over-time widget out of an explore response body
pub fn parse_explore(body: &str) -> Result<Widget, FetchError> {
    let response: ExploreResponse = serde_json::from_str(strip_xssi_prefix(body))
        .map_err(|e| FetchError::MalformedResponse(format!("explore: {e}")))?;

    response
        .widgets
        .into_iter()
        .find(|w| w.id == TIMESERIES_WIDGET && w.token.is_some())
        .ok_or(FetchError::MissingWidget)
}

#[derive(Debug, Deserialize)]
struct MultilineResponse {
    default: MultilineBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MultilineBody {
    #[serde(default)]
    timeline_data: Vec<TimelinePoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelinePoint {
    time: String,

    #[serde(default)]
    value: Vec<u32>,

    #[serde(default)]
    is_partial: bool,
}

/// Decode a widget data body into a [`TrendTable`] with one column per keyword
///
/// An empty `timelineData` array yields an empty table, not an error.
pub fn parse_multiline(body: &str, keywords: &KeywordSet) -> Result<TrendTable, FetchError> {
    let response: MultilineResponse = serde_json::from_str(strip_xssi_prefix(body))
        .map_err(|e| FetchError::MalformedResponse(format!("interest over time: {e}")))?;

    let columns = keywords.as_slice().to_vec();
    let rows = response
        .default
        .timeline_data
        .into_iter()
        .map(|point| {
            let secs: i64 = point.time.parse().map_err(|_| {
                FetchError::MalformedResponse(format!("invalid timestamp '{}'", point.time))
            })?;
            let date = DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| {
                    FetchError::MalformedResponse(format!("timestamp out of range: {secs}"))
                })?
                .date_naive();

            if point.value.len() != columns.len() {
                return Err(FetchError::MalformedResponse(format!(
                    "expected {} values, got {}",
                    columns.len(),
                    point.value.len()
                )));
            }

            Ok(TrendRow {
                date,
                values: point.value,
                is_partial: point.is_partial,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TrendTable::from_rows(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request() -> TrendRequest {
        TrendRequest::new(
            KeywordSet::new(["2BHK", "3BHK"]),
            "2025-04-01 2025-04-30".parse().unwrap(),
            RequestScope::default(),
        )
    }

    #[test]
    fn test_explore_req_shape() {
        let req: Value = serde_json::from_str(&request().explore_req().unwrap()).unwrap();

        assert_eq!(req["category"], 0);
        assert_eq!(req["property"], "");
        let items = req["comparisonItem"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["keyword"], "2BHK");
        assert_eq!(items[1]["time"], "2025-04-01 2025-04-30");
        assert_eq!(items[1]["geo"], "IN");
    }

    #[test]
    fn test_parse_explore_picks_timeseries() {
        let body = r#")]}'
{"widgets":[
  {"id":"GEO_MAP","token":"geo-token","request":{}},
  {"id":"TIMESERIES","token":"ts-token","request":{"time":"2025-04-01 2025-04-30"}}
]}"#;

        let widget = parse_explore(body).unwrap();
        assert_eq!(widget.token.as_deref(), Some("ts-token"));
        assert_eq!(widget.request["time"], "2025-04-01 2025-04-30");
    }

    #[test]
    fn test_parse_explore_missing_widget() {
        let body = r#")]}'{"widgets":[{"id":"RELATED_QUERIES","token":"x"}]}"#;
        assert!(matches!(parse_explore(body), Err(FetchError::MissingWidget)));
    }

    #[test]
    fn test_parse_explore_not_json() {
        assert!(matches!(
            parse_explore("<html>blocked</html>"),
            Err(FetchError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_multiline() {
        let body = r#")]}',
{"default":{"timelineData":[
  {"time":"1743552000","formattedTime":"Apr 2, 2025","value":[40,10],"hasData":[true,true]},
  {"time":"1743465600","formattedTime":"Apr 1, 2025","value":[100,25],"hasData":[true,true],"isPartial":true}
]}}"#;

        let table = parse_multiline(body, &request().keywords).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.keywords(), &["2BHK", "3BHK"]);

        let first = &table.rows()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        assert_eq!(first.values, vec![100, 25]);
        assert!(first.is_partial);
        assert!(!table.rows()[1].is_partial);
    }

    #[test]
    fn test_parse_multiline_empty() {
        let body = r#")]}',{"default":{"timelineData":[],"averages":[]}}"#;
        let table = parse_multiline(body, &request().keywords).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.keywords().len(), 2);
    }

    #[test]
    fn test_parse_multiline_width_mismatch() {
        let body = r#"{"default":{"timelineData":[{"time":"1743465600","value":[1]}]}}"#;
        assert!(parse_multiline(body, &request().keywords).is_err());
    }
}
