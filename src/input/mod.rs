//! Input validation for the dashboard
//!
//! Turns the raw text of the keyword field and the two date pickers into
//! validated domain values. Nothing here touches the network.

use chrono::NaiveDate;

use crate::models::{DateRange, KeywordSet, DATE_FORMAT};
use crate::utils::error::InputError;

/// Split a comma-separated keyword field into a [`KeywordSet`]
///
/// ```
/// use trendwatch::input::parse_keywords;
///
/// let keywords = parse_keywords("2BHK, 3BHK,,farmhouse ");
/// assert_eq!(keywords.as_slice(), &["2BHK", "3BHK", "farmhouse"]);
/// ```
pub fn parse_keywords(input: &str) -> KeywordSet {
    KeywordSet::new(input.split(','))
}

/// Like [`parse_keywords`], but an empty result is an error
pub fn require_keywords(input: &str) -> Result<KeywordSet, InputError> {
    let keywords = parse_keywords(input);
    if keywords.is_empty() {
        return Err(InputError::NoKeywords);
    }
    Ok(keywords)
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> Result<NaiveDate, InputError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| InputError::InvalidDate(trimmed.to_string()))
}

/// Check that the range end is not before its start
pub fn is_valid_range(start: NaiveDate, end: NaiveDate) -> bool {
    start <= end
}

/// Validate a start/end pair into a [`DateRange`]
pub fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<DateRange, InputError> {
    DateRange::new(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords_default_field() {
        let keywords = parse_keywords("2BHK,3BHK,1BHK,farmhouse");
        assert_eq!(keywords.len(), 4);
        assert_eq!(keywords.iter().last(), Some("farmhouse"));
    }

    #[test]
    fn test_parse_keywords_empty() {
        assert!(parse_keywords("").is_empty());
        assert!(parse_keywords(" , ,, ").is_empty());
    }

    #[test]
    fn test_require_keywords() {
        assert_eq!(require_keywords(" , ").unwrap_err(), InputError::NoKeywords);
        assert_eq!(require_keywords("villa").unwrap().len(), 1);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2025-04-01 ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
        );
        assert_eq!(
            parse_date("01/04/2025"),
            Err(InputError::InvalidDate("01/04/2025".to_string()))
        );
        assert!(parse_date("2025-02-30").is_err());
    }

    #[test]
    fn test_validate_range() {
        let start = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 4, 30).unwrap();

        assert!(is_valid_range(start, end));
        assert!(is_valid_range(start, start));
        assert!(!is_valid_range(end, start));

        assert!(validate_range(start, end).is_ok());
        assert!(matches!(
            validate_range(end, start),
            Err(InputError::InvalidRange { .. })
        ));
    }
}
