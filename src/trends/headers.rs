use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT,
};

use crate::utils::error::FetchError;

/// Build browser-like headers for trends API requests
///
/// # Arguments
///
/// * `user_agent` - User agent string (typically a modern browser UA)
/// * `hl` - Host language of the session, e.g. `en-IN`
/// * `referer` - Referer URL (typically the explore page)
///
/// # Examples
///
/// ```
/// use trendwatch::trends::headers::build_trends_headers;
///
/// let headers = build_trends_headers(
///     "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
///     "en-IN",
///     "https://trends.google.com/trends/explore",
/// )
/// .unwrap();
/// assert_eq!(headers["accept-language"], "en-IN,en;q=0.9");
/// ```
pub fn build_trends_headers(
    user_agent: &str,
    hl: &str,
    referer: &str,
) -> Result<HeaderMap, FetchError> {
    let mut headers = HeaderMap::new();

    headers.insert(USER_AGENT, header_value(user_agent)?);
    headers.insert(REFERER, header_value(referer)?);
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(ACCEPT_LANGUAGE, header_value(&accept_language(hl))?);

    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("cors"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("same-origin"),
    );

    Ok(headers)
}

/// `Accept-Language` value for a host language
///
/// ```
/// use trendwatch::trends::headers::accept_language;
///
/// assert_eq!(accept_language("en-IN"), "en-IN,en;q=0.9");
/// assert_eq!(accept_language("fr"), "fr");
/// ```
pub fn accept_language(hl: &str) -> String {
    match hl.split_once('-') {
        Some((lang, _)) if !lang.is_empty() => format!("{hl},{lang};q=0.9"),
        _ => hl.to_string(),
    }
}

/// Region part of a host language (`en-IN` -> `IN`)
pub fn hl_region(hl: &str) -> &str {
    hl.rsplit_once('-').map_or(hl, |(_, region)| region)
}

fn header_value(value: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(value)
        .map_err(|_| FetchError::InvalidHeader(value.escape_debug().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_trends_headers() {
        let headers = build_trends_headers(
            "Mozilla/5.0",
            "en-IN",
            "https://trends.google.com/trends/explore",
        )
        .unwrap();

        assert_eq!(headers.get(USER_AGENT).unwrap(), "Mozilla/5.0");
        assert_eq!(
            headers.get(REFERER).unwrap(),
            "https://trends.google.com/trends/explore"
        );
        assert_eq!(headers.get(ACCEPT_LANGUAGE).unwrap(), "en-IN,en;q=0.9");
        assert!(headers.contains_key(ACCEPT));
        assert!(headers.contains_key("sec-fetch-mode"));
    }

    #[test]
    fn test_invalid_header_value() {
        let err = build_trends_headers("bad\nagent", "en-IN", "https://x").unwrap_err();
        assert!(matches!(err, FetchError::InvalidHeader(ref v) if v == "bad\\nagent"));
    }

    #[test]
    fn test_hl_region() {
        assert_eq!(hl_region("en-IN"), "IN");
        assert_eq!(hl_region("en-US"), "US");
        assert_eq!(hl_region("de"), "de");
    }
}
