use rand::seq::SliceRandom;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT,
};

use crate::utils::error::FetchError;

/// Pool of realistic User-Agent strings for rotation
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
];

/// Pick a user agent from the pool
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS.choose(&mut rng).copied().unwrap_or(USER_AGENTS[0])
}

/// Build browser-like headers for forum page requests
///
/// # Arguments
///
/// * `user_agent` - User agent string, normally from [`random_user_agent`]
/// * `referer` - Referer URL (the forum's home page)
/// * `accept_language` - Accept-Language value
///
/// # Errors
///
/// Returns `FetchError::InvalidUrl` when the referer is not a valid header value.
///
/// # Examples
///
/// ```
/// use forumscan::crawler::headers::build_forum_headers;
///
/// let headers = build_forum_headers(
///     "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
///     "https://www.bankier.pl/",
///     "pl,en-US;q=0.7,en;q=0.3",
/// )
/// .unwrap();
/// assert!(headers.contains_key("referer"));
/// ```
pub fn build_forum_headers(
    user_agent: &str,
    referer: &str,
    accept_language: &str,
) -> Result<HeaderMap, FetchError> {
    let mut headers = HeaderMap::new();

    let agent = HeaderValue::from_str(user_agent)
        .unwrap_or_else(|_| HeaderValue::from_static(USER_AGENTS[0]));
    headers.insert(USER_AGENT, agent);

    let referer_value =
        HeaderValue::from_str(referer).map_err(|_| FetchError::InvalidUrl(referer.to_string()))?;
    headers.insert(REFERER, referer_value);

    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    if let Ok(language) = HeaderValue::from_str(accept_language) {
        headers.insert(ACCEPT_LANGUAGE, language);
    }

    // Sec-Fetch headers for modern browser compatibility
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("document"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("navigate"),
    );
    headers.insert(
        HeaderName::from_static("upgrade-insecure-requests"),
        HeaderValue::from_static("1"),
    );

    Ok(headers)
}
