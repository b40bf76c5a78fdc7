use thiserror::Error;
use url::Url;

/// Errors that can occur during URL validation.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL parsed but carries no host component.
    #[error("URL has no host")]
    MissingHost,
}

/// Validates the syntax of an article or feed URL.
///
/// Only structural checks are made: the string must parse, the scheme must be
/// `http` or `https`, and a non-empty host must be present. Reachability is
/// left to the caller's fetch.
///
/// # Examples
///
/// ```
/// use newsbrief::util::validate_url;
///
/// let url = validate_url("https://example.com/story").unwrap();
/// assert_eq!(url.host_str(), Some("example.com"));
///
/// assert!(validate_url("not a url").is_err());
/// assert!(validate_url("ftp://example.com/file").is_err());
/// ```
pub fn validate_url(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}

/// Derives a display name for the site hosting `url`.
///
/// Returns the host with a single leading `www.` removed. URLs without a host
/// yield an empty string.
pub fn website_name(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    host.strip_prefix("www.").unwrap_or(host).to_string()
}
