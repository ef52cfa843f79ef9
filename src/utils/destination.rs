//! Destination URL validation.
//!
//! Destinations are stored exactly as submitted, so validation never rewrites
//! the input. Dedup compares the raw strings.

use url::Url;

/// Longest destination accepted, in bytes.
pub const MAX_DESTINATION_LENGTH: usize = 2048;

/// Reasons a destination URL is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DestinationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL exceeds {MAX_DESTINATION_LENGTH} bytes")]
    TooLong,

    #[error("URL must not contain whitespace or control characters")]
    IllegalCharacters,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS URLs are allowed")]
    UnsupportedScheme,

    #[error("URL must include a host")]
    MissingHost,
}

/// A destination that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Host name of the destination, without a leading `www.`.
    pub domain: Option<String>,
}

/// Checks that `input` is an absolute `http`/`https` URL with a host.
///
/// # Errors
///
/// Returns the first [`DestinationError`] that applies.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_destination("https://example.com/page").is_ok());
/// assert!(validate_destination("not-a-url").is_err());
/// assert!(validate_destination("javascript:alert(1)").is_err());
/// ```
pub fn validate_destination(input: &str) -> Result<Destination, DestinationError> {
    if input.is_empty() {
        return Err(DestinationError::Empty);
    }

    if input.len() > MAX_DESTINATION_LENGTH {
        return Err(DestinationError::TooLong);
    }

    // The URL parser strips these silently; stored values must match the input.
    if input.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(DestinationError::IllegalCharacters);
    }

    let url = Url::parse(input).map_err(|e| DestinationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(DestinationError::UnsupportedScheme),
    }

    let host = url.host_str().ok_or(DestinationError::MissingHost)?;
    if host.is_empty() {
        return Err(DestinationError::MissingHost);
    }

    Ok(Destination {
        domain: Some(host.trim_start_matches("www.").to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_destination("http://example.com").is_ok());
        assert!(validate_destination("https://example.com/page?q=1#top").is_ok());
        assert!(validate_destination("https://localhost:8080/path").is_ok());
    }

    #[test]
    fn test_extracts_domain() {
        let dest = validate_destination("https://www.Example.com/a").unwrap();
        assert_eq!(dest.domain.as_deref(), Some("example.com"));
    }

    #[test]
    fn test_rejects_relative_url() {
        assert!(matches!(
            validate_destination("not-a-url"),
            Err(DestinationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_other_schemes() {
        for input in ["ftp://example.com", "javascript:alert(1)", "mailto:a@b.com", "file:///etc/passwd"] {
            assert!(validate_destination(input).is_err(), "{input} should be rejected");
        }
        assert_eq!(
            validate_destination("ftp://example.com"),
            Err(DestinationError::UnsupportedScheme)
        );
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(validate_destination(""), Err(DestinationError::Empty));
    }

    #[test]
    fn test_rejects_whitespace() {
        assert_eq!(
            validate_destination(" https://example.com"),
            Err(DestinationError::IllegalCharacters)
        );
        assert_eq!(
            validate_destination("https://example.com/a b"),
            Err(DestinationError::IllegalCharacters)
        );
        assert_eq!(
            validate_destination("https://example.com/\n"),
            Err(DestinationError::IllegalCharacters)
        );
    }

    #[test]
    fn test_rejects_too_long() {
        let long = format!("https://example.com/{}", "a".repeat(MAX_DESTINATION_LENGTH));
        assert_eq!(validate_destination(&long), Err(DestinationError::TooLong));
    }
}
