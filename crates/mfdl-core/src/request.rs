//! User input: the landing-page URL and its (deliberately loose) validation.

use crate::error::FetchError;

/// A landing-page URL accepted for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub landing_page_url: String,
}

impl DownloadRequest {
    /// Accepts `input` if it contains `host_domain` as a substring.
    ///
    /// Surrounding whitespace (e.g. the newline from an interactive prompt) is
    /// trimmed. No request is made here.
    pub fn parse(input: &str, host_domain: &str) -> Result<Self, FetchError> {
        let url = input.trim();
        if url.is_empty() || !url.contains(host_domain) {
            return Err(FetchError::InvalidInputUrl {
                url: url.to_string(),
                expected_domain: host_domain.to_string(),
            });
        }
        Ok(Self {
            landing_page_url: url.to_string(),
        })
    }
}

/// Direct file URL taken from the landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub direct_url: String,
}
