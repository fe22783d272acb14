//! Resolver interface for turning a landing-page URL into a direct URL.
//!
//! The downloader only consumes `ResolvedLink` and does not know how the
//! link was found.

use crate::error::FetchError;
use crate::extract::LinkExtractor;
use crate::request::{DownloadRequest, ResolvedLink};
use crate::transport::Transport;

pub trait Resolver {
    fn resolve(&self, request: &DownloadRequest) -> Result<ResolvedLink, FetchError>;
}

/// Fetches the landing page (every call re-fetches) and extracts the link.
pub struct LandingPageResolver<'a, E> {
    transport: &'a dyn Transport,
    extractor: E,
}

impl<'a, E: LinkExtractor> LandingPageResolver<'a, E> {
    pub fn new(transport: &'a dyn Transport, extractor: E) -> Self {
        Self {
            transport,
            extractor,
        }
    }
}

impl<E: LinkExtractor> Resolver for LandingPageResolver<'_, E> {
    fn resolve(&self, request: &DownloadRequest) -> Result<ResolvedLink, FetchError> {
        let html = self.transport.get_text(&request.landing_page_url)?;
        match self.extractor.extract(&html) {
            Some(direct_url) => {
                tracing::info!(%direct_url, "resolved direct link");
                Ok(ResolvedLink { direct_url })
            }
            None => {
                tracing::warn!(
                    url = %request.landing_page_url,
                    bytes = html.len(),
                    "landing page has no download link"
                );
                Err(FetchError::MissingLink {
                    selector: self.extractor.selector(),
                })
            }
        }
    }
}
