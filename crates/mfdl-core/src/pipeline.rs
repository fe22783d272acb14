//! Resolve, then download. Strictly sequential; a resolver failure means the
//! file request is never made.

use std::path::Path;

use crate::downloader::{self, DownloadResult};
use crate::error::FetchError;
use crate::extract::LinkExtractor;
use crate::report::Reporter;
use crate::request::DownloadRequest;
use crate::resolver::{LandingPageResolver, Resolver};
use crate::transport::Transport;

pub fn run<E: LinkExtractor>(
    request: &DownloadRequest,
    transport: &dyn Transport,
    extractor: E,
    dest_dir: &Path,
    reporter: &mut dyn Reporter,
) -> Result<DownloadResult, FetchError> {
    reporter.status("Analyzing download page...");
    let resolver = LandingPageResolver::new(transport, extractor);
    let link = resolver.resolve(request)?;
    reporter.status(&format!("Direct download link found: {}", link.direct_url));

    reporter.status("Starting download...");
    downloader::download(transport, &link, dest_dir, reporter)
}
