pub mod config;
pub mod logging;

pub mod downloader;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod request;
pub mod resolver;
pub mod speedtest;
pub mod transport;
pub mod url_model;

pub use downloader::{DownloadOutcome, DownloadResult};
pub use error::{ErrorKind, FetchError};
pub use request::{DownloadRequest, ResolvedLink};
