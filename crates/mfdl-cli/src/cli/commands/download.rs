//! Default command: validate the URL, resolve the landing page, download.

use mfdl_core::config::MfdlConfig;
use mfdl_core::extract::AnchorById;
use mfdl_core::pipeline;
use mfdl_core::report::ConsoleReporter;
use mfdl_core::transport::Transport;
use mfdl_core::{DownloadOutcome, DownloadRequest, DownloadResult, ErrorKind, FetchError};
use std::path::Path;

/// Runs one download and prints exactly one final message.
pub fn run_download(cfg: &MfdlConfig, transport: &dyn Transport, input: &str, dest_dir: &Path) {
    let request = match DownloadRequest::parse(input, &cfg.host_domain) {
        Ok(request) => request,
        Err(e) => {
            println!("{}", describe_error(&e));
            return;
        }
    };

    let mut reporter = ConsoleReporter::stdout(cfg.progress_interval());
    let extractor = AnchorById::new(cfg.download_anchor_id.clone());
    match pipeline::run(&request, transport, extractor, dest_dir, &mut reporter) {
        Ok(result) => println!("{}", describe_result(&result)),
        Err(e) => {
            tracing::warn!("download failed: {}", e);
            println!("{}", describe_error(&e));
        }
    }
}

fn describe_result(result: &DownloadResult) -> String {
    match result.outcome {
        DownloadOutcome::Complete => format!(
            "Success! File downloaded as '{}' ({} bytes).",
            result.file_name, result.bytes_written
        ),
        DownloadOutcome::Incomplete { expected, written } => format!(
            "Warning: download incomplete. '{}' has {} of {} bytes.",
            result.file_name, written, expected
        ),
    }
}

fn describe_error(err: &FetchError) -> String {
    match err.kind() {
        ErrorKind::InvalidInput => format!(
            "The URL you entered does not look like a valid MediaFire URL ({}).",
            err
        ),
        ErrorKind::Network => format!("Network error: {}", err),
        ErrorKind::Parse => format!(
            "Error: {}. The page layout may have changed or the URL is not valid.",
            err
        ),
        ErrorKind::Unexpected => format!("Unexpected error: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn result(outcome: DownloadOutcome, written: u64) -> DownloadResult {
        DownloadResult {
            file_name: "doc.zip".to_string(),
            path: PathBuf::from("doc.zip"),
            bytes_written: written,
            declared_size: Some(500_000),
            outcome,
        }
    }

    #[test]
    fn success_message() {
        let msg = describe_result(&result(DownloadOutcome::Complete, 500_000));
        assert!(msg.starts_with("Success!"));
        assert!(msg.contains("'doc.zip'"));
        assert!(msg.contains("500000 bytes"));
    }

    #[test]
    fn incomplete_message() {
        let msg = describe_result(&result(
            DownloadOutcome::Incomplete {
                expected: 500_000,
                written: 499_000,
            },
            499_000,
        ));
        assert!(msg.starts_with("Warning"));
        assert!(msg.contains("499000 of 500000"));
    }

    #[test]
    fn error_messages_by_kind() {
        let invalid = DownloadRequest::parse("https://example.com/x", "mediafire.com").unwrap_err();
        assert!(describe_error(&invalid).contains("not look like a valid MediaFire URL"));

        let network = FetchError::Status {
            url: "https://www.mediafire.com/file/x".to_string(),
            status: 404,
        };
        assert!(describe_error(&network).starts_with("Network error"));

        let parse = FetchError::MissingLink {
            selector: "a#downloadButton".to_string(),
        };
        assert!(describe_error(&parse).contains("page layout may have changed"));

        let other = FetchError::Unexpected("boom".to_string());
        assert_eq!(describe_error(&other), "Unexpected error: boom");
    }
}
