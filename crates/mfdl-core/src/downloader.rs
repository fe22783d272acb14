//! Single-stream downloader.
//!
//! Streams the direct URL's body into `<dest_dir>/<derived name>` in
//! `CHUNK_SIZE` pieces, truncating any existing file, and compares the
//! written size against the declared `Content-Length` afterwards.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::FetchError;
use crate::progress::TransferProgress;
use crate::report::Reporter;
use crate::request::ResolvedLink;
use crate::transport::{BodySink, ResponseHead, Transport, CHUNK_SIZE};
use crate::url_model;

/// How a finished transfer compares with what the server declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Sizes match, or no (nonzero) size was declared.
    Complete,
    /// The server declared `expected` bytes but `written` arrived. Not an error.
    Incomplete { expected: u64, written: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    pub file_name: String,
    pub path: PathBuf,
    pub bytes_written: u64,
    pub declared_size: Option<u64>,
    pub outcome: DownloadOutcome,
}

impl DownloadResult {
    pub fn success(&self) -> bool {
        self.outcome == DownloadOutcome::Complete
    }
}

/// Compares bytes written with the declared size. A missing or zero
/// declaration can never mismatch.
pub fn check_completeness(declared: Option<u64>, written: u64) -> DownloadOutcome {
    match declared {
        Some(expected) if expected != 0 && expected != written => {
            DownloadOutcome::Incomplete { expected, written }
        }
        _ => DownloadOutcome::Complete,
    }
}

/// Writes each chunk to the destination file and advances progress.
struct FileSink<'r> {
    path: PathBuf,
    file_name: String,
    file: Option<File>,
    progress: TransferProgress,
    written: u64,
    reporter: &'r mut dyn Reporter,
}

impl BodySink for FileSink<'_> {
    fn on_head(&mut self, head: &ResponseHead) -> io::Result<()> {
        let file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        self.file = Some(file);
        self.progress = TransferProgress::new(head.content_length);
        self.reporter
            .transfer_started(&self.file_name, &self.progress);
        Ok(())
    }

    fn on_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "body before headers"))?;
        for piece in chunk.chunks(CHUNK_SIZE) {
            file.write_all(piece)?;
            self.written += piece.len() as u64;
            self.progress.advance(piece.len() as u64);
            self.reporter.transfer_progress(&self.progress);
        }
        Ok(())
    }
}

/// Downloads `link` into `dest_dir`. Returns an `Incomplete` outcome (not an
/// error) when the written size disagrees with a nonzero `Content-Length`.
pub fn download(
    transport: &dyn Transport,
    link: &ResolvedLink,
    dest_dir: &Path,
    reporter: &mut dyn Reporter,
) -> Result<DownloadResult, FetchError> {
    let file_name = url_model::derive_filename(&link.direct_url);
    let path = dest_dir.join(&file_name);
    tracing::debug!(url = %link.direct_url, path = %path.display(), "starting download");

    let mut sink = FileSink {
        path: path.clone(),
        file_name: file_name.clone(),
        file: None,
        progress: TransferProgress::new(None),
        written: 0,
        reporter,
    };
    let head = transport.get_streaming(&link.direct_url, &mut sink)?;

    if let Some(mut file) = sink.file.take() {
        file.flush()?;
    }
    sink.reporter.transfer_finished(&sink.progress);

    let bytes_written = sink.written;
    let outcome = check_completeness(head.content_length, bytes_written);
    match outcome {
        DownloadOutcome::Complete => {
            tracing::info!(file = %file_name, bytes_written, "download complete");
        }
        DownloadOutcome::Incomplete { expected, written } => {
            tracing::warn!(file = %file_name, expected, written, "download size mismatch");
        }
    }

    Ok(DownloadResult {
        file_name,
        path,
        bytes_written,
        declared_size: head.content_length,
        outcome,
    })
}
