//! Logging init: append to a file under the XDG state dir, or fall back to
//! stderr when that is not possible.
//!
//! Console status and progress go through `report::Reporter`; tracing output
//! is diagnostics only.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const FILE_FILTER: &str = "info,mfdl_core=debug,mfdl_cli=debug";
const STDERR_FILTER: &str = "warn";

/// Hands out clones of the log file; a failed clone degrades to stderr.
struct LogFile(File);

enum LogWriter {
    File(File),
    Stderr(io::Stderr),
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogWriter::File(f) => f.write(buf),
            LogWriter::Stderr(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogWriter::File(f) => f.flush(),
            LogWriter::Stderr(e) => e.flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        match self.0.try_clone() {
            Ok(f) => LogWriter::File(f),
            Err(_) => LogWriter::Stderr(io::stderr()),
        }
    }
}

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// `~/.local/state/mfdl/mfdl.log` (or `$XDG_STATE_HOME/mfdl/mfdl.log`).
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mfdl")?;
    Ok(xdg_dirs.get_state_home().join("mfdl").join("mfdl.log"))
}

/// Installs the file subscriber and returns the log path. On failure the
/// caller should use `init_logging_stderr`.
pub fn init_logging() -> Result<PathBuf> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(FILE_FILTER))
        .with_writer(LogFile(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {}", e))?;

    tracing::info!("mfdl logging initialized at {}", path.display());
    Ok(path)
}

/// Stderr-only logging. Defaults to `warn` so log lines don't interleave
/// with the progress display.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(STDERR_FILTER))
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_lives_under_mfdl_dir() {
        let path = log_file_path().unwrap();
        assert!(path.ends_with("mfdl/mfdl.log"));
    }

    #[test]
    fn file_filter_targets_this_crate() {
        let directive = format!("{}=debug", env!("CARGO_CRATE_NAME"));
        assert!(FILE_FILTER.split(',').any(|d| d == directive));
        assert!(FILE_FILTER.split(',').any(|d| d == "mfdl_cli=debug"));
    }

    #[test]
    fn log_file_writer_appends() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let make = LogFile(tmp.reopen().unwrap());
        make.make_writer().write_all(b"one\n").unwrap();
        make.make_writer().write_all(b"two\n").unwrap();
        assert_eq!(fs::read_to_string(tmp.path()).unwrap(), "one\ntwo\n");
    }
}
