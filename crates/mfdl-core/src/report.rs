//! User-facing status and progress output.
//!
//! Components receive a `&mut dyn Reporter` instead of printing, so they can
//! be tested without capturing the console. Rendering is best effort: a
//! failed or skipped redraw never affects the transfer.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::progress::{human_bytes, TransferProgress};

pub trait Reporter {
    /// One human-readable status line.
    fn status(&mut self, message: &str);

    fn transfer_started(&mut self, file_name: &str, progress: &TransferProgress);

    /// Called after every chunk; implementations throttle as they see fit.
    fn transfer_progress(&mut self, progress: &TransferProgress);

    fn transfer_finished(&mut self, progress: &TransferProgress);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn status(&mut self, _message: &str) {}
    fn transfer_started(&mut self, _file_name: &str, _progress: &TransferProgress) {}
    fn transfer_progress(&mut self, _progress: &TransferProgress) {}
    fn transfer_finished(&mut self, _progress: &TransferProgress) {}
}

/// Prints status lines and a single, redrawn progress line.
pub struct ConsoleReporter<W: Write = io::Stdout> {
    out: W,
    interval: Duration,
    last_draw: Option<Instant>,
    file_name: String,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout(interval: Duration) -> Self {
        Self::new(io::stdout(), interval)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, interval: Duration) -> Self {
        Self {
            out,
            interval,
            last_draw: None,
            file_name: String::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, progress: &TransferProgress) {
        let line = render_progress_line(&self.file_name, progress);
        let _ = write!(self.out, "\r{}  ", line);
        let _ = self.out.flush();
        self.last_draw = Some(Instant::now());
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn status(&mut self, message: &str) {
        let _ = writeln!(self.out, "{}", message);
    }

    fn transfer_started(&mut self, file_name: &str, progress: &TransferProgress) {
        self.file_name = file_name.to_string();
        self.last_draw = None;
        self.draw(progress);
    }

    fn transfer_progress(&mut self, progress: &TransferProgress) {
        let due = self
            .last_draw
            .map_or(true, |t| t.elapsed() >= self.interval);
        if due {
            self.draw(progress);
        }
    }

    fn transfer_finished(&mut self, progress: &TransferProgress) {
        self.draw(progress);
        let _ = writeln!(self.out);
    }
}

/// One progress line: percentage, rate and ETA with a known total, otherwise
/// a plain byte counter and rate.
pub fn render_progress_line(file_name: &str, progress: &TransferProgress) -> String {
    let done = human_bytes(progress.transferred_bytes);
    let rate = match progress.bytes_per_sec() {
        Some(r) => format!("{}/s", human_bytes(r as u64)),
        None => "?/s".to_string(),
    };
    match (progress.total_bytes, progress.fraction()) {
        (Some(total), Some(fraction)) => {
            let eta = progress
                .eta_secs()
                .map(|s| format!("{:.0}s", s))
                .unwrap_or_else(|| "?".to_string());
            format!(
                "{}: {:5.1}% {} / {}  {}  ETA {}",
                file_name,
                fraction * 100.0,
                done,
                human_bytes(total),
                rate,
                eta
            )
        }
        _ => format!("{}: {}  {}", file_name, done, rate),
    }
}
