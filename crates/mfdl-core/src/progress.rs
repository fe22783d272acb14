//! Transfer progress for one download (bytes done, rate, ETA).
//!
//! Advisory only: the downloader's own written-byte count decides the
//! outcome, this is what the reporter renders.

use std::time::{Duration, Instant};

/// Below this much elapsed time the byte rate is noise and is not reported.
const MIN_RATE_WINDOW_SECS: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct TransferProgress {
    /// Declared total (`Content-Length`); `None` when absent or zero.
    pub total_bytes: Option<u64>,
    /// Bytes transferred so far. Only ever increases.
    pub transferred_bytes: u64,
    started: Instant,
}

impl TransferProgress {
    pub fn new(total_bytes: Option<u64>) -> Self {
        Self {
            total_bytes: total_bytes.filter(|&n| n > 0),
            transferred_bytes: 0,
            started: Instant::now(),
        }
    }

    pub fn advance(&mut self, bytes: u64) {
        self.transferred_bytes = self.transferred_bytes.saturating_add(bytes);
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Transfer rate in bytes per second; `None` until enough time has passed
    /// for the figure to mean anything.
    pub fn bytes_per_sec(&self) -> Option<f64> {
        rate(self.transferred_bytes, self.elapsed().as_secs_f64())
    }

    /// Estimated seconds remaining; `None` without a total or before any rate is known.
    pub fn eta_secs(&self) -> Option<f64> {
        eta(
            self.total_bytes?,
            self.transferred_bytes,
            self.bytes_per_sec(),
        )
    }

    /// Fraction complete in [0.0, 1.0]; `None` without a declared total.
    pub fn fraction(&self) -> Option<f64> {
        let total = self.total_bytes?;
        Some((self.transferred_bytes as f64 / total as f64).min(1.0))
    }
}

fn rate(bytes: u64, elapsed_secs: f64) -> Option<f64> {
    if elapsed_secs < MIN_RATE_WINDOW_SECS {
        return None;
    }
    Some(bytes as f64 / elapsed_secs)
}

fn eta(total: u64, done: u64, rate: Option<f64>) -> Option<f64> {
    let remaining = total.saturating_sub(done);
    if remaining == 0 {
        return Some(0.0);
    }
    match rate {
        Some(r) if r > 0.0 => Some(remaining as f64 / r),
        _ => None,
    }
}

/// Formats a byte count with binary units, e.g. `1.5 MiB`.
pub fn human_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
