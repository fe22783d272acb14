//! Network check before a download: fetch a test file, measure latency to
//! the first response and download throughput, and render them as a table.
//!
//! Not coupled to the resolver or downloader; the CLI only uses the outcome
//! to decide whether to continue.

use std::io;
use std::time::{Duration, Instant};

use crate::error::FetchError;
use crate::transport::{BodySink, ResponseHead, Transport};

/// Default test payload (10 MB, served without caching).
pub const DEFAULT_SPEED_TEST_URL: &str = "https://speed.cloudflare.com/__down?bytes=10000000";

#[derive(Debug, Clone)]
pub struct SpeedTestResult {
    pub url: String,
    /// Time from request start until the response headers arrived.
    pub latency: Duration,
    pub bytes_downloaded: u64,
    pub elapsed_secs: f64,
    pub throughput_mib_s: f64,
}

impl SpeedTestResult {
    /// Something came back over the network.
    pub fn reachable(&self) -> bool {
        self.bytes_downloaded > 0
    }
}

/// Counts body bytes without keeping them.
struct CountingSink {
    start: Instant,
    latency: Option<Duration>,
    bytes: u64,
}

impl BodySink for CountingSink {
    fn on_head(&mut self, _head: &ResponseHead) -> io::Result<()> {
        self.latency = Some(self.start.elapsed());
        Ok(())
    }

    fn on_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.bytes += chunk.len() as u64;
        Ok(())
    }
}

/// Downloads `url` once and measures it. Runs on the current thread.
pub fn run_speed_test(transport: &dyn Transport, url: &str) -> Result<SpeedTestResult, FetchError> {
    let mut sink = CountingSink {
        start: Instant::now(),
        latency: None,
        bytes: 0,
    };
    transport.get_streaming(url, &mut sink)?;
    let elapsed = sink.start.elapsed().as_secs_f64();

    let throughput_mib_s = if elapsed > 0.0 && sink.bytes > 0 {
        (sink.bytes as f64 / 1_048_576.0) / elapsed
    } else {
        0.0
    };
    tracing::info!(
        url,
        bytes = sink.bytes,
        elapsed_secs = elapsed,
        throughput_mib_s,
        "speed test finished"
    );

    Ok(SpeedTestResult {
        url: url.to_string(),
        latency: sink.latency.unwrap_or_default(),
        bytes_downloaded: sink.bytes,
        elapsed_secs: elapsed,
        throughput_mib_s,
    })
}

/// Renders the result as a two-column table.
pub fn format_table(result: &SpeedTestResult) -> String {
    let rows = [
        ("Latency", format!("{} ms", result.latency.as_millis())),
        ("Downloaded", format!("{} bytes", result.bytes_downloaded)),
        ("Time", format!("{:.2} s", result.elapsed_secs)),
        (
            "Download speed",
            format!(
                "{:.2} MiB/s ({:.2} Mbit/s)",
                result.throughput_mib_s,
                result.throughput_mib_s * 8.388_608
            ),
        ),
    ];
    let mut out = String::new();
    out.push_str(&format!("  {:<16}  {}\n", "Metric", "Value"));
    out.push_str(&format!("  {:<16}  {}\n", "----------------", "--------------------"));
    for (name, value) in rows {
        out.push_str(&format!("  {:<16}  {}\n", name, value));
    }
    out
}
