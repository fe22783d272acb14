//! Parse HTTP response header lines into a ResponseHead.

use super::ResponseHead;

/// Parse collected header lines of the final response into a ResponseHead.
///
/// Lines are expected to start at the status line of the last response in a
/// redirect chain; the caller resets its buffer on every `HTTP/` line.
pub(crate) fn parse_head(lines: &[String]) -> ResponseHead {
    let mut status = 0;
    let mut content_length = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            status = line
                .split_whitespace()
                .nth(1)
                .and_then(|code| code.parse::<u32>().ok())
                .unwrap_or(0);
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.trim().parse::<u64>() {
                    content_length = Some(n);
                }
            }
        }
    }

    ResponseHead {
        status,
        content_length,
    }
}
