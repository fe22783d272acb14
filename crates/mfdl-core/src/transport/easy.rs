//! libcurl-backed transport.
//!
//! One easy handle per request, run on the current thread. Redirects are
//! followed; no connect or total timeout is set beyond libcurl's defaults.

use std::cell::RefCell;
use std::io;
use std::str;

use curl::easy::Easy;

use super::{parse, BodySink, ResponseHead, Transport, CHUNK_SIZE};
use crate::error::FetchError;

/// Blocking HTTP transport sending a fixed `User-Agent` on every request.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    user_agent: String,
}

impl CurlTransport {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }

    fn easy(&self, url: &str) -> Result<Easy, FetchError> {
        let mut easy = Easy::new();
        easy.url(url).map_err(FetchError::transport(url))?;
        easy.useragent(&self.user_agent)
            .map_err(FetchError::transport(url))?;
        easy.follow_location(true)
            .map_err(FetchError::transport(url))?;
        easy.buffer_size(CHUNK_SIZE)
            .map_err(FetchError::transport(url))?;
        Ok(easy)
    }
}

fn is_success(status: u32) -> bool {
    (200..300).contains(&status)
}

/// Records header lines of the last response only (redirects and `100
/// Continue` each start a new status line).
fn record_header_line(lines: &RefCell<Vec<String>>, data: &[u8]) {
    if let Ok(s) = str::from_utf8(data) {
        let line = s.trim_end();
        let mut lines = lines.borrow_mut();
        if line.starts_with("HTTP/") {
            lines.clear();
        }
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }
}

impl Transport for CurlTransport {
    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        tracing::debug!(url, "GET page");
        let mut easy = self.easy(url)?;
        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(FetchError::transport(url))?;
            transfer.perform().map_err(FetchError::transport(url))?;
        }

        let status = easy.response_code().map_err(FetchError::transport(url))?;
        if !is_success(status) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        tracing::debug!(url, status, bytes = body.len(), "page fetched");
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    fn get_streaming(
        &self,
        url: &str,
        sink: &mut dyn BodySink,
    ) -> Result<ResponseHead, FetchError> {
        tracing::debug!(url, "GET stream");
        let mut easy = self.easy(url)?;

        let header_lines = RefCell::new(Vec::<String>::new());
        let mut head: Option<ResponseHead> = None;
        let mut rejected_status: Option<u32> = None;
        let mut sink_error: Option<io::Error> = None;

        let performed = {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|data| {
                    record_header_line(&header_lines, data);
                    true
                })
                .map_err(FetchError::transport(url))?;
            transfer
                .write_function(|data| {
                    if head.is_none() {
                        let parsed = parse::parse_head(&header_lines.borrow());
                        if !is_success(parsed.status) {
                            rejected_status = Some(parsed.status);
                            return Ok(0); // abort transfer
                        }
                        if let Err(e) = sink.on_head(&parsed) {
                            sink_error = Some(e);
                            return Ok(0);
                        }
                        head = Some(parsed);
                    }
                    match sink.on_chunk(data) {
                        Ok(()) => Ok(data.len()),
                        Err(e) => {
                            tracing::warn!("stream write failed: {}", e);
                            sink_error = Some(e);
                            Ok(0)
                        }
                    }
                })
                .map_err(FetchError::transport(url))?;
            transfer.perform()
        };

        if let Some(e) = sink_error {
            return Err(FetchError::Io(e));
        }
        if let Some(status) = rejected_status {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        match performed {
            // Body shorter than Content-Length (possibly empty): hand back
            // what arrived and let the caller compare sizes.
            Err(e) if e.is_partial_file() => {
                tracing::warn!(url, "connection closed before declared length: {}", e);
            }
            other => other.map_err(FetchError::transport(url))?,
        }

        let status = easy.response_code().map_err(FetchError::transport(url))?;
        if !is_success(status) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        match head {
            Some(head) => Ok(head),
            None => {
                // No body bytes arrived: the sink still gets its head.
                let mut parsed = parse::parse_head(&header_lines.borrow());
                parsed.status = status;
                sink.on_head(&parsed)?;
                Ok(parsed)
            }
        }
    }
}
