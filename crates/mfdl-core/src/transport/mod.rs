//! HTTP access used by the resolver, downloader and speed test.
//!
//! Everything above this module talks to the `Transport` trait so it can be
//! driven by an in-memory transport in tests. `CurlTransport` is the real
//! implementation (libcurl easy handle, blocking, current thread).

mod easy;
#[cfg(test)]
pub(crate) mod mock;
mod parse;

use std::io;

use crate::error::FetchError;

pub use easy::CurlTransport;

/// Size of each piece handed to a `BodySink` (and of libcurl's receive buffer).
pub const CHUNK_SIZE: usize = 8192;

/// Status and declared size of the final response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResponseHead {
    pub status: u32,
    /// Value of `Content-Length`, if the server sent one.
    pub content_length: Option<u64>,
}

/// Receives a streamed response body.
///
/// `on_head` is called exactly once, before the first chunk (or after the
/// transfer when the body is empty). An error from either method aborts the
/// transfer and is returned as `FetchError::Io`.
pub trait BodySink {
    fn on_head(&mut self, head: &ResponseHead) -> io::Result<()>;
    fn on_chunk(&mut self, chunk: &[u8]) -> io::Result<()>;
}

pub trait Transport {
    /// GET `url` and return the body as text (lossy UTF-8).
    fn get_text(&self, url: &str) -> Result<String, FetchError>;

    /// GET `url`, streaming the body into `sink`. Non-success statuses fail
    /// before `sink` sees anything.
    fn get_streaming(&self, url: &str, sink: &mut dyn BodySink)
        -> Result<ResponseHead, FetchError>;
}
