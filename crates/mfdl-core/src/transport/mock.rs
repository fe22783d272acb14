//! In-memory transport for unit tests. Counts every request it receives.

use std::cell::RefCell;
use std::collections::HashMap;

use super::{BodySink, ResponseHead, Transport, CHUNK_SIZE};
use crate::error::FetchError;

#[derive(Debug, Clone)]
pub(crate) struct MockFile {
    pub body: Vec<u8>,
    pub content_length: Option<u64>,
}

#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    pages: HashMap<String, String>,
    files: HashMap<String, MockFile>,
    statuses: HashMap<String, u32>,
    requests: RefCell<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn with_file(mut self, url: &str, body: Vec<u8>, content_length: Option<u64>) -> Self {
        self.files.insert(
            url.to_string(),
            MockFile {
                body,
                content_length,
            },
        );
        self
    }

    pub fn with_status(mut self, url: &str, status: u32) -> Self {
        self.statuses.insert(url.to_string(), status);
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    fn record(&self, url: &str) -> Result<(), FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        if let Some(&status) = self.statuses.get(url) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(())
    }

    fn not_found(url: &str) -> FetchError {
        FetchError::Status {
            url: url.to_string(),
            status: 404,
        }
    }
}

impl Transport for MockTransport {
    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        self.record(url)?;
        self.pages.get(url).cloned().ok_or_else(|| Self::not_found(url))
    }

    fn get_streaming(
        &self,
        url: &str,
        sink: &mut dyn BodySink,
    ) -> Result<ResponseHead, FetchError> {
        self.record(url)?;
        let file = self.files.get(url).ok_or_else(|| Self::not_found(url))?;
        let head = ResponseHead {
            status: 200,
            content_length: file.content_length,
        };
        sink.on_head(&head)?;
        // Deliver in uneven pieces, some larger than CHUNK_SIZE.
        for piece in file.body.chunks(CHUNK_SIZE * 2 + 17) {
            sink.on_chunk(piece)?;
        }
        Ok(head)
    }
}
