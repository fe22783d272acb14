//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a landing page at `/file/xyz/doc.zip` whose download anchor points
//! at `/dl/doc.zip?key=abc123`, and the file itself at `/dl/doc.zip`. Every
//! other path is a 404.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

pub const LANDING_PATH: &str = "/file/xyz/doc.zip";
pub const FILE_PATH: &str = "/dl/doc.zip";

#[derive(Debug, Clone)]
pub struct PageServerOptions {
    /// Anchor `id` placed on the download link; `None` omits the anchor.
    pub anchor_id: Option<String>,
    /// Overrides the `Content-Length` sent with the file (a lying server).
    pub declared_length: Option<u64>,
    /// Send no `Content-Length` at all (connection close delimits the body).
    pub omit_length: bool,
}

impl Default for PageServerOptions {
    fn default() -> Self {
        Self {
            anchor_id: Some("downloadButton".to_string()),
            declared_length: None,
            omit_length: false,
        }
    }
}

pub struct PageServer {
    pub base_url: String,
    requests: Arc<AtomicUsize>,
}

impl PageServer {
    pub fn landing_url(&self) -> String {
        format!("{}{}", self.base_url, LANDING_PATH)
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

/// Starts the server in a background thread. It runs until the process exits.
pub fn start(body: Vec<u8>, opts: PageServerOptions) -> PageServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base_url = format!("http://127.0.0.1:{}", port);
    let body = Arc::new(body);
    let requests = Arc::new(AtomicUsize::new(0));
    {
        let base_url = base_url.clone();
        let requests = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                requests.fetch_add(1, Ordering::SeqCst);
                let body = Arc::clone(&body);
                let base_url = base_url.clone();
                let opts = opts.clone();
                thread::spawn(move || handle(stream, &body, &base_url, &opts));
            }
        });
    }
    PageServer { base_url, requests }
}

fn handle(mut stream: std::net::TcpStream, body: &[u8], base_url: &str, opts: &PageServerOptions) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("");
    let path = target.split('?').next().unwrap_or("");

    if path == LANDING_PATH {
        let anchor = match &opts.anchor_id {
            Some(id) => format!(
                r#"<a class="input popsok" id="{}" href="{}{}?key=abc123">Download</a>"#,
                id, base_url, FILE_PATH
            ),
            None => String::new(),
        };
        let page = format!(
            "<!DOCTYPE html><html><head><title>doc.zip</title></head><body>{}</body></html>",
            anchor
        );
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            page.len(),
            page
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }

    if path == FILE_PATH {
        let length_header = if opts.omit_length {
            String::new()
        } else {
            format!(
                "Content-Length: {}\r\n",
                opts.declared_length.unwrap_or(body.len() as u64)
            )
        };
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/zip\r\n{}Connection: close\r\n\r\n",
            length_header
        );
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.write_all(body);
        return;
    }

    let _ = stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
}
