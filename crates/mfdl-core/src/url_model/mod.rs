//! Local file name derivation for a direct download URL.

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_file_name;

/// Used when the URL has no usable final path segment.
pub const DEFAULT_FILENAME: &str = "download.bin";

/// Derives the output file name from the direct URL.
///
/// The text after the last `/` is kept exactly as it appears in the URL,
/// minus any query string: no percent-decoding, no re-encoding. Characters
/// that cannot appear in a file name are replaced.
///
/// # Examples
///
/// - `derive_filename("https://d.mediafire.com/files/4abc/report_final.pdf?key=abc123")` → `"report_final.pdf"`
/// - `derive_filename("https://example.com/")` → `"download.bin"`
pub fn derive_filename(url: &str) -> String {
    let raw = match filename_from_url_path(url) {
        Some(segment) => segment,
        None => return DEFAULT_FILENAME.to_string(),
    };

    let sanitized = sanitize_file_name(raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_query_string() {
        assert_eq!(
            derive_filename("https://download1.mediafire.com/files/4abc/report_final.pdf?key=abc123"),
            "report_final.pdf"
        );
    }

    #[test]
    fn plain_segment() {
        assert_eq!(
            derive_filename("https://download123.mediafire.com/doc.zip"),
            "doc.zip"
        );
    }

    #[test]
    fn keeps_percent_encoding_and_underscores() {
        assert_eq!(
            derive_filename("https://d.example.com/x/My%20File__v2.tar.gz"),
            "My%20File__v2.tar.gz"
        );
    }

    #[test]
    fn spaces_and_non_ascii_survive() {
        assert_eq!(
            derive_filename("https://d.example.com/x/My File.zip?k=1"),
            "My File.zip"
        );
        assert_eq!(derive_filename("https://d.example.com/файл.zip"), "файл.zip");
        assert_eq!(derive_filename("https://d.example.com/a#b.zip"), "a#b.zip");
    }

    #[test]
    fn empty_path_fallback() {
        assert_eq!(derive_filename("https://example.com/"), DEFAULT_FILENAME);
        assert_eq!(derive_filename("https://example.com"), DEFAULT_FILENAME);
        assert_eq!(derive_filename("https://example.com/?a=b"), DEFAULT_FILENAME);
    }

    #[test]
    fn reserved_names_fallback() {
        assert_eq!(derive_filename("https://example.com/%2e%2e"), DEFAULT_FILENAME);
        assert_eq!(derive_filename("not a url/.."), DEFAULT_FILENAME);
    }
}
