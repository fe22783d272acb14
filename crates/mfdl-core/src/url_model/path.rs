//! Filename extraction from URL path.

/// Returns the text after the last `/` of the URL path, as written.
///
/// Everything from the first `?` on is dropped. A `scheme://authority`
/// prefix is skipped so a bare host never becomes a name. The segment is
/// not percent-decoded or re-encoded, and `#` is kept.
pub fn filename_from_url_path(url: &str) -> Option<&str> {
    let without_query = url.split('?').next().unwrap_or("");
    let path = match without_query.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("", |i| &rest[i..]),
        None => without_query,
    };
    let segment = path.rsplit('/').next().unwrap_or("");
    if segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.eq_ignore_ascii_case("%2e%2e")
    {
        return None;
    }
    Some(segment)
}
