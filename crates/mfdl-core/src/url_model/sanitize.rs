//! Filename sanitization.

/// Makes a candidate file name safe to create in the output directory.
///
/// - Replaces NUL, `/`, `\` and control characters with `_`
/// - Limits length to 255 bytes (Linux NAME_MAX)
///
/// Everything else is left untouched so the saved name matches the URL.
pub fn sanitize_file_name(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let out: String = name
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if out.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !out.is_char_boundary(take) {
            take -= 1;
        }
        out[..take].to_string()
    } else {
        out
    }
}
