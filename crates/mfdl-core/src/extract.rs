//! Pull the direct download link out of landing-page HTML.
//!
//! The hosting site's markup is not under our control, so the lookup sits
//! behind `LinkExtractor`; the resolver and downloader never see HTML.

use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use regex::Regex;

/// Finds one hyperlink in a page.
pub trait LinkExtractor {
    /// Returns the link target, or `None` if the page has no matching element.
    fn extract(&self, html: &str) -> Option<String>;

    /// Short human-readable description of what is looked for (for errors).
    fn selector(&self) -> String;
}

/// `<!-- ... -->` spans; markup inside them is not part of the page.
static COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern"));

/// Opening `<a ...>` tags; quoted attribute values may contain `>`.
static ANCHOR_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a\b((?:[^>"']|"[^"]*"|'[^']*')*)>"#).expect("anchor tag pattern")
});

/// `name=value` pairs with double-quoted, single-quoted or bare values.
static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
        .expect("attribute pattern")
});

/// Matches the first `<a>` whose `id` attribute equals `id` and returns its `href`.
#[derive(Debug, Clone)]
pub struct AnchorById {
    id: String,
}

impl AnchorById {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl LinkExtractor for AnchorById {
    fn extract(&self, html: &str) -> Option<String> {
        let html = COMMENT.replace_all(html, "");
        ANCHOR_TAG
            .captures_iter(&html)
            .filter_map(|tag| tag.get(1))
            .map(|attrs| attributes(attrs.as_str()))
            .find(|attrs| attr(attrs, "id") == Some(self.id.as_str()))
            .and_then(|attrs| attr(&attrs, "href").map(str::to_string))
    }

    fn selector(&self) -> String {
        format!("a#{}", self.id)
    }
}

fn attributes(raw: &str) -> Vec<(String, String)> {
    ATTRIBUTE
        .captures_iter(raw)
        .filter_map(|cap| {
            let name = cap.get(1)?.as_str().to_ascii_lowercase();
            let value = cap
                .get(2)
                .or_else(|| cap.get(3))
                .or_else(|| cap.get(4))
                .map_or("", |m| m.as_str());
            Some((name, decode_html_entities(value).into_owned()))
        })
        .collect()
}

fn attr<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}
