//! Plain-text extraction from HTML pages

use crate::error::{Result, StockError};
use regex::Regex;

/// Compiled patterns for turning markup into readable text
#[derive(Debug, Clone)]
pub struct HtmlText {
    hidden: Regex,
    tag: Regex,
    space: Regex,
}

impl HtmlText {
    pub fn new() -> Result<Self> {
        Ok(Self {
            hidden: compile(r"(?is)<(script|style|noscript|svg|nav|footer|header|form)\b.*?</\s*(script|style|noscript|svg|nav|footer|header|form)\s*>|<!--.*?-->")?,
            tag: compile(r"(?s)<[^>]+>")?,
            space: compile(r"\s+")?,
        })
    }

    /// Visible text of `html` with whitespace collapsed
    pub fn to_text(&self, html: &str) -> String {
        let visible = self.hidden.replace_all(html, " ");
        let stripped = self.tag.replace_all(&visible, " ");
        let decoded = decode_entities(&stripped);
        self.space.replace_all(&decoded, " ").trim().to_string()
    }
}

pub(crate) fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| StockError::ConfigError(format!("bad pattern: {e}")))
}

/// Decode the handful of entities that show up in headlines and snippets
pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Cut `text` to at most `max_chars` characters on a char boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => (&text[..idx], true),
        None => (text, false),
    }
}
