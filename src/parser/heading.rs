//! Page title detection.

use once_cell::sync::Lazy;
use regex::Regex;

/// ATX heading: up to three leading spaces, 1-6 `#`, whitespace, text.
static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s{0,3}(#{1,6})\s+(.*\S)").unwrap());

/// A markdown heading line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Number of `#` markers (1-6)
    pub level: u8,
    /// Heading text, trimmed
    pub text: String,
}

/// Parse a single line as a heading.
pub fn parse_heading(line: &str) -> Option<Heading> {
    let caps = HEADING_RE.captures(line)?;
    Some(Heading {
        level: caps[1].len() as u8,
        text: caps[2].trim().to_string(),
    })
}

/// Return the text of the first heading line in `markdown`, if any.
///
/// Only the first match counts; later headings stay in the body.
pub fn extract_title(markdown: &str) -> Option<String> {
    markdown
        .lines()
        .find_map(parse_heading)
        .map(|heading| heading.text)
}

/// Remove the first heading line from `text`.
///
/// Every other line is kept verbatim. Returns `None` if `text` has no
/// heading line.
pub fn strip_title_line(text: &str) -> Option<String> {
    let mut offset = 0;
    for raw in text.split_inclusive('\n') {
        if parse_heading(raw.trim_end_matches(['\n', '\r'])).is_some() {
            let mut out = String::with_capacity(text.len() - raw.len());
            out.push_str(&text[..offset]);
            out.push_str(&text[offset + raw.len()..]);
            return Some(out);
        }
        offset += raw.len();
    }
    None
}
