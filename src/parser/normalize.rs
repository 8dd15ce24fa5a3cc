//! Markdown to plain text normalization.
//!
//! Normalization is an ordered list of independent [`Rule`]s. The order is
//! part of the contract: images are removed before links are collapsed (an
//! image is a link with a `!` prefix), and line-break tags are expanded
//! before blank-line runs are capped.
//!
//! 1. Turn `\r\n` and lone `\r` line endings into `\n`
//! 2. Remove images `![alt](url)`
//! 3. Strip leading heading markers (`#` to `######`)
//! 4. Collapse links `[text](url)` to `text`
//! 5. Replace `<br>`, `<br/>`, `<BR />` with a newline
//! 6. Cap runs of 3+ newlines at one blank line
//! 7. Trim the result
//!
//! A single pass is not always a fixed point (collapsing `[# x](u)` exposes
//! a heading marker, and each pass unwraps one level of `[[x](a)](b)`), so
//! the pipeline is repeated until the text stops changing. Every rule only
//! removes or shortens text, so the loop ends.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static LINE_ENDING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n?").unwrap());
static IMAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[.*?\]\(.*?\)").unwrap());
static HEADING_MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#{1,6}\s*").unwrap());
static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());
static LINE_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// A single pattern to replacement substitution.
pub struct Rule {
    /// Short rule name, used in logs and tests
    pub name: &'static str,
    pattern: &'static Lazy<Regex>,
    replacement: &'static str,
}

impl Rule {
    /// Apply this rule to `text`.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.pattern.replace_all(text, self.replacement)
    }
}

static RULES: [Rule; 6] = [
    Rule {
        name: "line_endings",
        pattern: &LINE_ENDING_RE,
        replacement: "\n",
    },
    Rule {
        name: "images",
        pattern: &IMAGE_RE,
        replacement: "",
    },
    Rule {
        name: "heading_markers",
        pattern: &HEADING_MARKER_RE,
        replacement: "",
    },
    Rule {
        name: "links",
        pattern: &LINK_RE,
        replacement: "$1",
    },
    Rule {
        name: "line_breaks",
        pattern: &LINE_BREAK_RE,
        replacement: "\n",
    },
    Rule {
        name: "blank_runs",
        pattern: &BLANK_RUN_RE,
        replacement: "\n\n",
    },
];

/// The substitution rules, in application order.
pub fn rules() -> &'static [Rule] {
    &RULES
}

/// Look up a rule by name.
pub fn rule(name: &str) -> Option<&'static Rule> {
    RULES.iter().find(|r| r.name == name)
}

/// Markdown normalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    unicode_nfc: bool,
}

impl Normalizer {
    /// Create a normalizer that applies the substitution rules only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also compose text to Unicode NFC on every pass.
    pub fn with_unicode_nfc(mut self, enabled: bool) -> Self {
        self.unicode_nfc = enabled;
        self
    }

    /// Normalize markdown to plain text.
    pub fn normalize(&self, markdown: &str) -> String {
        if markdown.is_empty() {
            return String::new();
        }

        let mut current = self.pass(markdown);
        loop {
            let next = self.pass(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    fn pass(&self, text: &str) -> String {
        let mut out: String = if self.unicode_nfc {
            text.nfc().collect()
        } else {
            text.to_string()
        };

        for rule in RULES.iter() {
            let replaced = match rule.apply(&out) {
                Cow::Borrowed(_) => None,
                Cow::Owned(text) => Some(text),
            };
            if let Some(text) = replaced {
                out = text;
            }
        }

        out.trim().to_string()
    }
}

/// Normalize markdown to plain text with the default rules.
pub fn normalize(markdown: &str) -> String {
    Normalizer::new().normalize(markdown)
}

/// Split normalized text into paragraphs on blank lines.
///
/// Paragraphs are trimmed; empty ones are dropped.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
