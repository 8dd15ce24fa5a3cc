//! Input format detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Kind of input a conversion starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A JSON OCR response (`{"pages": [{"markdown": ...}]}`)
    OcrJson,
    /// Raw markdown for a single page
    Markdown,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::OcrJson => write!(f, "OCR JSON"),
            InputKind::Markdown => write!(f, "Markdown"),
        }
    }
}

/// UTF-8 byte order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// How much of a file is read when sniffing from a path.
const SNIFF_LEN: u64 = 64 * 1024;

/// Detect input kind from a file path.
///
/// Only the head of the file is inspected.
///
/// # Example
/// ```no_run
/// use ocrdocx::detect::detect_input_from_path;
///
/// let kind = detect_input_from_path("scan.json").unwrap();
/// println!("input: {}", kind);
/// ```
pub fn detect_input_from_path<P: AsRef<Path>>(path: P) -> Result<InputKind> {
    let file = File::open(path)?;
    let mut head = Vec::new();
    BufReader::new(file).take(SNIFF_LEN).read_to_end(&mut head)?;
    detect_head(&head, true)
}

/// Detect input kind from bytes.
///
/// # Returns
/// * `Ok(InputKind::OcrJson)` if the first non-whitespace byte is `{`
/// * `Ok(InputKind::Markdown)` if the data is valid UTF-8 text
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_input_from_bytes(data: &[u8]) -> Result<InputKind> {
    detect_head(data, false)
}

/// `truncated` allows a multi-byte character cut off at the end of `data`.
fn detect_head(data: &[u8], truncated: bool) -> Result<InputKind> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    match data.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{') => return Ok(InputKind::OcrJson),
        Some(_) => {}
        None if data.is_empty() => return Err(Error::UnknownFormat),
        None => {}
    }

    match std::str::from_utf8(data) {
        Ok(_) => Ok(InputKind::Markdown),
        // error_len() is None when the input merely ends mid-character
        Err(e) if truncated && e.error_len().is_none() => Ok(InputKind::Markdown),
        Err(_) => Err(Error::UnknownFormat),
    }
}

/// Check if bytes look like an OCR JSON response.
pub fn is_ocr_json(data: &[u8]) -> bool {
    matches!(detect_input_from_bytes(data), Ok(InputKind::OcrJson))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_json() {
        let data = br##"  {"pages": [{"markdown": "# x"}]}"##;
        assert_eq!(detect_input_from_bytes(data).unwrap(), InputKind::OcrJson);
        let doc = crate::from_ocr_json(data).unwrap();
        assert_eq!(doc.metadata.title.as_deref(), Some("x"));
    }

    #[test]
    fn test_detect_json_with_bom() {
        let data = b"\xEF\xBB\xBF\n{\"pages\": []}";
        assert_eq!(detect_input_from_bytes(data).unwrap(), InputKind::OcrJson);
    }

    #[test]
    fn test_detect_markdown() {
        let data = "# Rechnung\n\n| Artikel | Menge |".as_bytes();
        assert_eq!(detect_input_from_bytes(data).unwrap(), InputKind::Markdown);
    }

    #[test]
    fn test_whitespace_only_is_markdown() {
        assert_eq!(
            detect_input_from_bytes(b"  \n\n").unwrap(),
            InputKind::Markdown
        );
    }

    #[test]
    fn test_detect_invalid_format() {
        let data = [0x89, 0x50, 0x4E, 0x47, 0xFF, 0xFE];
        assert!(matches!(
            detect_input_from_bytes(&data),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(
            detect_input_from_bytes(b""),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_truncated_head() {
        // "é" cut after its first byte
        let data = b"caf\xC3";
        assert!(detect_input_from_bytes(data).is_err());
        assert_eq!(detect_head(data, true).unwrap(), InputKind::Markdown);
    }

    #[test]
    fn test_is_ocr_json() {
        assert!(is_ocr_json(b"{}"));
        assert!(!is_ocr_json(b"plain text"));
    }
}
