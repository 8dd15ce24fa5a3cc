//! Error types for the ocrdocx library.
//!
//! The parsing core never fails: odd markdown is normalized, not rejected.
//! Everything here comes from the boundary (decoding input, rendering,
//! storing the finished artifact).

use std::io;
use thiserror::Error;

/// Result type alias for ocrdocx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting OCR output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The OCR response could not be decoded.
    #[error("Malformed OCR response: {0}")]
    OcrResponse(#[from] serde_json::Error),

    /// The input is neither an OCR JSON response nor UTF-8 markdown.
    #[error("Unknown input format: expected OCR JSON or UTF-8 markdown")]
    UnknownFormat,

    /// Error during rendering (DOCX, Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Error while packing the DOCX container.
    #[error("Archive error: {0}")]
    Archive(String),

    /// The artifact store refused or failed to store an artifact.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// No converter is registered for the requested output.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}
