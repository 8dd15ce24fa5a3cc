//! # ocrdocx
//!
//! Turn per-page OCR markdown into structured documents and Word files.
//!
//! An OCR service returns one markdown string per scanned page. This crate
//! pulls pipe tables out of each page, normalizes the remaining markdown
//! into plain paragraphs, takes the first heading as the page title, and
//! renders the assembled [`Document`] as DOCX, Markdown, plain text or JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ocrdocx::{from_ocr_json, render};
//!
//! fn main() -> ocrdocx::Result<()> {
//!     let data = std::fs::read("scan.json")?;
//!     let doc = from_ocr_json(&data)?;
//!
//!     let bytes = render::to_docx(&doc, &render::RenderOptions::default())?;
//!     std::fs::write("scan.docx", bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Table extraction**: pipe tables become padded row/column grids
//! - **Markdown cleanup**: images, links, heading markers and `<br>` tags removed
//! - **Multiple output formats**: DOCX, Markdown, plain text, JSON
//! - **Parallel processing**: Uses Rayon for multi-page documents
//! - **Pluggable storage**: local directory or in-memory artifact stores

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod ocr;
pub mod parser;
pub mod render;
pub mod storage;

// Re-export commonly used types
pub use convert::{
    ConversionService, ConvertOptions, ConvertResult, ConverterRegistry, OutputConverter,
    OutputFormat,
};
pub use detect::{detect_input_from_bytes, detect_input_from_path, is_ocr_json, InputKind};
pub use error::{Error, Result};
pub use model::{Block, Document, Metadata, Page, Table, TableRow};
pub use ocr::{MarkdownFiles, OcrPage, OcrResponse, PageSource};
pub use parser::{BlockOrder, DocumentAssembler, ParseOptions};
pub use render::{JsonFormat, PageSelection, RenderOptions};
pub use storage::{ArtifactStore, LocalDirStore, MemoryStore};

use std::path::Path;

/// Assemble a document from per-page markdown.
///
/// # Example
///
/// ```
/// let doc = ocrdocx::assemble_pages(&["# Report\nAll good."]);
/// assert_eq!(doc.metadata.title.as_deref(), Some("Report"));
/// ```
pub fn assemble_pages<S: AsRef<str> + Sync>(pages: &[S]) -> Document {
    parser::assemble(pages)
}

/// Assemble a document from an OCR JSON response.
pub fn from_ocr_json(data: &[u8]) -> Result<Document> {
    from_ocr_json_with_options(data, ParseOptions::default())
}

/// Assemble a document from an OCR JSON response with custom options.
pub fn from_ocr_json_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    let response = OcrResponse::from_json(data)?;
    let pages = response.markdown_pages();
    let mut doc = DocumentAssembler::with_options(options).assemble(pages.as_slice());
    doc.metadata.source = Some(response.describe());
    Ok(doc)
}

/// Load a document from a file, sniffing whether it is OCR JSON or markdown.
///
/// A markdown file is treated as a single page.
///
/// # Example
///
/// ```no_run
/// let doc = ocrdocx::load_document("scan.json").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    load_document_with_options(path, ParseOptions::default())
}

/// Load a document from a file with custom options.
pub fn load_document_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<Document> {
    let path = path.as_ref();
    let source: Box<dyn PageSource> = match detect_input_from_path(path)? {
        InputKind::OcrJson => Box::new(ocr::read_response(path)?),
        InputKind::Markdown => Box::new(MarkdownFiles::new([path])),
    };
    let pages = source.pages()?;
    let mut doc = DocumentAssembler::with_options(options).assemble(pages.as_slice());
    doc.metadata.source = Some(source.describe());
    Ok(doc)
}

/// Convert an OCR JSON response straight to DOCX bytes.
pub fn docx_from_ocr_json(data: &[u8]) -> Result<Vec<u8>> {
    let doc = from_ocr_json(data)?;
    render::to_docx(&doc, &RenderOptions::default())
}

/// Convert a file (OCR JSON or markdown) to DOCX bytes.
pub fn to_docx<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<Vec<u8>> {
    let doc = load_document(path)?;
    render::to_docx(&doc, options)
}

/// Convert a file (OCR JSON or markdown) to Markdown.
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = load_document(path)?;
    render::to_markdown(&doc, &RenderOptions::default())
}

/// Convert a file (OCR JSON or markdown) to plain text.
pub fn to_text<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = load_document(path)?;
    render::to_text(&doc, options)
}

/// Convert a file (OCR JSON or markdown) to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = load_document(path)?;
    render::to_json(&doc, format)
}

/// Builder for assembling and rendering OCR output.
///
/// # Example
///
/// ```no_run
/// use ocrdocx::OcrDocx;
///
/// let bytes = OcrDocx::new()
///     .with_font_size(11.0)
///     .source_order()
///     .load("scan.json")?
///     .to_docx()?;
/// # Ok::<(), ocrdocx::Error>(())
/// ```
pub struct OcrDocx {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl OcrDocx {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parse_options = self.parse_options.sequential();
        self
    }

    /// Keep paragraphs and tables in the order they appear on the page.
    pub fn source_order(mut self) -> Self {
        self.parse_options = self.parse_options.source_order();
        self
    }

    /// Apply Unicode NFC normalization to paragraph text.
    pub fn with_unicode_nfc(mut self) -> Self {
        self.parse_options = self.parse_options.with_unicode_nfc(true);
        self
    }

    /// Set the body font size in points.
    pub fn with_font_size(mut self, points: f32) -> Self {
        self.render_options = self.render_options.with_font_size(points);
        self
    }

    /// Enable frontmatter in Markdown output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Disable page breaks between pages.
    pub fn without_page_breaks(mut self) -> Self {
        self.render_options = self.render_options.with_page_breaks(false);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.render_options = self.render_options.with_pages(pages);
        self
    }

    /// Assemble per-page markdown.
    pub fn assemble<S: AsRef<str> + Sync>(self, pages: &[S]) -> OcrDocxResult {
        let document = DocumentAssembler::with_options(self.parse_options).assemble(pages);
        OcrDocxResult {
            document,
            render_options: self.render_options,
        }
    }

    /// Assemble an OCR JSON response.
    pub fn parse_json(self, data: &[u8]) -> Result<OcrDocxResult> {
        let document = from_ocr_json_with_options(data, self.parse_options)?;
        Ok(OcrDocxResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Load a file (OCR JSON or markdown).
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<OcrDocxResult> {
        let document = load_document_with_options(path, self.parse_options)?;
        Ok(OcrDocxResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for OcrDocx {
    fn default() -> Self {
        Self::new()
    }
}

/// An assembled document plus the options to render it with.
pub struct OcrDocxResult {
    /// The assembled document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl OcrDocxResult {
    /// Convert to DOCX bytes.
    pub fn to_docx(&self) -> Result<Vec<u8>> {
        self.validate()?;
        render::to_docx(&self.document, &self.render_options)
    }

    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        self.validate()?;
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        self.validate()?;
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    fn validate(&self) -> Result<()> {
        self.render_options
            .page_selection
            .validate(self.document.page_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r##"{
        "model": "ocr-test",
        "pages": [
            {"index": 0, "markdown": "# Quarterly Report\n\nRevenue grew.\n\n| Q | Total |\n|---|---|\n| 1 | 10 |"},
            {"index": 1, "markdown": null},
            {"index": 2, "markdown": "Closing remarks."}
        ]
    }"##;

    #[test]
    fn test_ocrdocx_builder() {
        let builder = OcrDocx::new()
            .sequential()
            .source_order()
            .with_font_size(12.0)
            .with_frontmatter();

        assert!(!builder.parse_options.parallel);
        assert_eq!(builder.parse_options.block_order, BlockOrder::SourceOrder);
        assert_eq!(builder.render_options.font_size_half_points(), 24);
        assert!(builder.render_options.include_frontmatter);
    }

    #[test]
    fn test_ocrdocx_builder_default() {
        let builder = OcrDocx::default();
        assert!(builder.parse_options.parallel);
        assert!(builder.render_options.page_breaks);
    }

    #[test]
    fn test_from_ocr_json() {
        let doc = from_ocr_json(RESPONSE.as_bytes()).unwrap();
        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.metadata.title.as_deref(), Some("Quarterly Report"));
        assert_eq!(doc.metadata.source.as_deref(), Some("OCR response (ocr-test)"));

        let first = doc.get_page(1).unwrap();
        assert_eq!(first.paragraphs().collect::<Vec<_>>(), vec!["Revenue grew."]);
        assert_eq!(first.tables().count(), 1);
        assert!(doc.get_page(2).unwrap().is_empty());
    }

    #[test]
    fn test_from_ocr_json_malformed() {
        assert!(matches!(
            from_ocr_json(b"{\"pages\": [}"),
            Err(Error::OcrResponse(_))
        ));
    }

    #[test]
    fn test_docx_from_ocr_json() {
        let bytes = docx_from_ocr_json(RESPONSE.as_bytes()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_load_document_detects_kind() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("scan.json");
        std::fs::write(&json_path, RESPONSE).unwrap();
        assert_eq!(load_document(&json_path).unwrap().page_count(), 3);

        let md_path = dir.path().join("page.md");
        std::fs::write(&md_path, "# Memo\n\nHello.").unwrap();
        let doc = load_document(&md_path).unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.metadata.title.as_deref(), Some("Memo"));
    }

    #[test]
    fn test_result_page_selection_validated() {
        let result = OcrDocx::new()
            .with_pages(PageSelection::Pages(vec![5]))
            .assemble(&["one", "two"]);
        assert!(matches!(result.to_text(), Err(Error::PageOutOfRange(5, 2))));
        assert!(result.to_json(JsonFormat::Compact).is_ok());
    }

    #[test]
    fn test_result_outputs() {
        let result = OcrDocx::new()
            .without_page_breaks()
            .assemble(&["# A\nfirst", "second"]);

        assert_eq!(result.to_text().unwrap(), "A\n\nfirst\n\nsecond");
        assert_eq!(result.document().page_count(), 2);
    }
}
