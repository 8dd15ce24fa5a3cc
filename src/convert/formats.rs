//! Built-in output converters.

use crate::error::Result;
use crate::model::Document;
use crate::render::{to_docx, to_json, to_markdown, to_text, JsonFormat, RenderOptions};

use super::OutputConverter;

/// Word document converter.
#[derive(Debug, Clone, Default)]
pub struct DocxConverter {
    _private: (),
}

impl DocxConverter {
    /// Create a new DOCX converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl OutputConverter for DocxConverter {
    fn name(&self) -> &str {
        "docx"
    }

    fn extension(&self) -> &str {
        "docx"
    }

    fn mime_type(&self) -> &'static str {
        crate::render::DOCX_MIME_TYPE
    }

    fn render(&self, doc: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
        to_docx(doc, options)
    }
}

/// Markdown converter.
#[derive(Debug, Clone, Default)]
pub struct MarkdownConverter {
    _private: (),
}

impl MarkdownConverter {
    /// Create a new Markdown converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl OutputConverter for MarkdownConverter {
    fn name(&self) -> &str {
        "markdown"
    }

    fn extension(&self) -> &str {
        "md"
    }

    fn aliases(&self) -> &[&str] {
        &["markdown"]
    }

    fn mime_type(&self) -> &'static str {
        "text/markdown"
    }

    fn render(&self, doc: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
        Ok(to_markdown(doc, options)?.into_bytes())
    }
}

/// Plain text converter.
#[derive(Debug, Clone, Default)]
pub struct TextConverter {
    _private: (),
}

impl TextConverter {
    /// Create a new text converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl OutputConverter for TextConverter {
    fn name(&self) -> &str {
        "text"
    }

    fn extension(&self) -> &str {
        "txt"
    }

    fn aliases(&self) -> &[&str] {
        &["text"]
    }

    fn mime_type(&self) -> &'static str {
        "text/plain"
    }

    fn render(&self, doc: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
        Ok(to_text(doc, options)?.into_bytes())
    }
}

/// JSON converter.
#[derive(Debug, Clone, Default)]
pub struct JsonConverter {
    format: JsonFormat,
}

impl JsonConverter {
    /// Create a new JSON converter (pretty-printed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the JSON layout.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }
}

impl OutputConverter for JsonConverter {
    fn name(&self) -> &str {
        "json"
    }

    fn extension(&self) -> &str {
        "json"
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }

    fn render(&self, doc: &Document, _options: &RenderOptions) -> Result<Vec<u8>> {
        Ok(to_json(doc, self.format)?.into_bytes())
    }
}
