//! Rendering module for converting documents to output formats.
//!
//! DOCX is the primary target; Markdown, plain text and JSON are available
//! for inspection and downstream tooling.

pub mod docx;
mod json;
mod markdown;
mod options;
mod result;
mod text;

pub use docx::{to_docx, DocxRenderer, DOCX_MIME_TYPE};
pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use options::{PageSelection, RenderOptions, DEFAULT_FONT_SIZE_PT};
pub use result::{ExtractionStats, RenderResult};
pub use text::{to_text, PAGE_SEPARATOR};
