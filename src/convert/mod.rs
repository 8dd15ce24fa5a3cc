//! Output converters and the end-to-end conversion service.
//!
//! An [`OutputConverter`] turns a [`Document`] into the bytes of one output
//! format. Converters are registered in a [`ConverterRegistry`] under their
//! file extension, and [`ConversionService`] ties assembly, rendering and
//! storage together.
//!
//! # Example
//!
//! ```no_run
//! use ocrdocx::convert::{ConversionService, ConvertOptions, ConverterRegistry};
//! use ocrdocx::ocr::read_response;
//! use ocrdocx::storage::LocalDirStore;
//! use std::sync::Arc;
//!
//! fn main() -> ocrdocx::Result<()> {
//!     let response = read_response("scan.json")?;
//!     let service = ConversionService::new(
//!         ConverterRegistry::with_defaults(),
//!         Arc::new(LocalDirStore::new("out")),
//!     );
//!
//!     let result = service.convert(&response, "scan", &ConvertOptions::default())?;
//!     println!("{}", result.locator);
//!     Ok(())
//! }
//! ```

mod formats;
mod service;

pub use formats::{DocxConverter, JsonConverter, MarkdownConverter, TextConverter};
pub use service::ConversionService;

use crate::error::{Error, Result};
use crate::model::{Document, Metadata};
use crate::parser::ParseOptions;
use crate::render::{ExtractionStats, RenderOptions};
use std::collections::HashMap;
use std::sync::Arc;

/// Options for a full conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Parsing options
    pub parse: ParseOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Output format
    pub output_format: OutputFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.render.collect_stats = collect;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Word document
    #[default]
    Docx,

    /// Markdown
    Markdown,

    /// Plain text
    Text,

    /// JSON structure
    Json,
}

impl OutputFormat {
    /// File extension (without the dot) for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Docx => "docx",
            OutputFormat::Markdown => "md",
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "docx" | "word" => Ok(OutputFormat::Docx),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "txt" | "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Result of a stored conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Where the store put the artifact
    pub locator: String,

    /// Document metadata
    pub metadata: Metadata,

    /// Extraction statistics (if collected)
    pub stats: Option<ExtractionStats>,

    /// MIME type of the artifact
    pub mime_type: &'static str,

    /// Artifact size in bytes
    pub size: usize,
}

impl ConvertResult {
    /// Create a new conversion result.
    pub fn new(locator: String, metadata: Metadata) -> Self {
        Self {
            locator,
            metadata,
            stats: None,
            mime_type: crate::render::DOCX_MIME_TYPE,
            size: 0,
        }
    }

    /// Set extraction statistics.
    pub fn with_stats(mut self, stats: ExtractionStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Set MIME type.
    pub fn with_mime_type(mut self, mime_type: &'static str) -> Self {
        self.mime_type = mime_type;
        self
    }

    /// Set artifact size.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }
}

/// Trait for output converters.
///
/// Implement this trait to add a new output format.
pub trait OutputConverter: Send + Sync {
    /// Name of this converter.
    fn name(&self) -> &str;

    /// Primary file extension, lowercase, without the leading dot.
    fn extension(&self) -> &str;

    /// Other extensions or names the converter answers to.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// MIME type of the output.
    fn mime_type(&self) -> &'static str;

    /// Render a document to bytes.
    fn render(&self, doc: &Document, options: &RenderOptions) -> Result<Vec<u8>>;

    /// Check if this converter handles the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.extension() == ext_lower || self.aliases().iter().any(|a| *a == ext_lower)
    }
}

/// Registry for output converters.
///
/// Maps file extensions (and aliases) to converters.
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn OutputConverter>>,
    by_name: HashMap<String, Arc<dyn OutputConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with DOCX, Markdown, text and JSON converters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(DocxConverter::new()));
        registry.register(Arc::new(MarkdownConverter::new()));
        registry.register(Arc::new(TextConverter::new()));
        registry.register(Arc::new(JsonConverter::new()));
        registry
    }

    /// Register a converter under its extension and aliases.
    ///
    /// A later registration for the same extension replaces the earlier one.
    pub fn register(&mut self, converter: Arc<dyn OutputConverter>) {
        self.converters
            .insert(converter.extension().to_lowercase(), converter.clone());
        for alias in converter.aliases() {
            self.converters
                .insert(alias.to_lowercase(), converter.clone());
        }
        self.by_name
            .insert(converter.name().to_lowercase(), converter);
    }

    /// Get a converter by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn OutputConverter>> {
        let ext = ext.trim_start_matches('.').to_lowercase();
        self.converters.get(&ext).cloned()
    }

    /// Get a converter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn OutputConverter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Get the converter for an output format.
    pub fn get(&self, format: OutputFormat) -> Result<Arc<dyn OutputConverter>> {
        self.get_by_extension(format.extension())
            .ok_or_else(|| Error::UnsupportedFormat(format.extension().to_string()))
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.get_by_extension(ext).is_some()
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.converters.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Render a document with the converter registered for `ext`.
    pub fn render(&self, doc: &Document, ext: &str, options: &RenderOptions) -> Result<Vec<u8>> {
        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedFormat(ext.to_string()))?;
        converter.render(doc, options)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
