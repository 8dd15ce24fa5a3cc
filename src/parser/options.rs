//! Parsing options and configuration.

/// Options for assembling OCR pages into a document.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Whether to process pages in parallel
    pub parallel: bool,

    /// How paragraphs and tables are ordered on a page
    pub block_order: BlockOrder,

    /// Whether to compose normalized text to Unicode NFC
    pub unicode_nfc: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set block order.
    pub fn with_block_order(mut self, order: BlockOrder) -> Self {
        self.block_order = order;
        self
    }

    /// Keep paragraphs and tables in the order they appear in the markdown.
    pub fn source_order(mut self) -> Self {
        self.block_order = BlockOrder::SourceOrder;
        self
    }

    /// Enable or disable NFC composition.
    pub fn with_unicode_nfc(mut self, enabled: bool) -> Self {
        self.unicode_nfc = enabled;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            block_order: BlockOrder::ParagraphsFirst,
            unicode_nfc: false,
        }
    }
}

/// Ordering of content blocks within a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockOrder {
    /// All paragraphs, then all tables
    #[default]
    ParagraphsFirst,
    /// Paragraphs and tables interleaved by source position
    SourceOrder,
}
