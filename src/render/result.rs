//! Rendering result with metadata and statistics.

use crate::model::{Block, Document, Metadata, Page};
use serde::{Deserialize, Serialize};

use super::PageSelection;

/// Result of rendering a document to text, including statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (Markdown, text, etc.)
    pub content: String,

    /// Document metadata (copied from source document)
    pub metadata: Metadata,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: Metadata, stats: ExtractionStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            metadata: Metadata::default(),
            stats: ExtractionStats::default(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics about the content of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of pages
    pub page_count: u32,

    /// Number of pages with a title
    pub heading_count: u32,

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of table rows across all tables
    pub table_row_count: u32,

    /// Number of cells filled in to square up ragged rows
    pub padded_cell_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics for the selected pages of a document.
    pub fn from_document(doc: &Document, selection: &PageSelection) -> Self {
        let mut stats = Self::new();
        for page in doc.pages.iter().filter(|p| selection.includes(p.number)) {
            stats.record_page(page);
        }
        stats
    }

    /// Count one page and everything on it.
    pub fn record_page(&mut self, page: &Page) {
        self.page_count += 1;
        if let Some(title) = &page.title {
            self.heading_count += 1;
            self.count_text(title);
        }
        for block in &page.elements {
            match block {
                Block::Paragraph(text) => {
                    self.paragraph_count += 1;
                    self.count_text(text);
                }
                Block::Table(table) => {
                    self.table_count += 1;
                    self.table_row_count += table.row_count() as u32;
                    self.padded_cell_count += table.padded_cells as u32;
                    for row in &table.rows {
                        for cell in &row.cells {
                            self.count_text(cell);
                        }
                    }
                }
            }
        }
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        // Word count: whitespace-separated tokens
        self.word_count += text.split_whitespace().count() as u32;

        // Character count: non-whitespace characters
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.page_count += other.page_count;
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.table_count += other.table_count;
        self.table_row_count += other.table_row_count;
        self.padded_cell_count += other.padded_cell_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Table;

    #[test]
    fn test_extraction_stats_count_text() {
        let mut stats = ExtractionStats::new();
        stats.count_text("Hello, world! This is a test.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }

    #[test]
    fn test_from_document() {
        let mut first = Page::new(1).with_title("Invoice 42");
        first.add_paragraph("Some trailing note.");
        first.add_table(Table::from_rows(vec![
            vec!["a".into(), "b".into(), "c".into()],
            vec!["d".into(), "e".into()],
        ]));
        let mut second = Page::new(2);
        second.add_paragraph("two words");
        let doc = Document::from_pages(vec![first, second]);

        let stats = ExtractionStats::from_document(&doc, &PageSelection::All);
        assert_eq!(stats.page_count, 2);
        assert_eq!(stats.heading_count, 1);
        assert_eq!(stats.paragraph_count, 2);
        assert_eq!(stats.table_count, 1);
        assert_eq!(stats.table_row_count, 2);
        assert_eq!(stats.padded_cell_count, 1);
        // 2 title + 3 note + 5 cells + 2
        assert_eq!(stats.word_count, 12);

        let only_second = ExtractionStats::from_document(&doc, &PageSelection::Pages(vec![2]));
        assert_eq!(only_second.page_count, 1);
        assert_eq!(only_second.table_count, 0);
    }

    #[test]
    fn test_extraction_stats_merge() {
        let mut stats1 = ExtractionStats::new();
        stats1.paragraph_count = 5;
        stats1.table_count = 2;

        let stats2 = ExtractionStats {
            paragraph_count: 3,
            table_count: 1,
            padded_cell_count: 4,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.paragraph_count, 8);
        assert_eq!(stats1.table_count, 3);
        assert_eq!(stats1.padded_cell_count, 4);
    }

    #[test]
    fn test_render_result_content_only() {
        let result = RenderResult::content_only("# Hello".to_string());
        assert_eq!(result.content, "# Hello");
        assert_eq!(result.stats.paragraph_count, 0);
    }
}
