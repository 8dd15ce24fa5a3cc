//! Page-level types.

use super::Table;
use serde::{Deserialize, Serialize};

/// The structured content of one OCR page.
///
/// `elements` holds paragraphs and tables in the order chosen by the
/// assembler; the title is kept apart because it is always rendered first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed, position in the OCR response)
    pub number: u32,

    /// First markdown heading found on the page
    pub title: Option<String>,

    /// Content blocks on the page
    pub elements: Vec<Block>,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            title: None,
            elements: Vec::new(),
        }
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.elements.push(block);
    }

    /// Add a paragraph to the page.
    pub fn add_paragraph(&mut self, text: impl Into<String>) {
        self.elements.push(Block::Paragraph(text.into()));
    }

    /// Add a table to the page.
    pub fn add_table(&mut self, table: Table) {
        self.elements.push(Block::Table(table));
    }

    /// Paragraph texts, in page order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> + '_ {
        self.elements.iter().filter_map(|block| match block {
            Block::Paragraph(text) => Some(text.as_str()),
            Block::Table(_) => None,
        })
    }

    /// Tables, in page order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> + '_ {
        self.elements.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            Block::Paragraph(_) => None,
        })
    }

    /// Get plain text content of the page.
    pub fn plain_text(&self) -> String {
        self.title
            .iter()
            .cloned()
            .chain(self.elements.iter().map(|block| match block {
                Block::Paragraph(text) => text.clone(),
                Block::Table(table) => table.plain_text(),
            }))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Check if the page carries no title and no blocks.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.elements.is_empty()
    }

    /// Get the number of blocks on the page.
    pub fn block_count(&self) -> usize {
        self.elements.len()
    }
}

/// A content block on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph of plain text
    Paragraph(String),

    /// A table
    Table(Table),
}

impl Block {
    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph(_))
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }
}
