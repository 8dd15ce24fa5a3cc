//! Markdown rendering.

use crate::error::Result;
use crate::model::{Block, Document, Page, Table};

use super::{ExtractionStats, RenderOptions, RenderResult};

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = MarkdownRenderer::new(options);
    renderer.render_with_stats(doc)
}

/// Markdown renderer.
///
/// Each page becomes its title as a heading, the paragraphs, and pipe
/// tables. Pages are separated by a horizontal rule when page breaks are on.
pub struct MarkdownRenderer {
    options: RenderOptions,
    stats: ExtractionStats,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: ExtractionStats::new(),
        }
    }

    /// Render a document to Markdown.
    pub fn render(mut self, doc: &Document) -> Result<String> {
        self.render_internal(doc)
    }

    /// Render a document to Markdown with extraction statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        self.options.collect_stats = true;
        let content = self.render_internal(doc)?;
        Ok(RenderResult::new(content, doc.metadata.clone(), self.stats))
    }

    fn render_internal(&mut self, doc: &Document) -> Result<String> {
        let mut output = String::new();

        if self.options.include_frontmatter {
            output.push_str(&doc.metadata.to_yaml_frontmatter());
        }

        let mut first = true;
        for page in &doc.pages {
            if !self.options.page_selection.includes(page.number) {
                continue;
            }
            if !first && self.options.page_breaks {
                output.push_str("---\n\n");
            }
            first = false;
            self.render_page(&mut output, page);
        }

        Ok(output.trim().to_string())
    }

    fn render_page(&mut self, output: &mut String, page: &Page) {
        if self.options.collect_stats {
            self.stats.record_page(page);
        }

        if let Some(title) = &page.title {
            output.push_str(&"#".repeat(self.options.title_level as usize));
            output.push(' ');
            output.push_str(title);
            output.push_str("\n\n");
        }

        for block in &page.elements {
            match block {
                Block::Paragraph(text) => {
                    output.push_str(text);
                    output.push_str("\n\n");
                }
                Block::Table(table) => self.render_table(output, table),
            }
        }
    }

    fn render_table(&self, output: &mut String, table: &Table) {
        if table.is_empty() || table.column_count() == 0 {
            return;
        }

        for (i, row) in table.rows.iter().enumerate() {
            output.push('|');
            for cell in &row.cells {
                output.push(' ');
                output.push_str(&escape_cell(cell));
                output.push_str(" |");
            }
            output.push('\n');

            // Separator after header row
            if i == 0 {
                output.push('|');
                for _ in &row.cells {
                    output.push_str(" --- |");
                }
                output.push('\n');
            }
        }

        output.push('\n');
    }
}

/// Escape a table cell so it stays inside its column.
fn escape_cell(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace('\n', " ")
}
