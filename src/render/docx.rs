//! DOCX (WordprocessingML) rendering on top of `docx-rs`.
//!
//! The package carries a style sheet with `Normal`, `Heading1`-`Heading6`
//! and `TableGrid`, the body and core properties stamped with the
//! document's creation time.

use std::io::Cursor;

use chrono::SecondsFormat;
use docx_rs::{
    AlignmentType, BreakType, Docx, Paragraph, Run, Style, StyleType, TableCell, WidthType,
};

use crate::error::{Error, Result};
use crate::model::{Block, Document, Page, Table};

use super::{ExtractionStats, RenderOptions};

/// MIME type of a DOCX package.
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Usable page width in twips (US Letter, 1in margins).
const TEXT_WIDTH_TWIPS: usize = 9360;

/// Convert a document to DOCX bytes.
pub fn to_docx(doc: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
    DocxRenderer::new(options.clone()).render(doc)
}

/// DOCX renderer.
pub struct DocxRenderer {
    options: RenderOptions,
    stats: ExtractionStats,
}

impl DocxRenderer {
    /// Create a new DOCX renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: ExtractionStats::new(),
        }
    }

    /// Render a document to a DOCX package.
    pub fn render(mut self, doc: &Document) -> Result<Vec<u8>> {
        self.render_internal(doc)
    }

    /// Render a document and return the statistics gathered on the way.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<(Vec<u8>, ExtractionStats)> {
        self.options.collect_stats = true;
        let bytes = self.render_internal(doc)?;
        Ok((bytes, self.stats))
    }

    fn render_internal(&mut self, doc: &Document) -> Result<Vec<u8>> {
        let docx = self.build(doc);

        let mut cursor = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut cursor)
            .map_err(|e| Error::Archive(e.to_string()))?;
        let bytes = cursor.into_inner();

        log::debug!(
            "wrote DOCX: {} page(s), {} bytes",
            doc.page_count(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Build the in-memory `docx-rs` document for the selected pages.
    pub fn build(&mut self, doc: &Document) -> Docx {
        let created = doc
            .metadata
            .created
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut docx = with_styles(Docx::new(), &self.options)
            .created_at(&created)
            .updated_at(&created);

        for page in &doc.pages {
            if self.options.page_selection.includes(page.number) {
                docx = self.render_page(docx, page);
            }
        }
        docx
    }

    fn render_page(&mut self, mut docx: Docx, page: &Page) -> Docx {
        if self.options.collect_stats {
            self.stats.record_page(page);
        }

        if let Some(title) = &page.title {
            docx = docx.add_paragraph(self.title_paragraph(title));
        }

        for block in &page.elements {
            match block {
                Block::Paragraph(text) => {
                    docx = docx.add_paragraph(Paragraph::new().add_run(self.body_run(text)));
                }
                Block::Table(table) => docx = self.render_table(docx, table),
            }
        }

        if self.options.page_breaks {
            docx = docx.add_paragraph(
                Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
            );
        }
        docx
    }

    fn title_paragraph(&self, title: &str) -> Paragraph {
        let paragraph = Paragraph::new()
            .style(&format!("Heading{}", self.options.title_level))
            .add_run(push_text(Run::new(), title));
        if self.options.center_title {
            paragraph.align(AlignmentType::Center)
        } else {
            paragraph
        }
    }

    /// A body-sized run.
    fn body_run(&self, text: &str) -> Run {
        let sz = self.options.font_size_half_points() as usize;
        push_text(Run::new().size(sz), text)
    }

    fn render_table(&self, docx: Docx, table: &Table) -> Docx {
        let cols = table.column_count();
        if table.is_empty() || cols == 0 {
            return docx;
        }
        let width = TEXT_WIDTH_TWIPS / cols;

        let rows = (0..table.row_count())
            .map(|row| {
                let cells = (0..cols)
                    .map(|col| {
                        // Every cell needs a paragraph, padded ones included
                        TableCell::new()
                            .add_paragraph(
                                Paragraph::new().add_run(self.body_run(table.cell(row, col))),
                            )
                            .width(width, WidthType::Dxa)
                    })
                    .collect();
                docx_rs::TableRow::new(cells)
            })
            .collect();

        let docx = docx.add_table(
            docx_rs::Table::new(rows)
                .style("TableGrid")
                .set_grid(vec![width; cols]),
        );

        if self.options.table_spacer {
            docx.add_paragraph(Paragraph::new())
        } else {
            docx
        }
    }
}

/// Add `text` to `run`, turning newlines into line breaks and tabs into tab stops.
fn push_text(mut run: Run, text: &str) -> Run {
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        for (j, chunk) in line.split('\t').enumerate() {
            if j > 0 {
                run = run.add_tab();
            }
            run = run.add_text(printable(chunk));
        }
    }
    run
}

/// Drop control characters XML 1.0 cannot carry.
fn printable(s: &str) -> String {
    s.chars().filter(|c| !c.is_control()).collect()
}

/// Heading size in half-points for levels 1-6.
fn heading_size(level: u8) -> usize {
    match level {
        1 => 32,
        2 => 26,
        3 => 24,
        _ => 22,
    }
}

fn with_styles(docx: Docx, options: &RenderOptions) -> Docx {
    let sz = options.font_size_half_points() as usize;
    let mut docx = docx.add_style(
        Style::new("Normal", StyleType::Paragraph)
            .name("Normal")
            .size(sz),
    );

    for level in 1..=6u8 {
        docx = docx.add_style(
            Style::new(format!("Heading{level}"), StyleType::Paragraph)
                .name(format!("heading {level}"))
                .based_on("Normal")
                .size(heading_size(level))
                .bold(),
        );
    }

    docx.add_style(Style::new("TableGrid", StyleType::Table).name("Table Grid"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PageSelection;
    use std::io::Read;

    fn invoice() -> Document {
        let mut page = Page::new(1).with_title("Invoice <42> & Co");
        page.add_paragraph("Some trailing note.\nSecond line.");
        page.add_table(Table::from_rows(vec![
            vec!["Item".into(), "Qty".into(), "Price".into()],
            vec!["Pen".into(), "3".into()],
        ]));
        let mut second = Page::new(2);
        second.add_paragraph("Page two.");
        Document::from_pages(vec![page, second])
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    fn document_xml(options: RenderOptions) -> String {
        let bytes = to_docx(&invoice(), &options).unwrap();
        read_part(&bytes, "word/document.xml")
    }

    /// What follows the first table in the body.
    fn after_table(xml: &str) -> &str {
        xml.split("</w:tbl>").nth(1).unwrap()
    }

    fn opens_paragraph(xml: &str) -> bool {
        xml.starts_with("<w:p ") || xml.starts_with("<w:p>")
    }

    fn paragraph_count(xml: &str) -> usize {
        xml.matches("<w:p ").count() + xml.matches("<w:p>").count()
    }

    #[test]
    fn test_printable() {
        assert_eq!(printable("bell\u{7}"), "bell");
        assert_eq!(printable("line\r"), "line");
        assert_eq!(printable("a<b & c"), "a<b & c");
    }

    #[test]
    fn test_package_parts() {
        let bytes = to_docx(&invoice(), &RenderOptions::default()).unwrap();
        assert!(bytes.starts_with(b"PK"));

        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "word/_rels/document.xml.rels",
            "word/document.xml",
            "word/styles.xml",
        ] {
            assert!(names.contains(&part), "{part}");
        }
    }

    #[test]
    fn test_document_body() {
        let xml = document_xml(RenderOptions::default());

        // centered level-1 title, text escaped
        assert!(xml.contains("w:val=\"Heading1\""));
        assert!(xml.contains("w:val=\"center\""));
        assert!(xml.contains("Invoice "));
        assert!(xml.contains("42"));
        assert!(!xml.contains("<42>"));
        assert!(!xml.contains("& Co"));
        // 10pt body text with an in-paragraph line break
        assert!(xml.contains("<w:sz w:val=\"20\""));
        assert!(xml.contains("Some trailing note."));
        assert!(xml.contains("Second line."));
        assert!(xml.contains("<w:br "));
        // grid table
        assert!(xml.contains("w:val=\"TableGrid\""));
        assert_eq!(xml.matches("</w:tc>").count(), 6);
        assert_eq!(xml.matches("<w:gridCol ").count(), 3);
        // spacer after the table, page break after every page
        assert!(opens_paragraph(after_table(&xml)));
        assert_eq!(xml.matches("w:type=\"page\"").count(), 2);
        assert!(xml.contains("Page two."));
    }

    #[test]
    fn test_every_cell_has_a_paragraph() {
        let xml = document_xml(RenderOptions::default());
        for cell in xml.split("</w:tc>").take(6) {
            let cell = &cell[cell.rfind("<w:tc>").unwrap()..];
            assert_eq!(paragraph_count(cell), 1, "{cell}");
        }
    }

    #[test]
    fn test_options_change_layout() {
        let options = RenderOptions::new()
            .with_font_size(12.0)
            .with_centered_title(false)
            .with_page_breaks(false)
            .with_table_spacer(false)
            .with_pages(PageSelection::Pages(vec![1]));
        let xml = document_xml(options);

        assert!(xml.contains("<w:sz w:val=\"24\""));
        assert!(!xml.contains("w:val=\"center\""));
        assert!(!xml.contains("w:type=\"page\""));
        // the table is the last block of the only selected page
        assert!(!opens_paragraph(after_table(&xml)));
        assert!(!xml.contains("Page two."));
    }

    #[test]
    fn test_title_level() {
        let xml = document_xml(RenderOptions::new().with_title_level(2));
        assert!(xml.contains("w:val=\"Heading2\""));
        assert!(!xml.contains("w:val=\"Heading1\""));
    }

    #[test]
    fn test_core_and_styles() {
        let doc = invoice();
        let bytes = to_docx(&doc, &RenderOptions::default()).unwrap();

        let core = read_part(&bytes, "docProps/core.xml");
        let created = doc
            .metadata
            .created
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        assert!(core.contains(&created));

        let styles = read_part(&bytes, "word/styles.xml");
        for id in ["Normal", "Heading1", "Heading6", "TableGrid"] {
            assert!(styles.contains(&format!("w:styleId=\"{id}\"")), "{id}");
        }
    }

    #[test]
    fn test_empty_document() {
        let bytes = to_docx(&Document::new(), &RenderOptions::default()).unwrap();
        let xml = read_part(&bytes, "word/document.xml");
        assert_eq!(paragraph_count(&xml), 0);
        assert!(xml.contains("<w:sectPr"));
    }

    #[test]
    fn test_render_with_stats() {
        let (_, stats) = DocxRenderer::new(RenderOptions::default())
            .render_with_stats(&invoice())
            .unwrap();
        assert_eq!(stats.page_count, 2);
        assert_eq!(stats.padded_cell_count, 1);
    }
}
