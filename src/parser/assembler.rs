//! Page assembly: markdown pages in, [`Document`] out.

use rayon::prelude::*;

use crate::model::{Document, Page};

use super::heading::{extract_title, strip_title_line};
use super::normalize::{split_paragraphs, Normalizer};
use super::options::{BlockOrder, ParseOptions};
use super::table::{self, Segment};

/// Builds a [`Document`] from per-page OCR markdown.
///
/// Every page is handled on its own: tables are lifted out, the title is
/// read from the untouched markdown, and the remaining text (minus the
/// title line) is normalized and split into paragraphs. Page order in the
/// output always matches the input order, whether or not pages are
/// processed in parallel.
#[derive(Debug, Clone, Default)]
pub struct DocumentAssembler {
    options: ParseOptions,
    normalizer: Normalizer,
}

impl DocumentAssembler {
    /// Create an assembler with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an assembler with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        let normalizer = Normalizer::new().with_unicode_nfc(options.unicode_nfc);
        Self {
            options,
            normalizer,
        }
    }

    /// The options this assembler runs with.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Assemble every page, in order.
    pub fn assemble<S>(&self, pages: &[S]) -> Document
    where
        S: AsRef<str> + Sync,
    {
        let build = |(index, markdown): (usize, &S)| {
            self.assemble_page(index as u32 + 1, markdown.as_ref())
        };

        // Indexed collect keeps slot order regardless of scheduling
        let pages: Vec<Page> = if self.options.parallel {
            pages.par_iter().enumerate().map(build).collect()
        } else {
            pages.iter().enumerate().map(build).collect()
        };

        let document = Document::from_pages(pages);
        if document.is_empty() {
            log::warn!("assembled an empty document (no pages)");
        } else {
            log::info!(
                "assembled {} page(s), {} table(s)",
                document.page_count(),
                document.pages.iter().map(|p| p.tables().count()).sum::<usize>()
            );
        }
        document
    }

    /// Assemble a single page. `number` is 1-indexed.
    pub fn assemble_page(&self, number: u32, markdown: &str) -> Page {
        let mut page = Page::new(number);
        page.title = extract_title(markdown);

        match self.options.block_order {
            BlockOrder::ParagraphsFirst => {
                let (tables, remainder) = table::extract(markdown);
                let body = strip_title_line(&remainder).unwrap_or(remainder);
                for paragraph in self.paragraphs(&body) {
                    page.add_paragraph(paragraph);
                }
                for table in tables {
                    page.add_table(table);
                }
            }
            BlockOrder::SourceOrder => {
                let mut title_pending = page.title.is_some();
                for segment in table::segments(markdown) {
                    match segment {
                        Segment::Text(mut text) => {
                            if title_pending {
                                if let Some(body) = strip_title_line(&text) {
                                    text = body;
                                    title_pending = false;
                                }
                            }
                            for paragraph in self.paragraphs(&text) {
                                page.add_paragraph(paragraph);
                            }
                        }
                        Segment::Table(table) => page.add_table(table),
                    }
                }
            }
        }

        log::debug!(
            "page {}: title={:?}, {} block(s)",
            number,
            page.title,
            page.block_count()
        );
        page
    }

    fn paragraphs(&self, text: &str) -> Vec<String> {
        split_paragraphs(&self.normalizer.normalize(text))
    }
}

/// Assemble pages with default options.
pub fn assemble<S>(pages: &[S]) -> Document
where
    S: AsRef<str> + Sync,
{
    DocumentAssembler::new().assemble(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;

    const INVOICE: &str = "# Invoice 42\n\nBilled to ACME.\n\n| Item | Qty |\n|---|---|\n| Pen | 3 |\n\nThanks!";

    #[test]
    fn test_round_trip_example() {
        let md = "# Invoice 42\n| Item | Qty |\n|---|---|\n| Pen | 3 |\nSome trailing note.";
        let page = DocumentAssembler::new().assemble_page(1, md);

        assert_eq!(page.title.as_deref(), Some("Invoice 42"));
        assert_eq!(
            page.paragraphs().collect::<Vec<_>>(),
            vec!["Some trailing note."]
        );
        let tables: Vec<_> = page.tables().collect();
        assert_eq!(tables.len(), 1);
        assert_eq!(
            tables[0].to_vecs(),
            vec![vec!["Item", "Qty"], vec!["Pen", "3"]]
        );
    }

    #[test]
    fn test_paragraphs_before_tables() {
        let doc = assemble(&[INVOICE]);
        let page = doc.get_page(1).unwrap();

        assert_eq!(
            page.paragraphs().collect::<Vec<_>>(),
            vec!["Billed to ACME.", "Thanks!"]
        );
        assert_eq!(page.tables().count(), 1);
        assert!(page.elements.last().unwrap().is_table());
    }

    #[test]
    fn test_later_headings_stay_in_body() {
        let page = DocumentAssembler::new().assemble_page(1, "# Main\n\n## Section\n\ntext");
        assert_eq!(page.title.as_deref(), Some("Main"));
        assert_eq!(page.paragraphs().collect::<Vec<_>>(), vec!["Section", "text"]);
    }

    #[test]
    fn test_source_order_interleaves() {
        let assembler = DocumentAssembler::with_options(ParseOptions::new().source_order());
        let page = assembler.assemble_page(1, INVOICE);

        let kinds: Vec<bool> = page.elements.iter().map(Block::is_table).collect();
        assert_eq!(kinds, vec![false, true, false]);
        assert_eq!(page.elements[0], Block::Paragraph("Billed to ACME.".to_string()));
        assert_eq!(page.elements[2], Block::Paragraph("Thanks!".to_string()));
    }

    #[test]
    fn test_crlf_page() {
        let md = "# T\r\n\r\nFirst para.\r\n\r\nSecond para.\r\n";
        let page = DocumentAssembler::new().assemble_page(1, md);
        assert_eq!(page.title.as_deref(), Some("T"));
        assert_eq!(
            page.paragraphs().collect::<Vec<_>>(),
            vec!["First para.", "Second para."]
        );

        let md = "# T\r\nIntro\r\n\r\nMore\r\n| a | b |\r\n|---|---|\r\n| 1 | 2 |\r\n\r\nEnd\r\n";
        for options in [ParseOptions::new(), ParseOptions::new().source_order()] {
            let page = DocumentAssembler::with_options(options).assemble_page(1, md);
            let mut paragraphs = page.paragraphs().collect::<Vec<_>>();
            paragraphs.sort_unstable();
            assert_eq!(paragraphs, vec!["End", "Intro", "More"]);
            let tables: Vec<_> = page.tables().collect();
            assert_eq!(tables[0].to_vecs(), vec![vec!["a", "b"], vec!["1", "2"]]);
        }
    }

    #[test]
    fn test_empty_and_blank_pages() {
        let doc = assemble(&["", "   \n\n\t\n"]);
        assert_eq!(doc.page_count(), 2);
        for page in &doc.pages {
            assert!(page.is_empty());
        }
    }

    #[test]
    fn test_order_preserved_parallel_and_sequential() {
        let pages: Vec<String> = (1..=64).map(|i| format!("# Page {i}\n\nbody {i}")).collect();

        let parallel = DocumentAssembler::new().assemble(pages.as_slice());
        let sequential =
            DocumentAssembler::with_options(ParseOptions::new().sequential()).assemble(pages.as_slice());

        for (i, (a, b)) in parallel.pages.iter().zip(&sequential.pages).enumerate() {
            let expected = format!("Page {}", i + 1);
            assert_eq!(a.number as usize, i + 1);
            assert_eq!(a.title.as_deref(), Some(expected.as_str()));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_duplicate_pages_are_kept() {
        let doc = assemble(&["same", "same"]);
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[0].elements, doc.pages[1].elements);
    }

    #[test]
    fn test_document_title_from_first_titled_page() {
        let doc = assemble(&["no heading", "## Later"]);
        assert_eq!(doc.metadata.title.as_deref(), Some("Later"));
        assert!(doc.pages[0].title.is_none());
    }
}
