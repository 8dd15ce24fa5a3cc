//! Plain text rendering.

use crate::error::Result;
use crate::model::Document;

use super::RenderOptions;

/// Separator between pages in plain text output.
pub const PAGE_SEPARATOR: &str = "\n\x0c\n";

/// Convert a document to plain text.
///
/// Table rows come out tab-separated; pages are split by a form feed when
/// page breaks are enabled, otherwise by a blank line.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let separator = if options.page_breaks {
        PAGE_SEPARATOR
    } else {
        "\n\n"
    };

    let output = doc
        .pages
        .iter()
        .filter(|page| options.page_selection.includes(page.number))
        .map(|page| page.plain_text())
        .collect::<Vec<_>>()
        .join(separator);

    Ok(output.trim_matches(|c: char| c == '\n').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Page, Table};
    use crate::render::PageSelection;

    fn sample() -> Document {
        let mut first = Page::new(1).with_title("Invoice 42");
        first.add_paragraph("Hello, world!");
        first.add_table(Table::from_rows(vec![
            vec!["Item".into(), "Qty".into()],
            vec!["Pen".into()],
        ]));
        let mut second = Page::new(2);
        second.add_paragraph("Second page.");
        Document::from_pages(vec![first, second])
    }

    #[test]
    fn test_to_text() {
        let result = to_text(&sample(), &RenderOptions::default()).unwrap();
        assert_eq!(
            result,
            "Invoice 42\n\nHello, world!\n\nItem\tQty\nPen\t\n\x0c\nSecond page."
        );
    }

    #[test]
    fn test_to_text_without_page_breaks() {
        let options = RenderOptions::new().with_page_breaks(false);
        let result = to_text(&sample(), &options).unwrap();
        assert!(!result.contains('\x0c'));
        assert!(result.ends_with("Pen\t\n\nSecond page."));
    }

    #[test]
    fn test_to_text_page_selection() {
        let options = RenderOptions::new().with_pages(PageSelection::Pages(vec![2]));
        assert_eq!(to_text(&sample(), &options).unwrap(), "Second page.");
    }
}
