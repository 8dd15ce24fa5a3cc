//! End-to-end tests for page assembly and rendering.

use std::io::Read;

use ocrdocx::parser::{extract_tables, extract_title, normalize};
use ocrdocx::render::{self, RenderOptions};
use ocrdocx::{assemble_pages, from_ocr_json, OcrDocx};

const INVOICE: &str = "# Invoice 42\n| Item | Qty |\n|---|---|\n| Pen | 3 |\nSome trailing note.";

fn docx_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}

#[test]
fn test_invoice_round_trip() {
    let doc = assemble_pages(&[INVOICE]);
    let page = doc.get_page(1).unwrap();

    assert_eq!(page.title.as_deref(), Some("Invoice 42"));
    let tables: Vec<_> = page.tables().collect();
    assert_eq!(tables.len(), 1);
    assert_eq!(
        tables[0].to_vecs(),
        vec![vec!["Item", "Qty"], vec!["Pen", "3"]]
    );
    assert_eq!(
        page.paragraphs().collect::<Vec<_>>(),
        vec!["Some trailing note."]
    );
}

#[test]
fn test_text_without_pipes_is_untouched() {
    let markdown = "Plain text\n\nwith two paragraphs\n";
    let (tables, remainder) = extract_tables(markdown);
    assert!(tables.is_empty());
    assert_eq!(remainder, markdown);
}

#[test]
fn test_first_heading_only() {
    assert_eq!(
        extract_title("para\n# First\n## Second").as_deref(),
        Some("First")
    );
}

#[test]
fn test_normalize_idempotent_on_messy_input() {
    let samples = [
        "![logo](a.png)# Title\n\n\n\n[link](x)<br/>tail",
        "## [Heading](url)\n\n\n<BR>\n\n\ntext",
        "  \n\n",
        "[[nested](a)](b) and ![img](c)",
    ];
    for sample in samples {
        let once = normalize(sample);
        assert_eq!(normalize(&once), once, "{sample:?}");
    }
}

#[test]
fn test_normalize_nesting_depths() {
    for depth in 1..=32 {
        let md = (0..depth).fold("x".to_string(), |inner, i| format!("[{inner}](u{i})"));
        let once = normalize(&md);
        assert_eq!(once, "x", "depth {depth}");
        assert_eq!(normalize(&once), once, "depth {depth}");
    }
}

#[test]
fn test_crlf_pages() {
    let doc = assemble_pages(&["# T\r\n\r\nFirst para.\r\n\r\nSecond para.\r\n"]);
    let page = doc.get_page(1).unwrap();
    assert_eq!(page.title.as_deref(), Some("T"));
    assert_eq!(
        page.paragraphs().collect::<Vec<_>>(),
        vec!["First para.", "Second para."]
    );

    let crlf = INVOICE.replace('\n', "\r\n");
    assert_eq!(
        assemble_pages(&[crlf.as_str()]).pages,
        assemble_pages(&[INVOICE]).pages
    );
}

#[test]
fn test_ragged_rows_render_padded() {
    let doc = assemble_pages(&["| a | b | c |\n|---|---|---|\n| d | e |"]);
    let markdown = render::to_markdown(&doc, &RenderOptions::default()).unwrap();
    assert_eq!(markdown, "| a | b | c |\n| --- | --- | --- |\n| d | e |  |");

    let bytes = render::to_docx(&doc, &RenderOptions::default()).unwrap();
    let xml = docx_part(&bytes, "word/document.xml");
    assert_eq!(xml.matches("</w:tc>").count(), 6);
}

#[test]
fn test_blank_line_splits_tables() {
    let doc = assemble_pages(&["| a | b |\n\n| c | d |"]);
    let page = doc.get_page(1).unwrap();
    assert_eq!(page.tables().count(), 2);
    assert_eq!(page.paragraphs().count(), 0);
}

#[test]
fn test_blank_page() {
    let doc = assemble_pages(&["   \n\n\t\n"]);
    let page = doc.get_page(1).unwrap();
    assert!(page.title.is_none());
    assert_eq!(page.paragraphs().count(), 0);
    assert_eq!(page.tables().count(), 0);
}

#[test]
fn test_ocr_json_to_docx() {
    let json = serde_json::json!({
        "pages": [
            {"index": 0, "markdown": INVOICE, "images": []},
            {"index": 1},
            {"index": 2, "markdown": "## Notes\n\nSee [terms](https://example.com)."}
        ],
        "usage_info": {"pages_processed": 3}
    });
    let doc = from_ocr_json(json.to_string().as_bytes()).unwrap();
    assert_eq!(doc.page_count(), 3);
    assert_eq!(
        doc.get_page(3).unwrap().paragraphs().collect::<Vec<_>>(),
        vec!["See terms."]
    );

    let bytes = render::to_docx(&doc, &RenderOptions::default()).unwrap();
    let xml = docx_part(&bytes, "word/document.xml");
    assert_eq!(xml.matches(r#"w:type="page""#).count(), 3);
    assert!(xml.contains("Invoice 42"));
    assert!(xml.contains("Notes"));
    assert!(!xml.contains("https://example.com"));

    let core = docx_part(&bytes, "docProps/core.xml");
    assert!(core.contains("dcterms:created"));
}

#[test]
fn test_source_order_builder() {
    let page = "Intro\n| a | b |\nOutro";
    let result = OcrDocx::new().source_order().assemble(&[page]);
    let text = result.to_text().unwrap();
    assert_eq!(text, "Intro\n\na\tb\n\nOutro");

    let default = OcrDocx::new().assemble(&[page]);
    assert_eq!(default.to_text().unwrap(), "Intro\nOutro\n\na\tb");
}
