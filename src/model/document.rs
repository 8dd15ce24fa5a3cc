//! Document-level types.

use super::Page;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A structured document assembled from OCR pages.
///
/// Pages keep the order the OCR collaborator reported them in. Each page is
/// followed by a page break when rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, page count, etc.)
    pub metadata: Metadata,

    /// Pages in the document
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            metadata: Metadata::default(),
            pages: Vec::new(),
        }
    }

    /// Build a document from already assembled pages, deriving metadata.
    pub fn from_pages(pages: Vec<Page>) -> Self {
        let metadata = Metadata {
            title: pages.iter().find_map(|p| p.title.clone()),
            page_count: pages.len() as u32,
            ..Metadata::default()
        };
        Self { metadata, pages }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
        self.metadata.page_count = self.pages.len() as u32;
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Document metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Title of the first page that has one
    pub title: Option<String>,

    /// Name of the input the pages came from (file stem, upload name)
    pub source: Option<String>,

    /// Total number of pages
    pub page_count: u32,

    /// When the document was assembled
    pub created: DateTime<Utc>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: None,
            source: None,
            page_count: 0,
            created: Utc::now(),
        }
    }
}

impl Metadata {
    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        if let Some(ref title) = self.title {
            lines.push(format!("title: \"{}\"", escape_yaml(title)));
        }
        if let Some(ref source) = self.source {
            lines.push(format!("source: \"{}\"", escape_yaml(source)));
        }
        lines.push(format!("created: {}", self.created.to_rfc3339()));
        lines.push(format!("pages: {}", self.page_count));

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
