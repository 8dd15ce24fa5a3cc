//! OCR boundary types and page sources.
//!
//! The OCR service itself is out of reach of this crate; what arrives here is
//! its response body (`{"pages": [{"markdown": "..."}]}`) or plain markdown
//! files. Both are exposed through [`PageSource`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Response body of a document OCR call.
///
/// Unknown fields (images, dimensions, usage info) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrResponse {
    /// Pages in the order the OCR service reported them
    #[serde(default)]
    pub pages: Vec<OcrPage>,

    /// OCR model name, if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// One page record of an OCR response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrPage {
    /// Page index reported by the service (informational only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,

    /// Page markdown; `null` or missing counts as empty
    #[serde(default)]
    pub markdown: Option<String>,
}

impl OcrResponse {
    /// Parse a JSON response body.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
        let response: OcrResponse = serde_json::from_slice(data)?;
        log::debug!(
            "OCR response: {} page(s), model {:?}",
            response.pages.len(),
            response.model
        );
        Ok(response)
    }

    /// Build a response from page markdown, in order.
    pub fn from_markdown<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, md)| OcrPage {
                index: Some(i as u32),
                markdown: Some(md.into()),
            })
            .collect();
        Self { pages, model: None }
    }

    /// Page markdown in response order, with missing markdown as `""`.
    ///
    /// Page order is taken from the array, never from `index`.
    pub fn markdown_pages(&self) -> Vec<&str> {
        self.pages
            .iter()
            .enumerate()
            .map(|(i, page)| match page.markdown.as_deref() {
                Some(md) => md,
                None => {
                    log::warn!("OCR page {} has no markdown, treating as empty", i + 1);
                    ""
                }
            })
            .collect()
    }

    /// Number of page records.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Anything that yields per-page markdown in page order.
pub trait PageSource {
    /// Load page markdown, first page first.
    fn pages(&self) -> Result<Vec<String>>;

    /// Short description for logs and document metadata.
    fn describe(&self) -> String {
        "pages".to_string()
    }
}

impl PageSource for OcrResponse {
    fn pages(&self) -> Result<Vec<String>> {
        Ok(self
            .markdown_pages()
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    fn describe(&self) -> String {
        match &self.model {
            Some(model) => format!("OCR response ({})", model),
            None => "OCR response".to_string(),
        }
    }
}

impl PageSource for Vec<String> {
    fn pages(&self) -> Result<Vec<String>> {
        Ok(self.clone())
    }
}

/// Markdown files on disk, one page per file, in the given order.
#[derive(Debug, Clone, Default)]
pub struct MarkdownFiles {
    paths: Vec<PathBuf>,
}

impl MarkdownFiles {
    /// Create a source from file paths.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            paths: paths.into_iter().map(|p| p.as_ref().to_path_buf()).collect(),
        }
    }

    /// The file paths, in page order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl PageSource for MarkdownFiles {
    fn pages(&self) -> Result<Vec<String>> {
        self.paths
            .iter()
            .map(|path| std::fs::read_to_string(path).map_err(Error::from))
            .collect()
    }

    fn describe(&self) -> String {
        match self.paths.as_slice() {
            [single] => single.display().to_string(),
            paths => format!("{} markdown file(s)", paths.len()),
        }
    }
}

/// Read an OCR JSON response from a file.
pub fn read_response<P: AsRef<Path>>(path: P) -> Result<OcrResponse> {
    let data = std::fs::read(path)?;
    OcrResponse::from_json(&data)
}
