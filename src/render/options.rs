//! Rendering options and configuration.

use crate::error::{Error, Result};
use std::ops::RangeInclusive;

/// Default body font size in points.
pub const DEFAULT_FONT_SIZE_PT: f32 = 10.0;

/// Options for rendering document content.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Font size for body paragraphs and table cells, in points
    pub font_size_pt: f32,

    /// Center the page title
    pub center_title: bool,

    /// Heading level used for page titles (1-6)
    pub title_level: u8,

    /// Emit a page break after every page
    pub page_breaks: bool,

    /// Emit an empty paragraph after every table
    pub table_spacer: bool,

    /// Page selection
    pub page_selection: PageSelection,

    /// Include YAML frontmatter with metadata (Markdown output)
    pub include_frontmatter: bool,

    /// Collect extraction statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the body font size in points.
    ///
    /// Word stores sizes in half-points; anything below 1pt is raised to 1pt.
    pub fn with_font_size(mut self, points: f32) -> Self {
        self.font_size_pt = if points.is_finite() {
            points.max(1.0)
        } else {
            DEFAULT_FONT_SIZE_PT
        };
        self
    }

    /// Enable or disable title centering.
    pub fn with_centered_title(mut self, center: bool) -> Self {
        self.center_title = center;
        self
    }

    /// Set the heading level used for titles.
    pub fn with_title_level(mut self, level: u8) -> Self {
        self.title_level = level.clamp(1, 6);
        self
    }

    /// Enable or disable page breaks between pages.
    pub fn with_page_breaks(mut self, enabled: bool) -> Self {
        self.page_breaks = enabled;
        self
    }

    /// Enable or disable the spacer paragraph after tables.
    pub fn with_table_spacer(mut self, enabled: bool) -> Self {
        self.table_spacer = enabled;
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.page_selection = selection;
        self
    }

    /// Set specific page range.
    pub fn with_page_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.page_selection = PageSelection::Range(range);
        self
    }

    /// Set specific pages.
    pub fn with_page_list(mut self, pages: Vec<u32>) -> Self {
        self.page_selection = PageSelection::Pages(pages);
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }

    /// Font size in Word half-points (`w:sz`).
    pub fn font_size_half_points(&self) -> u32 {
        (self.font_size_pt * 2.0).round() as u32
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            font_size_pt: DEFAULT_FONT_SIZE_PT,
            center_title: true,
            title_level: 1,
            page_breaks: true,
            table_spacer: true,
            page_selection: PageSelection::All,
            include_frontmatter: false,
            collect_stats: false,
        }
    }
}

/// Page selection for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Render all pages
    #[default]
    All,
    /// Render a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Render specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Check that every explicitly selected page exists.
    pub fn validate(&self, page_count: u32) -> Result<()> {
        let highest = match self {
            PageSelection::All => return Ok(()),
            PageSelection::Range(range) => *range.end(),
            PageSelection::Pages(pages) => pages.iter().copied().max().unwrap_or(0),
        };
        if highest > page_count {
            return Err(Error::PageOutOfRange(highest, page_count));
        }
        Ok(())
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        // Simple range (e.g., "1-10")
        if !s.contains(',') {
            if let Some((start, end)) = s.split_once('-') {
                let (start, end) = parse_bounds(s, start, end)?;
                return Ok(PageSelection::Range(start..=end));
            }
        }

        // Comma-separated list with possible ranges
        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let (start, end) = parse_bounds(part, start, end)?;
                pages.extend(start..=end);
            } else {
                pages.push(parse_page(part)?);
            }
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}

fn parse_page(s: &str) -> Result<u32> {
    match s.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(Error::InvalidPageRange(format!(
            "invalid page number: {:?}",
            s
        ))),
        Ok(page) => Ok(page),
    }
}

fn parse_bounds(part: &str, start: &str, end: &str) -> Result<(u32, u32)> {
    let start = parse_page(start)?;
    let end = parse_page(end)?;
    if start > end {
        return Err(Error::InvalidPageRange(format!(
            "range start is after end: {:?}",
            part
        )));
    }
    Ok((start, end))
}

impl std::str::FromStr for PageSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PageSelection::parse(s)
    }
}
