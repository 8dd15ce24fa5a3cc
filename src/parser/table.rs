//! Pipe-table extraction from OCR markdown.
//!
//! Lines are classified one at a time ([`scan`]), grouped into contiguous
//! runs of the same class ([`Runs`]), and each run is reduced to either
//! verbatim text or a [`Table`]. Nothing looks further ahead than the end
//! of the current run, so the whole pass is linear in the input.

use crate::model::Table;

/// Classification of a single markdown line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Starts with `|` (after trimming) and holds at least two pipes
    TableRow,
    /// Anything else
    Text,
}

/// Classify one line (without its terminator).
pub fn classify(line: &str) -> LineClass {
    if line.trim().starts_with('|') && line.matches('|').count() >= 2 {
        LineClass::TableRow
    } else {
        LineClass::Text
    }
}

/// Lazily classify every line of `markdown`.
///
/// Each item carries the line with its original terminator so text can be
/// re-emitted verbatim.
pub fn scan(markdown: &str) -> impl Iterator<Item = (LineClass, &str)> + '_ {
    markdown
        .split_inclusive('\n')
        .map(|raw| (classify(raw.trim_end_matches(['\n', '\r'])), raw))
}

/// A maximal run of consecutive lines with the same class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run<'a> {
    /// Class shared by every line in the run
    pub class: LineClass,
    /// Lines, terminators included
    pub lines: Vec<&'a str>,
}

/// Groups a classified line stream into contiguous [`Run`]s.
pub struct Runs<'a, I: Iterator<Item = (LineClass, &'a str)>> {
    inner: std::iter::Peekable<I>,
}

impl<'a, I: Iterator<Item = (LineClass, &'a str)>> Runs<'a, I> {
    /// Wrap a classified line stream.
    pub fn new(inner: I) -> Self {
        Self {
            inner: inner.peekable(),
        }
    }
}

impl<'a, I: Iterator<Item = (LineClass, &'a str)>> Iterator for Runs<'a, I> {
    type Item = Run<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (class, first) = self.inner.next()?;
        let mut lines = vec![first];
        while let Some((_, line)) = self.inner.next_if(|(next, _)| *next == class) {
            lines.push(line);
        }
        Some(Run { class, lines })
    }
}

/// A piece of page markdown after table extraction, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Verbatim non-table lines
    Text(String),
    /// A table block with at least one data row
    Table(Table),
}

/// Split a table line into trimmed cells.
///
/// One leading and one trailing pipe are dropped before splitting.
pub fn split_row(line: &str) -> Vec<String> {
    let row = line.trim();
    let row = row.strip_prefix('|').unwrap_or(row);
    let row = row.strip_suffix('|').unwrap_or(row);
    row.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// Whether a cell is an alignment marker such as `---`, `:--`, `-:` or `:-:`.
pub fn is_separator_cell(cell: &str) -> bool {
    let inner = cell.strip_prefix(':').unwrap_or(cell);
    let inner = inner.strip_suffix(':').unwrap_or(inner);
    !inner.is_empty() && inner.bytes().all(|b| b == b'-')
}

/// Whether every cell of a row is an alignment marker.
pub fn is_separator_row(cells: &[String]) -> bool {
    cells.iter().all(|c| is_separator_cell(c))
}

/// Reduce a table run to a [`Table`], or `None` if only separators remain.
fn reduce_table(lines: &[&str]) -> Option<Table> {
    let rows: Vec<Vec<String>> = lines
        .iter()
        .map(|line| split_row(line))
        .filter(|cells| !is_separator_row(cells))
        .collect();

    if rows.is_empty() {
        log::debug!(
            "table block of {} line(s) held only separator rows, dropped",
            lines.len()
        );
        return None;
    }

    let table = Table::from_rows(rows);
    log::debug!(
        "table block: {} line(s) -> {}x{} table",
        lines.len(),
        table.row_count(),
        table.column_count()
    );
    Some(table)
}

/// Split page markdown into text and table segments, in source order.
///
/// Adjacent text segments are merged, so a dropped separator-only block
/// does not break the surrounding text in two.
pub fn segments(markdown: &str) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::new();

    for run in Runs::new(scan(markdown)) {
        match run.class {
            LineClass::Text => {
                let text: String = run.lines.concat();
                match out.last_mut() {
                    Some(Segment::Text(prev)) => prev.push_str(&text),
                    _ => out.push(Segment::Text(text)),
                }
            }
            LineClass::TableRow => {
                if let Some(table) = reduce_table(&run.lines) {
                    out.push(Segment::Table(table));
                }
            }
        }
    }

    out
}

/// Extract all tables from `markdown`.
///
/// Returns the tables in source order and the markdown with every table
/// block removed. Lines outside table blocks are kept verbatim.
pub fn extract(markdown: &str) -> (Vec<Table>, String) {
    let mut tables = Vec::new();
    let mut remainder = String::with_capacity(markdown.len());

    for segment in segments(markdown) {
        match segment {
            Segment::Text(text) => remainder.push_str(&text),
            Segment::Table(table) => tables.push(table),
        }
    }

    (tables, remainder)
}
