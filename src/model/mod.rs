//! Document model types for structured OCR content.
//!
//! This module defines the intermediate representation that bridges
//! markdown parsing and rendering. A [`Document`] is an ordered list of
//! [`Page`]s; each page has an optional title plus paragraph and table
//! [`Block`]s.

mod document;
mod page;
mod table;

pub use document::{Document, Metadata};
pub use page::{Block, Page};
pub use table::{Table, TableRow};
