//! OCR markdown parsing.
//!
//! Each page runs through three independent passes: [`table`] lifts pipe
//! tables out of the markdown, [`heading`] finds the page title, and
//! [`normalize`] turns what is left into plain text. [`DocumentAssembler`]
//! drives the passes for every page and collects the results in order.

mod assembler;
pub mod heading;
pub mod normalize;
mod options;
pub mod table;

pub use assembler::{assemble, DocumentAssembler};
pub use heading::{extract_title, Heading};
pub use normalize::{normalize, Normalizer};
pub use options::{BlockOrder, ParseOptions};
pub use table::{extract as extract_tables, Segment};
