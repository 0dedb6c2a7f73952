//! # Sieve Parser
//!
//! Parser for Sieve source lists: line-oriented text files naming the
//! elements and attributes an allow-list policy permits.
//!
//! ## Usage
//!
//! ```
//! # use sieve_parser::{parse, ParseError};
//! # use sieve_core::document::DocumentFlags;
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = "\
//! [HTML Global]
//! - id
//!
//! a
//! - href
//! svg circle
//! - r
//! ";
//!
//!     let document = parse(source, DocumentFlags::default())?;
//!     assert_eq!(document.elements().len(), 2);
//!     Ok(())
//! }
//! ```

mod builder;
mod classify;
#[cfg(test)]
mod classify_tests;
pub mod error;
mod name_list;
mod resolve;
mod span;

pub use error::ParseError;
pub use name_list::parse_name_list;
pub use span::Span;

use log::info;

use sieve_core::document::{Document, DocumentFlags};

/// Parse source list text into an unnormalized document.
///
/// The pipeline runs once over the text:
///
/// 1. **Classify** - Strip comments and recognise each line's shape
/// 2. **Resolve** - Map namespace keywords and build typed entries
/// 3. **Build** - Fold entries into the document, tracking the current target
///
/// Every line is checked; all problems are returned together.
///
/// # Arguments
///
/// * `source` - The source list text
/// * `flags` - Document flags to carry into the result
///
/// # Errors
///
/// Returns a [`ParseError`] holding one diagnostic per malformed line.
pub fn parse(source: &str, flags: DocumentFlags) -> Result<Document, ParseError> {
    info!(bytes = source.len(); "Parsing source list");
    builder::build(source, flags)
}
