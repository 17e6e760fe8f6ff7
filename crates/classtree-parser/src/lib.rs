//! Lexical class extraction for classtree.
//!
//! Scans source text with regex heuristics (no grammar) to find class-like
//! declarations, their inheritance lists, nesting and rough size. Two
//! extractor families exist: brace-delimited ([`brace`]) for C#, Java and
//! C++, and indentation-delimited ([`indent`]) for Python. The
//! [`registry::ExtractorRegistry`] maps languages to extractors and walks
//! directory trees.

pub mod brace;
pub mod extract;
pub mod indent;
pub mod languages;
pub mod registry;
pub mod scan;

pub use extract::{ExtractError, Extractor};
pub use languages::Language;
pub use registry::{ExtractionReport, ExtractorRegistry, FileError, ScanOptions};
