//! Interactive exploration of a class forest.
//!
//! [`tree`] turns a [`classtree_core::hierarchy::Forest`] into connector-drawn
//! lines, [`app`] holds the navigation state machine, and [`ui`] plus
//! [`terminal`] draw it with ratatui on a crossterm backend. The state
//! machine is free of terminal I/O so it can be driven directly in tests.

pub mod app;
pub mod details;
pub mod export;
pub mod highlight;
pub mod preview;
pub mod terminal;
pub mod tree;
pub mod ui;
pub mod viewport;

pub use app::{Action, App, Mode};
pub use export::{TextExporter, TreeExporter};
pub use highlight::{Highlighter, PlainHighlighter, SyntectHighlighter};
pub use tree::{LineClass, Relation, TreeLine, render_tree};
