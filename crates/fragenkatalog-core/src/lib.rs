//! fragenkatalog-core: Question catalog model and renderers
//!
//! This crate provides:
//! - Parsing of tagged Markdown question files (`# F`, `# A`, `# E`)
//! - The section tree built from a numbered directory hierarchy
//! - Rendering of the tree as plain text, Markdown and a LaTeX fragment
//! - Markdown block translation to plain text and LaTeX (including list nesting)
//!
//! ## Example
//!
//! ```rust
//! use fragenkatalog_core::{lists, plain};
//!
//! assert_eq!(plain::to_plain_text("Look: ![x](a.png)"), "\tLook: <BILD>");
//! assert_eq!(
//!     lists::rewrite_lists("1. first\n1. second"),
//!     "\\begin{enumerate}\n\t\\item first\n\t\\item second\n\\end{enumerate}"
//! );
//! ```

pub mod error;
pub mod images;
pub mod latex;
pub mod lists;
pub mod node;
pub mod options;
pub mod ordinal;
pub mod paths;
pub mod plain;
pub mod question;
pub mod section;

pub use error::{Error, Result};
pub use images::ImageAsset;
pub use node::{Node, Render};
pub use options::{ImageMode, Labels, RenderOptions};
pub use ordinal::Ordinal;
pub use question::{Field, QuestionFile};
pub use section::Section;
