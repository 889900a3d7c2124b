//! Content module - markdown documents, front-matter and loading

pub mod document;
mod frontmatter;
pub mod loader;

pub use document::MarkdownDocument;
pub use frontmatter::{FrontMatter, FrontMatterError};
