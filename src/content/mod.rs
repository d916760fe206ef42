//! Content module - loads posts and renders their markdown

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use error::{FrontMatterError, LoadError};
pub use frontmatter::{AuthorEntry, AuthorField, DateField, FrontMatter};
pub use loader::{LoaderOptions, PostLoader};
pub use markdown::MarkdownRenderer;
pub(crate) use markdown::parser_options;
pub use post::{find_by_slug, Author, PostRecord, DEFAULT_STATUS, DEFAULT_TYPE, RECORD_FIELDS};
