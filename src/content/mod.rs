//! Content module - reads posts from the content directory

mod error;
mod frontmatter;
mod markdown;
mod post;
mod repository;
mod slug;

pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostSummary};
pub use repository::{PostRepository, EXTENSIONS};
pub use slug::{is_reserved_slug, is_safe_slug, slugify, POST_INDEX_FILE, RESERVED_SLUGS};
