//! Errors raised while loading a single post

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load one post file
///
/// These never leave [`PostRepository`](super::PostRepository): they are
/// logged and the post is reported as missing.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid front-matter in {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Refusing unsafe slug {0:?}")]
    UnsafeSlug(String),
}
