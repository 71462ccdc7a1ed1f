//! Post repository - reads posts from the content directory
//!
//! Every call goes back to the file system; nothing is cached between calls.
//! A post that cannot be read or parsed is logged and treated as missing so
//! one bad file never takes the rest of the blog down with it.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::slug::{is_reserved_slug, is_safe_slug};
use super::{ContentError, FrontMatter, Post, PostSummary};

/// Recognized post extensions, in lookup precedence order
pub const EXTENSIONS: [&str; 2] = ["mdx", "md"];

/// Reads posts from a flat directory of `.mdx` / `.md` files
#[derive(Debug, Clone)]
pub struct PostRepository {
    dir: PathBuf,
}

impl PostRepository {
    /// Create a repository over the given directory
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Directory this repository reads from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Slugs of every post file in the directory, in no particular order
    pub fn list_slugs(&self) -> Vec<String> {
        if !self.dir.exists() {
            return Vec::new();
        }

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to read posts directory {:?}: {}", self.dir, e);
                return Vec::new();
            }
        };

        let mut slugs = BTreeSet::new();
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::debug!("Skipping non UTF-8 file name {:?}", path);
                continue;
            };

            if let Some(slug) = strip_extension(&name) {
                if is_reserved_slug(slug) {
                    tracing::warn!("Skipping post {:?}: {:?} is a reserved name", path, slug);
                } else if is_safe_slug(slug) {
                    slugs.insert(slug.to_string());
                } else {
                    tracing::debug!("Skipping post with unusable name {:?}", path);
                }
            }
        }

        slugs.into_iter().collect()
    }

    /// Look up one post by slug
    ///
    /// Returns `None` when no file exists for the slug, and also when the
    /// file exists but cannot be loaded (the failure is logged).
    pub fn get_post(&self, slug: &str) -> Option<Post> {
        match self.load_post(slug) {
            Ok(post) => post,
            Err(e) => {
                tracing::warn!("Failed to load post {:?}: {}", slug, e);
                None
            }
        }
    }

    /// All posts without bodies, newest first
    ///
    /// Posts sharing a date have no defined relative order.
    pub fn list_summaries(&self) -> Vec<PostSummary> {
        let mut summaries: Vec<PostSummary> = self
            .list_slugs()
            .iter()
            .filter_map(|slug| self.get_post(slug))
            .map(PostSummary::from)
            .collect();

        summaries.sort_by(|a, b| b.date.cmp(&a.date));
        summaries
    }

    /// Resolve the file backing a slug, `.mdx` first
    pub fn find_source(&self, slug: &str) -> Option<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", slug, ext)))
            .find(|path| path.is_file())
    }

    fn load_post(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        if !is_safe_slug(slug) {
            return Err(ContentError::UnsafeSlug(slug.to_string()));
        }

        let Some(path) = self.find_source(slug) else {
            return Ok(None);
        };

        let content = fs::read_to_string(&path).map_err(|source| ContentError::Io {
            path: path.clone(),
            source,
        })?;
        let (fm, body) = FrontMatter::parse(&content)
            .map_err(|source| ContentError::FrontMatter { path, source })?;

        Ok(Some(Post::from_parts(slug, fm, body)))
    }
}

/// Strip a recognized extension from a file name
fn strip_extension(name: &str) -> Option<&str> {
    EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(ext)?.strip_suffix('.'))
}
