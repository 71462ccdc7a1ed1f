//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub description: String,

    // URL
    pub url: String,
    pub root: String,
    pub blog_dir: String,

    // Directory
    pub posts_dir: String,
    pub static_dir: String,
    pub public_dir: String,

    // Writing
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            author: "Anonymous".to_string(),
            description: String::new(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),
            blog_dir: "blog".to_string(),

            posts_dir: "posts".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),

            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

        // An empty file is a valid, all-default config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config)
    }

    /// URL segment for post pages, without surrounding slashes
    pub fn blog_segment(&self) -> &str {
        self.blog_dir.trim_matches('/')
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.posts_dir, "posts");
        assert_eq!(config.public_dir, "public");
        assert_eq!(config.blog_segment(), "blog");
        assert!(!config.highlight.line_number);
    }

    #[test]
    fn test_load_partial_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("_config.yml");
        fs::write(
            &path,
            "title: My Site\nauthor: Jane\nblog_dir: /writing/\nhighlight:\n  line_number: true\nunknown_key: 1\n",
        )
        .unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "My Site");
        assert_eq!(config.author, "Jane");
        assert_eq!(config.blog_segment(), "writing");
        assert!(config.highlight.line_number);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
        assert_eq!(config.posts_dir, "posts");
    }

    #[test]
    fn test_load_empty_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("_config.yml");
        fs::write(&path, "").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "Portfolio");
    }

    #[test]
    fn test_load_invalid_config_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("_config.yml");
        fs::write(&path, "title: [oops\n").unwrap();

        assert!(SiteConfig::load(&path).is_err());
    }
}
