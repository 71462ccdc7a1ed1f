//! Generator module - renders post records to HTML pages
//!
//! The same [`Generator`] backs both `generate` (writes files to the public
//! directory) and the development server (renders per request).

use anyhow::{Context as _, Result};
use chrono::Datelike;
use std::fs;
use std::path::Path;
use tera::Context;
use walkdir::WalkDir;

use crate::content::{MarkdownRenderer, Post, PostRepository, PostSummary};
use crate::templates::{ConfigData, PostData, TemplateRenderer};
use crate::Site;

pub use crate::content::POST_INDEX_FILE;

/// What a generation run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Posts shown on the listing page
    pub listed: usize,
    /// Post pages written
    pub pages: usize,
    /// Static files copied
    pub assets: usize,
}

/// Static site generator using Tera templates
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let markdown = MarkdownRenderer::with_options(
            &site.config.highlight.theme,
            site.config.highlight.line_number,
        );

        Ok(Self {
            site: site.clone(),
            renderer,
            markdown,
        })
    }

    /// Site this generator renders
    pub fn site(&self) -> &Site {
        &self.site
    }

    /// Reader over the site's posts
    pub fn repository(&self) -> PostRepository {
        self.site.repository()
    }

    /// Render the post listing
    pub fn render_index(&self, posts: &[PostSummary]) -> Result<String> {
        let posts: Vec<PostData> = posts
            .iter()
            .map(|p| PostData::from_summary(&self.site.config, p))
            .collect();

        let mut context = self.create_base_context();
        context.insert("posts", &posts);
        self.renderer.render("index.html", &context)
    }

    /// Render a single post page
    pub fn render_post(&self, post: &Post) -> Result<String> {
        let content = self.markdown.render(&post.body)?;

        let mut context = self.create_base_context();
        context.insert("post", &PostData::from_post(&self.site.config, post));
        context.insert("content", &content);
        self.renderer.render("post.html", &context)
    }

    /// Render the generic not-found page
    pub fn render_not_found(&self) -> Result<String> {
        let context = self.create_base_context();
        self.renderer.render("404.html", &context)
    }

    /// Serialize summaries as the JSON post index
    pub fn render_post_index(&self, posts: &[PostSummary]) -> Result<String> {
        Ok(serde_json::to_string_pretty(posts)?)
    }

    /// Generate the entire site into the public directory
    pub fn generate(&self) -> Result<GenerateReport> {
        let public_dir = &self.site.public_dir;
        fs::create_dir_all(public_dir)
            .with_context(|| format!("Failed to create {:?}", public_dir))?;

        let repo = self.repository();
        let summaries = repo.list_summaries();
        let mut report = GenerateReport {
            listed: summaries.len(),
            ..Default::default()
        };

        write_file(&public_dir.join("index.html"), &self.render_index(&summaries)?)?;

        let blog_dir = public_dir.join(self.site.config.blog_segment());
        for slug in repo.list_slugs() {
            let Some(post) = repo.get_post(&slug) else {
                continue;
            };
            let html = self.render_post(&post)?;
            write_file(&blog_dir.join(&slug).join("index.html"), &html)?;
            report.pages += 1;
        }

        write_file(&blog_dir.join(POST_INDEX_FILE), &self.render_post_index(&summaries)?)?;
        write_file(&public_dir.join("404.html"), &self.render_not_found()?)?;

        report.assets = self.copy_static_assets()?;

        Ok(report)
    }

    /// Create a base context with common variables
    fn create_base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("config", &ConfigData::from_config(&self.site.config));
        context.insert("current_year", &chrono::Local::now().year());
        context
    }

    /// Copy static assets (images, styles, etc.) to the public directory
    fn copy_static_assets(&self) -> Result<usize> {
        let static_dir = &self.site.static_dir;
        if !static_dir.exists() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.site.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy {:?} to {:?}", path, dest))?;
            copied += 1;
        }

        Ok(copied)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create dir {:?}", parent))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::debug!("Generated: {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site_with_posts(posts: &[(&str, &str)]) -> (TempDir, Site) {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        fs::create_dir_all(&site.posts_dir).unwrap();
        for (name, content) in posts {
            fs::write(site.posts_dir.join(name), content).unwrap();
        }
        (tmp, site)
    }

    const HELLO: &str = "---\ntitle: \"Hello <World>\"\ndate: \"2024-03-01\"\nexcerpt: \"first post\"\ntags: [\"intro\"]\n---\n# Welcome\n\nSome **bold** text.\n";

    #[test]
    fn test_render_index_lists_posts() {
        let (_tmp, site) = site_with_posts(&[("hello-world.mdx", HELLO)]);
        let generator = Generator::new(&site).unwrap();

        let html = generator
            .render_index(&generator.repository().list_summaries())
            .unwrap();
        assert!(html.contains(r#"href="/blog/hello-world/""#));
        assert!(html.contains("Hello &lt;World&gt;"));
        assert!(html.contains("Mar 1, 2024"));
        assert!(html.contains("first post"));
        assert!(html.contains("intro"));
        assert!(!html.contains("No posts yet"));
    }

    #[test]
    fn test_render_index_empty_placeholder() {
        let (_tmp, site) = site_with_posts(&[]);
        let generator = Generator::new(&site).unwrap();

        let html = generator.render_index(&[]).unwrap();
        assert!(html.contains("No posts yet. Check back soon!"));
    }

    #[test]
    fn test_render_post_page() {
        let (_tmp, site) = site_with_posts(&[("hello-world.mdx", HELLO)]);
        let generator = Generator::new(&site).unwrap();
        let post = generator.repository().get_post("hello-world").unwrap();

        let html = generator.render_post(&post).unwrap();
        assert!(html.contains("<title>Hello &lt;World&gt; | Anonymous</title>"));
        assert!(html.contains(r#"content="first post""#));
        assert!(html.contains("March 1, 2024"));
        assert!(html.contains("<h1>Welcome</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains(r#"href="/#blog""#));
    }

    #[test]
    fn test_render_not_found() {
        let (_tmp, site) = site_with_posts(&[]);
        let html = Generator::new(&site).unwrap().render_not_found().unwrap();
        assert!(html.contains("Post Not Found"));
    }

    #[test]
    fn test_generate_writes_site() {
        let (_tmp, site) = site_with_posts(&[
            ("hello-world.mdx", HELLO),
            ("older.md", "---\ntitle: Older\ndate: \"2023-01-01\"\n---\nold\n"),
            ("broken.mdx", "---\ntitle: [nope\n---\n"),
        ]);
        fs::create_dir_all(site.static_dir.join("img")).unwrap();
        fs::write(site.static_dir.join("img/me.png"), b"png").unwrap();

        let report = Generator::new(&site).unwrap().generate().unwrap();
        assert_eq!(
            report,
            GenerateReport {
                listed: 2,
                pages: 2,
                assets: 1
            }
        );

        let public = &site.public_dir;
        assert!(public.join("index.html").is_file());
        assert!(public.join("404.html").is_file());
        assert!(public.join("blog/hello-world/index.html").is_file());
        assert!(public.join("blog/older/index.html").is_file());
        assert!(!public.join("blog/broken").exists());
        assert!(public.join("img/me.png").is_file());

        let index: Vec<PostSummary> =
            serde_json::from_str(&fs::read_to_string(public.join("blog/index.json")).unwrap())
                .unwrap();
        let slugs: Vec<_> = index.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["hello-world", "older"]);
    }

    #[test]
    fn test_generate_ignores_post_named_like_index() {
        let (_tmp, site) = site_with_posts(&[
            ("good.mdx", HELLO),
            ("index.json.md", "---\ntitle: Clash\ndate: \"2024-05-01\"\n---\nclash\n"),
        ]);

        let report = Generator::new(&site).unwrap().generate().unwrap();
        assert_eq!(report.pages, 1);

        let index_path = site.public_dir.join("blog").join(POST_INDEX_FILE);
        assert!(index_path.is_file());
        let index: Vec<PostSummary> =
            serde_json::from_str(&fs::read_to_string(index_path).unwrap()).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].slug, "good");
    }

    #[test]
    fn test_generate_without_posts_dir() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();

        let report = Generator::new(&site).unwrap().generate().unwrap();
        assert_eq!(report, GenerateReport::default());

        let index = fs::read_to_string(site.public_dir.join("index.html")).unwrap();
        assert!(index.contains("No posts yet"));
    }
}
