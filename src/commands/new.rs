//! Create a new post interactively

use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use std::fs;
use std::path::PathBuf;

use crate::content::slugify;
use crate::helpers;
use crate::Site;

/// Source of answers for the new-post questions
pub trait Prompter {
    /// Ask for a line of text; may return an empty string
    fn input(&mut self, prompt: &str) -> Result<String>;

    /// Ask a yes/no question, defaulting to no
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Prompts on the terminal
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str) -> Result<String> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }
}

/// Answers collected for a new post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub excerpt: String,
    pub tags: Vec<String>,
}

/// How a new-post session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created { slug: String, path: PathBuf },
    /// Input was refused before anything was written
    Rejected(String),
    /// The user declined to overwrite an existing post
    Cancelled,
}

/// Run the new command on the terminal
///
/// Rejected input and a declined overwrite are reported but are not errors.
pub fn run(site: &Site) -> Result<()> {
    println!("\n📝 Create a New Blog Post\n");

    let mut prompter = TerminalPrompter::default();
    match create_interactive(site, &mut prompter)? {
        Outcome::Created { slug, path } => {
            let url = helpers::full_url_for(&site.config, &helpers::post_url(&site.config, &slug));
            println!("\n✅ Post created successfully!");
            println!("📄 File: {}", path.display());
            println!("🔗 Slug: {}", slug);
            println!("🌐 It will be available at: {}", url);
            println!("\nNext steps:");
            println!("   1. Edit {} with your content", path.display());
            println!("   2. Run `folio-rs server` to preview it");
            println!("   3. Run `folio-rs generate` to build the site");
        }
        Outcome::Rejected(reason) => println!("❌ {}", reason),
        Outcome::Cancelled => println!("❌ Cancelled."),
    }

    Ok(())
}

/// Ask for the post details and write the post file
pub fn create_interactive<P: Prompter>(site: &Site, prompter: &mut P) -> Result<Outcome> {
    let title = prompter.input("Post Title")?.trim().to_string();
    if title.is_empty() {
        return Ok(Outcome::Rejected("Title is required!".to_string()));
    }

    let excerpt = prompter
        .input("Post Excerpt (short description)")?
        .trim()
        .to_string();
    if excerpt.is_empty() {
        return Ok(Outcome::Rejected("Excerpt is required!".to_string()));
    }

    let tags = parse_tags(&prompter.input("Tags (comma-separated)")?);

    let post = NewPost {
        title,
        excerpt,
        tags,
    };
    let slug = slugify(&post.title);
    if slug.is_empty() {
        return Ok(Outcome::Rejected(
            "Title needs at least one letter or digit to build a slug".to_string(),
        ));
    }

    // Any existing file for this slug would be replaced or shadowed
    if let Some(existing) = site.repository().find_source(&slug) {
        let question = format!(
            "⚠️  A post with this slug already exists ({}). Overwrite?",
            existing.display()
        );
        if !prompter.confirm(&question)? {
            return Ok(Outcome::Cancelled);
        }
    }

    let date = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let path = write_post(site, &slug, &post, &date)?;
    tracing::info!("Created post {} at {:?}", slug, path);

    Ok(Outcome::Created { slug, path })
}

/// Write `<posts_dir>/<slug>.mdx`, creating the directory if needed
pub fn write_post(site: &Site, slug: &str, post: &NewPost, date: &str) -> Result<PathBuf> {
    fs::create_dir_all(&site.posts_dir)
        .with_context(|| format!("Failed to create {:?}", site.posts_dir))?;

    let path = site.posts_dir.join(format!("{}.mdx", slug));
    fs::write(&path, render_post_file(post, date))
        .with_context(|| format!("Failed to write {:?}", path))?;

    Ok(path)
}

/// Split comma-separated tags, dropping blanks
fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Double-quoted YAML scalar
fn yaml_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn render_post_file(post: &NewPost, date: &str) -> String {
    let tags = post
        .tags
        .iter()
        .map(|t| yaml_quote(t))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"---
title: {title}
date: {date}
excerpt: {excerpt}
tags: [{tags}]
---

# {heading}

Write your post here. Markdown and MDX formatting both work.

## Code Example

```rust
fn main() {{
    println!("Hello, world!");
}}
```

## Conclusion

Wrap up here...
"#,
        title = yaml_quote(&post.title),
        date = yaml_quote(date),
        excerpt = yaml_quote(&post.excerpt),
        tags = tags,
        heading = post.title,
    )
}
