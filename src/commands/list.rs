//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::content::PostSummary;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let posts = site.repository().list_summaries();

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", posts.len());
            for line in post_lines(&posts) {
                println!("  {}", line);
            }
        }
        "tag" | "tags" => {
            let tags = tag_counts(&posts);
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }

    Ok(())
}

/// One `date - title [slug]` line per post, newest first
fn post_lines(posts: &[PostSummary]) -> Vec<String> {
    posts
        .iter()
        .map(|p| {
            let date = if p.date.is_empty() { "----------" } else { p.date.as_str() };
            format!("{} - {} [{}]", date, p.title, p.slug)
        })
        .collect()
}

/// Tags with their post counts, most used first, then by name
fn tag_counts(posts: &[PostSummary]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for post in posts {
        for tag in &post.tags {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}
