//! Post records

use serde::{Deserialize, Serialize};

use super::FrontMatter;

/// A blog post with its full body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    /// Slug (URL-friendly name, taken from the file name)
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date as written in the front-matter (ISO 8601)
    pub date: String,

    /// Short summary shown in listings
    pub excerpt: String,

    /// Post tags, in authored order
    pub tags: Vec<String>,

    /// Raw markdown/MDX body
    pub body: String,
}

impl Post {
    /// Build a post from decoded front-matter and the remaining body
    pub fn from_parts(slug: &str, fm: FrontMatter, body: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: fm.title,
            date: fm.date,
            excerpt: fm.excerpt,
            tags: fm.tags,
            body: body.to_string(),
        }
    }

    /// Listing view of this post
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            date: self.date.clone(),
            excerpt: self.excerpt.clone(),
            tags: self.tags.clone(),
        }
    }
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        Self {
            slug: post.slug,
            title: post.title,
            date: post.date,
            excerpt: post.excerpt,
            tags: post.tags,
        }
    }
}

/// A post without its body, used for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_drops_body_only() {
        let fm = FrontMatter {
            title: "Hello".to_string(),
            date: "2024-01-15".to_string(),
            excerpt: "hi".to_string(),
            tags: vec!["intro".to_string()],
        };
        let post = Post::from_parts("hello", fm, "# Body\n");
        let summary = post.summary();

        assert_eq!(summary.slug, post.slug);
        assert_eq!(summary.title, post.title);
        assert_eq!(summary.date, post.date);
        assert_eq!(summary.excerpt, post.excerpt);
        assert_eq!(summary.tags, post.tags);
        assert_eq!(PostSummary::from(post), summary);
    }

    #[test]
    fn test_summary_serializes_without_body() {
        let post = Post::from_parts("a", FrontMatter::default(), "secret body");
        let json = serde_json::to_value(post.summary()).unwrap();
        assert!(json.get("body").is_none());
        assert_eq!(json["slug"], "a");
        assert_eq!(json["tags"], serde_json::json!([]));
    }
}
