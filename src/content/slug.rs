//! Slug derivation and validation

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DISALLOWED: Regex = Regex::new(r"[^a-z0-9_\s-]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref HYPHENS: Regex = Regex::new(r"-{2,}").unwrap();
}

/// Turn a human title into a slug
///
/// Only ASCII letters, digits, `_` and `-` survive, so the result is always
/// URL-safe. Accented and non-Latin characters are dropped.
///
/// # Examples
/// ```
/// assert_eq!(folio_rs::content::slugify("Hello, World!"), "hello-world");
/// ```
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let stripped = DISALLOWED.replace_all(&lower, "");
    let hyphenated = WHITESPACE.replace_all(&stripped, "-");
    let collapsed = HYPHENS.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

/// File name of the JSON post index written next to the post pages
pub const POST_INDEX_FILE: &str = "index.json";

/// Names under the blog directory that belong to the site, not to a post
pub const RESERVED_SLUGS: [&str; 1] = [POST_INDEX_FILE];

/// Whether a slug collides with a name the site itself serves
pub fn is_reserved_slug(slug: &str) -> bool {
    RESERVED_SLUGS.contains(&slug)
}

/// Whether a slug can be joined onto the posts directory without escaping it
/// and without colliding with a reserved name
pub fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !is_reserved_slug(slug)
        && !slug.starts_with('.')
        && !slug.contains("..")
        && !slug.contains(['/', '\\', '\0'])
}
