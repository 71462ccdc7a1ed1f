//! Front-matter parsing
//!
//! A post file may open with a YAML block fenced by `---` lines. The block is
//! decoded into a loose [`serde_yaml::Value`] first and then projected onto
//! [`FrontMatter`], so absent or mistyped keys fall back to their defaults
//! instead of failing the whole post.

use serde_yaml::{Mapping, Value};

/// Fence line that opens and closes the metadata block
const DELIMITER: &str = "---";

/// Front-matter data from a post
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, body)
    ///
    /// Content without a complete `---` block is returned untouched as the
    /// body, with every field defaulted.
    pub fn parse(content: &str) -> Result<(Self, &str), serde_yaml::Error> {
        match split(content) {
            Some((block, body)) => Ok((Self::decode(block)?, body)),
            None => Ok((FrontMatter::default(), content)),
        }
    }

    /// Decode the text between the two fences
    pub fn decode(block: &str) -> Result<Self, serde_yaml::Error> {
        if block.trim().is_empty() {
            return Ok(FrontMatter::default());
        }

        let value: Value = serde_yaml::from_str(block)?;
        Ok(Self::from_value(&value))
    }

    fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_mapping() else {
            tracing::debug!("Front-matter is not a mapping, using defaults");
            return FrontMatter::default();
        };

        Self {
            title: string_field(map, "title"),
            date: string_field(map, "date"),
            excerpt: string_field(map, "excerpt"),
            tags: tags_field(map),
        }
    }
}

/// Split `content` into (block, body) when it opens with a fenced block.
///
/// The body starts right after the closing fence line, so only that line's
/// own line ending is consumed.
fn split(content: &str) -> Option<(&str, &str)> {
    let text = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = text.split_inclusive('\n');

    let opening = lines.next()?;
    if !is_delimiter(opening) {
        return None;
    }

    let block_start = opening.len();
    let mut offset = block_start;
    for line in lines {
        if is_delimiter(line) {
            return Some((&text[block_start..offset], &text[offset + line.len()..]));
        }
        offset += line.len();
    }

    // Unclosed fence
    None
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

fn string_field(map: &Mapping, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => {
            tracing::debug!("Ignoring non-string front-matter field {}: {:?}", key, other);
            String::new()
        }
    }
}

/// Tags must be a list of strings; anything else counts as no tags.
fn tags_field(map: &Mapping) -> Vec<String> {
    let Some(Value::Sequence(items)) = map.get("tags") else {
        return Vec::new();
    };

    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_else(|| {
            tracing::debug!("Ignoring malformed tags list: {:?}", items);
            Vec::new()
        })
}
