//! Built-in site templates using the Tera template engine
//!
//! Templates are embedded in the binary; the data handed to them is built
//! by the generator from post records and the site configuration.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{Post, PostSummary};
use crate::helpers::{self, DateStyle};

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("post.html", include_str!("site/post.html")),
            ("404.html", include_str!("site/404.html")),
        ])?;

        tera.register_filter("display_date", display_date_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Site-wide values every page needs
#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub author: String,
    pub description: String,
    pub home_url: String,
    /// Where "Back to Blog" links point
    pub blog_url: String,
}

impl ConfigData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            author: config.author.clone(),
            description: config.description.clone(),
            home_url: helpers::url_for(config, "/"),
            blog_url: helpers::url_for(config, "/#blog"),
        }
    }
}

/// A post as seen by templates
#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub url: String,
}

impl PostData {
    pub fn from_summary(config: &SiteConfig, summary: &PostSummary) -> Self {
        Self {
            slug: summary.slug.clone(),
            title: summary.title.clone(),
            date: summary.date.clone(),
            excerpt: summary.excerpt.clone(),
            tags: summary.tags.clone(),
            url: helpers::post_url(config, &summary.slug),
        }
    }

    pub fn from_post(config: &SiteConfig, post: &Post) -> Self {
        Self::from_summary(config, &post.summary())
    }
}

/// Tera filter: format an ISO date, `style` is `long` (default) or `short`
fn display_date_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("display_date", "value", String, value);
    let style = match args.get("style") {
        Some(val) => tera::try_get_value!("display_date", "style", String, val),
        None => "long".to_string(),
    };

    let style = match style.as_str() {
        "short" => DateStyle::Short,
        "long" => DateStyle::Long,
        other => {
            return Err(tera::Error::msg(format!(
                "display_date: unknown style {:?}, expected \"long\" or \"short\"",
                other
            )))
        }
    };

    Ok(tera::Value::String(helpers::display_date(&s, style)))
}
