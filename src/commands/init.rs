//! Initialize a new site

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# Site
title: Portfolio
author: Anonymous
description: ''

# URL
url: http://localhost:4000
root: /
blog_dir: blog

# Directory
posts_dir: posts
static_dir: static
public_dir: public

# Writing
highlight:
  theme: base16-ocean.dark
  line_number: false
"#;

const SAMPLE_POST: &str = r#"---
title: "Hello World"
date: "{date}"
excerpt: "The first post on this site."
tags: ["intro"]
---

Welcome! This post lives in `posts/hello-world.mdx`.

## Writing posts

```bash
$ folio-rs new
```

## Previewing

```bash
$ folio-rs server
```

## Building

```bash
$ folio-rs generate
```
"#;

/// Initialize a new site in the given directory
///
/// Refuses to touch a directory that already has a site config.
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        bail!("{:?} already exists, refusing to overwrite", config_path);
    }

    fs::create_dir_all(target_dir.join("posts"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    fs::write(&config_path, DEFAULT_CONFIG)?;

    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    fs::write(
        target_dir.join("posts/hello-world.mdx"),
        SAMPLE_POST.replace("{date}", &today),
    )?;

    tracing::debug!("Scaffolded site in {:?}", target_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Site;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_working_site() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("my-site");
        init_site(&target).unwrap();

        let site = Site::new(&target).unwrap();
        assert_eq!(site.config.title, "Portfolio");

        let summaries = site.repository().list_summaries();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].slug, "hello-world");
        assert_eq!(summaries[0].title, "Hello World");
        assert_eq!(summaries[0].tags, vec!["intro"]);
        assert!(target.join("static").is_dir());
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let tmp = TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();
        assert!(init_site(tmp.path()).is_err());
    }
}
