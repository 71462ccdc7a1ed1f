//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Site;

/// Delete the generated public directory
pub fn run(site: &Site) -> Result<()> {
    if site.public_dir.exists() {
        fs::remove_dir_all(&site.public_dir)?;
        tracing::info!("Deleted: {:?}", site.public_dir);
    } else {
        tracing::debug!("Nothing to clean at {:?}", site.public_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_public_only() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        fs::create_dir_all(site.public_dir.join("blog")).unwrap();
        fs::create_dir_all(&site.posts_dir).unwrap();

        run(&site).unwrap();
        assert!(!site.public_dir.exists());
        assert!(site.posts_dir.exists());

        // Second run is a no-op
        run(&site).unwrap();
    }
}
