//! Generate static files

use anyhow::Result;
use notify::{RecursiveMode, Watcher};
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::generator::{GenerateReport, Generator};
use crate::{Site, CONFIG_FILE};

/// Generate the static site
pub fn run(site: &Site) -> Result<()> {
    generate(site).map(|_| ())
}

/// Generate and report what was written
pub fn generate(site: &Site) -> Result<GenerateReport> {
    let start = Instant::now();

    let report = Generator::new(site)?.generate()?;

    tracing::info!(
        "Generated {} post pages ({} listed) and copied {} assets in {:.2}s",
        report.pages,
        report.listed,
        report.assets,
        start.elapsed().as_secs_f64()
    );

    Ok(report)
}

/// Watch for file changes and regenerate
pub fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    // The posts directory may not exist yet on a fresh site
    if site.posts_dir.exists() {
        watcher.watch(&site.posts_dir, RecursiveMode::NonRecursive)?;
    }
    if site.static_dir.exists() {
        watcher.watch(&site.static_dir, RecursiveMode::Recursive)?;
    }
    let config_path = site.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        watcher.watch(&config_path, RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Debounce: only rebuild if more than 500ms since last rebuild
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    if let Err(e) = reload(site).and_then(|site| run(&site)) {
                        tracing::error!("Generation failed: {}", e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// Re-read the config so edits to `_config.yml` take effect while watching
fn reload(site: &Site) -> Result<Site> {
    Site::new(&site.base_dir)
}
