use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use wedding_core::SiteConfig;
use wedding_core::calendar::generate_ics;

pub fn run(site: &SiteConfig, page: &str, output: Option<&Path>) -> Result<()> {
    let page = site.page(page)?;
    let events = site.page_events(page)?;
    let ics = generate_ics(&events, site.timezone, &site.title)?;

    match output {
        Some(path) => {
            std::fs::write(path, &ics)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{}",
                format!("Wrote {} event(s) to {}", events.len(), path.display()).green()
            );
        }
        None => print!("{}", ics),
    }

    Ok(())
}
