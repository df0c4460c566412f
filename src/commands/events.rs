use anyhow::Result;
use owo_colors::OwoColorize;
use wedding_core::{SiteConfig, WeddingEvent};

use crate::render::Render;

pub fn run(site: &SiteConfig, page: Option<&str>) -> Result<()> {
    let mut events: Vec<&WeddingEvent> = match page {
        Some(slug) => site.page_events(site.page(slug)?)?,
        None => site.events.iter().collect(),
    };
    events.sort_by_key(|e| e.start);

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for (i, event) in events.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", event.render());

        let pages: Vec<&str> = site
            .pages
            .iter()
            .filter(|p| p.events.contains(&event.slug))
            .map(|p| p.slug.as_str())
            .collect();
        if !pages.is_empty() {
            println!("  {}", format!("[{}]", pages.join(", ")).dimmed());
        }
    }

    Ok(())
}
