use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use wedding_core::SiteConfig;

pub fn run(explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => SiteConfig::config_path()?,
    };

    if !path.exists() {
        if explicit.is_some() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        SiteConfig::create_default_config(&path)?;
        println!("{}", format!("Created {}", path.display()).green());
    }

    let site = SiteConfig::load(Some(&path))?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", path.display());
    println!();
    println!("{}", "Site".bold());
    println!("  Couple:    {}", site.couple);
    println!("  Timezone:  {}", site.timezone);
    println!("  Bind:      {}", site.bind);
    println!("  Sessions:  {}", site.session_ttl);
    println!();
    println!("{}", "Pages".bold());
    for page in &site.pages {
        println!(
            "  /{:<12} {} {}",
            page.slug,
            page.events.join(", "),
            page.endpoint.as_str().dimmed()
        );
    }

    Ok(())
}
