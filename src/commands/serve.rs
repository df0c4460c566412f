use anyhow::Result;
use owo_colors::OwoColorize;
use wedding_core::SiteConfig;

pub async fn run(mut site: SiteConfig, bind: Option<String>) -> Result<()> {
    if let Some(bind) = bind {
        site.bind = bind;
    }

    println!("{} {}", site.couple.bold(), format!("http://{}", site.bind).dimmed());
    for page in &site.pages {
        println!("  /{:<12} {}", page.slug, page.heading.dimmed());
    }
    println!();

    wedding_server::serve(site).await
}
