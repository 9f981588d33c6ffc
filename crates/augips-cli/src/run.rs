//! Handlers for `augips run` and `augips inspect`.

use augips_core::AppConfig;
use augips_scraper::{run_named, Registry, RunOutcome, RunTarget, ScrapeContext};

pub(crate) async fn run(config: &AppConfig, target: &str, debug: bool) -> anyhow::Result<()> {
    let registry = Registry::with_defaults();

    if RunTarget::parse(target) == RunTarget::List {
        print_scraper_list(&registry);
        return Ok(());
    }

    let ctx = ScrapeContext::from_config(config, debug)?;
    if debug {
        tracing::debug!(debug_dir = %config.debug_dir.display(), "debug artifacts enabled");
    }

    let outcomes = match run_named(target, &registry, &ctx).await {
        Ok(outcomes) => outcomes,
        Err(e) => {
            print_scraper_list(&registry);
            return Err(e.into());
        }
    };

    print_summary(&outcomes);

    let failed = outcomes.iter().filter(|o| !o.succeeded()).count();
    if failed > 0 {
        println!("{failed} of {} scraper(s) failed; see log output", outcomes.len());
    }
    Ok(())
}

pub(crate) async fn inspect(config: &AppConfig, name: &str, debug: bool) -> anyhow::Result<()> {
    let registry = Registry::with_defaults();
    let Some(scraper) = registry.get(name) else {
        print_scraper_list(&registry);
        anyhow::bail!("unknown scraper '{name}'");
    };

    let ctx = ScrapeContext::from_config(config, debug)?;
    tracing::info!(scraper = scraper.name(), "inspecting scraper");
    let records = scraper.scrape(&ctx).await?;

    println!("{}: {} location(s)", scraper.company_name(), records.len());
    if let Some(first) = records.first() {
        println!("first record:");
        println!("{}", serde_json::to_string_pretty(first)?);
    }
    println!(
        "would write: {}",
        scraper.output_file(&ctx.data_dir).display()
    );
    Ok(())
}

fn print_scraper_list(registry: &Registry) {
    println!("Available scrapers:");
    for scraper in registry.iter() {
        println!("  {:<16} {}", scraper.name(), scraper.company_name());
    }
    println!("  {:<16} run every scraper", "all");
}

fn print_summary(outcomes: &[RunOutcome]) {
    println!("Run summary:");
    for outcome in outcomes {
        match (&outcome.error, &outcome.output_file) {
            (Some(error), _) => {
                println!("  \u{2717} {:<16} {error}", outcome.name);
            }
            (None, Some(path)) => {
                println!(
                    "  \u{2713} {:<16} {:>4} locations  {}",
                    outcome.name,
                    outcome.records.len(),
                    path.display()
                );
            }
            (None, None) => {
                println!("  - {:<16}    0 locations  (nothing written)", outcome.name);
            }
        }
    }
}
