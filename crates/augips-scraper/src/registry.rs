//! Name → scraper lookup used by the CLI.

use crate::retailers::{
    AdvanceAutoPartsScraper, AutoZoneScraper, IkeaScraper, NapaScraper, OReillyScraper,
    OpenStreetMapScraper, PepBoysScraper, Scraper, SimpleScraper, WikipediaScraper,
};

/// Ordered set of scrapers keyed by [`Scraper::name`].
///
/// Lookup is case-insensitive; iteration follows registration order, which
/// is also the order `run all` executes in.
#[derive(Default)]
pub struct Registry {
    scrapers: Vec<Box<dyn Scraper>>,
}

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in scraper pointed at its production URLs.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SimpleScraper));
        registry.register(Box::new(AutoZoneScraper::new()));
        registry.register(Box::new(OReillyScraper::new()));
        registry.register(Box::new(AdvanceAutoPartsScraper::new()));
        registry.register(Box::new(NapaScraper::new()));
        registry.register(Box::new(PepBoysScraper::new()));
        registry.register(Box::new(IkeaScraper::new()));
        registry.register(Box::new(OpenStreetMapScraper::new()));
        registry.register(Box::new(WikipediaScraper::new()));
        registry
    }

    /// Add a scraper. A scraper with the same name replaces the earlier
    /// entry in place.
    pub fn register(&mut self, scraper: Box<dyn Scraper>) {
        if let Some(existing) = self
            .scrapers
            .iter_mut()
            .find(|s| s.name().eq_ignore_ascii_case(scraper.name()))
        {
            *existing = scraper;
        } else {
            self.scrapers.push(scraper);
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Scraper> {
        self.scrapers
            .iter()
            .find(|s| s.name().eq_ignore_ascii_case(name.trim()))
            .map(|s| &**s)
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.scrapers.iter().map(|s| s.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Scraper> {
        self.scrapers.iter().map(|s| &**s)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scrapers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scrapers.is_empty()
    }
}
