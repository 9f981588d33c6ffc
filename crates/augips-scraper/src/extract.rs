//! HTML extraction helpers built on the `scraper` crate.

use augips_core::LocationRecord;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;

/// Container selectors used by the store-locator markup most retailer pages share.
pub const STORE_CONTAINER_SELECTOR: &str = ".store-location, .store-list-item, .store-info";

/// An anchor element's visible text and `href`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub text: String,
    pub href: Option<String>,
}

/// Compile a CSS selector, mapping parse failures to [`ScraperError::Selector`].
///
/// # Errors
///
/// Returns [`ScraperError::Selector`] when `css` is not a valid selector.
pub fn parse_selector(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

/// Text content of an element with runs of whitespace collapsed.
#[must_use]
pub fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Contents of the document's `<title>`, if any.
#[must_use]
pub fn page_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|t| element_text(&t))
        .filter(|t| !t.is_empty())
}

/// Number of elements matching `css`.
///
/// # Errors
///
/// Returns [`ScraperError::Selector`] when `css` is not a valid selector.
pub fn select_count(html: &str, css: &str) -> Result<usize, ScraperError> {
    let selector = parse_selector(css)?;
    let document = Html::parse_document(html);
    Ok(document.select(&selector).count())
}

/// Every element matching `css` as a [`Link`], in document order.
///
/// # Errors
///
/// Returns [`ScraperError::Selector`] when `css` is not a valid selector.
pub fn select_links(html: &str, css: &str) -> Result<Vec<Link>, ScraperError> {
    let selector = parse_selector(css)?;
    let document = Html::parse_document(html);
    Ok(document
        .select(&selector)
        .map(|el| Link {
            text: element_text(&el),
            href: el.value().attr("href").map(str::to_string),
        })
        .collect())
}

/// Parse store cards of the shape
///
/// ```html
/// <div class="store-location" data-lat="34.07" data-lng="-118.40">
///   <span class="store-name">..</span> <span class="address">..</span>
///   <span class="city">..</span> <span class="state">..</span> <span class="zip">..</span>
/// </div>
/// ```
///
/// Cards without a store name are skipped. Coordinates come from the
/// `data-lat`/`data-lng` attributes when present.
///
/// # Errors
///
/// Returns [`ScraperError::Selector`] when `container_css` is not a valid selector.
pub fn parse_store_elements(
    html: &str,
    container_css: &str,
) -> Result<Vec<LocationRecord>, ScraperError> {
    let container = parse_selector(container_css)?;
    let name_sel = parse_selector(".store-name")?;
    let address_sel = parse_selector(".address")?;
    let city_sel = parse_selector(".city")?;
    let state_sel = parse_selector(".state")?;
    let zip_sel = parse_selector(".zip")?;

    let document = Html::parse_document(html);
    let child_text = |card: &ElementRef<'_>, sel: &Selector| {
        card.select(sel)
            .next()
            .map(|el| element_text(&el))
            .filter(|s| !s.is_empty())
    };
    let attr = |card: &ElementRef<'_>, name: &str| {
        card.value()
            .attr(name)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let records = document
        .select(&container)
        .filter_map(|card| {
            let store_name = child_text(&card, &name_sel)?;
            Some(LocationRecord {
                store_name: Some(store_name),
                address: child_text(&card, &address_sel),
                city: child_text(&card, &city_sel),
                state: child_text(&card, &state_sel),
                zip_code: child_text(&card, &zip_sel),
                latitude: attr(&card, "data-lat"),
                longitude: attr(&card, "data-lng"),
                company_name: None,
            })
        })
        .collect();

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORE_PAGE: &str = r#"
        <html><head><title>  Store   Locator </title></head><body>
        <ul>
          <li class="store-list-item" data-lat="34.0736" data-lng="-118.4004">
            <span class="store-name">AutoZone #1234</span>
            <span class="address">123 Main St</span>
            <span class="city">Beverly Hills</span>
            <span class="state">CA</span>
            <span class="zip">90210</span>
          </li>
          <li class="store-list-item">
            <span class="store-name">AutoZone #5678</span>
            <span class="address">456 Oak Ave</span>
            <span class="city">Beverly Hills</span>
          </li>
          <li class="store-list-item"><span class="address">no name here</span></li>
        </ul>
        </body></html>
    "#;

    #[test]
    fn page_title_collapses_whitespace() {
        assert_eq!(page_title(STORE_PAGE).as_deref(), Some("Store Locator"));
    }

    #[test]
    fn page_title_missing() {
        assert_eq!(page_title("<html><body></body></html>"), None);
    }

    #[test]
    fn parses_store_cards_and_skips_nameless_ones() {
        let records = parse_store_elements(STORE_PAGE, STORE_CONTAINER_SELECTOR).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.store_name.as_deref(), Some("AutoZone #1234"));
        assert_eq!(first.zip_code.as_deref(), Some("90210"));
        assert_eq!(first.latitude.as_deref(), Some("34.0736"));
        assert_eq!(first.longitude.as_deref(), Some("-118.4004"));

        let second = &records[1];
        assert_eq!(second.state, None);
        assert!(!second.has_coordinates());
    }

    #[test]
    fn select_links_returns_text_and_href() {
        let html = r#"<div class="country-list"><a href="/se">Sweden</a><a>Japan</a></div>"#;
        let links = select_links(html, ".country-list a").unwrap();
        assert_eq!(
            links,
            vec![
                Link {
                    text: "Sweden".to_string(),
                    href: Some("/se".to_string())
                },
                Link {
                    text: "Japan".to_string(),
                    href: None
                },
            ]
        );
    }

    #[test]
    fn select_count_counts_matches() {
        assert_eq!(select_count(STORE_PAGE, ".store-list-item").unwrap(), 3);
        assert_eq!(select_count(STORE_PAGE, ".wikitable").unwrap(), 0);
    }

    #[test]
    fn invalid_selector_is_reported() {
        let err = select_count(STORE_PAGE, "div[").unwrap_err();
        assert!(
            matches!(err, ScraperError::Selector { ref selector, .. } if selector == "div["),
            "expected Selector error, got: {err:?}"
        );
    }
}
