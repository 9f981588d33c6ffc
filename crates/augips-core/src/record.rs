//! The flat store/POI record every scraper produces.

use serde::{Deserialize, Serialize};

/// Column names in CSV output order. Mirrors the field order of
/// [`LocationRecord`].
pub const CSV_HEADER: [&str; 8] = [
    "store_name",
    "address",
    "city",
    "state",
    "zip_code",
    "latitude",
    "longitude",
    "company_name",
];

/// A single store location. Every field is optional and unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub store_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub company_name: Option<String>,
}

impl LocationRecord {
    /// Build a fully-populated record from literal values.
    ///
    /// Used by the hardcoded fallback tables; `company_name` is filled in
    /// later by the owning scraper.
    #[must_use]
    pub fn sample(
        store_name: &str,
        address: &str,
        city: &str,
        state: &str,
        zip_code: &str,
        latitude: &str,
        longitude: &str,
    ) -> Self {
        Self {
            store_name: Some(store_name.to_string()),
            address: Some(address.to_string()),
            city: Some(city.to_string()),
            state: Some(state.to_string()),
            zip_code: Some(zip_code.to_string()),
            latitude: Some(latitude.to_string()),
            longitude: Some(longitude.to_string()),
            company_name: None,
        }
    }

    /// Same as [`LocationRecord::sample`] but with coordinates left unset.
    #[must_use]
    pub fn without_coordinates(
        store_name: &str,
        address: &str,
        city: &str,
        state: &str,
        zip_code: &str,
    ) -> Self {
        Self {
            latitude: None,
            longitude: None,
            ..Self::sample(store_name, address, city, state, zip_code, "", "")
        }
    }

    /// Returns a copy with `company_name` set.
    #[must_use]
    pub fn with_company(mut self, company_name: &str) -> Self {
        self.company_name = Some(company_name.to_string());
        self
    }

    /// `true` only when both coordinates are present and non-blank.
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.latitude) && present(&self.longitude)
    }

    /// Free-text address suitable for a geocoding lookup:
    /// `"{address}, {city}, {state} {zip_code}"`, missing parts left blank.
    #[must_use]
    pub fn geocode_query(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.address.as_deref().unwrap_or(""),
            self.city.as_deref().unwrap_or(""),
            self.state.as_deref().unwrap_or(""),
            self.zip_code.as_deref().unwrap_or(""),
        )
    }
}
