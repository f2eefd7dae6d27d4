//! Exoplanet catalog: record model, name index and loading.
//!
//! A [`Catalog`] owns its planets as an immutable `Arc<[PlanetRecord]>`, so
//! handing it to the background pipeline is a reference-count bump and the
//! pipeline can never write back into presentation-owned data.

mod loader;
mod record;

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use loader::CatalogLoader;
pub use record::PlanetRecord;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::ExovizError;

/// On-disk / on-wire catalog layout: `{ "planets": [...] }`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    planets: Vec<PlanetRecord>,
}

/// Where a catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Local JSON file.
    File(PathBuf),
    /// Remote JSON document fetched over HTTP(S).
    Url(String),
}

impl CatalogSource {
    /// Classify a user-supplied string as URL or path.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        if input.starts_with("http://") || input.starts_with("https://") {
            Self::Url(input.to_owned())
        } else {
            Self::File(PathBuf::from(input))
        }
    }
}

/// Immutable planet catalog with a name index.
#[derive(Debug, Clone)]
pub struct Catalog {
    planets: Arc<[PlanetRecord]>,
    name_index: FxHashMap<String, Vec<usize>>,
}

impl Catalog {
    /// Build a catalog from records, keeping duplicates and input order.
    #[must_use]
    pub fn new(planets: Vec<PlanetRecord>) -> Self {
        let mut name_index: FxHashMap<String, Vec<usize>> =
            FxHashMap::default();
        for (i, p) in planets.iter().enumerate() {
            name_index.entry(p.name.clone()).or_default().push(i);
        }
        Self {
            planets: planets.into(),
            name_index,
        }
    }

    /// Catalog with no planets.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Parse `{ "planets": [...] }` JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ExovizError::CatalogParse`] when the document is not valid
    /// catalog JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ExovizError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Ok(Self::new(file.planets))
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ExovizError::Io`] if the file cannot be read, or
    /// [`ExovizError::CatalogParse`] if it is malformed.
    pub fn load(path: &Path) -> Result<Self, ExovizError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Fetch a catalog over HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`ExovizError::CatalogFetch`] on network or body errors, or
    /// [`ExovizError::CatalogParse`] if the response is malformed.
    #[cfg(feature = "fetch")]
    pub fn fetch(url: &str) -> Result<Self, ExovizError> {
        log::info!("Fetching planet catalog from {url}");
        let body = ureq::get(url)
            .call()
            .map_err(|e| ExovizError::CatalogFetch(e.to_string()))?
            .into_body()
            .read_to_string()
            .map_err(|e| ExovizError::CatalogFetch(e.to_string()))?;
        Self::from_json_str(&body)
    }

    /// Load from either a file or a URL.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`load`](Self::load) and `fetch`; URLs fail
    /// with [`ExovizError::CatalogFetch`] when built without the `fetch`
    /// feature.
    pub fn from_source(source: &CatalogSource) -> Result<Self, ExovizError> {
        match source {
            CatalogSource::File(path) => Self::load(path),
            #[cfg(feature = "fetch")]
            CatalogSource::Url(url) => Self::fetch(url),
            #[cfg(not(feature = "fetch"))]
            CatalogSource::Url(url) => Err(ExovizError::CatalogFetch(
                format!("cannot fetch {url}: built without the `fetch` feature"),
            )),
        }
    }

    /// Shared handle to the records. Cloning it is cheap.
    #[must_use]
    pub fn planets(&self) -> &Arc<[PlanetRecord]> {
        &self.planets
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.planets.len()
    }

    /// Whether the catalog has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }

    /// Indices of every record with this name, in catalog order.
    #[must_use]
    pub fn indices_by_name(&self, name: &str) -> &[usize] {
        self.name_index.get(name).map_or(&[][..], Vec::as_slice)
    }

    /// Every record with this name, in catalog order.
    pub fn find_by_name<'a>(
        &'a self,
        name: &str,
    ) -> impl Iterator<Item = &'a PlanetRecord> + 'a {
        let planets = &self.planets;
        self.indices_by_name(name)
            .iter()
            .filter_map(move |&i| planets.get(i))
    }

    /// Whether two catalogs share the same record storage.
    #[must_use]
    pub fn same_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.planets, &other.planets)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "planets": [
            {"pl_name": "A b", "pl_orbsmax": 1.0},
            {"pl_name": "B b", "pl_orbsmax": "2.5"},
            {"pl_name": "A b", "pl_orbsmax": 0.3}
        ]
    }"#;

    #[test]
    fn parses_and_keeps_duplicates() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.indices_by_name("A b"), &[0, 2]);
        let axes: Vec<_> = catalog
            .find_by_name("A b")
            .map(|p| p.semi_major_axis)
            .collect();
        assert_eq!(axes, vec![Some(1.0), Some(0.3)]);
        assert!(catalog.indices_by_name("missing").is_empty());
    }

    #[test]
    fn missing_planets_key_is_empty() {
        let catalog = Catalog::from_json_str("{}").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = Catalog::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ExovizError::CatalogParse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err =
            Catalog::load(Path::new("/nonexistent/exoviz/catalog.json"))
                .unwrap_err();
        assert!(matches!(err, ExovizError::Io(_)));
    }

    #[test]
    fn source_classification() {
        assert_eq!(
            CatalogSource::parse("https://example.org/c.json"),
            CatalogSource::Url("https://example.org/c.json".to_owned())
        );
        assert_eq!(
            CatalogSource::parse("data/c.json"),
            CatalogSource::File(PathBuf::from("data/c.json"))
        );
    }

    #[test]
    fn clones_share_storage() {
        let a = Catalog::from_json_str(SAMPLE).unwrap();
        let b = a.clone();
        let c = Catalog::from_json_str(SAMPLE).unwrap();
        assert!(a.same_storage(&b));
        assert!(!a.same_storage(&c));
    }
}
