//! Catalog loading (JSON)

use super::Catalog;
use super::error::CatalogError;
use std::path::Path;

impl Catalog {
    /// Parse a catalog document. Ids are normalized while parsing.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.display(),
            services = catalog.services.len(),
            factors = catalog.factors.len(),
            options = catalog.options.len(),
            rules = catalog.dependency_rules.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Load and reject the catalog if validation finds anything
    pub fn load_strict(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let catalog = Self::load(path)?;
        let issues = catalog.validate();
        if issues.is_empty() {
            Ok(catalog)
        } else {
            Err(CatalogError::Invalid(issues))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"{
        "services": [{"id": "1", "name": "Bookkeeping", "base_price": 120}],
        "factors": [{"id": 1, "service_id": 1, "name": "Transactions", "factor_type": "select"}],
        "options": [{"id": 1, "factor_id": "1", "label": "Up to 100", "price_impact": 0}]
    }"#;

    #[test]
    fn test_from_json_str_defaults_missing_tables() {
        let catalog = Catalog::from_json_str(MINIMAL).unwrap();
        assert_eq!(catalog.services[0].id, 1);
        assert!(catalog.services[0].is_active);
        assert!(catalog.addons.is_empty());
        assert!(catalog.dependency_rules.is_empty());
    }

    #[test]
    fn test_parse_error() {
        let err = Catalog::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.factors.len(), 1);

        let strict = Catalog::load_strict(file.path()).unwrap();
        assert_eq!(strict, catalog);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_load_strict_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"services": [{"id": 1, "name": "Broken", "base_price": -5}]}"#)
            .unwrap();
        let err = Catalog::load_strict(file.path()).unwrap_err();
        match err {
            CatalogError::Invalid(issues) => assert_eq!(issues.len(), 1),
            other => panic!("expected invalid catalog, got {:?}", other),
        }
    }
}
