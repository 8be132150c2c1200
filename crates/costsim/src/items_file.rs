//! Item file loading
//!
//! The item file is YAML with two ordered lists:
//!
//! ```yaml
//! costs:
//!   - name: soil
//!     probability: 1.0
//!     values: [1800.0, 2000.0, 2500.0]
//! risks:
//!   - name: permit_issues
//!     probability: 0.10
//!     values: [2000.0, 3000.0, 7000.0]
//! ```
//!
//! Entries are validated while deserializing, so a loaded file always holds
//! well-formed collections.

use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use costsim_core::config::{reference_costs, reference_risks};
use costsim_core::{ItemCollection, ItemError};
use serde::Deserialize;

/// Cost and risk collections for one run
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemsFile {
    #[serde(default)]
    pub costs: ItemCollection,
    #[serde(default)]
    pub risks: ItemCollection,
}

/// Where the loaded items came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemsSource {
    File(PathBuf),
    Reference,
}

impl ItemsFile {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    /// The built-in construction project
    pub fn reference() -> Result<Self, ItemError> {
        Ok(Self {
            costs: reference_costs()?,
            risks: reference_risks()?,
        })
    }

    /// `<config dir>/costsim/items.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("costsim").join("items.yaml"))
    }

    pub fn read(path: &Path) -> color_eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read item file {}", path.display()))?;
        Self::from_yaml(&content)
            .wrap_err_with(|| format!("invalid item file {}", path.display()))
    }

    /// Load from an explicit path, else the default path if present, else the reference data
    pub fn load(explicit: Option<&Path>) -> color_eyre::Result<(Self, ItemsSource)> {
        if let Some(path) = explicit {
            return Ok((Self::read(path)?, ItemsSource::File(path.to_path_buf())));
        }

        if let Some(path) = Self::default_path()
            && path.is_file()
        {
            return Ok((Self::read(&path)?, ItemsSource::File(path)));
        }

        tracing::debug!("no item file found, using reference collections");
        Ok((Self::reference()?, ItemsSource::Reference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = "\
costs:
  - name: soil
    probability: 1.0
    values: [1800.0, 2000.0, 2500.0]
  - name: edification
    probability: 1.0
    values: [4500.0, 5000.0, 6250.0]
risks:
  - name: regulatory_risks
    probability: 0.6
    values: [1000.0, 1500.0, 6000.0]
";

    #[test]
    fn test_from_yaml_preserves_order() {
        let file = ItemsFile::from_yaml(SAMPLE).unwrap();
        let names: Vec<&str> = file.costs.names().collect();
        assert_eq!(names, vec!["soil", "edification"]);
        assert_eq!(file.risks.len(), 1);
        assert_eq!(
            file.risks.get("regulatory_risks").unwrap().probability(),
            0.6
        );
    }

    #[test]
    fn test_from_yaml_rejects_reversed_triple() {
        let yaml = "\
costs:
  - name: broken
    probability: 1.0
    values: [5.0, 25.0, 20.0]
";
        assert!(ItemsFile::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_from_yaml_rejects_bad_probability() {
        let yaml = "\
risks:
  - name: impossible
    probability: 1.5
    values: [1.0, 2.0, 3.0]
";
        assert!(ItemsFile::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_missing_section_is_empty() {
        let yaml = "\
costs:
  - name: it
    probability: 1.0
    values: [900.0, 1000.0, 1250.0]
";
        let file = ItemsFile::from_yaml(yaml).unwrap();
        assert_eq!(file.costs.len(), 1);
        assert!(file.risks.is_empty());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("items.yaml");
        std::fs::write(&path, SAMPLE).unwrap();

        let (file, source) = ItemsFile::load(Some(&path)).unwrap();
        assert_eq!(source, ItemsSource::File(path));
        assert_eq!(file.costs.len(), 2);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempdir().unwrap();
        assert!(ItemsFile::load(Some(&dir.path().join("nope.yaml"))).is_err());
    }

    #[test]
    fn test_reference_items() {
        let file = ItemsFile::reference().unwrap();
        assert_eq!(file.costs.len(), 8);
        assert_eq!(file.risks.len(), 10);
    }
}
