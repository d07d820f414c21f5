//! File-based table configuration.
//!
//! A configuration file carries everything about a table except its data:
//! fragment overrides, caption, empty-cell marker, newline and whether the
//! first ingested row may become the heading.
//!
//! ```rust
//! use markup_table::{TableConfig, TableRenderer};
//!
//! let config = TableConfig::from_yaml(r#"
//! caption: Inventory
//! empty: "&ndash;"
//! template:
//!   table_open: <table class="inventory">
//! "#).unwrap();
//!
//! let mut table = TableRenderer::from_config(&config);
//! table.add_row(["bolts", ""]);
//! let html = table.generate();
//! assert!(html.starts_with("<table class=\"inventory\">"));
//! assert!(html.contains("<td>&ndash;</td>"));
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, TableError};
use crate::fragment::TemplateOverride;

/// Table settings loadable from YAML or JSON.
///
/// Unset fields leave the renderer's defaults alone.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// Fragment overrides.
    pub template: Option<TemplateOverride>,
    /// Caption text.
    pub caption: Option<String>,
    /// Marker for empty body cells.
    pub empty: Option<String>,
    /// Newline inserted after structural fragments.
    pub newline: Option<String>,
    /// Whether the first ingested row may become the heading.
    pub auto_heading: Option<bool>,
}

impl TableConfig {
    /// Parses a configuration from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a `.yaml`, `.yml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Config`] if the file cannot be read or has an
    /// unsupported extension, and a parse error if its content is invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| TableError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            Some("json") => Self::from_json(&content),
            _ => Err(TableError::Config {
                path: path.to_path_buf(),
                message: "expected a .yaml, .yml or .json file".to_string(),
            }),
        }
    }
}
