//! Fragment templates: the named markup snippets a table is assembled from.
//!
//! A table skin is a [`FragmentSet`] of exactly 18 fragments, one per
//! [`FragmentKey`]. Callers customize the skin with a [`TemplateOverride`]
//! naming only the fragments they want to change; [`compile`] fills in the
//! rest from the built-in defaults.
//!
//! ```rust
//! use markup_table::{compile, FragmentKey, TemplateOverride};
//!
//! let skin = TemplateOverride::new().set(FragmentKey::TableOpen, "<table class=\"grid\">");
//! let fragments = compile(Some(&skin));
//!
//! assert_eq!(fragments.get(FragmentKey::TableOpen), "<table class=\"grid\">");
//! assert_eq!(fragments.get(FragmentKey::TableClose), "</table>");
//! assert_eq!(fragments.len(), 18);
//! ```
//!
//! Overrides can also be loaded from YAML or JSON, the same way a theme file
//! would be:
//!
//! ```rust
//! use markup_table::{FragmentKey, TemplateOverride};
//!
//! let skin = TemplateOverride::from_yaml(r#"
//! table_open: <table class="zebra">
//! row_alt_start: <tr class="odd">
//! "#).unwrap();
//!
//! assert_eq!(skin.get(FragmentKey::RowAltStart), Some("<tr class=\"odd\">"));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::{Result, TableError};

/// Names of the 18 fragments that make up a table skin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FragmentKey {
    TableOpen,
    TableClose,
    TheadOpen,
    TheadClose,
    HeadingRowStart,
    HeadingRowEnd,
    HeadingCellStart,
    HeadingCellEnd,
    TbodyOpen,
    TbodyClose,
    RowStart,
    RowEnd,
    RowAltStart,
    RowAltEnd,
    CellStart,
    CellEnd,
    CellAltStart,
    CellAltEnd,
}

/// Number of fragments in a complete set.
pub const FRAGMENT_COUNT: usize = 18;

impl FragmentKey {
    /// Every key, in table order.
    pub const ALL: [FragmentKey; FRAGMENT_COUNT] = [
        FragmentKey::TableOpen,
        FragmentKey::TableClose,
        FragmentKey::TheadOpen,
        FragmentKey::TheadClose,
        FragmentKey::HeadingRowStart,
        FragmentKey::HeadingRowEnd,
        FragmentKey::HeadingCellStart,
        FragmentKey::HeadingCellEnd,
        FragmentKey::TbodyOpen,
        FragmentKey::TbodyClose,
        FragmentKey::RowStart,
        FragmentKey::RowEnd,
        FragmentKey::RowAltStart,
        FragmentKey::RowAltEnd,
        FragmentKey::CellStart,
        FragmentKey::CellEnd,
        FragmentKey::CellAltStart,
        FragmentKey::CellAltEnd,
    ];

    /// The snake_case name used in template files.
    pub fn as_str(&self) -> &'static str {
        match self {
            FragmentKey::TableOpen => "table_open",
            FragmentKey::TableClose => "table_close",
            FragmentKey::TheadOpen => "thead_open",
            FragmentKey::TheadClose => "thead_close",
            FragmentKey::HeadingRowStart => "heading_row_start",
            FragmentKey::HeadingRowEnd => "heading_row_end",
            FragmentKey::HeadingCellStart => "heading_cell_start",
            FragmentKey::HeadingCellEnd => "heading_cell_end",
            FragmentKey::TbodyOpen => "tbody_open",
            FragmentKey::TbodyClose => "tbody_close",
            FragmentKey::RowStart => "row_start",
            FragmentKey::RowEnd => "row_end",
            FragmentKey::RowAltStart => "row_alt_start",
            FragmentKey::RowAltEnd => "row_alt_end",
            FragmentKey::CellStart => "cell_start",
            FragmentKey::CellEnd => "cell_end",
            FragmentKey::CellAltStart => "cell_alt_start",
            FragmentKey::CellAltEnd => "cell_alt_end",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FragmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FragmentKey {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        FragmentKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| TableError::InvalidTemplate(format!("unknown fragment '{}'", s)))
    }
}

/// The baseline table skin, indexed by [`FragmentKey`] discriminant.
const DEFAULT_FRAGMENTS: [&str; FRAGMENT_COUNT] = [
    r#"<table border="0" cellpadding="4" cellspacing="0">"#,
    "</table>",
    "<thead>",
    "</thead>",
    "<tr>",
    "</tr>",
    "<th>",
    "</th>",
    "<tbody>",
    "</tbody>",
    "<tr>",
    "</tr>",
    "<tr>",
    "</tr>",
    "<td>",
    "</td>",
    "<td>",
    "</td>",
];

/// A complete set of 18 fragments.
///
/// Only [`compile`] and [`FragmentSet::default`] produce one, so every key is
/// always present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FragmentSet {
    fragments: [Cow<'static, str>; FRAGMENT_COUNT],
}

impl Default for FragmentSet {
    fn default() -> Self {
        FragmentSet {
            fragments: DEFAULT_FRAGMENTS.map(Cow::Borrowed),
        }
    }
}

impl FragmentSet {
    /// Returns the fragment for `key`.
    pub fn get(&self, key: FragmentKey) -> &str {
        &self.fragments[key.index()]
    }

    /// Always 18.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// A compiled set is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates `(key, fragment)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (FragmentKey, &str)> + '_ {
        FragmentKey::ALL
            .iter()
            .map(move |&key| (key, self.get(key)))
    }
}

/// A partial fragment set supplied by the caller.
///
/// Any subset of the 18 keys may be set; the rest fall back to defaults at
/// compile time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateOverride {
    fragments: IndexMap<FragmentKey, String>,
}

impl TemplateOverride {
    /// Creates an empty override.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one fragment, returning the override for chaining.
    pub fn set(mut self, key: FragmentKey, fragment: impl Into<String>) -> Self {
        self.insert(key, fragment);
        self
    }

    /// Sets one fragment in place.
    pub fn insert(&mut self, key: FragmentKey, fragment: impl Into<String>) {
        self.fragments.insert(key, fragment.into());
    }

    /// Returns the overridden fragment for `key`, if any.
    pub fn get(&self, key: FragmentKey) -> Option<&str> {
        self.fragments.get(&key).map(String::as_str)
    }

    /// Number of overridden fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns `true` when nothing is overridden.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Builds an override from an untyped JSON value.
    ///
    /// The root must be an object. Unknown keys are ignored; known keys must
    /// map to strings.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidTemplate`] for a non-object root or a
    /// non-string fragment.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| {
            TableError::InvalidTemplate(format!("expected a mapping, got {}", json_kind(value)))
        })?;

        let mut template = TemplateOverride::new();
        for (name, fragment) in map {
            let Ok(key) = name.parse::<FragmentKey>() else {
                trace!(name = %name, "ignoring unknown fragment key");
                continue;
            };
            let fragment = fragment.as_str().ok_or_else(|| {
                TableError::InvalidTemplate(format!("fragment '{}' must be a string", name))
            })?;
            template.insert(key, fragment);
        }
        Ok(template)
    }

    /// Parses an override from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Parses an override from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let value: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_value(&value)
    }

    /// Loads an override from a `.yaml`, `.yml` or `.json` file.
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

impl<'de> serde::Deserialize<'de> for TemplateOverride {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        TemplateOverride::from_value(&value).map_err(serde::de::Error::custom)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

/// Resolves the active fragment set.
///
/// Without an override the defaults are returned verbatim. With one, each of
/// the 18 keys takes the override's fragment if present and the default
/// otherwise.
pub fn compile(template: Option<&TemplateOverride>) -> FragmentSet {
    let mut set = FragmentSet::default();
    let Some(template) = template else {
        return set;
    };

    for (key, fragment) in &template.fragments {
        set.fragments[key.index()] = Cow::Owned(fragment.clone());
    }
    debug!(overridden = template.len(), "compiled fragment set");
    set
}

/// Injects attributes into the first `<tag` opening in `fragment`.
///
/// Attributes are written as ` key='value'` directly after the tag name, in
/// iteration order. Only the first whole-name occurrence of the tag is
/// touched (`th` does not match `<thead`); later occurrences in the same
/// fragment are left alone, and a fragment without the tag is returned as is.
pub(crate) fn splice_attributes<'a, I, K, V>(fragment: &'a str, tag: &str, attributes: I) -> Cow<'a, str>
where
    I: IntoIterator<Item = (K, V)>,
    K: fmt::Display,
    V: fmt::Display,
{
    let mut attributes = attributes.into_iter().peekable();
    if attributes.peek().is_none() {
        return Cow::Borrowed(fragment);
    }

    let Some(at) = find_opening_tag(fragment, tag) else {
        return Cow::Borrowed(fragment);
    };

    let mut out = String::with_capacity(fragment.len() + 32);
    out.push_str(&fragment[..at]);
    for (name, value) in attributes {
        out.push_str(&format!(" {}='{}'", name, value));
    }
    out.push_str(&fragment[at..]);
    Cow::Owned(out)
}

/// Byte offset just past `<tag` for the first whole-name match.
fn find_opening_tag(fragment: &str, tag: &str) -> Option<usize> {
    let needle = format!("<{}", tag);
    let mut from = 0;
    while let Some(pos) = fragment[from..].find(&needle) {
        let end = from + pos + needle.len();
        match fragment[end..].chars().next() {
            None => return Some(end),
            Some(c) if c.is_whitespace() || c == '>' || c == '/' => return Some(end),
            _ => from = end,
        }
    }
    None
}
