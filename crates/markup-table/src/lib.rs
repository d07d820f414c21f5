//! # Markup Table - HTML tables from rows and fragment templates
//!
//! `markup-table` turns a heading, rows and an optional caption into HTML
//! table markup. The markup is assembled from 18 named fragments (table,
//! thead, tbody, row and cell open/close tags, plus alternate variants for
//! even rows) that callers can partially override.
//!
//! Cell content is emitted verbatim. Escape it before handing it over.
//!
//! ## Core Concepts
//!
//! - [`TableRenderer`]: Holds heading, rows and settings; renders markup
//! - [`Cell`] / [`CellValue`]: Cell content plus `key='value'` attributes
//! - [`cells!`]: Discrete values of mixed types as one row
//! - [`TemplateOverride`] / [`compile`]: Partial skins merged over the defaults
//! - [`TabularSource`] / [`RecordSet`]: Query-like inputs (CSV, JSON, custom)
//! - [`TableConfig`]: YAML/JSON settings file
//!
//! ## Quick Start
//!
//! ```rust
//! use markup_table::TableRenderer;
//!
//! let mut table = TableRenderer::new();
//! table.set_heading(["A", "B"]);
//! table.add_row(["x", "y"]);
//!
//! assert_eq!(
//!     table.generate(),
//!     "<table border=\"0\" cellpadding=\"4\" cellspacing=\"0\">\n\
//!      <thead>\n<tr>\n<th>A</th><th>B</th></tr>\n</thead>\n\
//!      <tbody>\n<tr>\n<td>x</td><td>y</td></tr>\n</tbody>\n\
//!      </table>"
//! );
//! ```
//!
//! ## Data at Render Time
//!
//! With no heading set, the first of several rows becomes the heading:
//!
//! ```rust
//! use markup_table::TableRenderer;
//!
//! let mut table = TableRenderer::new();
//! let html = table.generate_rows(vec![
//!     vec!["Name", "Qty"],
//!     vec!["bolts", "12"],
//!     vec!["nuts", "40"],
//! ]);
//! assert!(html.contains("<th>Name</th><th>Qty</th>"));
//! ```
//!
//! ## Custom Skins
//!
//! ```rust
//! use markup_table::{FragmentKey, TableRenderer, TemplateOverride};
//!
//! let mut table = TableRenderer::new();
//! table.set_template(
//!     TemplateOverride::new()
//!         .set(FragmentKey::TableOpen, "<table class=\"striped\">")
//!         .set(FragmentKey::RowAltStart, "<tr class=\"alt\">"),
//! );
//! table.add_row(["one"]);
//! table.add_row(["two"]);
//!
//! let html = table.generate();
//! assert!(html.starts_with("<table class=\"striped\">"));
//! assert!(html.contains("<tr class=\"alt\">\n<td>two</td>"));
//! ```
//!
//! ## Attributes
//!
//! Attributes are written right after the tag name of the first `<th>` or
//! `<td>` in the cell's opening fragment, in insertion order. A fragment that
//! opens the same tag twice only gets them on the first.

mod cell;
mod columns;
mod config;
mod error;
mod fragment;
pub mod prelude;
mod render;
mod source;
mod table;

pub use cell::{normalize, Cell, CellInput, CellValue, DATA_KEY};
pub use columns::{make_columns, Columns, FILLER};
pub use config::TableConfig;
pub use error::{Result, TableError};
pub use fragment::{compile, FragmentKey, FragmentSet, TemplateOverride, FRAGMENT_COUNT};
pub use render::{CellTransform, Row, RowVariant, UNDEFINED_TABLE};
pub use source::{Record, RecordSet, TabularSource};
pub use table::TableRenderer;
