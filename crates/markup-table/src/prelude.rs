//! Convenient imports for building tables.
//!
//! ```rust
//! use markup_table::prelude::*;
//!
//! let mut table = TableRenderer::new();
//! table.add_row(cells!["a", Cell::new("b").attr("class", "c")]);
//! assert!(table.generate().contains("<td class='c'>b</td>"));
//! ```

pub use crate::cells;
pub use crate::{
    Cell, CellValue, FragmentKey, RecordSet, TableConfig, TableError, TableRenderer,
    TabularSource, TemplateOverride,
};
