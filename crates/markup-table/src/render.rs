//! Markup assembly.
//!
//! Walks the heading and rows in order and stitches the compiled fragments
//! around them. Output layout, with `NL` the configured newline:
//!
//! ```text
//! table_open NL
//! [NL <caption>…</caption> NL]
//! [thead_open NL heading_row_start NL <cells> heading_row_end NL thead_close NL]
//! [tbody_open NL (row_start NL <cells> row_end NL)* tbody_close NL]
//! table_close
//! ```
//!
//! Odd rows (1-based) use the primary row/cell fragments and even rows the
//! `_alt` ones.

use tracing::trace;

use crate::cell::{Cell, CellValue};
use crate::fragment::{splice_attributes, FragmentKey, FragmentSet};

/// Returned instead of markup when there is neither a heading nor any rows.
pub const UNDEFINED_TABLE: &str = "Undefined table data";

const CAPTION_OPEN: &str = "<caption>";
const CAPTION_CLOSE: &str = "</caption>";

/// A row of normalized cells.
pub type Row = Vec<Cell>;

/// Content transform applied to every non-empty body cell.
pub type CellTransform = Box<dyn Fn(&CellValue) -> String>;

/// Which fragment family a body row is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowVariant {
    Primary,
    Alt,
}

impl RowVariant {
    /// Variant for a 1-based row position: odd rows are primary.
    pub fn for_position(position: usize) -> Self {
        if position % 2 == 1 {
            RowVariant::Primary
        } else {
            RowVariant::Alt
        }
    }

    fn row_start(self) -> FragmentKey {
        match self {
            RowVariant::Primary => FragmentKey::RowStart,
            RowVariant::Alt => FragmentKey::RowAltStart,
        }
    }

    fn row_end(self) -> FragmentKey {
        match self {
            RowVariant::Primary => FragmentKey::RowEnd,
            RowVariant::Alt => FragmentKey::RowAltEnd,
        }
    }

    fn cell_start(self) -> FragmentKey {
        match self {
            RowVariant::Primary => FragmentKey::CellStart,
            RowVariant::Alt => FragmentKey::CellAltStart,
        }
    }

    fn cell_end(self) -> FragmentKey {
        match self {
            RowVariant::Primary => FragmentKey::CellEnd,
            RowVariant::Alt => FragmentKey::CellAltEnd,
        }
    }
}

/// Everything besides the table data that shapes the output.
pub(crate) struct Markup<'a> {
    pub fragments: &'a FragmentSet,
    pub newline: &'a str,
    pub empty: &'a str,
    pub transform: Option<&'a CellTransform>,
}

impl Markup<'_> {
    /// Assembles the table, or returns [`UNDEFINED_TABLE`] when there is
    /// nothing to show.
    pub fn render(&self, caption: Option<&str>, heading: &[Cell], rows: &[Row]) -> String {
        if heading.is_empty() && rows.is_empty() {
            return UNDEFINED_TABLE.to_string();
        }

        let nl = self.newline;
        let mut out = String::new();

        out.push_str(self.get(FragmentKey::TableOpen));
        out.push_str(nl);

        if let Some(caption) = caption.filter(|c| !c.is_empty()) {
            out.push_str(nl);
            out.push_str(CAPTION_OPEN);
            out.push_str(caption);
            out.push_str(CAPTION_CLOSE);
            out.push_str(nl);
        }

        if !heading.is_empty() {
            self.heading(&mut out, heading);
        }

        if !rows.is_empty() {
            out.push_str(self.get(FragmentKey::TbodyOpen));
            out.push_str(nl);
            for (index, row) in rows.iter().enumerate() {
                self.row(&mut out, row, RowVariant::for_position(index + 1));
            }
            out.push_str(self.get(FragmentKey::TbodyClose));
            out.push_str(nl);
        }

        out.push_str(self.get(FragmentKey::TableClose));
        trace!(
            heading = heading.len(),
            rows = rows.len(),
            bytes = out.len(),
            "assembled table markup"
        );
        out
    }

    fn get(&self, key: FragmentKey) -> &str {
        self.fragments.get(key)
    }

    fn heading(&self, out: &mut String, heading: &[Cell]) {
        let nl = self.newline;
        out.push_str(self.get(FragmentKey::TheadOpen));
        out.push_str(nl);
        out.push_str(self.get(FragmentKey::HeadingRowStart));
        out.push_str(nl);

        for cell in heading {
            let start = splice_attributes(
                self.get(FragmentKey::HeadingCellStart),
                "th",
                cell.attributes(),
            );
            out.push_str(&start);
            // Heading content is never substituted or transformed.
            out.push_str(&cell.data().to_string());
            out.push_str(self.get(FragmentKey::HeadingCellEnd));
        }

        out.push_str(self.get(FragmentKey::HeadingRowEnd));
        out.push_str(nl);
        out.push_str(self.get(FragmentKey::TheadClose));
        out.push_str(nl);
    }

    fn row(&self, out: &mut String, row: &[Cell], variant: RowVariant) {
        out.push_str(self.get(variant.row_start()));
        out.push_str(self.newline);

        for cell in row {
            let start = splice_attributes(self.get(variant.cell_start()), "td", cell.attributes());
            out.push_str(&start);
            self.cell_content(out, cell.data());
            out.push_str(self.get(variant.cell_end()));
        }

        out.push_str(self.get(variant.row_end()));
        out.push_str(self.newline);
    }

    fn cell_content(&self, out: &mut String, data: &CellValue) {
        if data.is_empty() {
            out.push_str(self.empty);
        } else if let Some(transform) = self.transform {
            out.push_str(&transform(data));
        } else {
            out.push_str(&data.to_string());
        }
    }
}
