//! The table renderer: state, configuration and data ingestion.

use std::fmt;

use tracing::{debug, warn};

use crate::cell::{normalize, Cell, CellInput, CellValue};
use crate::columns::{make_columns, Columns};
use crate::config::TableConfig;
use crate::error::{Result, TableError};
use crate::fragment::{compile, TemplateOverride};
use crate::render::{CellTransform, Markup, Row};
use crate::source::TabularSource;

const DEFAULT_NEWLINE: &str = "\n";

/// Builds HTML table markup from a heading, rows and an optional caption.
///
/// Data can be set directly with [`set_heading`](Self::set_heading) and
/// [`add_row`](Self::add_row), or handed over at render time with
/// [`generate_rows`](Self::generate_rows) and
/// [`generate_source`](Self::generate_source). Template, caption, empty-cell
/// marker, newline and cell transform persist across [`clear`](Self::clear);
/// heading and rows do not.
///
/// A renderer is plain owned state. Give each table its own instance.
///
/// # Example
///
/// ```rust
/// use markup_table::{cells, Cell, TableRenderer};
///
/// let mut table = TableRenderer::new();
/// table.set_heading(["Name", "Color", "Size"]);
/// table.add_row(["Fred", "Blue", "Small"]);
/// table.add_row(cells!["Mary", Cell::new("Red").attr("class", "highlight"), "Large"]);
///
/// let html = table.generate();
/// assert!(html.contains("<th>Name</th><th>Color</th><th>Size</th>"));
/// assert!(html.contains("<td class='highlight'>Red</td>"));
/// ```
pub struct TableRenderer {
    rows: Vec<Row>,
    heading: Row,
    auto_heading: bool,
    caption: Option<String>,
    template: Option<TemplateOverride>,
    newline: String,
    empty: String,
    transform: Option<CellTransform>,
}

impl Default for TableRenderer {
    fn default() -> Self {
        TableRenderer {
            rows: Vec::new(),
            heading: Vec::new(),
            auto_heading: true,
            caption: None,
            template: None,
            newline: DEFAULT_NEWLINE.to_string(),
            empty: String::new(),
            transform: None,
        }
    }
}

impl fmt::Debug for TableRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableRenderer")
            .field("rows", &self.rows)
            .field("heading", &self.heading)
            .field("auto_heading", &self.auto_heading)
            .field("caption", &self.caption)
            .field("template", &self.template)
            .field("newline", &self.newline)
            .field("empty", &self.empty)
            .field("transform", &self.transform.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl TableRenderer {
    /// Creates a renderer with the default skin and no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer with settings from a [`TableConfig`].
    pub fn from_config(config: &TableConfig) -> Self {
        let mut table = Self::new();
        table.apply_config(config);
        table
    }

    /// Applies every setting present in `config`, leaving the rest alone.
    pub fn apply_config(&mut self, config: &TableConfig) {
        if let Some(template) = &config.template {
            self.set_template(template.clone());
        }
        if let Some(caption) = &config.caption {
            self.set_caption(caption.clone());
        }
        if let Some(empty) = &config.empty {
            self.set_empty(empty.clone());
        }
        if let Some(newline) = &config.newline {
            self.set_newline(newline.clone());
        }
        if let Some(auto_heading) = config.auto_heading {
            self.auto_heading = auto_heading;
        }
    }

    /// Sets the fragment overrides used at render time.
    pub fn set_template(&mut self, template: TemplateOverride) {
        self.template = Some(template);
    }

    /// Sets the fragment overrides from an untyped JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidTemplate`] for anything but an object of
    /// strings; the current template is kept.
    pub fn set_template_value(&mut self, value: &serde_json::Value) -> Result<()> {
        let template = TemplateOverride::from_value(value).inspect_err(|err| {
            warn!(error = %err, "template rejected");
        })?;
        self.set_template(template);
        Ok(())
    }

    /// Returns the fragment overrides, if any were set.
    pub fn template(&self) -> Option<&TemplateOverride> {
        self.template.as_ref()
    }

    /// Replaces the heading.
    ///
    /// Accepts any iterable of values or cells; use [`cells!`](crate::cells)
    /// for discrete values of mixed types.
    pub fn set_heading<I>(&mut self, cells: I)
    where
        I: IntoIterator,
        I::Item: Into<CellInput>,
    {
        self.heading = normalize(cells);
    }

    /// Appends a body row.
    pub fn add_row<I>(&mut self, cells: I)
    where
        I: IntoIterator,
        I::Item: Into<CellInput>,
    {
        self.rows.push(normalize(cells));
    }

    /// Reshapes a flat list into rows of `limit` items. See
    /// [`make_columns`](crate::make_columns).
    ///
    /// Turns off auto-heading, since a reshaped list has no heading row.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::EmptyInput`] for an empty list, leaving the
    /// renderer unchanged.
    pub fn make_columns<T: From<&'static str>>(
        &mut self,
        items: Vec<T>,
        limit: usize,
    ) -> Result<Columns<T>> {
        let columns = make_columns(items, limit)?;
        self.auto_heading = false;
        Ok(columns)
    }

    /// Sets the marker emitted for empty body cells.
    pub fn set_empty(&mut self, marker: impl Into<String>) {
        self.empty = marker.into();
    }

    /// Sets the caption.
    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = Some(caption.into());
    }

    /// Sets the newline inserted after structural fragments.
    pub fn set_newline(&mut self, newline: impl Into<String>) {
        self.newline = newline.into();
    }

    /// Sets a transform applied to every non-empty body cell.
    ///
    /// ```rust
    /// use markup_table::TableRenderer;
    ///
    /// let mut table = TableRenderer::new();
    /// table.set_cell_transform(|value| value.to_string().to_uppercase());
    /// table.add_row(["quiet"]);
    /// assert!(table.generate().contains("<td>QUIET</td>"));
    /// ```
    pub fn set_cell_transform<F>(&mut self, transform: F)
    where
        F: Fn(&CellValue) -> String + 'static,
    {
        self.transform = Some(Box::new(transform));
    }

    /// Removes the cell transform.
    pub fn clear_cell_transform(&mut self) {
        self.transform = None;
    }

    /// Returns the heading cells.
    pub fn heading(&self) -> &[Cell] {
        &self.heading
    }

    /// Returns the body rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the caption, if set.
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// Returns the empty-cell marker.
    pub fn empty(&self) -> &str {
        &self.empty
    }

    /// Whether the first ingested row may become the heading.
    pub fn auto_heading(&self) -> bool {
        self.auto_heading
    }

    /// Renders the current heading and rows.
    ///
    /// Returns [`UNDEFINED_TABLE`](crate::UNDEFINED_TABLE) when both are
    /// empty.
    pub fn generate(&self) -> String {
        let fragments = compile(self.template.as_ref());
        let markup = Markup {
            fragments: &fragments,
            newline: &self.newline,
            empty: &self.empty,
            transform: self.transform.as_ref(),
        };
        debug!(
            heading = self.heading.len(),
            rows = self.rows.len(),
            "generating table"
        );
        markup.render(self.caption.as_deref(), &self.heading, &self.rows)
    }

    /// Ingests a sequence of rows, then renders.
    ///
    /// When no heading is set, more than one row is given and auto-heading
    /// is on, the first row becomes the heading.
    pub fn generate_rows<R, I>(&mut self, rows: R) -> String
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator,
        I::Item: Into<CellInput>,
    {
        let derive_heading = !(self.heading.is_empty() && !self.auto_heading);
        self.ingest_rows(rows, derive_heading);
        self.generate()
    }

    /// Ingests a tabular source, then renders.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::MissingFieldNames`] when no heading is set and
    /// the source cannot list its fields. Nothing is ingested in that case.
    pub fn generate_source<S: TabularSource + ?Sized>(&mut self, source: &S) -> Result<String> {
        self.ingest_source(source)?;
        Ok(self.generate())
    }

    /// Resets heading, rows and auto-heading. Everything else is kept.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.heading.clear();
        self.auto_heading = true;
    }

    fn ingest_rows<R, I>(&mut self, rows: R, derive_heading: bool)
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator,
        I::Item: Into<CellInput>,
    {
        let rows: Vec<I> = rows.into_iter().collect();
        if rows.is_empty() {
            return;
        }

        let take_heading = derive_heading && rows.len() > 1 && self.heading.is_empty();
        let mut rows = rows.into_iter();
        if take_heading {
            if let Some(first) = rows.next() {
                self.heading = normalize(first);
            }
        }
        self.rows.extend(rows.map(normalize));
        debug!(
            heading_from_data = take_heading,
            rows = self.rows.len(),
            "ingested rows"
        );
    }

    fn ingest_source<S: TabularSource + ?Sized>(&mut self, source: &S) -> Result<()> {
        if self.heading.is_empty() {
            let Some(fields) = source.field_names() else {
                warn!("source cannot list field names; nothing ingested");
                return Err(TableError::MissingFieldNames);
            };
            self.heading = normalize(fields);
        }

        let before = self.rows.len();
        self.rows
            .extend(source.records().map(|record| normalize(record.into_values())));
        debug!(records = self.rows.len() - before, "ingested source");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells;
    use crate::fragment::FragmentKey;
    use crate::render::UNDEFINED_TABLE;
    use crate::source::{Record, RecordSet};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), CellValue::from(*v)))
            .collect()
    }

    #[test]
    fn test_new_table_is_undefined() {
        assert_eq!(TableRenderer::new().generate(), UNDEFINED_TABLE);
    }

    #[test]
    fn test_round_trip_with_default_fragments() {
        let mut table = TableRenderer::new();
        table.set_heading(["A", "B"]);
        table.add_row(["x", "y"]);
        assert_eq!(
            table.generate(),
            "<table border=\"0\" cellpadding=\"4\" cellspacing=\"0\">\n\
             <thead>\n<tr>\n<th>A</th><th>B</th></tr>\n</thead>\n\
             <tbody>\n<tr>\n<td>x</td><td>y</td></tr>\n</tbody>\n\
             </table>"
        );
    }

    #[test]
    fn test_generate_rows_takes_first_row_as_heading() {
        let mut table = TableRenderer::new();
        let html = table.generate_rows(vec![vec!["Name", "Qty"], vec!["bolt", "3"]]);
        assert_eq!(table.heading(), &[Cell::new("Name"), Cell::new("Qty")][..]);
        assert_eq!(table.rows().len(), 1);
        assert!(html.contains("<th>Name</th>"));
    }

    #[test]
    fn test_single_row_never_becomes_heading() {
        let mut table = TableRenderer::new();
        table.generate_rows(vec![vec!["only"]]);
        assert!(table.heading().is_empty());
        assert_eq!(table.rows().len(), 1);
    }

    #[test]
    fn test_existing_heading_is_kept() {
        let mut table = TableRenderer::new();
        table.set_heading(["H"]);
        table.generate_rows(vec![vec!["a"], vec!["b"]]);
        assert_eq!(table.heading(), &[Cell::new("H")][..]);
        assert_eq!(table.rows().len(), 2);
    }

    #[test]
    fn test_empty_rows_are_a_no_op() {
        let mut table = TableRenderer::new();
        let rows: Vec<Vec<&str>> = Vec::new();
        assert_eq!(table.generate_rows(rows), UNDEFINED_TABLE);
    }

    #[test]
    fn test_make_columns_disables_auto_heading() {
        let mut table = TableRenderer::new();
        let columns = table.make_columns(vec!["a", "b", "c"], 2).unwrap();
        assert!(!table.auto_heading());
        table.generate_rows(columns.into_rows());
        assert!(table.heading().is_empty());
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[1][1], Cell::new("&nbsp;"));
    }

    #[test]
    fn test_make_columns_failure_keeps_state() {
        let mut table = TableRenderer::new();
        let empty: Vec<&str> = Vec::new();
        assert!(table.make_columns(empty, 2).is_err());
        assert!(table.auto_heading());
    }

    #[test]
    fn test_generate_source_uses_field_names() {
        let source = RecordSet::new(["id", "name"])
            .record(record(&[("id", "1"), ("name", "a")]))
            .record(record(&[("id", "2"), ("name", "")]));
        let mut table = TableRenderer::new();
        table.set_empty("?");
        let html = table.generate_source(&source).unwrap();
        assert!(html.contains("<th>id</th><th>name</th>"));
        assert!(html.contains("<td>2</td><td>?</td>"));
    }

    #[test]
    fn test_source_without_field_names() {
        let source = RecordSet::without_fields().record(record(&[("a", "1")]));

        let mut table = TableRenderer::new();
        assert!(matches!(
            table.generate_source(&source),
            Err(TableError::MissingFieldNames)
        ));
        assert!(table.rows().is_empty());

        table.set_heading(["A"]);
        let html = table.generate_source(&source).unwrap();
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_set_template_value() {
        let mut table = TableRenderer::new();
        table
            .set_template_value(&json!({ "table_open": "<table id=\"t\">" }))
            .unwrap();
        assert!(table.set_template_value(&json!("nope")).is_err());
        assert_eq!(
            table.template().unwrap().get(FragmentKey::TableOpen),
            Some("<table id=\"t\">")
        );

        table.add_row(["x"]);
        assert!(table.generate().starts_with("<table id=\"t\">\n"));
    }

    #[test]
    fn test_clear_keeps_configuration() {
        let mut table = TableRenderer::new();
        table.set_template(
            TemplateOverride::new().set(FragmentKey::TableClose, "</table><!-- end -->"),
        );
        table.set_caption("Kept");
        table.set_empty("-");
        table.make_columns(vec!["a"], 1).unwrap();
        table.set_heading(["H"]);
        table.add_row(["r"]);

        table.clear();
        assert_eq!(table.generate(), UNDEFINED_TABLE);
        assert!(table.auto_heading());
        assert_eq!(table.caption(), Some("Kept"));
        assert_eq!(table.empty(), "-");
        assert!(table.template().is_some());

        table.add_row(["", "z"]);
        let html = table.generate();
        assert!(html.contains("<caption>Kept</caption>"));
        assert!(html.contains("<td>-</td><td>z</td>"));
        assert!(html.ends_with("</table><!-- end -->"));
    }

    #[test]
    fn test_transform_skips_empty_cells() {
        let mut table = TableRenderer::new();
        table.set_empty("EMPTY");
        table.set_cell_transform(|value| format!("<b>{}</b>", value));
        table.add_row(cells!["a", None::<&str>]);
        let html = table.generate();
        assert!(html.contains("<td><b>a</b></td><td>EMPTY</td>"));

        table.clear_cell_transform();
        assert!(table.generate().contains("<td>a</td>"));
    }

    #[test]
    fn test_apply_config() {
        let config = TableConfig {
            caption: Some("Cfg".to_string()),
            newline: Some(String::new()),
            auto_heading: Some(false),
            ..TableConfig::default()
        };
        let mut table = TableRenderer::from_config(&config);
        assert!(!table.auto_heading());
        let html = table.generate_rows(vec![vec!["a"], vec!["b"]]);
        assert!(table.heading().is_empty());
        assert!(!html.contains('\n'));
        assert!(html.contains("<caption>Cfg</caption>"));
    }

    #[test]
    fn test_debug_hides_transform() {
        let mut table = TableRenderer::new();
        table.set_cell_transform(|v| v.to_string());
        assert!(format!("{:?}", table).contains("<fn>"));
    }
}
