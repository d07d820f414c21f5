//! Turns parsed arguments and input text into table markup.

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use markup_table::{
    CellInput, CellValue, RecordSet, TableConfig, TableRenderer, TabularSource, TemplateOverride,
};
use tracing::debug;

use crate::Cli;

/// Shape of the input text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Comma-separated values with a header line
    Csv,
    /// An array of objects, or an array of arrays
    Json,
    /// One cell per line
    List,
}

impl InputFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "csv" => Some(InputFormat::Csv),
            "json" => Some(InputFormat::Json),
            "txt" | "list" => Some(InputFormat::List),
            _ => None,
        }
    }
}

fn resolve_format(cli: &Cli) -> InputFormat {
    cli.format
        .or_else(|| cli.input.as_deref().and_then(InputFormat::from_path))
        .unwrap_or(InputFormat::Csv)
}

/// Builds a renderer from the config file, template file and flags, in that
/// order of precedence (later wins).
fn build_table(cli: &Cli) -> Result<TableRenderer> {
    let mut table = match &cli.config {
        Some(path) => {
            let config = TableConfig::from_file(path)
                .with_context(|| format!("invalid config {}", path.display()))?;
            TableRenderer::from_config(&config)
        }
        None => TableRenderer::new(),
    };

    if let Some(path) = &cli.template {
        let template = TemplateOverride::from_file(path)
            .with_context(|| format!("invalid template {}", path.display()))?;
        table.set_template(template);
    }
    if let Some(caption) = &cli.caption {
        table.set_caption(caption.clone());
    }
    if let Some(empty) = &cli.empty {
        table.set_empty(empty.clone());
    }
    Ok(table)
}

/// Renders `input` according to `cli`.
pub fn render(cli: &Cli, input: &str) -> Result<String> {
    let mut table = build_table(cli)?;
    let format = resolve_format(cli);
    debug!(?format, bytes = input.len(), "rendering input");

    if cli.columns.is_some() && format != InputFormat::List {
        bail!("--columns only applies to list input");
    }

    match format {
        InputFormat::Csv => {
            let source = RecordSet::from_csv(input.as_bytes()).context("invalid csv input")?;
            if cli.no_heading {
                let rows: Vec<Vec<CellValue>> = source
                    .records()
                    .map(|record| record.into_values().collect())
                    .collect();
                return Ok(render_rows(table, rows, true));
            }
            Ok(table.generate_source(&source)?)
        }
        InputFormat::Json => render_json(table, input, cli.no_heading),
        InputFormat::List => {
            let items: Vec<CellValue> = input.lines().map(CellValue::from).collect();
            let columns = table
                .make_columns(items, cli.columns.unwrap_or(0))
                .context("list input is empty")?;
            Ok(table.generate_rows(columns.into_rows()))
        }
    }
}

fn render_json(mut table: TableRenderer, input: &str, no_heading: bool) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(input).context("invalid json input")?;
    let serde_json::Value::Array(items) = value else {
        bail!("json input must be an array");
    };

    if items.iter().all(serde_json::Value::is_array) {
        let rows: Vec<Vec<serde_json::Value>> = items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::Array(cells) => Some(cells),
                _ => None,
            })
            .collect();
        return Ok(render_rows(table, rows, no_heading));
    }

    let source = RecordSet::from_json_value(serde_json::Value::Array(items))?;
    if no_heading {
        let rows: Vec<Vec<CellValue>> = source
            .records()
            .map(|record| record.into_values().collect())
            .collect();
        return Ok(render_rows(table, rows, true));
    }
    Ok(table.generate_source(&source)?)
}

/// Renders plain rows. Without `no_heading`, the first of several rows
/// becomes the heading unless the config turned auto-heading off.
fn render_rows<T>(mut table: TableRenderer, rows: Vec<Vec<T>>, no_heading: bool) -> String
where
    T: Into<CellInput>,
{
    if no_heading {
        for row in rows {
            table.add_row(row);
        }
        return table.generate();
    }
    table.generate_rows(rows)
}
