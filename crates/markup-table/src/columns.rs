//! Reshaping a flat list into fixed-width rows.

use crate::error::{Result, TableError};

/// Filler placed in the trailing cells of the last row.
pub const FILLER: &str = "&nbsp;";

/// Result of [`make_columns`].
#[derive(Clone, Debug, PartialEq)]
pub enum Columns<T> {
    /// A column limit of zero leaves the input as it was.
    Flat(Vec<T>),
    /// Rows of exactly `limit` items.
    Grid(Vec<Vec<T>>),
}

impl<T> Columns<T> {
    /// Converts to rows. Flat input becomes one single-cell row per item.
    pub fn into_rows(self) -> Vec<Vec<T>> {
        match self {
            Columns::Flat(items) => items.into_iter().map(|item| vec![item]).collect(),
            Columns::Grid(rows) => rows,
        }
    }
}

/// Chunks `items` into rows of `limit` items, padding the last row with
/// [`FILLER`].
///
/// # Errors
///
/// Returns [`TableError::EmptyInput`] when `items` is empty.
///
/// ```rust
/// use markup_table::{make_columns, Columns};
///
/// let grid = make_columns(vec!["1", "2", "3", "4", "5"], 2).unwrap();
/// assert_eq!(
///     grid,
///     Columns::Grid(vec![vec!["1", "2"], vec!["3", "4"], vec!["5", "&nbsp;"]])
/// );
/// ```
pub fn make_columns<T: From<&'static str>>(items: Vec<T>, limit: usize) -> Result<Columns<T>> {
    if items.is_empty() {
        return Err(TableError::EmptyInput);
    }
    if limit == 0 {
        return Ok(Columns::Flat(items));
    }

    let mut rows = Vec::with_capacity(items.len().div_ceil(limit));
    let mut items = items.into_iter().peekable();
    while items.peek().is_some() {
        let mut row: Vec<T> = items.by_ref().take(limit).collect();
        row.resize_with(limit, || T::from(FILLER));
        rows.push(row);
    }
    Ok(Columns::Grid(rows))
}
