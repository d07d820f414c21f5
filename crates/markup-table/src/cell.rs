//! Cell values and cell normalization.
//!
//! Callers hand the renderer cell content in whatever shape is convenient:
//! bare strings and numbers, `Option`s, JSON values, or fully built [`Cell`]s
//! carrying markup attributes. [`normalize`] funnels all of them into one
//! uniform `Vec<Cell>`, and is used identically for heading and row cells.
//!
//! ```rust
//! use markup_table::{cells, normalize, Cell, CellValue};
//!
//! let row = normalize(cells!["Alice", 42, Cell::new("active").attr("class", "ok")]);
//!
//! assert_eq!(row[0].data(), &CellValue::from("Alice"));
//! assert!(row[0].attributes().is_empty());
//! assert_eq!(row[2].attributes().get("class").map(String::as_str), Some("ok"));
//! ```

use std::fmt;

use indexmap::IndexMap;

/// Name of the reserved key that holds a cell's display content.
pub const DATA_KEY: &str = "data";

/// A renderable cell value.
///
/// `Null` and empty text are considered empty and render as the table's
/// empty-cell marker in body rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Absent value.
    #[default]
    Null,
    /// Text content, emitted verbatim.
    Text(String),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Boolean.
    Bool(bool),
}

impl CellValue {
    /// Returns `true` for `Null` and for empty text.
    ///
    /// Zero and `false` are values, not empties.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns `true` if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Extracts the text, if this is a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Int(n) => write!(f, "{}", n),
            CellValue::Float(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&String> for CellValue {
    fn from(s: &String) -> Self {
        CellValue::Text(s.clone())
    }
}

impl From<char> for CellValue {
    fn from(c: char) -> Self {
        CellValue::Text(c.to_string())
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CellValue {
                fn from(n: $ty) -> Self {
                    CellValue::Int(i64::from(n))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CellValue {
                fn from(n: $ty) -> Self {
                    match i64::try_from(n) {
                        Ok(n) => CellValue::Int(n),
                        Err(_) => CellValue::Text(n.to_string()),
                    }
                }
            }
        )*
    };
}

impl_from_wide_int!(u64, usize, isize);

impl From<f32> for CellValue {
    fn from(n: f32) -> Self {
        CellValue::Float(f64::from(n))
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Float(n)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellValue::Int(i)
                } else if let Some(f) = n.as_f64() {
                    CellValue::Float(f)
                } else {
                    CellValue::Text(n.to_string())
                }
            }
            Value::String(s) => CellValue::Text(s),
            // Nested structures render as compact JSON.
            other => CellValue::Text(other.to_string()),
        }
    }
}

/// A normalized table cell: display content plus markup attributes.
///
/// Attributes keep insertion order and are rendered as `key='value'` pairs on
/// the enclosing `<th>`/`<td>` tag. The `data` key is reserved for content:
/// setting it through [`attr`](Cell::attr) replaces the data instead.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    attributes: IndexMap<String, String>,
    data: CellValue,
}

impl Cell {
    /// Creates a cell with the given content and no attributes.
    pub fn new(data: impl Into<CellValue>) -> Self {
        Cell {
            attributes: IndexMap::new(),
            data: data.into(),
        }
    }

    /// Creates a cell with no content.
    pub fn empty() -> Self {
        Cell::default()
    }

    /// Adds an attribute, returning the cell for chaining.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Adds or replaces an attribute in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if name == DATA_KEY {
            self.data = CellValue::Text(value.into());
        } else {
            self.attributes.insert(name, value.into());
        }
    }

    /// Returns the attributes in insertion order.
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Returns the cell content.
    pub fn data(&self) -> &CellValue {
        &self.data
    }

    /// Returns `true` when the content is null or empty text.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// One entry handed to the normalizer: either a bare value or a built cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellInput {
    /// A bare value, wrapped as a cell without attributes.
    Value(CellValue),
    /// An already shaped cell, passed through unchanged.
    Cell(Cell),
}

impl From<Cell> for CellInput {
    fn from(cell: Cell) -> Self {
        CellInput::Cell(cell)
    }
}

impl From<CellValue> for CellInput {
    fn from(value: CellValue) -> Self {
        CellInput::Value(value)
    }
}

macro_rules! impl_input_from_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CellInput {
                fn from(value: $ty) -> Self {
                    CellInput::Value(value.into())
                }
            }
        )*
    };
}

impl_input_from_value!(
    &str,
    String,
    &String,
    char,
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    usize,
    isize,
    f32,
    f64,
    serde_json::Value
);

impl<T: Into<CellValue>> From<Option<T>> for CellInput {
    fn from(value: Option<T>) -> Self {
        CellInput::Value(value.into())
    }
}

impl From<CellInput> for Cell {
    fn from(input: CellInput) -> Self {
        match input {
            CellInput::Value(value) => Cell::new(value),
            CellInput::Cell(cell) => cell,
        }
    }
}

/// Normalizes a sequence of entries into cells.
///
/// Bare values become `Cell { data: value }` with no attributes; entries that
/// are already cells pass through unchanged, so re-normalizing is a no-op.
pub fn normalize<I>(entries: I) -> Vec<Cell>
where
    I: IntoIterator,
    I::Item: Into<CellInput>,
{
    entries
        .into_iter()
        .map(|entry| Cell::from(entry.into()))
        .collect()
}

/// Builds a `Vec<CellInput>` from discrete values of mixed types.
///
/// ```rust
/// use markup_table::{cells, Cell, CellInput};
///
/// let row: Vec<CellInput> = cells!["name", 3, Cell::new("x").attr("colspan", "2")];
/// assert_eq!(row.len(), 3);
/// ```
#[macro_export]
macro_rules! cells {
    () => {
        ::std::vec::Vec::<$crate::CellInput>::new()
    };
    ($($cell:expr),+ $(,)?) => {
        ::std::vec![$($crate::CellInput::from($cell)),+]
    };
}
