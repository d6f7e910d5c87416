//! Fixed-frame markdown tables and layout-driven column typing
//!
//! The statistics pages render their tables like this:
//!
//! ```text
//! + ---- + -------- + ------- +
//! | Rank | Pokemon  | Usage % |
//! + ---- + -------- + ------- +
//! | 1    | Skarmory | 19.961% |
//! + ---- + -------- + ------- +
//! ```
//!
//! The framing is positional, not generic markdown: line 0 is a border,
//! line 1 the header, line 2 a border, and the final two lines (closing
//! border plus the empty line after the trailing newline) are ignored.

use crate::convert::{Converter, Value};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Default cell delimiter
pub const DEFAULT_DELIMITER: char = '|';

const HEADER_LINE: usize = 1;
const FIRST_DATA_LINE: usize = 3;
const FOOTER_LINES: usize = 2;

/// A table as found in the text, before any type conversion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    /// Header cells
    pub header: Vec<String>,
    /// Data rows, in source order
    pub rows: Vec<Vec<String>>,
}

/// One declared column of a table layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutColumn {
    /// Column name used in the parsed header
    pub name: &'static str,
    /// Converter applied to every cell of this column
    pub converter: Converter,
}

impl LayoutColumn {
    /// Create a new layout column
    pub const fn new(name: &'static str, converter: Converter) -> Self {
        Self { name, converter }
    }
}

/// Ordered column declarations for one page type
pub type TableLayout = [LayoutColumn];

/// A table mapped through a layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedTable {
    /// Column names, taken from the layout
    pub header: Vec<String>,
    /// Typed rows, in source order
    pub rows: Vec<Vec<Value>>,
}

impl ParsedTable {
    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find a column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Write the table as CSV, header first
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&self.header)?;
        for row in &self.rows {
            csv_writer.write_record(row.iter().map(Value::to_string_value))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Split a row on `delimiter`, trimming cells and dropping empty ones
pub fn tokenize_row(row: &str, delimiter: char) -> Vec<String> {
    row.split(delimiter)
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a framed table into header and rows. Purely lexical.
pub fn split_table(text: &str, delimiter: char) -> RawTable {
    let lines: Vec<&str> = text.split('\n').collect();

    let header = lines
        .get(HEADER_LINE)
        .map(|line| tokenize_row(line, delimiter))
        .unwrap_or_default();

    let end = lines.len().saturating_sub(FOOTER_LINES);
    let rows = if end > FIRST_DATA_LINE {
        lines[FIRST_DATA_LINE..end]
            .iter()
            .map(|line| tokenize_row(line, delimiter))
            .collect()
    } else {
        Vec::new()
    };

    RawTable { header, rows }
}

/// Parse a framed table and check its header has `expected_columns` cells
pub fn parse_markdown_table(text: &str, expected_columns: usize) -> Result<RawTable> {
    let table = split_table(text, DEFAULT_DELIMITER);

    if table.header.len() != expected_columns {
        return Err(Error::SchemaMismatch {
            expected: expected_columns,
            actual: table.header.len(),
        });
    }

    Ok(table)
}

/// Parse a framed table and type its cells through `layout`.
///
/// Columns are matched by position only. The raw header text is validated
/// for length and then replaced by the layout names.
pub fn parse_layout_table(text: &str, layout: &TableLayout) -> Result<ParsedTable> {
    let raw = parse_markdown_table(text, layout.len())?;

    let rows = raw
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(layout)
                .map(|(cell, column)| column.converter.apply(cell))
                .collect()
        })
        .collect();

    Ok(ParsedTable {
        header: layout.iter().map(|c| c.name.to_string()).collect(),
        rows,
    })
}
