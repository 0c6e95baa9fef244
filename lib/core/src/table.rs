//! Tabular values exchanged with a workbook container
//!
//! A [`Table`] is one sheet: a header row of column names followed by data
//! rows of typed [`CellValue`]s. Rows are not required to be rectangular;
//! the decoders that turn tables into domain types check shape themselves.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single spreadsheet cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Truthiness used when a cell is coerced to a 0/1 matrix entry.
    ///
    /// Numeric text is judged by value, so `"0"` and `"0.0"` are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Bool(b) => *b,
            CellValue::Number(n) => *n != 0.0,
            CellValue::Text(s) => {
                let s = s.trim();
                match s.parse::<f64>() {
                    Ok(n) => n != 0.0,
                    Err(_) => !s.is_empty(),
                }
            }
        }
    }

    /// Numeric view of the cell. Text is parsed, booleans are not numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            CellValue::Bool(_) | CellValue::Empty => None,
        }
    }

    /// Label view of the cell, for row/column identifiers.
    ///
    /// Integral numbers render without a fractional part, so an alternative
    /// called `3` that came back from a container as a number stays `"3"`.
    pub fn as_label(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
            CellValue::Number(n) => Some(format_number(*n)),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_label() {
            Some(label) => f.write_str(&label),
            None => Ok(()),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<u8> for CellValue {
    fn from(n: u8) -> Self {
        CellValue::Number(n as f64)
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

/// One sheet: header plus data rows
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn with_rows(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Index of the first row whose width differs from the header, if any
    pub fn first_ragged_row(&self) -> Option<usize> {
        let width = self.width();
        self.rows.iter().position(|r| r.len() != width)
    }
}
