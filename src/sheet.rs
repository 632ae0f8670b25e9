//! Spreadsheet row model
//!
//! Renderers describe rows as typed cells and hand them to a [`SheetWriter`].
//! The crate ships [`Sheet`], an in-memory writer; binding the rows to an
//! actual workbook format is left to the implementor of the trait.

use crate::Result;
use chrono::{NaiveDate, NaiveDateTime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Typed cell content
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    /// Number with a spreadsheet number format such as `0.00`
    Float { value: f64, format: String },
    /// Date with a number format such as `dd.mm.yyyy`
    Date { value: NaiveDate, format: String },
    /// Date and time with a number format such as `hh:mm`
    DateTime { value: NaiveDateTime, format: String },
}

/// One cell, optionally merged with the following cells of its row
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub value: CellValue,
    /// Number of cells to the right covered by this one
    pub merge_right: usize,
}

impl Cell {
    pub fn empty() -> Self {
        CellValue::Empty.into()
    }

    pub fn text(text: impl Into<String>) -> Self {
        CellValue::Text(text.into()).into()
    }

    pub fn int(value: i64) -> Self {
        CellValue::Int(value).into()
    }

    pub fn float(value: f64, format: &str) -> Self {
        CellValue::Float {
            value,
            format: format.to_string(),
        }
        .into()
    }

    pub fn date(value: NaiveDate, format: &str) -> Self {
        CellValue::Date {
            value,
            format: format.to_string(),
        }
        .into()
    }

    pub fn date_time(value: NaiveDateTime, format: &str) -> Self {
        CellValue::DateTime {
            value,
            format: format.to_string(),
        }
        .into()
    }

    pub fn merged(mut self, merge_right: usize) -> Self {
        self.merge_right = merge_right;
        self
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<CellValue> for Cell {
    fn from(value: CellValue) -> Self {
        Self {
            value,
            merge_right: 0,
        }
    }
}

/// Destination for spreadsheet rows
pub trait SheetWriter {
    fn write_row(&mut self, cells: Vec<Cell>) -> Result<()>;

    fn write_empty_row(&mut self) -> Result<()> {
        self.write_row(Vec::new())
    }
}

/// In-memory worksheet
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(|r| r.as_slice())
    }
}

impl SheetWriter for Sheet {
    fn write_row(&mut self, cells: Vec<Cell>) -> Result<()> {
        self.rows.push(cells);
        Ok(())
    }
}
