//! Excel workbook output
//!
//! [`XlsxSheet`] is a [`SheetWriter`] that fills a `rust_xlsxwriter`
//! worksheet. Dates and times are stored as Excel serial numbers with the
//! cell's number format, so the spreadsheet can still compute with them.

use crate::sheet::{Cell, CellValue, SheetWriter};
use crate::Result;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

/// `num_days_from_ce` of 1899-12-30, day zero of the Excel 1900 date system
const EXCEL_EPOCH_CE_DAYS: i32 = 693_594;

/// Excel serial number of a date (valid from March 1900 on)
pub fn excel_date(date: NaiveDate) -> f64 {
    (date.num_days_from_ce() - EXCEL_EPOCH_CE_DAYS) as f64
}

/// Excel serial number of a date and time of day
pub fn excel_date_time(value: NaiveDateTime) -> f64 {
    excel_date(value.date()) + value.time().num_seconds_from_midnight() as f64 / 86_400.0
}

/// Worksheet written row by row
pub struct XlsxSheet {
    worksheet: Worksheet,
    row: u32,
}

impl XlsxSheet {
    pub fn new(name: &str) -> Result<Self> {
        let mut worksheet = Worksheet::new();
        worksheet.set_name(name)?;
        Ok(Self { worksheet, row: 0 })
    }

    /// Number of rows written so far
    pub fn rows(&self) -> u32 {
        self.row
    }

    /// Wrap the worksheet in a workbook and encode it
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        workbook.push_worksheet(self.worksheet);
        Ok(workbook.save_to_buffer()?)
    }

    fn write_cell(&mut self, col: u16, cell: &Cell) -> Result<()> {
        let row = self.row;
        if cell.merge_right > 0 {
            let last_col = col + cell.merge_right as u16;
            let text = cell.as_text().unwrap_or_default();
            self.worksheet
                .merge_range(row, col, row, last_col, text, &Format::new())?;
            return Ok(());
        }

        match &cell.value {
            CellValue::Empty => {}
            CellValue::Text(text) => {
                self.worksheet.write_string(row, col, text.as_str())?;
            }
            CellValue::Int(value) => {
                self.worksheet.write_number(row, col, *value as f64)?;
            }
            CellValue::Float { value, format } => {
                self.worksheet
                    .write_number_with_format(row, col, *value, &number_format(format))?;
            }
            CellValue::Date { value, format } => {
                self.worksheet.write_number_with_format(
                    row,
                    col,
                    excel_date(*value),
                    &number_format(format),
                )?;
            }
            CellValue::DateTime { value, format } => {
                self.worksheet.write_number_with_format(
                    row,
                    col,
                    excel_date_time(*value),
                    &number_format(format),
                )?;
            }
        }
        Ok(())
    }
}

fn number_format(format: &str) -> Format {
    Format::new().set_num_format(format)
}

impl SheetWriter for XlsxSheet {
    fn write_row(&mut self, cells: Vec<Cell>) -> Result<()> {
        for (col, cell) in cells.iter().enumerate() {
            self.write_cell(col as u16, cell)?;
        }
        self.row += 1;
        Ok(())
    }
}
