//! Flat-file handoff between stages.
//!
//! Typed CSV writers/readers for the generator's own artifacts, plus
//! [`RawTable`], an untyped header-addressed table used by the loader so that
//! spreadsheet and CSV inputs go through one conversion path.

use crate::{
    call_record::CallRecord,
    customer::CustomerRecord,
    error::{CarrierError, CarrierResult},
    plan::Plan,
};
use calamine::{open_workbook_auto, Data, Reader};
use serde::Serialize;
use std::path::Path;

/// What a save call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Written { path: String, rows: usize },
    /// Nothing to write; the target file was left untouched.
    Skipped,
}

pub fn write_customers(path: &str, customers: &[CustomerRecord]) -> CarrierResult<SaveOutcome> {
    write_rows(path, "customers", customers)
}

pub fn write_call_records(path: &str, records: &[CallRecord]) -> CarrierResult<SaveOutcome> {
    write_rows(path, "call records", records)
}

pub fn write_plans(path: &str, plans: &[Plan]) -> CarrierResult<SaveOutcome> {
    write_rows(path, "plans", plans)
}

fn write_rows<T: Serialize>(path: &str, what: &str, rows: &[T]) -> CarrierResult<SaveOutcome> {
    if rows.is_empty() {
        log::warn!("No {what} to save; {path} not written");
        return Ok(SaveOutcome::Skipped);
    }
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    log::info!("Saved {} {what} to {path}", rows.len());
    Ok(SaveOutcome::Written { path: path.to_string(), rows: rows.len() })
}

/// Read a customer file written by [`write_customers`], checking each record.
pub fn read_customers(path: &str) -> CarrierResult<Vec<CustomerRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut customers = Vec::new();
    for row in reader.deserialize() {
        let record: CustomerRecord = row?;
        record.validate()?;
        customers.push(record);
    }
    log::info!("Loaded {} customers from {path}", customers.len());
    Ok(customers)
}

// ── Untyped tables ─────────────────────────────────────────────

/// A header row plus data rows, all cells as text. Each row keeps the
/// 1-based line it came from so errors point at the source.
#[derive(Debug, Clone)]
pub struct RawTable {
    source: String,
    headers: Vec<String>,
    rows: Vec<(usize, Vec<String>)>,
}

impl RawTable {
    /// Read a table, choosing the parser by file extension.
    pub fn read(path: &str) -> CarrierResult<Self> {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Self::from_csv(path),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Self::from_spreadsheet(path),
            _ => Err(CarrierError::UnsupportedFormat { file: path.to_string() }),
        }
    }

    pub fn from_csv(path: &str) -> CarrierResult<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            let line = record.position().map_or(i + 2, |p| p.line() as usize);
            rows.push((line, record.iter().map(str::to_string).collect()));
        }
        log::debug!("read {} rows from {path}", rows.len());
        Ok(Self { source: path.to_string(), headers, rows })
    }

    /// First worksheet; first row is the header.
    pub fn from_spreadsheet(path: &str) -> CarrierResult<Self> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| CarrierError::UnsupportedFormat { file: path.to_string() })??;

        // The range starts at the first used row, not necessarily sheet row 1.
        let first_line = range.start().map_or(1, |(row, _)| row as usize + 1);
        let mut lines = range.rows();
        let headers = lines
            .next()
            .map(|cells| cells.iter().map(|c| cell_text(c).trim().to_string()).collect())
            .unwrap_or_default();
        let rows: Vec<(usize, Vec<String>)> = lines
            .enumerate()
            .map(|(i, cells)| {
                let line = first_line + 1 + i;
                (line, cells.iter().map(cell_text).collect::<Vec<_>>())
            })
            .filter(|(_, cells)| cells.iter().any(|c| !c.trim().is_empty()))
            .collect();
        log::debug!("read {} rows from sheet 0 of {path}", rows.len());
        Ok(Self { source: path.to_string(), headers, rows })
    }

    /// Build a table in memory.
    pub fn from_parts(source: &str, headers: &[&str], rows: Vec<Vec<String>>) -> Self {
        Self {
            source: source.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows.into_iter().enumerate().map(|(i, cells)| (i + 2, cells)).collect(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = RawRow<'_>> {
        self.rows.iter().map(move |(line, cells)| RawRow { table: self, line: *line, cells })
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// One data row with typed, header-addressed accessors.
///
/// Numeric accessors treat a missing column or blank cell as zero; any other
/// unparseable value is a [`CarrierError::Conversion`].
pub struct RawRow<'a> {
    table: &'a RawTable,
    line: usize,
    cells: &'a [String],
}

impl RawRow<'_> {
    fn raw_cell(&self, column: &str) -> Option<&str> {
        self.table
            .column(column)
            .map(|i| self.cells.get(i).map(String::as_str).unwrap_or(""))
    }

    fn cell(&self, column: &str) -> Option<&str> {
        self.raw_cell(column).map(str::trim)
    }

    /// Required text column. A missing column is an error; a blank cell is "".
    pub fn text(&self, column: &str) -> CarrierResult<String> {
        self.cell(column)
            .map(str::to_string)
            .ok_or_else(|| self.missing(column))
    }

    /// Required text column, untrimmed. Used where values are matched exactly.
    pub fn verbatim(&self, column: &str) -> CarrierResult<String> {
        self.raw_cell(column)
            .map(str::to_string)
            .ok_or_else(|| self.missing(column))
    }

    pub fn real(&self, column: &str) -> CarrierResult<f64> {
        match self.cell(column) {
            None | Some("") => Ok(0.0),
            Some(raw) => raw.parse().map_err(|_| self.conversion(column, raw, "a number")),
        }
    }

    /// Integers written by spreadsheets as `12.0` are accepted.
    pub fn int(&self, column: &str) -> CarrierResult<i64> {
        match self.cell(column) {
            None | Some("") => Ok(0),
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .or_else(|| {
                    raw.parse::<f64>()
                        .ok()
                        .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
                        .map(|f| f as i64)
                })
                .ok_or_else(|| self.conversion(column, raw, "an integer")),
        }
    }

    /// Required integer key. Unlike [`RawRow::int`], blank is not zero.
    pub fn key(&self, column: &str) -> CarrierResult<i64> {
        let raw = self.text(column)?;
        if raw.is_empty() {
            return Err(self.conversion(column, "", "an integer key"));
        }
        self.int(column)
    }

    pub fn flag(&self, column: &str) -> CarrierResult<bool> {
        match self.cell(column).map(str::to_ascii_lowercase).as_deref() {
            None | Some("") => Ok(false),
            Some("true" | "1" | "yes" | "y") => Ok(true),
            Some("false" | "0" | "no" | "n") => Ok(false),
            Some(raw) => Err(self.conversion(column, raw, "a boolean")),
        }
    }

    fn missing(&self, column: &str) -> CarrierError {
        CarrierError::MissingColumn {
            file: self.table.source.clone(),
            column: column.to_string(),
        }
    }

    fn conversion(&self, column: &str, value: &str, expected: &'static str) -> CarrierError {
        CarrierError::Conversion {
            file: self.table.source.clone(),
            row: self.line,
            column: column.to_string(),
            value: value.to_string(),
            expected,
        }
    }
}
