//! Normalization of source rows into storage records for the invoice table.
//!
//! Storage precision is driven by each cell's own format code and is
//! independent of display precision: the preview and the staged record may
//! legitimately disagree on decimals for the same cell.

use chrono::{NaiveDate, NaiveDateTime};

use crate::format;
use crate::grid::{Cell, CellValue};

/// Destination table columns, in insert order.
pub const SCHEMA: [&str; 7] = [
    "SITEID",
    "COSTCENTER",
    "NAME",
    "LITERSLOADED",
    "PRICE",
    "DATE",
    "AMOUNT",
];

/// LITERSLOADED, PRICE, AMOUNT. Rounding applies to these positions only;
/// the coupling to column order is inherited from the destination table.
const ROUNDED_COLUMNS: [usize; 3] = [3, 4, 6];
const DATE_COLUMN: usize = 5;

/// Text date shapes accepted in the DATE column, day-first preferred.
const DATE_PATTERNS: [&str; 2] = ["%d/%m/%Y", "%Y-%m-%d"];

#[derive(Debug, Clone, PartialEq)]
pub enum StorageValue {
    Null,
    Number(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

/// One row of the destination table, typed and rounded for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageRecord {
    pub site_id: StorageValue,
    pub cost_center: StorageValue,
    pub name: StorageValue,
    pub liters_loaded: StorageValue,
    pub price: StorageValue,
    pub date: StorageValue,
    pub amount: StorageValue,
}

impl StorageRecord {
    /// Build a record from one source row, truncating past the schema width
    /// and right-padding short rows with empty cells.
    pub fn from_cells(row: &[Cell]) -> Self {
        let empty = Cell::empty();
        let at = |i: usize| normalize(row.get(i).unwrap_or(&empty), i);
        StorageRecord {
            site_id: at(0),
            cost_center: at(1),
            name: at(2),
            liters_loaded: at(3),
            price: at(4),
            date: at(5),
            amount: at(6),
        }
    }

    /// Field references in `SCHEMA` order.
    pub fn fields(&self) -> [&StorageValue; 7] {
        [
            &self.site_id,
            &self.cost_center,
            &self.name,
            &self.liters_loaded,
            &self.price,
            &self.date,
            &self.amount,
        ]
    }
}

/// Normalize one cell for its storage column. Total: anything the column
/// rules do not claim passes through unchanged.
pub fn normalize(cell: &Cell, column: usize) -> StorageValue {
    if ROUNDED_COLUMNS.contains(&column) {
        if let CellValue::Number(n) = cell.value {
            return StorageValue::Number(round_for_storage(n, &cell.format));
        }
    }
    if column == DATE_COLUMN {
        return normalize_date(&cell.value);
    }
    passthrough(&cell.value)
}

fn passthrough(value: &CellValue) -> StorageValue {
    match value {
        CellValue::Empty => StorageValue::Null,
        CellValue::Number(n) => StorageValue::Number(*n),
        CellValue::Text(s) => StorageValue::Text(s.clone()),
        CellValue::DateTime(dt) => StorageValue::DateTime(*dt),
    }
}

fn round_for_storage(n: f64, format: &str) -> f64 {
    if format.is_empty() || format.eq_ignore_ascii_case("general") {
        return n;
    }
    if format.contains(".0") {
        round_to(n, format::interpret(format).decimal_places)
    } else if format.contains('0') || format.contains('#') {
        // Digit markers without a fractional marker imply an integer format.
        round_to(n, 0)
    } else {
        n
    }
}

fn round_to(n: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (n * factor).round() / factor
}

fn normalize_date(value: &CellValue) -> StorageValue {
    match value {
        CellValue::DateTime(dt) => StorageValue::Date(dt.date()),
        CellValue::Text(s) => {
            for pattern in DATE_PATTERNS {
                if let Ok(d) = NaiveDate::parse_from_str(s, pattern) {
                    return StorageValue::Date(d);
                }
            }
            // Unparseable dates pass through as text; the consumer sees the
            // type mismatch, not an error.
            StorageValue::Text(s.clone())
        }
        other => passthrough(other),
    }
}
