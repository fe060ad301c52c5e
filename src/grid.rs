use chrono::NaiveDateTime;

/// One worksheet cell: a typed value plus the number-format code attached to
/// it. The format travels with the cell because format codes legitimately
/// differ cell-to-cell even within one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

/// Rows of cells as read from one worksheet, header row included.
pub type Grid = Vec<Vec<Cell>>;

impl Cell {
    pub fn new(value: CellValue, format: impl Into<String>) -> Self {
        Cell {
            value,
            format: format.into(),
        }
    }

    pub fn empty() -> Self {
        Cell {
            value: CellValue::Empty,
            format: String::new(),
        }
    }
}
