use crate::error::{Error, Result};
use crate::grid::{Cell, CellValue, Grid};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::path::Path;
use umya_spreadsheet::structs::Worksheet;
use umya_spreadsheet::Spreadsheet;

/// Days are counted from this epoch in workbook serial dates.
const SERIAL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

pub fn open_workbook(path: &Path) -> Result<Spreadsheet> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" | "xlsm" => {
            umya_spreadsheet::reader::xlsx::read(path).map_err(|e| Error::InvalidWorkbook {
                path: path.to_path_buf(),
                details: e.to_string(),
            })
        }
        _ => Err(Error::UnsupportedFormat(extension)),
    }
}

/// Walk the active (first) worksheet into an owned grid of typed cells.
pub fn read_grid(workbook: &Spreadsheet) -> Result<Grid> {
    let sheet = workbook.get_sheet(&0).ok_or(Error::NoSheets)?;
    let (max_col, max_row) = sheet.get_highest_column_and_row();

    let mut grid = Vec::with_capacity(max_row as usize);
    for row in 1..=max_row {
        let mut cells = Vec::with_capacity(max_col as usize);
        for col in 1..=max_col {
            cells.push(read_cell(sheet, col, row));
        }
        grid.push(cells);
    }
    Ok(grid)
}

fn read_cell(sheet: &Worksheet, col: u32, row: u32) -> Cell {
    let Some(cell) = sheet.get_cell((col, row)) else {
        return Cell::empty();
    };

    let raw = cell.get_value();
    let format = cell
        .get_style()
        .get_number_format()
        .map(|nf| nf.get_format_code().to_string())
        .unwrap_or_else(|| "General".to_string());

    if raw.is_empty() {
        return Cell::new(CellValue::Empty, format);
    }

    // Numeric cells carry their value as a decimal string; date cells are
    // serial numbers distinguished only by their format code.
    if let Ok(n) = raw.parse::<f64>() {
        if is_date_format(&format) {
            if let Some(dt) = serial_to_datetime(n) {
                return Cell::new(CellValue::DateTime(dt), format);
            }
        }
        return Cell::new(CellValue::Number(n), format);
    }

    Cell::new(CellValue::Text(raw.to_string()), format)
}

/// A format code is a date/time pattern when it carries a date token outside
/// quoted literals and `[...]` sections (e.g. `dd/mm/yyyy`, `h:mm`,
/// `[$-409]d-mmm-yy`, but not `#,##0.00` or `"kg" 0.0`).
fn is_date_format(format: &str) -> bool {
    let mut in_quotes = false;
    let mut in_brackets = false;
    let mut escaped = false;

    for c in format.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => in_quotes = !in_quotes,
            '[' if !in_quotes => in_brackets = true,
            ']' if !in_quotes => in_brackets = false,
            _ if in_quotes || in_brackets => {}
            _ => {
                if matches!(c.to_ascii_lowercase(), 'y' | 'm' | 'd' | 'h' | 's') {
                    return true;
                }
            }
        }
    }
    false
}

/// Serial dates count whole days since the epoch, with the fractional part
/// encoding time-of-day.
fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let days = serial.trunc() as i64;
    let seconds = ((serial - serial.trunc()) * 86_400.0).round() as i64;

    let (year, month, day) = SERIAL_EPOCH;
    NaiveDate::from_ymd_opt(year, month, day)?
        .checked_add_signed(Duration::days(days))?
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::seconds(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn detects_date_formats_outside_literals() {
        assert!(is_date_format("dd/mm/yyyy"));
        assert!(is_date_format("h:mm"));
        assert!(is_date_format("[$-409]d-mmm-yy"));
        assert!(!is_date_format("General"));
        assert!(!is_date_format("#,##0.00"));
        assert!(!is_date_format("\"kg\" 0.0"));
        assert!(!is_date_format("[Red]0.00"));
    }

    #[test]
    fn serial_conversion_covers_date_and_time_of_day() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(serial_to_datetime(45356.5), Some(expected));
        assert_eq!(
            serial_to_datetime(45356.0).map(|dt| dt.date()),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert_eq!(serial_to_datetime(-1.0), None);
    }

    #[test]
    fn reads_typed_cells_with_their_format_codes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice.xlsx");

        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_mut(&0).unwrap();
        sheet.get_cell_mut("A1").set_value("SITEID");
        sheet.get_cell_mut("B1").set_value("LITERSLOADED");
        sheet.get_cell_mut("A2").set_value("MX-001");
        sheet.get_cell_mut("B2").set_value_number(1234.5);
        sheet
            .get_style_mut("B2")
            .get_number_format_mut()
            .set_format_code("#,##0.00");
        sheet.get_cell_mut("C2").set_value_number(45356.5);
        sheet
            .get_style_mut("C2")
            .get_number_format_mut()
            .set_format_code("dd/mm/yyyy");
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let workbook = open_workbook(&path).unwrap();
        let grid = read_grid(&workbook).unwrap();

        assert_eq!(grid.len(), 2);
        assert_eq!(grid[1][0].value, CellValue::Text("MX-001".into()));
        assert_eq!(grid[1][1].value, CellValue::Number(1234.5));
        assert_eq!(grid[1][1].format, "#,##0.00");
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(grid[1][2].value, CellValue::DateTime(expected));
        // The grid is rectangular: C1 exists as an empty cell.
        assert_eq!(grid[0][0].value, CellValue::Text("SITEID".into()));
        assert_eq!(grid[0][2].value, CellValue::Empty);
    }

    #[test]
    fn rejects_non_workbook_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice.csv");
        File::create(&path).unwrap();

        match open_workbook(&path) {
            Err(Error::UnsupportedFormat(ext)) => assert_eq!(ext, "csv"),
            Err(other) => panic!("expected UnsupportedFormat, got {:?}", other),
            Ok(_) => panic!("expected UnsupportedFormat, got a workbook"),
        }
    }

    #[test]
    fn missing_file_is_reported_before_extension_checks() {
        let missing = Path::new("definitely/not/here.xlsx");
        assert!(matches!(
            open_workbook(missing),
            Err(Error::FileNotFound(_))
        ));
    }
}
