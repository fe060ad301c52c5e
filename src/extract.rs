//! Fan-out of one grid into its preview and staging views.

use crate::format;
use crate::grid::{Cell, Grid};
use crate::normalize::StorageRecord;
use crate::render;

/// Preview and staging views of one grid. `display_rows[i]` and
/// `storage_rows[i]` always originate from the same source row; consumers
/// correlate the two by index.
#[derive(Debug)]
pub struct Extraction {
    pub headers: Vec<String>,
    pub display_rows: Vec<Vec<String>>,
    pub storage_rows: Vec<StorageRecord>,
}

/// Walk the grid once: the first row becomes the rendered header, every
/// later row is rendered for preview and normalized for storage.
pub fn extract(grid: &Grid) -> Extraction {
    let mut rows = grid.iter();

    let headers = match rows.next() {
        Some(header) => render_row(header),
        None => Vec::new(),
    };

    let mut display_rows = Vec::new();
    let mut storage_rows = Vec::new();
    for row in rows {
        display_rows.push(render_row(row));
        storage_rows.push(StorageRecord::from_cells(row));
    }

    Extraction {
        headers,
        display_rows,
        storage_rows,
    }
}

fn render_row(row: &[Cell]) -> Vec<String> {
    row.iter()
        .map(|cell| render::render(&cell.value, &format::interpret(&cell.format)))
        .collect()
}
