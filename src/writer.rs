use crate::error::Result;
use crate::extract::Extraction;
use crate::normalize::{StorageRecord, StorageValue, SCHEMA};
use crate::render;
use crate::OutputFormat;
use csv::WriterBuilder;
use std::io::Write;

pub struct CsvConfig {
    pub format: OutputFormat,
    pub empty_value: String,
}

/// Write the human preview: the rendered header row, then every display row.
/// Rows keep their source widths, so the writer tolerates ragged records.
pub fn write_preview<W: Write>(
    extraction: &Extraction,
    writer: W,
    config: &CsvConfig,
) -> Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .delimiter(config.format.delimiter())
        .flexible(true)
        .from_writer(writer);

    if !extraction.headers.is_empty() {
        csv_writer.write_record(&extraction.headers)?;
    }

    for row in &extraction.display_rows {
        if row.is_empty() {
            continue;
        }
        let record: Vec<&str> = row
            .iter()
            .map(|value| {
                if value.is_empty() {
                    config.empty_value.as_str()
                } else {
                    value.as_str()
                }
            })
            .collect();
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write staging records in schema order, one line per record, for the
/// bulk-insert collaborator.
pub fn write_staging<W: Write>(
    records: &[StorageRecord],
    writer: W,
    config: &CsvConfig,
) -> Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .delimiter(config.format.delimiter())
        .from_writer(writer);

    csv_writer.write_record(SCHEMA)?;
    for record in records {
        let fields: Vec<String> = record.fields().iter().map(|v| storage_field(v)).collect();
        csv_writer.write_record(&fields)?;
    }

    csv_writer.flush()?;
    Ok(())
}

fn storage_field(value: &StorageValue) -> String {
    match value {
        StorageValue::Null => String::new(),
        StorageValue::Number(n) => render::natural(*n),
        StorageValue::Text(s) => s.clone(),
        StorageValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        StorageValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}
