use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("file not found: {0:?}")]
    FileNotFound(PathBuf),

    #[error("invalid workbook: {path:?} ({details})")]
    InvalidWorkbook { path: PathBuf, details: String },

    #[error("workbook has no sheets")]
    NoSheets,

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to write CSV: {0}")]
    CsvWrite(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::FileNotFound(_) => 1,
            Error::InvalidWorkbook { .. } => 2,
            Error::NoSheets => 2,
            Error::UnsupportedFormat(_) => 3,
            Error::CsvWrite(_) => 4,
            Error::Io(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
