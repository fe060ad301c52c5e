mod error;
mod extract;
mod format;
mod grid;
mod normalize;
mod reader;
mod render;
mod writer;

use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
    European,
}

impl OutputFormat {
    pub fn delimiter(&self) -> u8 {
        match self {
            OutputFormat::Csv => b',',
            OutputFormat::Tsv => b'\t',
            OutputFormat::European => b';',
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "gasload")]
#[command(version, about = "Preview LP gas invoice spreadsheets and stage them for bulk load")]
pub struct Args {
    /// Invoice workbook to load (.xlsx)
    pub input: PathBuf,

    /// Preview output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write normalized storage records to this file
    #[arg(short, long)]
    pub staging: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Value for empty cells in the preview
    #[arg(short, long, default_value = "")]
    pub empty: String,

    /// Print detailed progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(args: Args) -> error::Result<()> {
    if args.verbose {
        eprintln!("reading: {:?}", args.input);
    }

    let workbook = reader::open_workbook(&args.input)?;
    let grid = reader::read_grid(&workbook)?;

    if args.verbose {
        let cols = grid.first().map(|row| row.len()).unwrap_or(0);
        eprintln!("grid: {} rows, {} columns", grid.len(), cols);
    }

    let extraction = extract::extract(&grid);

    if args.verbose {
        eprintln!(
            "extracted: {} preview rows, {} storage records",
            extraction.display_rows.len(),
            extraction.storage_rows.len()
        );
    }

    let config = writer::CsvConfig {
        format: args.format,
        empty_value: args.empty.clone(),
    };

    match &args.output {
        None => {
            let stdout = io::stdout();
            let handle = stdout.lock();
            writer::write_preview(&extraction, handle, &config)?;
        }
        Some(path) => {
            if args.verbose {
                eprintln!("preview: {:?}", path);
            }
            let file = std::fs::File::create(path)?;
            writer::write_preview(&extraction, file, &config)?;
        }
    }

    if let Some(path) = &args.staging {
        if args.verbose {
            eprintln!("staging: {:?}", path);
        }
        let file = std::fs::File::create(path)?;
        writer::write_staging(&extraction.storage_rows, file, &config)?;
    }

    Ok(())
}
