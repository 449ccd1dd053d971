// ============================================================
// TABULAR READER
// ============================================================
// Load delimited-text or spreadsheet bytes into an untyped
// row grid, before any header row has been chosen

use std::io::Cursor;
use std::path::Path;

use calamine::{DataType, Reader, Xlsx};
use csv::ReaderBuilder;

use crate::domain::error::{AppError, Result};
use crate::domain::Cell;
use crate::infrastructure::encoding::decode_text;

/// Declared input format, resolved from the file extension only; content is
/// never sniffed beyond text-encoding detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Delimited { delimiter: u8 },
    Spreadsheet,
}

impl FileFormat {
    pub fn from_filename(filename: &str, default_delimiter: u8) -> Result<Self> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(FileFormat::Delimited {
                delimiter: default_delimiter,
            }),
            "tsv" => Ok(FileFormat::Delimited { delimiter: b'\t' }),
            "xlsx" | "xlsm" => Ok(FileFormat::Spreadsheet),
            other => Err(AppError::Unsupported(format!(
                "unrecognized extension '{}' for {}",
                other, filename
            ))),
        }
    }
}

/// Parse every row of the source into cells, with no header interpretation.
pub fn load_rows(bytes: &[u8], format: FileFormat) -> Result<Vec<Vec<Cell>>> {
    match format {
        FileFormat::Delimited { delimiter } => load_delimited(bytes, delimiter),
        FileFormat::Spreadsheet => load_spreadsheet(bytes),
    }
}

fn load_delimited(bytes: &[u8], delimiter: u8) -> Result<Vec<Vec<Cell>>> {
    let content = decode_text(bytes)?;

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            AppError::ParseError(format!("Failed to parse row {}: {}", index + 1, e))
        })?;
        rows.push(record.iter().map(Cell::text).collect());
    }
    Ok(rows)
}

/// Open the first worksheet only; subsequent sheets are ignored.
fn load_spreadsheet(bytes: &[u8]) -> Result<Vec<Vec<Cell>>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| AppError::ParseError(format!("Failed to open spreadsheet: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::ParseError("No worksheet found".to_string()))?
        .map_err(|e| AppError::ParseError(format!("Failed to read worksheet: {}", e)))?;

    let rows = range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    if cell.is_empty() {
                        Cell::Missing
                    } else {
                        cell.as_string()
                            .map(Cell::Text)
                            .unwrap_or_else(|| Cell::text(format!("{}", cell)))
                    }
                })
                .collect()
        })
        .collect();
    Ok(rows)
}
