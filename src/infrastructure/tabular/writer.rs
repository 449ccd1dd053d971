// ============================================================
// TABULAR WRITER
// ============================================================
// Serialize a co-occurrence matrix or cleaned table back into
// delimited-text or spreadsheet bytes

use csv::WriterBuilder;
use rust_xlsxwriter::{Color, Format, Workbook};

use crate::domain::error::{AppError, Result};
use crate::domain::{Cell, CleanedTable, CoOccurrenceMatrix};
use crate::infrastructure::tabular::reader::FileFormat;

/// Axis label for the synthetic total row/column.
pub const TOTAL_LABEL: &str = "合計";

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const TOTAL_FILL: Color = Color::RGB(0xD9D9D9);

/// Encode a matrix. Delimited output carries the total row only;
/// spreadsheet output adds the total column and grand total, with the
/// totals rendered bold on a gray fill.
pub fn encode_matrix(matrix: &CoOccurrenceMatrix, format: FileFormat) -> Result<Vec<u8>> {
    match format {
        FileFormat::Delimited { delimiter } => encode_matrix_delimited(matrix, delimiter),
        FileFormat::Spreadsheet => encode_matrix_spreadsheet(matrix),
    }
}

/// Encode a cleaned table in the source's own format. Missing cells render
/// as empty fields.
pub fn encode_table(table: &CleanedTable, format: FileFormat) -> Result<Vec<u8>> {
    match format {
        FileFormat::Delimited { delimiter } => encode_table_delimited(table, delimiter),
        FileFormat::Spreadsheet => encode_table_spreadsheet(table),
    }
}

fn encode_matrix_delimited(matrix: &CoOccurrenceMatrix, delimiter: u8) -> Result<Vec<u8>> {
    // Excel expects a BOM to pick up UTF-8 in delimited files.
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(UTF8_BOM.to_vec());

    let mut header = vec![String::new()];
    header.extend(matrix.categories().iter().cloned());
    write_record(&mut writer, &header)?;

    for (index, category) in matrix.categories().iter().enumerate() {
        let mut row = vec![category.clone()];
        row.extend(matrix.row(index).iter().map(|count| count.to_string()));
        write_record(&mut writer, &row)?;
    }

    let mut totals = vec![TOTAL_LABEL.to_string()];
    totals.extend(matrix.total_row().iter().map(|count| count.to_string()));
    write_record(&mut writer, &totals)?;

    writer
        .into_inner()
        .map_err(|e| AppError::IoError(format!("Failed to flush output: {}", e)))
}

fn encode_table_delimited(table: &CleanedTable, delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(UTF8_BOM.to_vec());

    write_record(&mut writer, &table.columns)?;
    for row in &table.rows {
        let fields: Vec<String> = row
            .iter()
            .map(|cell| cell.display_text().to_string())
            .collect();
        write_record(&mut writer, &fields)?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::IoError(format!("Failed to flush output: {}", e)))
}

fn write_record(writer: &mut csv::Writer<Vec<u8>>, fields: &[String]) -> Result<()> {
    writer
        .write_record(fields)
        .map_err(|e| AppError::IoError(format!("Failed to write record: {}", e)))
}

fn encode_matrix_spreadsheet(matrix: &CoOccurrenceMatrix) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let total_format = Format::new().set_bold().set_background_color(TOTAL_FILL);

    let n = matrix.categories().len();
    let total_col = (n + 1) as u16;
    let total_row_index = (n + 1) as u32;

    let xlsx = |e: rust_xlsxwriter::XlsxError| {
        AppError::IoError(format!("Failed to build spreadsheet: {}", e))
    };

    // Header row: blank corner, categories, total column label.
    for (col, category) in matrix.categories().iter().enumerate() {
        worksheet
            .write_string(0, (col + 1) as u16, category)
            .map_err(xlsx)?;
    }
    worksheet
        .write_string_with_format(0, total_col, TOTAL_LABEL, &total_format)
        .map_err(xlsx)?;

    let row_totals = matrix.row_totals();
    for (index, category) in matrix.categories().iter().enumerate() {
        let excel_row = (index + 1) as u32;
        worksheet.write_string(excel_row, 0, category).map_err(xlsx)?;
        for (col, count) in matrix.row(index).iter().enumerate() {
            worksheet
                .write_number(excel_row, (col + 1) as u16, *count as f64)
                .map_err(xlsx)?;
        }
        worksheet
            .write_number_with_format(excel_row, total_col, row_totals[index] as f64, &total_format)
            .map_err(xlsx)?;
    }

    // Total row with the reconciled grand total in the bottom-right cell.
    worksheet
        .write_string_with_format(total_row_index, 0, TOTAL_LABEL, &total_format)
        .map_err(xlsx)?;
    for (col, count) in matrix.total_row().iter().enumerate() {
        worksheet
            .write_number_with_format(
                total_row_index,
                (col + 1) as u16,
                *count as f64,
                &total_format,
            )
            .map_err(xlsx)?;
    }
    worksheet
        .write_number_with_format(
            total_row_index,
            total_col,
            matrix.grand_total() as f64,
            &total_format,
        )
        .map_err(xlsx)?;

    // Presentation only: size each column to its widest rendered value.
    for (col, width) in matrix_column_widths(matrix).into_iter().enumerate() {
        worksheet
            .set_column_width(col as u16, (width as f64 + 2.0).max(8.0))
            .map_err(xlsx)?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| AppError::IoError(format!("Failed to serialize spreadsheet: {}", e)))
}

fn encode_table_spreadsheet(table: &CleanedTable) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let xlsx = |e: rust_xlsxwriter::XlsxError| {
        AppError::IoError(format!("Failed to build spreadsheet: {}", e))
    };

    for (col, name) in table.columns.iter().enumerate() {
        worksheet.write_string(0, col as u16, name).map_err(xlsx)?;
    }
    for (index, row) in table.rows.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            if let Cell::Text(value) = cell {
                worksheet
                    .write_string((index + 1) as u32, col as u16, value)
                    .map_err(xlsx)?;
            }
        }
    }

    for (col, name) in table.columns.iter().enumerate() {
        let mut width = display_width(name);
        for row in &table.rows {
            if let Some(Cell::Text(value)) = row.get(col) {
                width = width.max(display_width(value));
            }
        }
        worksheet
            .set_column_width(col as u16, (width as f64 + 2.0).max(8.0))
            .map_err(xlsx)?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| AppError::IoError(format!("Failed to serialize spreadsheet: {}", e)))
}

/// Rendered width per spreadsheet matrix column: the label column, one
/// column per category, and the total column. Each is the maximum over its
/// header and every value it holds, totals included.
fn matrix_column_widths(matrix: &CoOccurrenceMatrix) -> Vec<usize> {
    let total_row = matrix.total_row();
    let row_totals = matrix.row_totals();

    let mut label_width = display_width(TOTAL_LABEL);
    for category in matrix.categories() {
        label_width = label_width.max(display_width(category));
    }
    let mut widths = vec![label_width];

    for (col, category) in matrix.categories().iter().enumerate() {
        let mut width = display_width(category);
        for row in 0..matrix.categories().len() {
            width = width.max(display_width(&matrix.cell(row, col).to_string()));
        }
        width = width.max(display_width(&total_row[col].to_string()));
        widths.push(width);
    }

    let mut total_width = display_width(TOTAL_LABEL);
    for value in &row_totals {
        total_width = total_width.max(display_width(&value.to_string()));
    }
    total_width = total_width.max(display_width(&matrix.grand_total().to_string()));
    widths.push(total_width);

    widths
}

/// Approximate rendered width in character cells; CJK glyphs count double.
fn display_width(value: &str) -> usize {
    value
        .chars()
        .map(|c| if is_wide(c) { 2 } else { 1 })
        .sum()
}

fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x20000..=0x2FFFD
        | 0x30000..=0x3FFFD)
}
