// ============================================================
// HEADER RESOLVER
// ============================================================
// Locate the real column-name row inside noisy source files
// (title rows, merged banners, blank leading rows)

use tracing::debug;

use crate::application::use_cases::column_matcher::ColumnMatcher;
use crate::domain::error::{AppError, Result};
use crate::domain::{EngineConfig, RawTable};
use crate::infrastructure::tabular::{load_rows, FileFormat};

/// Find the header row and re-interpret the table with it.
///
/// Each of the first `header_scan_rows` rows is tried as the header, top to
/// bottom; the first whose names pass the column existence check wins. The
/// bounded window keeps robustness against leading noise without runaway
/// cost on large files.
pub fn resolve_header(
    bytes: &[u8],
    format: FileFormat,
    config: &EngineConfig,
) -> Result<RawTable> {
    if bytes.is_empty() {
        return Err(AppError::EmptyInput);
    }

    let grid = load_rows(bytes, format)?;
    if grid.is_empty() {
        return Err(AppError::EmptyInput);
    }

    let matcher = ColumnMatcher::new(config);
    let window = grid.len().min(config.header_scan_rows);

    for index in 0..window {
        let names: Vec<String> = grid[index]
            .iter()
            .map(|cell| cell.display_text().to_string())
            .collect();
        if matcher.has_role_columns(&names) {
            debug!(header_row = index, columns = names.len(), "header row resolved");
            return Ok(RawTable::new(names, grid[index + 1..].to_vec()));
        }
    }

    Err(AppError::HeaderNotFound)
}
