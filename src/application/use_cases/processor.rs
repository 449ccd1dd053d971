// ============================================================
// FILE PROCESSOR USE CASE
// ============================================================
// Orchestrate header resolution, role matching, aggregation or
// normalization, and re-serialization for one source file

use std::time::Instant;

use tracing::info;

use crate::application::use_cases::column_matcher::ColumnMatcher;
use crate::application::use_cases::cooccurrence::aggregate;
use crate::application::use_cases::header_resolver::resolve_header;
use crate::application::use_cases::name_normalizer::normalize;
use crate::domain::error::{AppError, Result};
use crate::domain::{CleanedTable, ColumnRoles, EngineConfig, RawTable, Record};
use crate::infrastructure::tabular::{encode_matrix, encode_table, FileFormat};

/// Output filename prefix for the co-occurrence operation.
pub const COOCCURRENCE_PREFIX: &str = "co_occurrence_matrix_";

/// Output filename prefix for the name-cleaning operation.
pub const CLEANED_NAMES_PREFIX: &str = "cleaned_campaign_names_";

/// One finished artifact: output bytes plus the collision-safe name derived
/// from the source file.
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// The engine. Stateless between invocations; every operation is synchronous
/// and either fully succeeds or fails with no partial output.
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Create with default configuration
    pub fn default_config() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Build the symmetric category co-occurrence matrix for one file and
    /// serialize it in the file's own format.
    pub fn process_cooccurrence(&self, bytes: &[u8], filename: &str) -> Result<ProcessedFile> {
        let start = Instant::now();
        let (table, roles, format) = self.ingest(bytes, filename)?;

        let records = extract_records(&table, roles);
        let matrix = aggregate(&records);
        let output = encode_matrix(&matrix, format)?;

        info!(
            file = %filename,
            records = records.len(),
            categories = matrix.categories().len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "co-occurrence matrix produced"
        );

        Ok(ProcessedFile {
            name: output_name(COOCCURRENCE_PREFIX, filename),
            bytes: output,
        })
    }

    /// Rewrite the category column to normalized labels, leaving every other
    /// column untouched, and serialize in the file's own format.
    pub fn process_campaign_names(&self, bytes: &[u8], filename: &str) -> Result<ProcessedFile> {
        let start = Instant::now();
        let (table, roles, format) = self.ingest(bytes, filename)?;

        let rows = table
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                let normalized = normalize(&row[roles.category_column]);
                row[roles.category_column] = normalized;
                row
            })
            .collect();
        let cleaned = CleanedTable {
            columns: table.columns.clone(),
            rows,
        };
        let output = encode_table(&cleaned, format)?;

        info!(
            file = %filename,
            rows = cleaned.rows.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "campaign names cleaned"
        );

        Ok(ProcessedFile {
            name: output_name(CLEANED_NAMES_PREFIX, filename),
            bytes: output,
        })
    }

    /// Shared ingestion path: format from extension, header resolution,
    /// column role binding, empty-data check.
    fn ingest(&self, bytes: &[u8], filename: &str) -> Result<(RawTable, ColumnRoles, FileFormat)> {
        self.config
            .validate()
            .map_err(|e| AppError::ParseError(format!("Invalid engine config: {}", e)))?;

        let format = FileFormat::from_filename(filename, self.config.delimiter)?;
        let table = resolve_header(bytes, format, &self.config)?;
        if table.is_empty() {
            return Err(AppError::EmptyInput);
        }

        let matcher = ColumnMatcher::new(&self.config);
        let roles = matcher.match_roles(&table.columns)?;
        Ok((table, roles, format))
    }
}

/// Restrict data rows to the resolved roles. Rows missing either cell have
/// nothing to pair and are skipped.
fn extract_records(table: &RawTable, roles: ColumnRoles) -> Vec<Record> {
    table
        .rows
        .iter()
        .filter_map(|row| {
            let identifier = row[roles.id_column].as_str()?;
            let category = row[roles.category_column].as_str()?;
            Some(Record::new(identifier, category))
        })
        .collect()
}

/// Derive the artifact name: operation prefix plus the sanitized source
/// name, extension preserved.
fn output_name(prefix: &str, filename: &str) -> String {
    format!("{}{}", prefix, sanitize_filename(filename))
}

/// Strip characters illegal in filesystem names; non-Latin scripts pass
/// through untouched.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' | '\0'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_illegal_characters() {
        assert_eq!(
            sanitize_filename("up/loads\\見込客:リスト?.csv"),
            "uploads見込客リスト.csv"
        );
    }

    #[test]
    fn test_output_name_keeps_extension_and_script() {
        assert_eq!(
            output_name(COOCCURRENCE_PREFIX, "3月キャンペーン.xlsx"),
            "co_occurrence_matrix_3月キャンペーン.xlsx"
        );
    }

    #[test]
    fn test_cooccurrence_end_to_end_csv() {
        let input = "メール,キャンペーン名\n1,X\n1,Y\n2,X\n2,Z\n3,Y\n";
        let engine = Engine::default_config();
        let output = engine
            .process_cooccurrence(input.as_bytes(), "leads.csv")
            .unwrap();
        assert_eq!(output.name, "co_occurrence_matrix_leads.csv");

        let content = String::from_utf8(output.bytes[3..].to_vec()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], ",X,Y,Z");
        assert_eq!(lines[1], "X,0,1,1");
        assert_eq!(lines[2], "Y,1,0,0");
        assert_eq!(lines[3], "Z,1,0,0");
        assert_eq!(lines[4], "合計,2,1,1");
    }

    #[test]
    fn test_clean_names_rewrites_only_category_column() {
        let input = "メール,キャンペーン名,備考\na@example.com,12/Spring Sale,12/keep\n";
        let engine = Engine::default_config();
        let output = engine
            .process_campaign_names(input.as_bytes(), "leads.csv")
            .unwrap();
        assert_eq!(output.name, "cleaned_campaign_names_leads.csv");

        let content = String::from_utf8(output.bytes[3..].to_vec()).unwrap();
        assert_eq!(
            content.lines().nth(1),
            Some("a@example.com,Spring Sale,12/keep")
        );
    }

    #[test]
    fn test_header_only_file_is_empty_input() {
        let engine = Engine::default_config();
        let err = engine
            .process_cooccurrence(b"id,campaign\n", "leads.csv")
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyInput));
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let engine = Engine::default_config();
        let err = engine
            .process_cooccurrence(b"id,campaign\n1,X\n", "leads.pdf")
            .unwrap_err();
        assert!(matches!(err, AppError::Unsupported(_)));
    }
}
