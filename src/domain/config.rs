// ============================================================
// ENGINE CONFIGURATION
// ============================================================
// Tunables for header resolution and column role matching

use serde::{Deserialize, Serialize};

/// Default identifier-column patterns: "id", mail, prospect, representative.
pub const DEFAULT_ID_PATTERNS: &[&str] = &["id", "メール", "mail", "見込客", "担当"];

/// Default category-column patterns: native and transliterated "campaign".
pub const DEFAULT_CATEGORY_PATTERNS: &[&str] = &["キャンペーン", "campaign"];

/// Configuration for the co-occurrence/normalization engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of leading rows scanned for a usable header (default: 20)
    pub header_scan_rows: usize,

    /// Substrings that mark a column as the record identifier
    pub id_patterns: Vec<String>,

    /// Substrings that mark a column as the category label
    pub category_patterns: Vec<String>,

    /// Delimiter for delimited-text files (default: comma)
    pub delimiter: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            header_scan_rows: 20,
            id_patterns: DEFAULT_ID_PATTERNS.iter().map(|s| s.to_string()).collect(),
            category_patterns: DEFAULT_CATEGORY_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            delimiter: b',',
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.header_scan_rows == 0 {
            return Err("header_scan_rows must be > 0".to_string());
        }
        if self.id_patterns.is_empty() {
            return Err("id_patterns must not be empty".to_string());
        }
        if self.category_patterns.is_empty() {
            return Err("category_patterns must not be empty".to_string());
        }
        Ok(())
    }
}
