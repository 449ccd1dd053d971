// ============================================================
// COLUMN ROLE MATCHER
// ============================================================
// Resolve which columns hold the record identifier and the
// category label, by fuzzy substring matching on header names

use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::domain::{ColumnRoles, EngineConfig};

/// Fuzzy matcher over header names.
///
/// Matching is substring containment on trimmed, lowercased names, and is
/// intentionally permissive: a false positive on an unrelated column whose
/// name happens to contain "id" is an accepted tradeoff for flexibility
/// across varied source exports.
pub struct ColumnMatcher {
    id_patterns: Vec<String>,
    category_patterns: Vec<String>,
}

impl ColumnMatcher {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            id_patterns: config.id_patterns.iter().map(|p| p.to_lowercase()).collect(),
            category_patterns: config
                .category_patterns
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
        }
    }

    /// Existence check used while scanning for a header row: does at least
    /// one column look like an identifier and at least one like a category?
    pub fn has_role_columns(&self, column_names: &[String]) -> bool {
        self.find_first(column_names, &self.id_patterns).is_some()
            && self.find_first(column_names, &self.category_patterns).is_some()
    }

    /// Full resolution. Each role is scanned independently left to right;
    /// the first matching column binds, and one column may bind both roles.
    pub fn match_roles(&self, column_names: &[String]) -> Result<ColumnRoles> {
        let id_column = self.find_first(column_names, &self.id_patterns);
        let category_column = self.find_first(column_names, &self.category_patterns);

        match (id_column, category_column) {
            (Some(id_column), Some(category_column)) => {
                debug!(id_column, category_column, "resolved column roles");
                Ok(ColumnRoles {
                    id_column,
                    category_column,
                })
            }
            _ => Err(AppError::ColumnsNotFound {
                columns: column_names.to_vec(),
            }),
        }
    }

    fn find_first(&self, column_names: &[String], patterns: &[String]) -> Option<usize> {
        column_names.iter().position(|name| {
            let normalized = name.trim().to_lowercase();
            patterns.iter().any(|pattern| normalized.contains(pattern))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> ColumnMatcher {
        ColumnMatcher::new(&EngineConfig::default())
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolves_japanese_headers() {
        let roles = matcher()
            .match_roles(&names(&["メールアドレス", "キャンペーン名", "備考"]))
            .unwrap();
        assert_eq!(roles.id_column, 0);
        assert_eq!(roles.category_column, 1);
    }

    #[test]
    fn test_resolves_transliterated_headers() {
        let roles = matcher()
            .match_roles(&names(&["Campaign Title", "Lead ID"]))
            .unwrap();
        assert_eq!(roles.id_column, 1);
        assert_eq!(roles.category_column, 0);
    }

    #[test]
    fn test_matching_trims_and_case_folds() {
        let roles = matcher()
            .match_roles(&names(&["  Prospect ID  ", "CAMPAIGN"]))
            .unwrap();
        assert_eq!(roles.id_column, 0);
        assert_eq!(roles.category_column, 1);
    }

    #[test]
    fn test_single_column_may_bind_both_roles() {
        let roles = matcher()
            .match_roles(&names(&["campaign id"]))
            .unwrap();
        assert_eq!(roles.id_column, 0);
        assert_eq!(roles.category_column, 0);
    }

    #[test]
    fn test_unresolved_roles_carry_observed_names() {
        let err = matcher()
            .match_roles(&names(&["日付", "金額"]))
            .unwrap_err();
        match err {
            AppError::ColumnsNotFound { columns } => {
                assert_eq!(columns, names(&["日付", "金額"]));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_existence_check_requires_both_roles() {
        let m = matcher();
        assert!(m.has_role_columns(&names(&["担当者", "キャンペーン名"])));
        assert!(!m.has_role_columns(&names(&["担当者", "日付"])));
        assert!(!m.has_role_columns(&[]));
    }
}
