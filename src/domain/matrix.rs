// ============================================================
// CO-OCCURRENCE MATRIX
// ============================================================
// Symmetric pairwise counts over the observed category set

use serde::{Deserialize, Serialize};

/// Symmetric category co-occurrence counts.
///
/// Axes are the sorted, deduplicated set of every category observed in the
/// source, including categories that never co-occur with anything. The
/// diagonal is never counted and stays zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoOccurrenceMatrix {
    categories: Vec<String>,
    cells: Vec<Vec<u64>>,
}

impl CoOccurrenceMatrix {
    /// Build an all-zero matrix over a sorted category axis.
    pub fn zeroed(categories: Vec<String>) -> Self {
        let n = categories.len();
        Self {
            categories,
            cells: vec![vec![0; n]; n],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }

    /// Write a pair count into both symmetric cells.
    pub fn set_pair(&mut self, a: usize, b: usize, count: u64) {
        self.cells[a][b] = count;
        self.cells[b][a] = count;
    }

    pub fn cell(&self, row: usize, col: usize) -> u64 {
        self.cells[row][col]
    }

    /// Lookup by category name; None if either axis label is unknown.
    pub fn count(&self, a: &str, b: &str) -> Option<u64> {
        let row = self.index_of(a)?;
        let col = self.index_of(b)?;
        Some(self.cells[row][col])
    }

    pub fn row(&self, index: usize) -> &[u64] {
        &self.cells[index]
    }

    /// Column-wise sums, the synthetic total row.
    pub fn total_row(&self) -> Vec<u64> {
        let n = self.categories.len();
        let mut totals = vec![0u64; n];
        for row in &self.cells {
            for (col, value) in row.iter().enumerate() {
                totals[col] += value;
            }
        }
        totals
    }

    /// Row-wise sums, the synthetic total column. Equal to the total row by
    /// symmetry.
    pub fn row_totals(&self) -> Vec<u64> {
        self.cells.iter().map(|row| row.iter().sum()).collect()
    }

    /// Grand total for the bottom-right cell: the sum of the total row.
    pub fn grand_total(&self) -> u64 {
        self.total_row().iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CoOccurrenceMatrix {
        let mut matrix = CoOccurrenceMatrix::zeroed(vec![
            "X".to_string(),
            "Y".to_string(),
            "Z".to_string(),
        ]);
        matrix.set_pair(0, 1, 1);
        matrix.set_pair(0, 2, 1);
        matrix
    }

    #[test]
    fn test_set_pair_is_symmetric() {
        let matrix = sample();
        for a in 0..3 {
            for b in 0..3 {
                assert_eq!(matrix.cell(a, b), matrix.cell(b, a));
            }
        }
    }

    #[test]
    fn test_totals_reconcile() {
        let matrix = sample();
        assert_eq!(matrix.total_row(), vec![2, 1, 1]);
        assert_eq!(matrix.row_totals(), matrix.total_row());
        assert_eq!(matrix.grand_total(), 4);
    }

    #[test]
    fn test_empty_matrix_has_zero_grand_total() {
        let matrix = CoOccurrenceMatrix::zeroed(Vec::new());
        assert!(matrix.is_empty());
        assert_eq!(matrix.grand_total(), 0);
    }

    #[test]
    fn test_count_by_name() {
        let matrix = sample();
        assert_eq!(matrix.count("X", "Y"), Some(1));
        assert_eq!(matrix.count("Y", "Z"), Some(0));
        assert_eq!(matrix.count("X", "missing"), None);
    }
}
