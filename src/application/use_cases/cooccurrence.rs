// ============================================================
// CO-OCCURRENCE AGGREGATOR
// ============================================================
// Count, per unordered category pair, the identifiers that
// carry both categories

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::domain::{CoOccurrenceMatrix, Record};

/// Aggregate records into the symmetric co-occurrence matrix.
///
/// Categories are deduplicated per identifier before pairing, so a repeated
/// (identifier, category) row never inflates a count. Pair keys are taken in
/// sorted order, so (a, b) and (b, a) accumulate into one counter. Axes
/// cover every observed category, co-occurring or not.
///
/// Quadratic in the distinct-category count per identifier, which stays
/// small in practice even when the identifier population is large.
pub fn aggregate(records: &[Record]) -> CoOccurrenceMatrix {
    let mut groups: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    let mut categories: BTreeSet<&str> = BTreeSet::new();

    for record in records {
        groups
            .entry(record.identifier.as_str())
            .or_default()
            .insert(record.category.as_str());
        categories.insert(record.category.as_str());
    }

    let mut pair_counts: BTreeMap<(&str, &str), u64> = BTreeMap::new();
    for group in groups.values() {
        // BTreeSet iteration is sorted, so i < j yields the canonical pair.
        let items: Vec<&str> = group.iter().copied().collect();
        for i in 0..items.len() {
            for j in (i + 1)..items.len() {
                *pair_counts.entry((items[i], items[j])).or_insert(0) += 1;
            }
        }
    }

    let axis: Vec<String> = categories.iter().map(|c| c.to_string()).collect();
    let index: HashMap<&str, usize> = categories
        .iter()
        .enumerate()
        .map(|(i, c)| (*c, i))
        .collect();

    let mut matrix = CoOccurrenceMatrix::zeroed(axis);
    for ((a, b), count) in &pair_counts {
        if let (Some(&row), Some(&col)) = (index.get(a), index.get(b)) {
            matrix.set_pair(row, col, *count);
        }
    }

    debug!(
        identifiers = groups.len(),
        categories = categories.len(),
        pairs = pair_counts.len(),
        "aggregated co-occurrence counts"
    );
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, category: &str) -> Record {
        Record::new(id, category)
    }

    #[test]
    fn test_three_categories_pair_once_each() {
        let records = vec![record("1", "a"), record("1", "b"), record("1", "c")];
        let matrix = aggregate(&records);
        for (x, y) in [("a", "b"), ("a", "c"), ("b", "c")] {
            assert_eq!(matrix.count(x, y), Some(1));
            assert_eq!(matrix.count(y, x), Some(1));
        }
    }

    #[test]
    fn test_repeated_category_counts_once_per_identifier() {
        let records = vec![
            record("1", "a"),
            record("1", "b"),
            record("1", "b"),
            record("1", "a"),
        ];
        let matrix = aggregate(&records);
        assert_eq!(matrix.count("a", "b"), Some(1));
    }

    #[test]
    fn test_reversed_row_order_accumulates_one_counter() {
        let records = vec![
            record("1", "b"),
            record("1", "a"),
            record("2", "a"),
            record("2", "b"),
        ];
        let matrix = aggregate(&records);
        assert_eq!(matrix.count("a", "b"), Some(2));
        assert_eq!(matrix.count("b", "a"), Some(2));
    }

    #[test]
    fn test_isolated_category_keeps_zero_axis_entry() {
        let records = vec![record("1", "a"), record("1", "b"), record("2", "c")];
        let matrix = aggregate(&records);
        assert_eq!(matrix.categories(), &["a", "b", "c"]);
        let c = matrix.index_of("c").unwrap();
        assert!(matrix.row(c).iter().all(|&v| v == 0));
        assert_eq!(matrix.total_row()[c], 0);
    }

    #[test]
    fn test_empty_input_yields_empty_matrix() {
        let matrix = aggregate(&[]);
        assert!(matrix.is_empty());
        assert_eq!(matrix.grand_total(), 0);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let records = vec![
            record("1", "X"),
            record("1", "Y"),
            record("2", "X"),
            record("2", "Z"),
            record("3", "Y"),
        ];
        let matrix = aggregate(&records);
        assert_eq!(matrix.categories(), &["X", "Y", "Z"]);
        assert_eq!(matrix.count("X", "Y"), Some(1));
        assert_eq!(matrix.count("X", "Z"), Some(1));
        assert_eq!(matrix.count("Y", "Z"), Some(0));
        assert_eq!(matrix.total_row(), vec![2, 1, 1]);
        assert_eq!(matrix.grand_total(), 4);
    }

    #[test]
    fn test_symmetry_holds_for_all_pairs() {
        let records = vec![
            record("1", "a"),
            record("1", "b"),
            record("1", "c"),
            record("2", "b"),
            record("2", "c"),
            record("3", "a"),
            record("3", "c"),
        ];
        let matrix = aggregate(&records);
        let n = matrix.categories().len();
        for row in 0..n {
            for col in 0..n {
                assert_eq!(matrix.cell(row, col), matrix.cell(col, row));
            }
        }
    }
}
