// 📊 Aggregator - Group categorized items and sum quantities
// Order independent and idempotent: re-aggregating aggregated entries
// reproduces the same totals

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// CORE TYPES
// ============================================================================

/// A line item after classification and name cleanup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedItem {
    pub category: String,
    pub name: String,
    pub quantity: f64,
}

/// One row of the replenishment list, unique per (category, product) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedEntry {
    pub category: String,
    pub product_name: String,
    pub total_quantity: f64,
}

impl AggregatedEntry {
    /// Re-enter aggregation as a single weighted item
    pub fn as_item(&self) -> CategorizedItem {
        CategorizedItem {
            category: self.category.clone(),
            name: self.product_name.clone(),
            quantity: self.total_quantity,
        }
    }
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Group by exact (category, name) pair and sum quantities.
///
/// The accumulator is a BTreeMap, so the output comes back sorted by
/// (category, name) and is identical for every permutation of the input.
pub fn aggregate(items: &[CategorizedItem]) -> Vec<AggregatedEntry> {
    let mut totals: BTreeMap<(String, String), f64> = BTreeMap::new();

    for item in items {
        *totals
            .entry((item.category.clone(), item.name.clone()))
            .or_insert(0.0) += item.quantity;
    }

    totals
        .into_iter()
        .map(|((category, product_name), total_quantity)| AggregatedEntry {
            category,
            product_name,
            total_quantity,
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(category: &str, name: &str, quantity: f64) -> CategorizedItem {
        CategorizedItem {
            category: category.to_string(),
            name: name.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_same_product_sums() {
        let entries = aggregate(&[
            item("Velas", "LAVANDA", 3.0),
            item("Velas", "LAVANDA", 2.0),
        ]);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, "Velas");
        assert_eq!(entries[0].product_name, "LAVANDA");
        assert_eq!(entries[0].total_quantity, 5.0);
    }

    #[test]
    fn test_same_name_different_category_stays_apart() {
        let entries = aggregate(&[
            item("Velas", "LAVANDA", 1.0),
            item("Aerosoles", "LAVANDA", 1.0),
        ]);

        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_order_independence() {
        let forward = aggregate(&[
            item("Velas", "LAVANDA", 3.0),
            item("Difusores", "INVICTO", 2.0),
            item("Velas", "LAVANDA", 2.0),
        ]);
        let shuffled = aggregate(&[
            item("Velas", "LAVANDA", 2.0),
            item("Velas", "LAVANDA", 3.0),
            item("Difusores", "INVICTO", 2.0),
        ]);

        assert_eq!(forward, shuffled);
    }

    #[test]
    fn test_idempotent_under_reaggregation() {
        let first = aggregate(&[
            item("Velas", "LAVANDA", 3.0),
            item("Velas", "LAVANDA", 2.0),
            item("Difusores", "INVICTO", 1.0),
        ]);

        let weighted: Vec<CategorizedItem> =
            first.iter().map(AggregatedEntry::as_item).collect();
        let second = aggregate(&weighted);

        assert_eq!(first, second);
    }

    #[test]
    fn test_output_sorted_by_category_then_name() {
        let entries = aggregate(&[
            item("Velas", "ROSA", 1.0),
            item("Aerosoles", "VAINILLA", 1.0),
            item("Velas", "LAVANDA", 1.0),
        ]);

        let pairs: Vec<(&str, &str)> = entries
            .iter()
            .map(|e| (e.category.as_str(), e.product_name.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Aerosoles", "VAINILLA"),
                ("Velas", "LAVANDA"),
                ("Velas", "ROSA"),
            ]
        );
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(aggregate(&[]).is_empty());
    }
}
