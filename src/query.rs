use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::cooccurrence::CooccurrenceGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Sum of incident edge weights for every label in `labels`.
///
/// Labels with no edges map to 0. Repeated labels appear once.
pub fn total_connectivity(labels: &[String], graph: &CooccurrenceGraph) -> BTreeMap<String, u64> {
    labels
        .iter()
        .map(|label| {
            let weight = graph.neighbors(label).iter().map(|(_, w)| w).sum();
            (label.clone(), weight)
        })
        .collect()
}

/// Weight of every edge touching `label`, keyed by the other endpoint.
pub fn neighbor_weights(graph: &CooccurrenceGraph, label: &str) -> BTreeMap<String, u64> {
    graph
        .neighbors(label)
        .into_iter()
        .map(|(other, weight)| (other.to_string(), weight))
        .collect()
}

/// Order entries by weight. Equal weights fall back to the label, ascending,
/// whichever direction is requested.
pub fn sort_by_weight(weights: &BTreeMap<String, u64>, order: SortOrder) -> Vec<(String, u64)> {
    let mut sorted: Vec<(String, u64)> = weights
        .iter()
        .map(|(label, weight)| (label.clone(), *weight))
        .collect();

    sorted.sort_by(|(la, wa), (lb, wb)| {
        let by_weight = match order {
            SortOrder::Ascending => wa.cmp(wb),
            SortOrder::Descending => wb.cmp(wa),
        };
        match by_weight {
            Ordering::Equal => la.cmp(lb),
            other => other,
        }
    });

    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cooccurrence::ingest;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_total_connectivity_chain() {
        let labels = strings(&["A", "B", "C"]);
        let graph = ingest(
            &labels,
            vec![strings(&["1", "1", ""]), strings(&["", "1", "1"])],
        );

        let connectivity = total_connectivity(&labels, &graph);
        assert_eq!(connectivity["A"], 1);
        assert_eq!(connectivity["B"], 2);
        assert_eq!(connectivity["C"], 1);
    }

    #[test]
    fn test_isolated_label_has_zero() {
        let labels = strings(&["a", "b", "lonely"]);
        let graph = ingest(
            &labels,
            vec![strings(&["1", "1", ""]), strings(&["", "", "1"])],
        );

        let connectivity = total_connectivity(&labels, &graph);
        assert_eq!(connectivity.len(), 3);
        assert_eq!(connectivity["lonely"], 0);
        assert!(neighbor_weights(&graph, "lonely").is_empty());
    }

    #[test]
    fn test_triangle_ties_break_by_label() {
        let labels = strings(&["c", "a", "b"]);
        let graph = ingest(
            &labels,
            vec![
                strings(&["1", "1", ""]),
                strings(&["1", "", "1"]),
                strings(&["", "1", "1"]),
            ],
        );

        let ranked = sort_by_weight(&total_connectivity(&labels, &graph), SortOrder::Descending);
        assert_eq!(
            ranked,
            vec![
                ("a".to_string(), 2),
                ("b".to_string(), 2),
                ("c".to_string(), 2)
            ]
        );
    }

    #[test]
    fn test_sort_orders() {
        let weights: BTreeMap<String, u64> = [("x", 3), ("y", 1), ("z", 2), ("w", 1)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        let ascending: Vec<_> = sort_by_weight(&weights, SortOrder::Ascending)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(ascending, vec!["w", "y", "z", "x"]);

        let descending: Vec<_> = sort_by_weight(&weights, SortOrder::Descending)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(descending, vec!["x", "z", "w", "y"]);
    }

    #[test]
    fn test_neighbor_weights() {
        let labels = strings(&["a", "b", "c"]);
        let graph = ingest(
            &labels,
            vec![strings(&["1", "1", "1"]), strings(&["1", "1", ""])],
        );

        let weights = neighbor_weights(&graph, "a");
        assert_eq!(weights.len(), 2);
        assert_eq!(weights["b"], 2);
        assert_eq!(weights["c"], 1);
    }
}
