use anyhow::{bail, ensure, Context, Result};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

use crate::line::decode_line;

/// Undirected, simple, weighted graph of labels that shared a row.
///
/// Each edge weight counts the rows in which both endpoints had a value.
/// Nodes are created lazily, so a label that never co-occurs has no node.
#[derive(Debug, Clone, Default)]
pub struct CooccurrenceGraph {
    graph: UnGraph<String, u64>,
    nodes: HashMap<String, NodeIndex>,
}

impl CooccurrenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Labels in node creation order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph
            .node_indices()
            .map(move |node| self.graph[node].as_str())
    }

    /// Every edge once, as `(a, b, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, u64)> + '_ {
        self.graph.edge_references().map(move |edge| {
            (
                self.graph[edge.source()].as_str(),
                self.graph[edge.target()].as_str(),
                *edge.weight(),
            )
        })
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.edge_weight(a, b).is_some()
    }

    pub fn edge_weight(&self, a: &str, b: &str) -> Option<u64> {
        let node_a = *self.nodes.get(a)?;
        let node_b = *self.nodes.get(b)?;
        self.graph
            .find_edge(node_a, node_b)
            .map(|edge| self.graph[edge])
    }

    /// Edges incident to `label`, keyed by the other endpoint.
    pub fn neighbors(&self, label: &str) -> Vec<(&str, u64)> {
        let Some(&node) = self.nodes.get(label) else {
            return Vec::new();
        };

        self.graph
            .edges(node)
            .map(|edge| {
                let other = if edge.source() == node {
                    edge.target()
                } else {
                    edge.source()
                };
                (self.graph[other].as_str(), *edge.weight())
            })
            .collect()
    }

    /// Bump the weight between `a` and `b`, creating the edge at 1.
    /// A label paired with itself is ignored: the graph has no self-loops.
    pub fn add_or_increment_edge(&mut self, a: &str, b: &str) {
        if a == b {
            return;
        }

        let node_a = self.node(a);
        let node_b = self.node(b);

        match self.graph.find_edge(node_a, node_b) {
            Some(edge) => self.graph[edge] += 1,
            None => {
                self.graph.add_edge(node_a, node_b, 1);
            }
        }
    }

    /// Count one data row. Returns false when the row was skipped because its
    /// field count does not match the header.
    pub fn add_row(&mut self, labels: &[String], fields: &[String]) -> bool {
        if fields.len() != labels.len() {
            return false;
        }

        let mut occurrences: Vec<usize> = Vec::new();
        for (current, field) in fields.iter().enumerate() {
            if field.is_empty() {
                continue;
            }
            for &prev in &occurrences {
                self.add_or_increment_edge(&labels[prev], &labels[current]);
            }
            occurrences.push(current);
        }

        true
    }

    fn node(&mut self, label: &str) -> NodeIndex {
        if let Some(&node) = self.nodes.get(label) {
            return node;
        }
        let node = self.graph.add_node(label.to_string());
        self.nodes.insert(label.to_string(), node);
        node
    }

    pub(crate) fn inner(&self) -> &UnGraph<String, u64> {
        &self.graph
    }
}

/// Build the graph from decoded data rows. Rows whose length differs from
/// `labels` are dropped.
pub fn ingest<I>(labels: &[String], rows: I) -> CooccurrenceGraph
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut graph = CooccurrenceGraph::new();
    let mut skipped = 0usize;

    for row in rows {
        if !graph.add_row(labels, &row) {
            skipped += 1;
        }
    }

    debug!(skipped, "rows with mismatched field count");
    graph
}

/// Read a CSV file: the first line gives the labels, the rest are data rows.
pub fn read_data(path: &Path) -> Result<(Vec<String>, CooccurrenceGraph)> {
    ensure!(path.is_file(), "{} is not a regular file", path.display());

    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut lines = BufReader::new(file).lines();

    let header = match lines.next() {
        Some(line) => line.with_context(|| format!("failed to read {}", path.display()))?,
        None => bail!("{} is empty", path.display()),
    };
    let labels = decode_line(&header);
    ensure!(
        labels.iter().any(|label| !label.is_empty()),
        "{} has no header labels",
        path.display()
    );

    let rows = lines
        .map(|line| line.map(|line| decode_line(&line)))
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("failed to read {}", path.display()))?;
    info!(labels = labels.len(), rows = rows.len(), "read {}", path.display());

    let graph = ingest(&labels, rows);
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built co-occurrence graph"
    );

    Ok((labels, graph))
}
