use anyhow::{Context, Result};
use petgraph::dot::{Config, Dot};
use serde::Serialize;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cooccurrence::CooccurrenceGraph;
use crate::query::{neighbor_weights, sort_by_weight, total_connectivity, SortOrder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightRow {
    pub label: String,
    pub weight: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelReport {
    pub label: String,
    /// Neighbors, heaviest first.
    pub neighbors: Vec<WeightRow>,
    #[serde(skip)]
    ascending: Vec<WeightRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopEntry {
    pub label: String,
    pub weight: u64,
    pub neighbors: Vec<String>,
}

/// Everything printed for one run, in either text or JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<LabelReport>,
    pub connectivity: Vec<WeightRow>,
    pub top: Vec<TopEntry>,
}

fn rows(pairs: Vec<(String, u64)>) -> Vec<WeightRow> {
    pairs
        .into_iter()
        .map(|(label, weight)| WeightRow { label, weight })
        .collect()
}

pub fn build_report(
    labels: &[String],
    graph: &CooccurrenceGraph,
    label: Option<&str>,
    top: usize,
) -> Report {
    let label = label.map(|label| {
        let weights = neighbor_weights(graph, label);
        LabelReport {
            label: label.to_string(),
            neighbors: rows(sort_by_weight(&weights, SortOrder::Descending)),
            ascending: rows(sort_by_weight(&weights, SortOrder::Ascending)),
        }
    });

    let connectivity = rows(sort_by_weight(
        &total_connectivity(labels, graph),
        SortOrder::Descending,
    ));

    let top = connectivity
        .iter()
        .take(top)
        .map(|entry| TopEntry {
            label: entry.label.clone(),
            weight: entry.weight,
            neighbors: sort_by_weight(&neighbor_weights(graph, &entry.label), SortOrder::Descending)
                .into_iter()
                .map(|(other, _)| other)
                .collect(),
        })
        .collect();

    Report {
        label,
        connectivity,
        top,
    }
}

fn format_pairs(rows: &[WeightRow]) -> String {
    let pairs: Vec<String> = rows
        .iter()
        .map(|row| format!("('{}', {})", row.label, row.weight))
        .collect();
    format!("[{}]", pairs.join(", "))
}

pub fn write_text<W: Write>(out: &mut W, report: &Report) -> Result<()> {
    if let Some(label) = &report.label {
        writeln!(out, "\nStats for label '{}':", label.label)?;
        writeln!(out, "{}", format_pairs(&label.neighbors))?;

        // Spreadsheet-ready section
        writeln!(out, "\nTabulated form for '{}':", label.label)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut *out);
        writer.write_record(["label", "weight"])?;
        for row in &label.ascending {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }

    writeln!(out, "\nMost connected labels:")?;
    writeln!(out, "{}", format_pairs(&report.connectivity))?;

    writeln!(out, "\nTop {} connectivity:", report.top.len())?;
    for entry in &report.top {
        writeln!(out, " * '{}': {}", entry.label, entry.neighbors.join(" "))?;
    }

    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, report: &Report) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

/// `<input>.dot`, next to the input file.
pub fn default_dot_path(input: &Path) -> PathBuf {
    let mut path: OsString = input.as_os_str().to_owned();
    path.push(".dot");
    PathBuf::from(path)
}

pub fn export_to_graphvis(graph: &CooccurrenceGraph, filename: &Path) -> Result<()> {
    let viz = Dot::with_attr_getters(
        graph.inner(),
        &[Config::EdgeNoLabel, Config::NodeNoLabel],
        &|_, edge| format!("weight={} label=\"{}\"", edge.weight(), edge.weight()),
        &|_, (_, label)| format!("label={:?}", label),
    );

    std::fs::write(filename, format!("{:?}", viz))
        .with_context(|| format!("failed to write {}", filename.display()))?;
    info!("wrote {}", filename.display());

    Ok(())
}
