//! Nav-graph document loader.
//!
//! Reads the building file produced by the map editor:
//!
//! ```text
//! {"levels": {"l1": {"vertices": [[x, y, {attrs}], ...],
//!                    "lanes":    [[a, b, {attrs}], ...]}}}
//! ```
//!
//! Only one level is loaded.  Without an explicit name the first level in
//! name order is used.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use fm_graph::{Lane, NavGraph, Vertex};
use serde::Deserialize;
use tracing::{error, info};

#[derive(Deserialize)]
struct NavDocument {
    levels: BTreeMap<String, Level>,
}

#[derive(Deserialize)]
struct Level {
    vertices: Vec<Vertex>,
    #[serde(default)]
    lanes:    Vec<Lane>,
}

/// Parse a nav-graph document and build the graph for `level`.
pub fn parse_nav_graph(json: &str, level: Option<&str>) -> Result<NavGraph> {
    let mut doc: NavDocument = serde_json::from_str(json).context("malformed nav-graph document")?;

    let name = match level {
        Some(name) => name.to_owned(),
        None => doc
            .levels
            .keys()
            .next()
            .cloned()
            .ok_or_else(|| anyhow!("nav-graph document has no levels"))?,
    };
    let Level { vertices, lanes } = doc
        .levels
        .remove(&name)
        .ok_or_else(|| anyhow!("level {name:?} not found in nav-graph document"))?;

    let graph = NavGraph::from_parts(vertices, lanes);
    info!(
        level = %name,
        vertices = graph.vertex_count(),
        lanes = graph.lane_count(),
        "nav graph loaded"
    );
    Ok(graph)
}

/// Read and parse the document at `path`.
pub fn load_nav_graph(path: &Path, level: Option<&str>) -> Result<NavGraph> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("cannot read nav graph {}", path.display()))?;
    parse_nav_graph(&json, level).with_context(|| format!("in {}", path.display()))
}

/// Like [`load_nav_graph`], but a failure is logged and yields an empty
/// graph.  Every spawn on the empty graph is then rejected.
pub fn load_or_empty(path: &Path, level: Option<&str>) -> NavGraph {
    match load_nav_graph(path, level) {
        Ok(graph) => graph,
        Err(e) => {
            error!(error = format!("{e:#}"), "failed to load nav graph; continuing with an empty graph");
            NavGraph::empty()
        }
    }
}
