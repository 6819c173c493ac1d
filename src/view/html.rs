//! Standalone HTML rendering of the network view.
//!
//! The view's nodes and edges are embedded as JSON and handed to
//! vis-network on the client; the document is self-contained apart from
//! the library script tag and is regenerated on every filter interaction.

use crate::view::network::{NetworkView, NodeView};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to encode graph data: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Node in the shape vis-network expects.
#[derive(Serialize)]
struct VisNode {
    id: String,
    label: String,
    title: String,
    size: f64,
    color: &'static str,
    #[serde(rename = "borderWidth")]
    border_width: u32,
}

impl VisNode {
    fn from_view(node: &NodeView) -> Self {
        let label = node.entity.label();
        Self {
            id: label.clone(),
            title: label.clone(),
            label,
            size: node.size,
            color: node.color,
            border_width: 2,
        }
    }
}

/// Edge in the shape vis-network expects.
#[derive(Serialize)]
struct VisEdge {
    from: String,
    to: String,
    title: String,
    width: u32,
    color: &'static str,
    arrows: &'static str,
}

/// Render the view into a complete HTML document.
pub fn render_document(view: &NetworkView) -> Result<String, RenderError> {
    let nodes: Vec<VisNode> = view.nodes.iter().map(VisNode::from_view).collect();
    let edges: Vec<VisEdge> = view
        .edges
        .iter()
        .map(|edge| VisEdge {
            from: edge.source.label(),
            to: edge.target.label(),
            title: format!("Amount: {} IDR\nType: {}", edge.amount_idr, edge.direction),
            width: 2,
            color: "#0078D4",
            arrows: "to",
        })
        .collect();

    let nodes_json = serde_json::to_string(&nodes)?;
    let edges_json = serde_json::to_string(&edges)?;

    Ok(format!(
        r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<script src="https://unpkg.com/vis-network/standalone/umd/vis-network.min.js"></script>
<style>
  #network {{ width: 100%; height: 600px; background-color: #ffffff; }}
</style>
</head>
<body>
<div id="network"></div>
<script>
  const nodes = new vis.DataSet({nodes_json});
  const edges = new vis.DataSet({edges_json});
  const container = document.getElementById("network");
  const options = {{
    physics: {{ enabled: true }},
    edges: {{ arrows: {{ to: {{ enabled: true, scaleFactor: 1.5 }} }} }},
    nodes: {{ font: {{ color: "#252525" }} }}
  }};
  new vis.Network(container, {{ nodes, edges }}, options);
</script>
</body>
</html>
"##
    ))
}

/// Render the view and write it to `path`.
pub fn write_document(view: &NetworkView, path: &Path) -> Result<(), RenderError> {
    let html = render_document(view)?;
    std::fs::write(path, html).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })
}
