//! Graph model construction: best-effort JSON parsing with a duck-typed
//! shape check, plus highlight decoration of node colors.

use log::debug;

use super::types::{Graph, GraphNode, HighlightColor};

/// Border width applied to every node at decoration time.
pub const NODE_BORDER_WIDTH: f64 = 2.0;

#[derive(Debug, thiserror::Error)]
pub enum GraphParseError {
	#[error("invalid JSON: {0}")]
	Json(#[from] serde_json::Error),

	#[error("value is not a {{nodes, edges}} object")]
	Shape,
}

/// Parse free text as graph JSON. The shape check is deliberately
/// duck-typed: any object carrying both a `nodes` and an `edges` key is
/// accepted, everything else is rejected.
pub fn parse_graph_json(text: &str) -> Result<Graph, GraphParseError> {
	let value: serde_json::Value = serde_json::from_str(text)?;
	graph_from_value(value)
}

/// Same shape check for already-parsed JSON (e.g. the `graph` payload on
/// a discovery node).
pub fn graph_from_value(value: serde_json::Value) -> Result<Graph, GraphParseError> {
	if !value.is_object() || value.get("nodes").is_none() || value.get("edges").is_none() {
		return Err(GraphParseError::Shape);
	}
	Ok(serde_json::from_value(value)?)
}

/// The swallowing wrapper: any parse or shape error maps to the canonical
/// empty graph. No error propagates past this point.
pub fn graph_from_text(text: &str) -> Graph {
	match parse_graph_json(text) {
		Ok(graph) => graph,
		Err(err) => {
			debug!("discarding graph input: {err}");
			Graph::empty()
		}
	}
}

/// Mirror the base border/background pair into the highlight variant and
/// pin the border width. Recomputes from the current base pair, so
/// reapplying is a no-op.
pub fn decorate_node(node: &mut GraphNode) {
	if let Some(color) = node.color.as_mut() {
		color.highlight = Some(HighlightColor {
			border: color.border.clone(),
			background: color.background.clone(),
		});
	}
	node.border_width = NODE_BORDER_WIDTH;
}

/// Build the renderable model from a raw graph: every node decorated,
/// edge order preserved.
pub fn build_model(graph: &Graph) -> Graph {
	let mut model = graph.clone();
	for node in &mut model.nodes {
		decorate_node(node);
	}
	model
}
