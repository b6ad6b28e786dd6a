use std::fmt;

use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};

/// Node identifier, unique within one graph. Kraken topology JSON uses
/// string ids, ad-hoc pasted JSON often uses bare numbers; both normalize
/// to the same key type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GraphId(pub String);

impl<'de> Deserialize<'de> for GraphId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		match serde_json::Value::deserialize(deserializer)? {
			serde_json::Value::String(s) => Ok(GraphId(s)),
			serde_json::Value::Number(n) => Ok(GraphId(n.to_string())),
			other => Err(D::Error::custom(format!(
				"node id must be a string or number, got {other}"
			))),
		}
	}
}

impl fmt::Display for GraphId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

impl From<&str> for GraphId {
	fn from(s: &str) -> Self {
		GraphId(s.to_owned())
	}
}

/// The border/background pair the engine swaps in while a node is
/// selected or hovered.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HighlightColor {
	pub border: String,
	pub background: String,
}

/// Color descriptor carried by a node. `highlight` is filled in by
/// decoration and always mirrors the base pair at construction time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeColor {
	#[serde(default)]
	pub border: String,
	#[serde(default)]
	pub background: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub highlight: Option<HighlightColor>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	pub id: GraphId,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<NodeColor>,
	#[serde(default, rename = "borderWidth")]
	pub border_width: f64,
	/// Physics pin: a fixed node keeps its position through simulation.
	#[serde(default)]
	pub fixed: bool,
}

/// Directed edge, always drawn with the arrowhead at `to`. Width and
/// color inheritance are engine options, not per-edge state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
	pub from: GraphId,
	pub to: GraphId,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
}

/// Ordered node and edge sequences. Rebuilt wholesale whenever the
/// upstream source changes; never patched in place.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default)]
	pub edges: Vec<GraphEdge>,
}

impl Graph {
	/// The canonical `{nodes: [], edges: []}` value every malformed input
	/// degrades to.
	pub fn empty() -> Self {
		Graph::default()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn graph_id_accepts_strings_and_numbers() {
		let node: GraphNode = serde_json::from_str(r#"{"id": 1}"#).unwrap();
		assert_eq!(node.id, GraphId::from("1"));

		let node: GraphNode = serde_json::from_str(r#"{"id": "kr1"}"#).unwrap();
		assert_eq!(node.id, GraphId::from("kr1"));

		assert!(serde_json::from_str::<GraphNode>(r#"{"id": [1]}"#).is_err());
	}

	#[test]
	fn edge_uses_vis_field_names() {
		let edge: GraphEdge = serde_json::from_str(r#"{"from": 1, "to": 2}"#).unwrap();
		assert_eq!(edge.from, GraphId::from("1"));
		assert_eq!(edge.to, GraphId::from("2"));
		assert_eq!(edge.color, None);
	}

	#[test]
	fn unknown_node_fields_are_ignored() {
		let node: GraphNode =
			serde_json::from_str(r#"{"id": "a", "shape": "dot", "x": 4}"#).unwrap();
		assert_eq!(node.label, None);
		assert_eq!(node.color, None);
	}

	#[test]
	fn empty_graph_is_canonical() {
		assert_eq!(
			Graph::empty(),
			Graph {
				nodes: vec![],
				edges: vec![]
			}
		);
		assert!(Graph::empty().is_empty());
	}
}
