//! Cluster node records as Kraken's state endpoints report them.

use serde::{Deserialize, Serialize};

use crate::components::node_graph::{Graph, graph_from_value};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhysState {
	#[default]
	PhysUnknown,
	PowerOff,
	PowerOn,
	PowerCycle,
	PhysHang,
	PhysError,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunState {
	#[default]
	Unknown,
	Init,
	Sync,
	Error,
}

/// One cluster node. The optional `graph` payload is kept as raw JSON and
/// only shaped into a [`Graph`] on demand.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
	#[serde(default)]
	pub id: String,
	#[serde(default, rename = "parentId", skip_serializing_if = "Option::is_none")]
	pub parent_id: Option<String>,
	#[serde(default, rename = "physState", skip_serializing_if = "Option::is_none")]
	pub phys_state: Option<PhysState>,
	#[serde(default, rename = "runState", skip_serializing_if = "Option::is_none")]
	pub run_state: Option<RunState>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub graph: Option<serde_json::Value>,
}

impl Node {
	/// The master node is the one without a parent.
	pub fn is_master(&self) -> bool {
		self.parent_id.is_none()
	}

	/// Topology payload, if the node carries a non-empty one. A payload
	/// with the wrong shape still counts as present but degrades to the
	/// empty graph.
	pub fn topology(&self) -> Option<Graph> {
		let value = self.graph.clone()?;
		if value.as_object().is_none_or(|obj| obj.is_empty()) {
			return None;
		}
		Some(graph_from_value(value).unwrap_or_else(|_| Graph::empty()))
	}
}

/// Dashboard color for a physical state.
pub fn state_to_color(state: Option<PhysState>) -> &'static str {
	match state {
		Some(PhysState::PowerOn) => "#89d672",
		Some(PhysState::PowerOff) => "#d9d9d9",
		Some(PhysState::PowerCycle) => "#ffe05e",
		Some(PhysState::PhysHang) => "#ffe05e",
		Some(PhysState::PhysError) => "#ff6b6b",
		Some(PhysState::PhysUnknown) | None => "#bfbfbf",
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn node_deserializes_kraken_field_names() {
		let node: Node = serde_json::from_str(
			r#"{"id": "kr1", "parentId": "kr0", "physState": "POWER_ON", "runState": "SYNC"}"#,
		)
		.unwrap();
		assert_eq!(node.phys_state, Some(PhysState::PowerOn));
		assert_eq!(node.run_state, Some(RunState::Sync));
		assert!(!node.is_master());
	}

	#[test]
	fn missing_parent_marks_the_master() {
		let node: Node = serde_json::from_str(r#"{"id": "kr0"}"#).unwrap();
		assert!(node.is_master());
	}

	#[test]
	fn empty_or_missing_graph_payload_is_no_topology() {
		let node = Node::default();
		assert_eq!(node.topology(), None);

		let node = Node {
			graph: Some(serde_json::json!({})),
			..Node::default()
		};
		assert_eq!(node.topology(), None);
	}

	#[test]
	fn shaped_graph_payload_becomes_a_topology() {
		let node = Node {
			graph: Some(serde_json::json!({
				"nodes": [{"id": "a"}],
				"edges": []
			})),
			..Node::default()
		};
		let graph = node.topology().unwrap();
		assert_eq!(graph.nodes.len(), 1);
	}

	#[test]
	fn misshapen_graph_payload_degrades_to_empty() {
		let node = Node {
			graph: Some(serde_json::json!({"foo": 1})),
			..Node::default()
		};
		assert_eq!(node.topology(), Some(Graph::empty()));
	}

	#[test]
	fn error_states_map_to_the_alarm_color() {
		assert_eq!(state_to_color(Some(PhysState::PhysError)), "#ff6b6b");
		assert_eq!(state_to_color(None), "#bfbfbf");
	}
}
