//! Ad-hoc graph editor: paste arbitrary JSON on the left, see it rendered
//! on the right. Text normalization (pretty-printing valid JSON) and
//! graph derivation are deliberately independent: text can be valid JSON
//! with an invalid graph shape, in which case the displayed graph is
//! empty while the text stays normalized.

use leptos::prelude::*;

use crate::components::node_graph::{NodeGraph, graph_from_text};

/// Pretty-print the buffer when it parses as JSON; otherwise keep the raw
/// text untouched and let the next keystroke retry.
fn normalize_json(raw: String) -> String {
	match serde_json::from_str::<serde_json::Value>(&raw) {
		Ok(value) => serde_json::to_string_pretty(&value).unwrap_or(raw),
		Err(_) => raw,
	}
}

#[component]
pub fn GraphViewer() -> impl IntoView {
	let (input_text, set_input_text) = signal(String::new());
	// the active graph follows the stored text; any failure is the empty graph
	let graph = Memo::new(move |_| graph_from_text(&input_text.get()));

	view! {
		<div class="graph-viewer">
			<textarea
				class="graph-viewer-input"
				placeholder="Graph JSON Here"
				prop:value=move || input_text.get()
				on:input=move |ev| {
					set_input_text.set(normalize_json(event_target_value(&ev)));
				}
			/>
			<NodeGraph graph=graph />
		</div>
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::node_graph::{Graph, GraphId};

	#[test]
	fn unparseable_text_is_stored_raw_and_graph_is_empty() {
		let stored = normalize_json("{".to_owned());
		assert_eq!(stored, "{");
		assert_eq!(graph_from_text(&stored), Graph::empty());
	}

	#[test]
	fn valid_graph_json_is_normalized_and_rendered() {
		let stored = normalize_json(r#"{"nodes":[{"id":1}],"edges":[]}"#.to_owned());
		// pretty-printed for display
		assert!(stored.contains('\n'));
		assert_eq!(
			serde_json::from_str::<serde_json::Value>(&stored).unwrap(),
			serde_json::json!({"nodes": [{"id": 1}], "edges": []})
		);

		let graph = graph_from_text(&stored);
		assert_eq!(graph.nodes.len(), 1);
		assert_eq!(graph.nodes[0].id, GraphId::from("1"));
		assert_eq!(graph.edges.len(), 0);
	}

	#[test]
	fn valid_json_with_wrong_shape_normalizes_but_yields_empty_graph() {
		let stored = normalize_json(r#"{"foo": 1}"#.to_owned());
		assert_eq!(stored, "{\n  \"foo\": 1\n}");
		assert_eq!(graph_from_text(&stored), Graph::empty());
	}

	#[test]
	fn normalization_is_stable() {
		let once = normalize_json(r#"{"nodes": [], "edges": []}"#.to_owned());
		let twice = normalize_json(once.clone());
		assert_eq!(once, twice);
	}
}
