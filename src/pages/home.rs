use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::dashboard::{MasterNodeBadge, Square};
use crate::kraken::fetch::fetch_all_node_lists;
use crate::kraken::node::Node;
use crate::kraken::{CFG_NODES_URL, DSC_NODES_URL};

/// The configured node list with discovered state merged in by id.
fn merge_node_lists(cfg: Vec<Node>, dsc: &[Node]) -> Vec<Node> {
	cfg.into_iter()
		.map(|mut node| {
			if let Some(found) = dsc.iter().find(|d| d.id == node.id) {
				node.phys_state = found.phys_state;
				node.run_state = found.run_state;
			} else {
				node.phys_state = None;
				node.run_state = None;
			}
			node
		})
		.collect()
}

/// Cluster dashboard: one colored square per node, master badge first.
#[component]
pub fn Home() -> impl IntoView {
	let (nodes, set_nodes) = signal(None::<Vec<Node>>);
	let (disconnected, set_disconnected) = signal(false);

	Effect::new(move |_| {
		spawn_local(async move {
			match fetch_all_node_lists(CFG_NODES_URL, DSC_NODES_URL).await {
				Some((cfg, dsc)) => {
					set_disconnected.set(false);
					set_nodes.set(Some(merge_node_lists(cfg, &dsc)));
				}
				None => set_disconnected.set(true),
			}
		});
	});

	view! {
		<div class="dashboard">
			<Show when=move || disconnected.get()>
				<h2 class="disconnected">"Disconnected From Kraken"</h2>
			</Show>
			{move || {
				nodes
					.get()
					.map(|list| {
						let master = list.iter().find(|n| n.is_master()).cloned();
						let workers: Vec<Node> =
							list.into_iter().filter(|n| !n.is_master()).collect();
						view! {
							<div class="cluster">
								{master.map(|node| view! { <MasterNodeBadge node=node /> })}
								<div class="node-squares">
									{workers
										.into_iter()
										.map(|node| view! { <Square node=node /> })
										.collect_view()}
								</div>
							</div>
						}
					})
			}}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::kraken::node::PhysState;

	#[test]
	fn merge_takes_discovered_state_by_id() {
		let cfg = vec![
			Node {
				id: "kr0".into(),
				..Node::default()
			},
			Node {
				id: "kr1".into(),
				parent_id: Some("kr0".into()),
				..Node::default()
			},
		];
		let dsc = vec![Node {
			id: "kr1".into(),
			parent_id: Some("kr0".into()),
			phys_state: Some(PhysState::PowerOn),
			..Node::default()
		}];

		let merged = merge_node_lists(cfg, &dsc);
		assert_eq!(merged.len(), 2);
		// kr0 was never discovered
		assert_eq!(merged[0].phys_state, None);
		assert_eq!(merged[1].phys_state, Some(PhysState::PowerOn));
	}
}
