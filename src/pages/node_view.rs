use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use log::info;

use crate::components::node_graph::NodeGraph;
use crate::kraken::DSC_NODES_URL;
use crate::kraken::fetch::fetch_node_list;
use crate::kraken::node::{Node, state_to_color};

/// Single-node page: state square, details, and the topology graph panel
/// for nodes that expose one.
#[component]
pub fn NodeView() -> impl IntoView {
	let params = use_params_map();
	let (dsc_node, set_dsc_node) = signal(None::<Node>);
	let (disconnected, set_disconnected) = signal(false);
	let (graph_open, set_graph_open) = signal(false);

	Effect::new(move |_| {
		let id = params.get().get("id").unwrap_or_default();
		spawn_local(async move {
			match fetch_node_list(DSC_NODES_URL).await {
				Some(list) => {
					set_disconnected.set(false);
					set_dsc_node.set(list.into_iter().find(|n| n.id == id));
				}
				None => set_disconnected.set(true),
			}
		});
	});

	let graph_toggle = Callback::new(move |_: ()| {
		if graph_open.get_untracked() {
			info!("closing graph");
		} else {
			info!("opening graph");
		}
		set_graph_open.update(|open| *open = !*open);
	});

	// rebuilt wholesale whenever the discovery node changes
	let topology = Memo::new(move |_| {
		dsc_node
			.get()
			.and_then(|node| node.topology())
			.unwrap_or_default()
	});
	let has_topology = Memo::new(move |_| dsc_node.get().is_some_and(|node| node.topology().is_some()));

	view! {
		<div class="node-view-page">
			<Show when=move || disconnected.get()>
				<h2 class="disconnected">"Disconnected From Kraken"</h2>
			</Show>
			{move || match dsc_node.get() {
				None => view! { <h3 class="missing-node">"Node Does Not Exist"</h3> }.into_any(),
				Some(node) => {
					let color = state_to_color(node.phys_state);
					view! {
						<div class="node-view">
							<div
								class="node-square"
								style=format!("background-color: {color}")
							></div>
							<div class="node-details">
								<h3>{node.id.clone()}</h3>
								<p>{format!("physical state: {:?}", node.phys_state)}</p>
								<p>{format!("run state: {:?}", node.run_state)}</p>
							</div>
							<Show when=move || has_topology.get()>
								<button
									class="graph-toggle"
									on:click=move |_| graph_toggle.run(())
								>
									"graph"
								</button>
							</Show>
						</div>
					}
						.into_any()
				}
			}}
			<Show when=move || graph_open.get() && has_topology.get()>
				<NodeGraph graph=topology on_graph_toggle=graph_toggle />
			</Show>
		</div>
	}
}
