//! Thin display glue: colored per-node squares and the master badge.

use leptos::prelude::*;

use crate::kraken::node::{Node, state_to_color};

#[component]
pub fn Square(node: Node) -> impl IntoView {
	let color = state_to_color(node.phys_state);
	view! {
		<a
			class="node-square shadow animate"
			href=format!("/node/{}", node.id)
			style=format!("background-color: {color}")
			title=node.id.clone()
		></a>
	}
}

#[component]
pub fn MasterNodeBadge(node: Node) -> impl IntoView {
	let color = state_to_color(node.phys_state);
	view! {
		<a
			class="master-square shadow animate"
			href=format!("/node/{}", node.id)
			style=format!("background-color: {color}")
		>
			"Master"
		</a>
	}
}
