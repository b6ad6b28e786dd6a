//! Canvas rendering engine: a `force_graph` simulation drawn onto a 2d
//! canvas context. Owns physics and drawing only; the session owns the
//! data and options fed into it.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::options::EngineOptions;
use super::session::GraphEngine;
use super::types::{Graph, GraphId, NodeColor};

pub const NODE_RADIUS: f64 = 14.0;
const HIT_RADIUS: f64 = 20.0;
const ARROW_SIZE: f64 = 6.0;

const BACKGROUND: &str = "#ffffff";
const DEFAULT_NODE_BORDER: &str = "#2b7ce9";
const DEFAULT_NODE_BACKGROUND: &str = "#97c2fc";
const DEFAULT_EDGE_COLOR: &str = "#848484";
const LABEL_COLOR: &str = "#343434";

/// Per-node drawing state carried inside the simulation.
#[derive(Clone, Debug, Default)]
struct NodeStyle {
	id: GraphId,
	label: Option<String>,
	color: Option<NodeColor>,
	border_width: f64,
}

#[derive(Clone, Debug, Default)]
struct ViewTransform {
	x: f64,
	y: f64,
	k: f64,
}

#[derive(Clone, Debug, Default)]
struct DragState {
	active: bool,
	node_idx: Option<DefaultNodeIdx>,
	start_x: f64,
	start_y: f64,
	node_start_x: f32,
	node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
struct PanState {
	active: bool,
	start_x: f64,
	start_y: f64,
	transform_start_x: f64,
	transform_start_y: f64,
}

pub struct CanvasEngine {
	ctx: CanvasRenderingContext2d,
	sim: ForceGraph<NodeStyle, ()>,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx, Option<String>)>,
	data: Graph,
	options: EngineOptions,
	transform: ViewTransform,
	drag: DragState,
	pan: PanState,
	hovered: Option<DefaultNodeIdx>,
	width: f64,
	height: f64,
}

/// vis-network's barnes-hut gravitational constant is a large negative
/// repulsion; force_graph's charge is a small positive one. -50000 maps
/// to the charge the layout was tuned at.
fn simulation_parameters(options: &EngineOptions) -> SimulationParameters {
	SimulationParameters {
		force_charge: (-options.physics.gravitational_constant / 333.0) as f32,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	}
}

fn build_simulation(
	data: &Graph,
	options: &EngineOptions,
	width: f64,
	height: f64,
	keep: &HashMap<GraphId, (f32, f32)>,
) -> (
	ForceGraph<NodeStyle, ()>,
	Vec<(DefaultNodeIdx, DefaultNodeIdx, Option<String>)>,
) {
	let mut sim = ForceGraph::new(simulation_parameters(options));
	let mut id_to_idx = HashMap::new();
	let mut edges = Vec::new();

	for (i, node) in data.nodes.iter().enumerate() {
		// new nodes start on a circle; surviving nodes keep their spot
		let angle = (i as f64) * 2.0 * PI / data.nodes.len().max(1) as f64;
		let (x, y) = keep.get(&node.id).copied().unwrap_or((
			(width / 2.0 + 100.0 * angle.cos()) as f32,
			(height / 2.0 + 100.0 * angle.sin()) as f32,
		));

		let idx = sim.add_node(NodeData {
			x,
			y,
			mass: 10.0,
			is_anchor: node.fixed,
			user_data: NodeStyle {
				id: node.id.clone(),
				label: node.label.clone(),
				color: node.color.clone(),
				border_width: node.border_width,
			},
		});
		id_to_idx.insert(node.id.clone(), idx);
	}

	for edge in &data.edges {
		if let (Some(&src), Some(&tgt)) = (id_to_idx.get(&edge.from), id_to_idx.get(&edge.to)) {
			sim.add_edge(src, tgt, EdgeData::default());
			edges.push((src, tgt, edge.color.clone()));
		}
	}

	(sim, edges)
}

impl GraphEngine for CanvasEngine {
	type Container = HtmlCanvasElement;

	fn create(canvas: &HtmlCanvasElement, data: &Graph, options: &EngineOptions) -> Option<Self> {
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.ok()
			.flatten()?
			.dyn_into()
			.ok()?;

		// options specify 100% of the container; the canvas backing size
		// follows the parent element
		let (width, height) = (
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0),
			canvas
				.parent_element()
				.map(|p| p.client_height() as f64)
				.unwrap_or(600.0),
		);
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		let (sim, edges) = build_simulation(data, options, width, height, &HashMap::new());

		Some(CanvasEngine {
			ctx,
			sim,
			edges,
			data: data.clone(),
			options: options.clone(),
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hovered: None,
			width,
			height,
		})
	}

	fn set_data(&mut self, data: &Graph) {
		let keep = self.positions();
		self.data = data.clone();
		let (sim, edges) =
			build_simulation(&self.data, &self.options, self.width, self.height, &keep);
		self.sim = sim;
		self.edges = edges;
		self.hovered = None;
		self.drag = DragState::default();
	}

	fn set_options(&mut self, options: &EngineOptions) {
		// wholesale reapplication: rebuild the simulation with the new
		// parameters but keep every node where it is
		let keep = self.positions();
		self.options = options.clone();
		let (sim, edges) =
			build_simulation(&self.data, &self.options, self.width, self.height, &keep);
		self.sim = sim;
		self.edges = edges;
	}
}

impl CanvasEngine {
	fn positions(&self) -> HashMap<GraphId, (f32, f32)> {
		let mut map = HashMap::new();
		self.sim.visit_nodes(|node| {
			map.insert(node.data.user_data.id.clone(), (node.x(), node.y()));
		});
		map
	}

	pub fn tick(&mut self, dt: f32) {
		if self.options.physics.enabled {
			self.sim.update(dt);
		}
	}

	pub fn render(&self) {
		self.ctx.set_fill_style_str(BACKGROUND);
		self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
		self.ctx.save();
		let _ = self.ctx.translate(self.transform.x, self.transform.y);
		let _ = self.ctx.scale(self.transform.k, self.transform.k);
		self.draw_edges();
		self.draw_nodes();
		self.ctx.restore();
	}

	fn frame_positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut map = HashMap::new();
		self.sim.visit_nodes(|node| {
			map.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		map
	}

	fn node_background(&self, idx: DefaultNodeIdx) -> String {
		let mut color = DEFAULT_NODE_BACKGROUND.to_owned();
		self.sim.visit_nodes(|node| {
			if node.index() == idx {
				if let Some(c) = &node.data.user_data.color {
					color = c.background.clone();
				}
			}
		});
		color
	}

	fn draw_edges(&self) {
		let positions = self.frame_positions();
		let k = self.transform.k;
		let line_width = self.options.edges.width / k;
		let arrow = &self.options.edges.arrow_to;
		let smooth = &self.options.edges.smooth;

		for (src, tgt, explicit_color) in &self.edges {
			let (Some(&(x1, y1)), Some(&(x2, y2))) = (positions.get(src), positions.get(tgt))
			else {
				continue;
			};
			let (dx, dy) = (x2 - x1, y2 - y1);
			let dist = (dx * dx + dy * dy).sqrt();
			if dist < 0.001 {
				continue;
			}

			let color = if self.options.edges.color_inherit {
				self.node_background(*src)
			} else {
				explicit_color
					.clone()
					.unwrap_or_else(|| DEFAULT_EDGE_COLOR.to_owned())
			};

			// control point for the smoothed curve; collapses to the
			// midpoint when smoothing is off
			let (mx, my) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
			let (cx, cy) = if smooth.enabled {
				let bend = smooth.roundness * dist * 0.2;
				(mx - dy / dist * bend, my + dx / dist * bend)
			} else {
				(mx, my)
			};

			// trim endpoints to the node circles along the curve tangents
			let (sdx, sdy) = (cx - x1, cy - y1);
			let slen = (sdx * sdx + sdy * sdy).sqrt().max(0.001);
			let (sx, sy) = (x1 + sdx / slen * NODE_RADIUS, y1 + sdy / slen * NODE_RADIUS);
			let (tdx, tdy) = (x2 - cx, y2 - cy);
			let tlen = (tdx * tdx + tdy * tdy).sqrt().max(0.001);
			let (ux, uy) = (tdx / tlen, tdy / tlen);
			let arrow_size = if arrow.enabled {
				ARROW_SIZE * arrow.scale_factor / k
			} else {
				0.0
			};
			let (ex, ey) = (
				x2 - ux * (NODE_RADIUS + arrow_size),
				y2 - uy * (NODE_RADIUS + arrow_size),
			);

			self.ctx.set_stroke_style_str(&color);
			self.ctx.set_line_width(line_width);
			self.ctx.begin_path();
			self.ctx.move_to(sx, sy);
			if smooth.enabled {
				self.ctx.quadratic_curve_to(cx, cy, ex, ey);
			} else {
				self.ctx.line_to(ex, ey);
			}
			self.ctx.stroke();

			if arrow.enabled {
				let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
				let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
				let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
				self.ctx.set_fill_style_str(&color);
				self.ctx.begin_path();
				self.ctx.move_to(tip_x, tip_y);
				self.ctx.line_to(back_x + px, back_y + py);
				self.ctx.line_to(back_x - px, back_y - py);
				self.ctx.close_path();
				self.ctx.fill();
			}
		}
	}

	fn draw_nodes(&self) {
		let k = self.transform.k;
		let hovered = self.hovered;

		self.sim.visit_nodes(|node| {
			let style = &node.data.user_data;
			let (x, y) = (node.x() as f64, node.y() as f64);
			let is_hovered = hovered == Some(node.index());

			// hovered nodes swap in the highlight variant of their
			// decorated color descriptor
			let (border, background) = match &style.color {
				Some(color) => match (&color.highlight, is_hovered) {
					(Some(h), true) => (h.border.clone(), h.background.clone()),
					_ => (color.border.clone(), color.background.clone()),
				},
				None => (
					DEFAULT_NODE_BORDER.to_owned(),
					DEFAULT_NODE_BACKGROUND.to_owned(),
				),
			};

			let radius = if is_hovered {
				NODE_RADIUS * 1.15
			} else {
				NODE_RADIUS
			};

			self.ctx.begin_path();
			let _ = self.ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			self.ctx.set_fill_style_str(&background);
			self.ctx.fill();
			if style.border_width > 0.0 {
				self.ctx.set_stroke_style_str(&border);
				self.ctx.set_line_width(style.border_width / k);
				self.ctx.stroke();
			}

			if let Some(label) = &style.label {
				self.ctx.set_fill_style_str(LABEL_COLOR);
				self.ctx
					.set_font(&format!("{}px sans-serif", 12.0 / k.max(0.5)));
				self.ctx.set_text_align("center");
				let _ = self
					.ctx
					.fill_text(label, x, y + radius + 14.0 / k.max(0.5));
			}
		});
	}

	fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.sim.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn pointer_down(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.node_at_position(x, y) {
			self.drag.active = true;
			self.drag.node_idx = Some(idx);
			self.drag.start_x = x;
			self.drag.start_y = y;
			self.sim.visit_nodes(|node| {
				if node.index() == idx {
					self.drag.node_start_x = node.x();
					self.drag.node_start_y = node.y();
				}
			});
		} else {
			self.pan.active = true;
			self.pan.start_x = x;
			self.pan.start_y = y;
			self.pan.transform_start_x = self.transform.x;
			self.pan.transform_start_y = self.transform.y;
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			self.hovered = self.node_at_position(x, y);
		}

		if self.drag.active {
			if let Some(idx) = self.drag.node_idx {
				let (dx, dy) = (
					(x - self.drag.start_x) / self.transform.k,
					(y - self.drag.start_y) / self.transform.k,
				);
				let (nx, ny) = (
					self.drag.node_start_x + dx as f32,
					self.drag.node_start_y + dy as f32,
				);
				self.sim.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
						node.data.is_anchor = true;
					}
				});
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	pub fn pointer_up(&mut self) {
		self.drag.active = false;
		self.drag.node_idx = None;
		self.pan.active = false;
	}

	pub fn pointer_leave(&mut self) {
		self.pointer_up();
		self.hovered = None;
	}

	pub fn zoom(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}
}
