mod component;
mod engine;
mod model;
mod options;
mod session;
mod types;

pub use component::NodeGraph;
pub use engine::CanvasEngine;
pub use model::{
	GraphParseError, NODE_BORDER_WIDTH, build_model, decorate_node, graph_from_text,
	graph_from_value, parse_graph_json,
};
pub use options::{CONFIGURABLE, ConfigureOptions, EngineOptions, configure_filter};
pub use session::{GraphEngine, GraphSession, SessionPhase};
pub use types::{Graph, GraphEdge, GraphId, GraphNode, HighlightColor, NodeColor};
