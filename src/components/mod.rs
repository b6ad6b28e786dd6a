pub mod dashboard;
pub mod graph_viewer;
pub mod node_graph;
