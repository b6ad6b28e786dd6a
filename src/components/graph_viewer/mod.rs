mod component;

pub use component::GraphViewer;
