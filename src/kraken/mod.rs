//! Kraken collaborators: node state model and best-effort fetch helpers.

pub mod fetch;
pub mod node;

/// Configuration-state node list endpoint.
pub const CFG_NODES_URL: &str = "/cfg/nodes";
/// Discovery-state node list endpoint.
pub const DSC_NODES_URL: &str = "/dsc/nodes";
