pub mod home;
pub mod node_view;
pub mod not_found;
