//! CLI command implementations

pub(crate) mod common;
pub(crate) mod initialize_graph;
pub(crate) mod load_data;
pub(crate) mod remove_graph;
pub(crate) mod run_yasgui;
