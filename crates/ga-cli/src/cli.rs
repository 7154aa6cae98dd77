//! CLI argument definitions using clap derive API
//!
//! Subcommand and flag names keep their snake_case spelling; the
//! kebab-case forms are accepted as aliases.

use clap::{Args, Parser, Subcommand, ValueEnum};
use ga_container::ExternalEndpoint;
use ga_core::{GraphBackend, GraphName, DEFAULT_MANIFEST_FILE, DEFAULT_PORT};
use std::path::PathBuf;

/// graph-admin - run RDF graph databases in Docker and load data into them
#[derive(Parser, Debug)]
#[command(name = "graph-admin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: graph-admin.yml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a graph database container and wait until it answers
    #[command(name = "initialize_graph", alias = "initialize-graph")]
    InitializeGraph(InitializeGraphArgs),

    /// Load the sources of a manifest into a running graph database
    #[command(name = "load_data", alias = "load-data")]
    LoadData(LoadDataArgs),

    /// Start a YASGUI container querying a running graph database
    #[command(name = "run_yasgui", alias = "run-yasgui")]
    RunYasgui(RunYasguiArgs),

    /// Stop and remove a container
    #[command(name = "remove_graph", alias = "remove-graph")]
    RemoveGraph(RemoveGraphArgs),
}

/// Graph database backends selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphArg {
    /// Blazegraph
    Blazegraph,
    /// AllegroGraph
    Agraph,
}

impl From<GraphArg> for GraphBackend {
    fn from(arg: GraphArg) -> Self {
        match arg {
            GraphArg::Blazegraph => GraphBackend::Blazegraph,
            GraphArg::Agraph => GraphBackend::AGraph,
        }
    }
}

/// Arguments for the initialize_graph command
#[derive(Args, Debug)]
pub struct InitializeGraphArgs {
    /// Backend to start
    #[arg(long, value_enum)]
    pub graph: GraphArg,

    /// Host port to publish the backend on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Container name (default: <backend><port>)
    #[arg(long, value_parser = parse_graph_name)]
    pub name: Option<GraphName>,

    /// Replace an existing container with the same name
    #[arg(long = "remove_previous_graph", alias = "remove-previous-graph")]
    pub remove_previous_graph: bool,
}

/// Arguments for the load_data command
#[derive(Args, Debug)]
pub struct LoadDataArgs {
    /// Container name, or a bare backend name meaning <backend><port>
    #[arg(long)]
    pub graph: String,

    /// Host port, used to expand a bare backend name
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Manifest file listing the sources to load
    #[arg(long = "data_file", alias = "data-file", default_value = DEFAULT_MANIFEST_FILE)]
    pub data_file: PathBuf,

    /// Sources given inline (space or comma separated); overrides --data_file.
    /// A license follows its location after a tab.
    #[arg(long = "data_list", alias = "data-list", num_args = 1..)]
    pub data_list: Option<Vec<String>>,
}

/// Arguments for the run_yasgui command
#[derive(Args, Debug)]
pub struct RunYasguiArgs {
    /// Name of the graph container to query
    #[arg(long = "blazegraph_name", alias = "blazegraph-name", value_parser = parse_graph_name)]
    pub blazegraph_name: GraphName,

    /// Host address to publish the UI on, as HOST:PORT or :PORT
    #[arg(long = "yasgui_endpoint", alias = "yasgui-endpoint")]
    pub yasgui_endpoint: ExternalEndpoint,
}

/// Arguments for the remove_graph command
#[derive(Args, Debug)]
pub struct RemoveGraphArgs {
    /// Container name
    #[arg(long, value_parser = parse_graph_name)]
    pub graph: GraphName,
}

fn parse_graph_name(s: &str) -> Result<GraphName, String> {
    GraphName::parse(s).map_err(|e| e.to_string())
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
