//! initialize_graph command implementation

use anyhow::{Context, Result};
use ga_container::{ContainerManager, ContainerRuntime, InitializeRequest};
use ga_core::{Config, GraphBackend};

use crate::cli::{GlobalArgs, InitializeGraphArgs};
use crate::commands::common::{connect_docker, load_config};

/// Execute the initialize_graph command
pub async fn execute(args: &InitializeGraphArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let runtime = connect_docker()?;
    initialize(args, &config, &runtime).await
}

pub(crate) async fn initialize(
    args: &InitializeGraphArgs,
    config: &Config,
    runtime: &dyn ContainerRuntime,
) -> Result<()> {
    let backend = GraphBackend::from(args.graph);
    let name = args
        .name
        .clone()
        .unwrap_or_else(|| backend.default_container_name(args.port));
    let request = InitializeRequest {
        name,
        backend,
        port: args.port,
        remove_previous: args.remove_previous_graph,
    };

    let base_url = format!("http://{}:{}", config.host, args.port);
    let store = ga_store::connect(backend, base_url.clone(), config);
    let manager = ContainerManager::new(runtime, config);

    println!("Initializing {} graph {}...", backend, request.name);
    let target = manager
        .initialize_graph(&request, || store.is_ready())
        .await
        .with_context(|| format!("Failed to initialize graph {}", request.name))?;

    println!("Graph {} is ready", target.name);
    println!("  Container: {}", target.container_id);
    println!("  SPARQL endpoint: {}{}", base_url, config.sparql_path(backend));
    Ok(())
}

#[cfg(test)]
#[path = "initialize_graph_test.rs"]
mod tests;
