//! run_yasgui command implementation

use anyhow::{Context, Result};
use ga_container::{ContainerManager, ContainerRuntime};
use ga_core::Config;

use crate::cli::{GlobalArgs, RunYasguiArgs};
use crate::commands::common::{connect_docker, load_config};

/// Execute the run_yasgui command
pub async fn execute(args: &RunYasguiArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let runtime = connect_docker()?;
    run(args, &config, &runtime).await
}

pub(crate) async fn run(
    args: &RunYasguiArgs,
    config: &Config,
    runtime: &dyn ContainerRuntime,
) -> Result<()> {
    let manager = ContainerManager::new(runtime, config);
    let info = manager
        .run_yasgui(&args.blazegraph_name, &args.yasgui_endpoint)
        .await
        .with_context(|| format!("Failed to start YASGUI for {}", args.blazegraph_name))?;

    let host = args.yasgui_endpoint.host.as_deref().unwrap_or("localhost");
    println!("YASGUI container {} started", info.name);
    println!("  Open http://{}:{}", host, args.yasgui_endpoint.port);
    Ok(())
}
