//! remove_graph command implementation

use anyhow::{Context, Result};
use ga_container::{ContainerManager, ContainerRuntime};
use ga_core::Config;

use crate::cli::{GlobalArgs, RemoveGraphArgs};
use crate::commands::common::{connect_docker, load_config};

/// Execute the remove_graph command
pub async fn execute(args: &RemoveGraphArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let runtime = connect_docker()?;
    remove(args, &config, &runtime).await
}

pub(crate) async fn remove(
    args: &RemoveGraphArgs,
    config: &Config,
    runtime: &dyn ContainerRuntime,
) -> Result<()> {
    ContainerManager::new(runtime, config)
        .remove_graph(&args.graph)
        .await
        .with_context(|| format!("Failed to remove {}", args.graph))?;

    println!("Removed container {}", args.graph);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ga_container::{ContainerError, ContainerInfo, InMemoryRuntime};
    use ga_core::GraphName;

    #[tokio::test]
    async fn test_remove_graph() {
        let runtime = InMemoryRuntime::new();
        runtime.insert(ContainerInfo {
            id: "1".to_string(),
            name: "agraph10035".to_string(),
            image: "franzinc/agraph:v7.3.0".to_string(),
            running: false,
            ip_address: None,
            ports: vec![],
        });
        let args = RemoveGraphArgs {
            graph: GraphName::parse("agraph10035").unwrap(),
        };

        remove(&args, &Config::default(), &runtime).await.unwrap();
        assert!(runtime.names().is_empty());

        let err = remove(&args, &Config::default(), &runtime)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContainerError>(),
            Some(ContainerError::ContainerNotFound { .. })
        ));
    }
}
