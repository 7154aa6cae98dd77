//! load_data command implementation

use anyhow::{Context, Result};
use ga_container::{ContainerManager, ContainerRuntime};
use ga_core::{Config, GraphBackend, GraphName, LoadManifest};
use ga_store::{DefaultFetcher, LoadReport, Loader, SourceFetcher, SourceOutcome, TripleStore};
use std::path::Path;

use crate::cli::{GlobalArgs, LoadDataArgs};
use crate::commands::common::{base_dir, connect_docker, load_config, ExitCode, EXIT_PARTIAL_LOAD};

/// Execute the load_data command
pub async fn execute(args: &LoadDataArgs, global: &GlobalArgs) -> Result<()> {
    let base_dir = base_dir()?;
    let config = load_config(global)?;
    // Manifest problems are reported before anything else happens
    let manifest = read_manifest(args, &base_dir)?;
    let name = resolve_graph_name(args)?;

    let runtime = connect_docker()?;
    let store = connect_graph(&name, &config, &runtime).await?;
    let fetcher = DefaultFetcher::new(&base_dir);
    load(&manifest, store.as_ref(), &fetcher, &base_dir).await
}

/// Manifest from `--data_list` when given, otherwise from `--data_file`
pub(crate) fn read_manifest(args: &LoadDataArgs, base_dir: &Path) -> Result<LoadManifest> {
    match &args.data_list {
        Some(items) => LoadManifest::from_items(&split_data_list(items), base_dir)
            .context("Invalid --data_list"),
        None => {
            let path = base_dir.join(&args.data_file);
            LoadManifest::from_file(&path, base_dir)
                .with_context(|| format!("Invalid manifest {}", path.display()))
        }
    }
}

/// Split `--data_list` items on commas into manifest lines.
///
/// Only the location part before a tab is split; a license after the tab
/// stays whole and belongs to the last location of its item.
pub(crate) fn split_data_list(items: &[String]) -> Vec<String> {
    let mut lines = Vec::new();
    for item in items {
        let (locations, license) = match item.split_once('\t') {
            Some((locations, license)) => (locations, Some(license)),
            None => (item.as_str(), None),
        };
        let mut parts = locations.split(',').peekable();
        while let Some(part) = parts.next() {
            match license {
                Some(license) if parts.peek().is_none() => {
                    lines.push(format!("{}\t{}", part, license))
                }
                _ => lines.push(part.to_string()),
            }
        }
    }
    lines
}

/// Container name from `--graph`; a bare backend name means `<backend><port>`
pub(crate) fn resolve_graph_name(args: &LoadDataArgs) -> Result<GraphName> {
    match args.graph.parse::<GraphBackend>() {
        Ok(backend) => Ok(backend.default_container_name(args.port)),
        Err(_) => GraphName::parse(args.graph.as_str())
            .with_context(|| format!("Invalid --graph '{}'", args.graph)),
    }
}

async fn connect_graph(
    name: &GraphName,
    config: &Config,
    runtime: &dyn ContainerRuntime,
) -> Result<Box<dyn TripleStore>> {
    let manager = ContainerManager::new(runtime, config);
    let target = manager
        .resolve_graph(name)
        .await
        .with_context(|| format!("Failed to find graph {}", name))?;

    log::debug!(
        "Graph {} is {} on port {}",
        target.name,
        target.backend,
        target.port
    );
    Ok(ga_store::connect(
        target.backend,
        target.base_url(&config.host),
        config,
    ))
}

/// Load every source and print the report.
///
/// Returns `ExitCode(4)` after all sources were attempted if any failed.
pub(crate) async fn load(
    manifest: &LoadManifest,
    store: &dyn TripleStore,
    fetcher: &dyn SourceFetcher,
    base_dir: &Path,
) -> Result<()> {
    println!(
        "Loading {} sources into {}...\n",
        manifest.len(),
        store.store_type()
    );

    let loader = Loader::new(store, fetcher, base_dir);
    let report = loader.load_all(manifest).await.context("Load aborted")?;
    print_report(&report);

    if report.has_failures() {
        return Err(ExitCode(EXIT_PARTIAL_LOAD).into());
    }
    Ok(())
}

fn print_report(report: &LoadReport) {
    println!("{}", report);

    let failed = report.failures().count();
    if failed == 0 {
        return;
    }
    eprintln!();
    eprintln!("{} sources failed:", failed);
    for outcome in report.outcomes() {
        if let SourceOutcome::Failed(err) = outcome {
            eprintln!("  ✗ {} - {}", outcome.location(), err.source);
        }
    }
}

#[cfg(test)]
#[path = "load_data_test.rs"]
mod tests;
