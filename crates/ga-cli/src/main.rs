//! graph-admin - run RDF graph databases in Docker and load data into them

use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::common::ExitCode;
use commands::{initialize_graph, load_data, remove_graph, run_yasgui};

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let result = match &cli.command {
        Commands::InitializeGraph(args) => initialize_graph::execute(args, &cli.global).await,
        Commands::LoadData(args) => load_data::execute(args, &cli.global).await,
        Commands::RunYasgui(args) => run_yasgui::execute(args, &cli.global).await,
        Commands::RemoveGraph(args) => remove_graph::execute(args, &cli.global).await,
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<ExitCode>() {
            Some(ec) => std::process::ExitCode::from(ec.0 as u8),
            None => {
                eprintln!("Error: {:#}", err);
                std::process::ExitCode::FAILURE
            }
        },
    }
}

/// `info` by default, `debug` with --verbose; `RUST_LOG` overrides both
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}
