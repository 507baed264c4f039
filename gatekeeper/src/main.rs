// gatekeeper/src/main.rs

use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug gatekeeper check ... to see every query
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            project_dir,
            select,
        } => commands::check::execute(project_dir, select).await,
        Commands::Query {
            query,
            project_dir,
            connection,
        } => commands::query::execute(query, project_dir, connection).await,
        Commands::List { project_dir } => commands::list::execute(project_dir),
        Commands::Clean { project_dir } => commands::clean::execute(project_dir),
    };

    // Exit code tells the scheduler why the run failed
    if let Err(err) = result {
        commands::print_error(&err);
        std::process::exit(commands::category(&err).exit_code());
    }
}
