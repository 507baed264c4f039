// gatekeeper/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gatekeeper")]
#[command(about = "SQL data-quality gate for warehouse tables", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚦 Runs the quality checks and writes target/gate_results.json
    Check {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Run only one check (ex: "users_not_empty")
        #[arg(long, short)]
        select: Option<String>,
    },

    /// ⚡ Executes a read-only scalar query (Ad-hoc)
    Query {
        query: String,

        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Connection id from config/connections.yml (default: project's default-connection)
        #[arg(long, short)]
        connection: Option<String>,
    },

    /// 📋 Lists the discovered checks
    List {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 🧹 Cleans gate artifacts (target/ folder)
    Clean {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}
