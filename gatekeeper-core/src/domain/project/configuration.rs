// src/domain/project/configuration.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// SQL engine behind a connection.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    DuckDB,
    DataFusion,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProjectConfig {
    pub name: String,
    pub version: String,

    /// Connection used by checks that do not name one.
    #[serde(rename = "default-connection", default = "default_connection")]
    pub default_connection: String,

    #[serde(rename = "config-paths", default = "default_config_paths")]
    pub config_paths: Vec<String>,

    #[serde(rename = "check-paths", default = "default_check_paths")]
    pub check_paths: Vec<String>,

    #[serde(rename = "target-path", default = "default_target_path")]
    pub target_path: String,

    #[serde(rename = "clean-targets", default = "default_clean_targets")]
    pub clean_targets: Vec<String>,

    /// Filled from `connections.yml`, never from the project file itself.
    #[serde(skip)]
    pub connections: HashMap<String, ConnectionProfile>,
}

/// How to reach one warehouse. Paths are resolved against the project directory.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConnectionProfile {
    #[serde(rename = "type", default)]
    pub engine: Engine,

    /// DuckDB database file (`:memory:` allowed).
    #[serde(default)]
    pub path: Option<String>,

    /// DataFusion tables: name -> CSV or Parquet file, registered in `public`.
    #[serde(default)]
    pub sources: HashMap<String, PathBuf>,
}

fn default_connection() -> String {
    "warehouse".to_string()
}
fn default_config_paths() -> Vec<String> {
    vec!["config".to_string()]
}
fn default_check_paths() -> Vec<String> {
    vec!["checks".to_string()]
}
fn default_clean_targets() -> Vec<String> {
    vec!["target".to_string()]
}
fn default_target_path() -> String {
    "target".to_string()
}
