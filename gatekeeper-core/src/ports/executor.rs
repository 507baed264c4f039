// gatekeeper-core/src/ports/executor.rs

// What the gate needs from a warehouse, without knowing which one.
// Adapters live in infrastructure/adapters.

use crate::domain::quality::ScalarValue;
use crate::error::GatekeeperError;
use async_trait::async_trait;

#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Runs `query` and returns the first column of the first row.
    /// Zero rows is an error, not `Null`.
    async fn execute_scalar(&self, query: &str) -> Result<ScalarValue, GatekeeperError>;

    fn engine_name(&self) -> &str;
}
