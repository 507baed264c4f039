// gatekeeper-core/src/application/engine.rs

use std::time::Instant;
use tracing::{debug, error, instrument};

use crate::domain::quality::ScalarValue;
use crate::error::GatekeeperError;
use crate::ports::executor::QueryExecutor;

/// Runs a scalar query with instrumentation (logs + timing).
/// Every query the gate issues goes through here, as do ad-hoc CLI queries.
#[instrument(skip(executor), fields(engine = executor.engine_name(), query.len = query.len()))]
pub async fn execute_scalar_query(
    executor: &dyn QueryExecutor,
    query: &str,
) -> Result<ScalarValue, GatekeeperError> {
    let start = Instant::now();
    debug!("⚡ Executing Query: {}", query);

    let result = executor.execute_scalar(query).await;
    let duration = start.elapsed();

    match result {
        Ok(value) => {
            debug!("✅ Query returned {} in {:.2?}", value, duration);
            Ok(value)
        }
        Err(e) => {
            error!("❌ Query failed after {:.2?}: {}", duration, e);
            Err(e)
        }
    }
}
