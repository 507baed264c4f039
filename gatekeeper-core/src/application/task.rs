// gatekeeper-core/src/application/task.rs

// Scheduler-facing adapter: one task = one check definition = one gate run.
// A violated assertion is raised as a typed error so the scheduler marks the
// run as failed; the full diagnostic payload travels inside the error.

use tracing::{info, instrument};

use crate::application::gate::QualityGate;
use crate::domain::project::CheckDefinition;
use crate::domain::quality::{CheckResult, GateOutcome};
use crate::error::GatekeeperError;
use crate::ports::executor::QueryExecutor;

pub struct QualityCheckTask {
    definition: CheckDefinition,
}

impl QualityCheckTask {
    pub fn new(definition: CheckDefinition) -> Self {
        Self { definition }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn definition(&self) -> &CheckDefinition {
        &self.definition
    }

    /// Connection this task runs against, falling back to the project default.
    pub fn connection<'a>(&'a self, default_connection: &'a str) -> &'a str {
        self.definition
            .connection
            .as_deref()
            .unwrap_or(default_connection)
    }

    #[instrument(skip_all, fields(check = %self.definition.name))]
    pub async fn execute(
        &self,
        executor: &dyn QueryExecutor,
    ) -> Result<Vec<CheckResult>, GatekeeperError> {
        info!("DataQuality task starting");

        let assertions = self.definition.resolve_assertions()?;
        let target = self.definition.target();

        match QualityGate::run(&target, &assertions, executor).await? {
            GateOutcome::Pass { results } => {
                info!(count = results.len(), "DataQuality task passed");
                Ok(results)
            }
            GateOutcome::Fail(failure) => Err(GatekeeperError::AssertionFailed {
                check: self.definition.name.clone(),
                failure: Box::new(failure),
            }),
        }
    }
}
