// gatekeeper-core/src/application/gate.rs

use tracing::{debug, info, instrument, warn};

use crate::application::engine::execute_scalar_query;
use crate::domain::error::DomainError;
use crate::domain::quality::{
    Assertion, CheckResult, GateFailure, GateOutcome, ReadOnlyGuard, ScalarValue, Target,
};
use crate::error::GatekeeperError;
use crate::ports::executor::QueryExecutor;

/// Runs assertions against one target and reports pass/fail.
///
/// Stateless: the executor is borrowed for the duration of a run and nothing
/// survives it. The scan is sequential and stops at the first assertion whose
/// result equals its failure value.
pub struct QualityGate;

impl QualityGate {
    /// Validates the target and every template, returning the resolved queries
    /// in assertion order. Nothing is executed.
    pub fn prepare(target: &Target, assertions: &[Assertion]) -> Result<Vec<String>, DomainError> {
        target.ensure_valid()?;
        let qualified = target.qualified_name();

        assertions
            .iter()
            .enumerate()
            .map(|(index, assertion)| {
                assertion.query.check(index)?;
                let sql = assertion.query.resolve(&qualified);
                ReadOnlyGuard::ensure_read_only(&sql, index)?;
                Ok(sql)
            })
            .collect()
    }

    /// `Fail` is a normal return value. `Err` means the run could not be
    /// evaluated: bad configuration, or a query the executor could not answer.
    #[instrument(
        skip(target, assertions, executor),
        fields(dataset = %target, assertions = assertions.len(), engine = executor.engine_name())
    )]
    pub async fn run(
        target: &Target,
        assertions: &[Assertion],
        executor: &dyn QueryExecutor,
    ) -> Result<GateOutcome, GatekeeperError> {
        let queries = Self::prepare(target, assertions)?;

        info!("Starting the quality checks for the table {}", target);
        let mut results = Vec::with_capacity(assertions.len());

        for (index, (assertion, query)) in assertions.iter().zip(queries).enumerate() {
            let actual_value = execute_scalar_query(executor, &query)
                .await
                .map_err(|e| GatekeeperError::QueryExecution {
                    index,
                    query: query.clone(),
                    source: Box::new(e),
                })?;

            results.push(CheckResult {
                assertion_index: index,
                resolved_query: query.clone(),
                actual_value: actual_value.clone(),
            });

            if actual_value == assertion.failure_value {
                warn!(
                    index,
                    "Test failed for `{}`: got failure value {}", query, actual_value
                );
                return Ok(GateOutcome::Fail(GateFailure {
                    results,
                    failing_index: index,
                    resolved_query: query,
                    expected_failure_value: assertion.failure_value.clone(),
                    actual_value,
                }));
            }

            debug!(index, "Assertion passed with {}", actual_value);
        }

        info!(
            "Quality check passed with the results [{}]",
            results
                .iter()
                .map(|r| r.actual_value.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(GateOutcome::Pass { results })
    }

    /// Same as `run`, for callers still holding index-aligned lists.
    /// A length mismatch fails before any query is issued.
    pub async fn run_unpaired(
        target: &Target,
        queries: Vec<String>,
        failure_values: Vec<ScalarValue>,
        executor: &dyn QueryExecutor,
    ) -> Result<GateOutcome, GatekeeperError> {
        let assertions = Assertion::pair_up(queries, failure_values)?;
        Self::run(target, &assertions, executor).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::infrastructure::error::{DatabaseError, InfrastructureError};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    // --- SPY EXECUTOR ---
    // Answers from a script and records every query it receives.
    #[derive(Clone)]
    struct SpyExecutor {
        pub executed_queries: Arc<Mutex<Vec<String>>>,
        responses: Vec<ScalarValue>,
        fail_on_call: Option<usize>,
    }

    impl SpyExecutor {
        fn returning(responses: Vec<ScalarValue>) -> Self {
            Self {
                executed_queries: Arc::new(Mutex::new(Vec::new())),
                responses,
                fail_on_call: None,
            }
        }

        fn failing_at(call: usize) -> Self {
            Self {
                fail_on_call: Some(call),
                ..Self::returning(vec![ScalarValue::Int(1); 8])
            }
        }

        fn calls(&self) -> usize {
            self.executed_queries.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl QueryExecutor for SpyExecutor {
        async fn execute_scalar(&self, query: &str) -> Result<ScalarValue, GatekeeperError> {
            let mut queries = self.executed_queries.lock().unwrap();
            let call = queries.len();
            queries.push(query.to_string());

            if self.fail_on_call == Some(call) {
                return Err(InfrastructureError::Database(DatabaseError::EmptyResult(
                    query.to_string(),
                ))
                .into());
            }
            self.responses
                .get(call)
                .cloned()
                .ok_or_else(|| GatekeeperError::InternalError("script exhausted".into()))
        }

        fn engine_name(&self) -> &str {
            "spy"
        }
    }

    fn users() -> Target {
        Target::new("public", "users")
    }

    fn count_assertions(n: usize) -> Vec<Assertion> {
        (0..n)
            .map(|i| Assertion::new(format!("SELECT COUNT(*) FROM {{}} WHERE level = {}", i), 0))
            .collect()
    }

    #[tokio::test]
    async fn test_pass_example() {
        let executor = SpyExecutor::returning(vec![ScalarValue::Int(5)]);
        let assertions = vec![Assertion::new("SELECT COUNT(*) FROM {}", 0)];

        let outcome = QualityGate::run(&users(), &assertions, &executor)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            GateOutcome::Pass {
                results: vec![CheckResult::new(0, "SELECT COUNT(*) FROM public.users", 5)]
            }
        );
    }

    #[tokio::test]
    async fn test_fail_example() {
        let executor = SpyExecutor::returning(vec![ScalarValue::Int(0)]);
        let assertions = vec![Assertion::new("SELECT COUNT(*) FROM {}", 0)];

        let outcome = QualityGate::run(&users(), &assertions, &executor)
            .await
            .unwrap();

        let failure = outcome.failure().unwrap();
        assert_eq!(failure.failing_index, 0);
        assert_eq!(failure.resolved_query, "SELECT COUNT(*) FROM public.users");
        assert_eq!(failure.expected_failure_value, ScalarValue::Int(0));
        assert_eq!(failure.actual_value, ScalarValue::Int(0));
        assert_eq!(
            failure.results,
            vec![CheckResult::new(0, "SELECT COUNT(*) FROM public.users", 0)]
        );
    }

    #[tokio::test]
    async fn test_pass_keeps_all_results_in_order() {
        let executor = SpyExecutor::returning(vec![
            ScalarValue::Int(3),
            ScalarValue::Int(1),
            ScalarValue::Int(7),
        ]);
        let assertions = count_assertions(3);

        let outcome = QualityGate::run(&users(), &assertions, &executor)
            .await
            .unwrap();

        assert!(outcome.is_pass());
        let indexes: Vec<usize> = outcome.results().iter().map(|r| r.assertion_index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
        assert_eq!(outcome.results()[2].actual_value, ScalarValue::Int(7));
        assert_eq!(executor.calls(), 3);
    }

    #[tokio::test]
    async fn test_short_circuit_on_first_failure() {
        // Assertion 1 hits its failure value; 2 and 3 must never run.
        let executor = SpyExecutor::returning(vec![
            ScalarValue::Int(4),
            ScalarValue::Int(0),
            ScalarValue::Int(0),
            ScalarValue::Int(0),
        ]);
        let assertions = count_assertions(4);

        let outcome = QualityGate::run(&users(), &assertions, &executor)
            .await
            .unwrap();

        let failure = outcome.failure().unwrap();
        assert_eq!(failure.failing_index, 1);
        assert_eq!(failure.results.len(), 2);
        assert_eq!(executor.calls(), 2);
    }

    #[tokio::test]
    async fn test_mismatched_lengths_run_nothing() {
        let executor = SpyExecutor::returning(vec![ScalarValue::Int(1)]);

        let res = QualityGate::run_unpaired(
            &users(),
            vec!["SELECT COUNT(*) FROM {}".into(), "SELECT COUNT(*) FROM {}".into()],
            vec![ScalarValue::Int(0)],
            &executor,
        )
        .await;

        let err = res.unwrap_err();
        assert!(matches!(
            err,
            GatekeeperError::Domain(DomainError::LengthMismatch { .. })
        ));
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(executor.calls(), 0);
    }

    #[tokio::test]
    async fn test_bad_template_rejected_before_any_query() {
        let executor = SpyExecutor::returning(vec![ScalarValue::Int(1); 2]);
        let assertions = vec![
            Assertion::new("SELECT COUNT(*) FROM {}", 0),
            Assertion::new("SELECT COUNT(*) FROM songs", 0),
        ];

        let res = QualityGate::run(&users(), &assertions, &executor).await;

        assert!(matches!(
            res,
            Err(GatekeeperError::Domain(DomainError::InvalidTemplate { index: 1, .. }))
        ));
        assert_eq!(executor.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_target_rejected() {
        let executor = SpyExecutor::returning(vec![ScalarValue::Int(1)]);
        let assertions = count_assertions(1);

        let res = QualityGate::run(&Target::new("", "users"), &assertions, &executor).await;

        assert!(matches!(
            res,
            Err(GatekeeperError::Domain(DomainError::InvalidTarget { .. }))
        ));
        assert_eq!(executor.calls(), 0);
    }

    #[tokio::test]
    async fn test_write_statement_rejected() {
        let executor = SpyExecutor::returning(vec![ScalarValue::Int(1)]);
        let assertions = vec![Assertion::new("DELETE FROM {}", 0)];

        let res = QualityGate::run(&users(), &assertions, &executor).await;

        assert!(matches!(
            res,
            Err(GatekeeperError::Domain(DomainError::NotReadOnly { .. }))
        ));
        assert_eq!(executor.calls(), 0);
    }

    #[tokio::test]
    async fn test_executor_error_propagates() {
        let executor = SpyExecutor::failing_at(1);
        let assertions = count_assertions(3);

        let res = QualityGate::run(&users(), &assertions, &executor).await;

        match res {
            Err(GatekeeperError::QueryExecution { index, query, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(query, "SELECT COUNT(*) FROM public.users WHERE level = 1");
            }
            other => panic!("expected QueryExecution, got {:?}", other),
        }
        assert_eq!(executor.calls(), 2);
    }

    #[tokio::test]
    async fn test_executor_error_on_first_call() {
        let executor = SpyExecutor::failing_at(0);
        let assertions = count_assertions(2);

        let err = QualityGate::run(&users(), &assertions, &executor)
            .await
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::QueryExecution);
    }

    #[tokio::test]
    async fn test_idempotent_runs() {
        let script = vec![ScalarValue::Int(2), ScalarValue::Text("ok".into())];
        let assertions = vec![
            Assertion::new("SELECT COUNT(*) FROM {}", 0),
            Assertion::new("SELECT MAX(level) FROM {table}", "free"),
        ];

        let first = QualityGate::run(&users(), &assertions, &SpyExecutor::returning(script.clone()))
            .await
            .unwrap();
        let second = QualityGate::run(&users(), &assertions, &SpyExecutor::returning(script))
            .await
            .unwrap();

        assert_eq!(first, second);
    }
}
