// gatekeeper-core/src/infrastructure/adapters/datafusion.rs

use async_trait::async_trait;
use datafusion::arrow::util::display::array_value_to_string;
use datafusion::error::DataFusionError;
use datafusion::prelude::*;
use datafusion::scalar::ScalarValue as ArrowScalar;
use std::path::Path;
use tracing::debug;

use crate::domain::quality::ScalarValue;
use crate::error::GatekeeperError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::executor::QueryExecutor;

/// In-process engine over CSV / Parquet / NDJSON files.
/// Tables land in the default `datafusion.public` schema.
pub struct DataFusionExecutor {
    ctx: SessionContext,
}

impl Default for DataFusionExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl DataFusionExecutor {
    pub fn new() -> Self {
        Self {
            ctx: SessionContext::new(),
        }
    }

    pub async fn register_source(&self, name: &str, path: &Path) -> Result<(), InfrastructureError> {
        let path_str = path.to_str().ok_or_else(|| {
            InfrastructureError::ConfigError(format!("Invalid path for source {}: {:?}", name, path))
        })?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => {
                self.ctx
                    .register_csv(name, path_str, CsvReadOptions::new())
                    .await?
            }
            "parquet" => {
                self.ctx
                    .register_parquet(name, path_str, ParquetReadOptions::default())
                    .await?
            }
            "json" | "ndjson" => {
                self.ctx
                    .register_json(name, path_str, NdJsonReadOptions::default())
                    .await?
            }
            other => {
                return Err(InfrastructureError::ConfigError(format!(
                    "Unsupported source format '{}' for table {} ({})",
                    other,
                    name,
                    path.display()
                )));
            }
        }

        debug!(table = name, path = path_str, "Source registered");
        Ok(())
    }

    /// Runs a statement for its side effects (DDL in tests and setup).
    pub async fn execute(&self, sql: &str) -> Result<(), InfrastructureError> {
        self.ctx.sql(sql).await?.collect().await?;
        Ok(())
    }
}

fn engine_error(e: DataFusionError) -> GatekeeperError {
    GatekeeperError::Infrastructure(InfrastructureError::Database(DatabaseError::DataFusion(e)))
}

#[async_trait]
impl QueryExecutor for DataFusionExecutor {
    async fn execute_scalar(&self, query: &str) -> Result<ScalarValue, GatekeeperError> {
        let df = self.ctx.sql(query).await.map_err(engine_error)?;
        let batches = df.collect().await.map_err(engine_error)?;

        // Partitioned plans may yield leading empty batches
        let batch = batches
            .iter()
            .find(|b| b.num_rows() > 0 && b.num_columns() > 0)
            .ok_or_else(|| {
                InfrastructureError::Database(DatabaseError::EmptyResult(query.to_string()))
            })?;

        let column = batch.column(0);
        // ScalarValue's Display prints raw ticks for timestamps; arrow's
        // array formatter gives ISO-8601
        if column.data_type().is_temporal() && !column.is_null(0) {
            let rendered = array_value_to_string(column, 0)
                .map_err(|e| engine_error(DataFusionError::from(e)))?;
            return Ok(ScalarValue::Text(rendered));
        }

        let value = ArrowScalar::try_from_array(column, 0).map_err(engine_error)?;
        Ok(to_scalar(value))
    }

    fn engine_name(&self) -> &str {
        "datafusion"
    }
}

fn to_scalar(value: ArrowScalar) -> ScalarValue {
    if value.is_null() {
        return ScalarValue::Null;
    }
    match value {
        ArrowScalar::Boolean(Some(b)) => ScalarValue::Bool(b),
        ArrowScalar::Int8(Some(i)) => ScalarValue::Int(i.into()),
        ArrowScalar::Int16(Some(i)) => ScalarValue::Int(i.into()),
        ArrowScalar::Int32(Some(i)) => ScalarValue::Int(i.into()),
        ArrowScalar::Int64(Some(i)) => ScalarValue::Int(i),
        ArrowScalar::UInt8(Some(u)) => ScalarValue::Int(u.into()),
        ArrowScalar::UInt16(Some(u)) => ScalarValue::Int(u.into()),
        ArrowScalar::UInt32(Some(u)) => ScalarValue::Int(u.into()),
        ArrowScalar::UInt64(Some(u)) => i64::try_from(u)
            .map(ScalarValue::Int)
            .unwrap_or(ScalarValue::Float(u as f64)),
        ArrowScalar::Float32(Some(f)) => ScalarValue::Float(f.into()),
        ArrowScalar::Float64(Some(f)) => ScalarValue::Float(f),
        ArrowScalar::Decimal128(Some(raw), _, scale) => {
            ScalarValue::Float(raw as f64 / 10f64.powi(i32::from(scale)))
        }
        ArrowScalar::Utf8(Some(s))
        | ArrowScalar::LargeUtf8(Some(s))
        | ArrowScalar::Utf8View(Some(s)) => ScalarValue::Text(s),
        other => ScalarValue::Text(other.to_string()),
    }
}
