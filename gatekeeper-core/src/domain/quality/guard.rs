// gatekeeper-core/src/domain/quality/guard.rs

use sqlparser::ast::Statement;
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

use crate::domain::error::DomainError;

pub struct ReadOnlyGuard;

impl ReadOnlyGuard {
    /// A check query must be exactly one query statement (SELECT, WITH ... SELECT,
    /// set operations). Anything that could mutate the warehouse is refused.
    pub fn ensure_read_only(sql: &str, index: usize) -> Result<(), DomainError> {
        let dialect = GenericDialect {};
        let statements =
            Parser::parse_sql(&dialect, sql).map_err(|e| DomainError::NotReadOnly {
                index,
                reason: format!("unparseable SQL ({})", e),
            })?;

        match statements.as_slice() {
            [Statement::Query(_)] => Ok(()),
            [] => Err(DomainError::NotReadOnly {
                index,
                reason: "empty query".into(),
            }),
            [other] => Err(DomainError::NotReadOnly {
                index,
                reason: format!("found '{}'", statement_kind(other)),
            }),
            many => Err(DomainError::NotReadOnly {
                index,
                reason: format!("{} statements, expected one", many.len()),
            }),
        }
    }
}

fn statement_kind(stmt: &Statement) -> String {
    stmt.to_string()
        .split_whitespace()
        .next()
        .unwrap_or("?")
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_accepted() {
        assert!(ReadOnlyGuard::ensure_read_only("SELECT COUNT(*) FROM public.users", 0).is_ok());
    }

    #[test]
    fn test_cte_accepted() {
        let sql = "WITH d AS (SELECT userid FROM public.users GROUP BY userid HAVING COUNT(*) > 1) SELECT COUNT(*) FROM d";
        assert!(ReadOnlyGuard::ensure_read_only(sql, 0).is_ok());
    }

    #[test]
    fn test_delete_refused() {
        let res = ReadOnlyGuard::ensure_read_only("DELETE FROM public.users", 2);
        assert!(matches!(
            res,
            Err(DomainError::NotReadOnly { index: 2, ref reason }) if reason.contains("DELETE")
        ));
    }

    #[test]
    fn test_stacked_statements_refused() {
        let res =
            ReadOnlyGuard::ensure_read_only("SELECT 1 FROM public.users; DROP TABLE public.users", 0);
        assert!(matches!(res, Err(DomainError::NotReadOnly { .. })));
    }
}
