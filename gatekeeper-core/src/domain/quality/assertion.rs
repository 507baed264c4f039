// gatekeeper-core/src/domain/quality/assertion.rs

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::LazyLock;

use crate::domain::error::DomainError;
use crate::domain::quality::value::ScalarValue;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z0-9_]*)\}").unwrap_or_else(|_| unreachable!())
});

/// Named spelling of the placeholder; `{}` is accepted as well.
pub const TABLE_PLACEHOLDER: &str = "table";

/// A SQL string with exactly one placeholder for the qualified table name.
///
/// Braces inside quoted text (`'...'` literals, `"..."` identifiers) are SQL,
/// not placeholders: `regexp_matches(id, '^[0-9]{3}$')` is left alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryTemplate(String);

impl QueryTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Rejects templates with zero, several, or unknown placeholders.
    /// `index` is the assertion position, used for diagnostics only.
    pub fn check(&self, index: usize) -> Result<(), DomainError> {
        let mut count = 0;
        for (_, name) in self.placeholders() {
            if !name.is_empty() && name != TABLE_PLACEHOLDER {
                return Err(DomainError::InvalidTemplate {
                    index,
                    reason: format!("unknown placeholder '{{{}}}'", name),
                });
            }
            count += 1;
        }

        match count {
            1 => Ok(()),
            0 => Err(DomainError::InvalidTemplate {
                index,
                reason: "no table placeholder".into(),
            }),
            n => Err(DomainError::InvalidTemplate {
                index,
                reason: format!("{} placeholders, expected exactly one", n),
            }),
        }
    }

    /// Substitutes the placeholder. Call `check` first: an unchecked template
    /// is returned with every recognised placeholder replaced.
    pub fn resolve(&self, qualified_name: &str) -> String {
        let mut sql = String::with_capacity(self.0.len() + qualified_name.len());
        let mut last = 0;
        for (span, name) in self.placeholders() {
            if name.is_empty() || name == TABLE_PLACEHOLDER {
                sql.push_str(&self.0[last..span.start]);
                sql.push_str(qualified_name);
                last = span.end;
            }
        }
        sql.push_str(&self.0[last..]);
        sql
    }

    /// `{...}` tokens outside quoted text, with their byte span and name.
    fn placeholders(&self) -> impl Iterator<Item = (Range<usize>, &str)> + '_ {
        let quoted = quoted_spans(&self.0);
        PLACEHOLDER.captures_iter(&self.0).filter_map(move |cap| {
            let token = cap.get(0)?;
            if quoted.iter().any(|q| q.contains(&token.start())) {
                return None;
            }
            let name = cap.get(1).map_or("", |m| m.as_str());
            Some((token.range(), name))
        })
    }
}

/// Byte ranges of `'...'` and `"..."` sections. A doubled quote (`'it''s'`)
/// closes and reopens, which leaves the whole literal covered.
/// An unterminated quote runs to the end of the string.
fn quoted_spans(sql: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut open: Option<(char, usize)> = None;

    for (i, c) in sql.char_indices() {
        match open {
            None if c == '\'' || c == '"' => open = Some((c, i)),
            Some((quote, start)) if c == quote => {
                spans.push(start..i + 1);
                open = None;
            }
            _ => {}
        }
    }
    if let Some((_, start)) = open {
        spans.push(start..sql.len());
    }
    spans
}

impl From<&str> for QueryTemplate {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A query plus the scalar value that, if returned, signals failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assertion {
    pub query: QueryTemplate,
    pub failure_value: ScalarValue,
}

impl Assertion {
    pub fn new(query: impl Into<String>, failure_value: impl Into<ScalarValue>) -> Self {
        Self {
            query: QueryTemplate::new(query),
            failure_value: failure_value.into(),
        }
    }

    /// Pairs index-aligned `queries` and `failure_values`.
    /// Diverging lengths are a configuration error, never truncated.
    pub fn pair_up(
        queries: Vec<String>,
        failure_values: Vec<ScalarValue>,
    ) -> Result<Vec<Assertion>, DomainError> {
        if queries.len() != failure_values.len() {
            return Err(DomainError::LengthMismatch {
                queries: queries.len(),
                failure_values: failure_values.len(),
            });
        }

        Ok(queries
            .into_iter()
            .zip(failure_values)
            .map(|(query, failure_value)| Assertion {
                query: QueryTemplate(query),
                failure_value,
            })
            .collect())
    }
}
