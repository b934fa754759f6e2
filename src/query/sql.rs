//! Parameterised SQL rendering
//!
//! Renders a [`Query`] to SQL text plus bind parameters for the configured
//! dialect. Values are never inlined into the SQL text.

use super::ast::{ContainsTarget, Predicate, Query};
use crate::dialect::Dialect;
use crate::schema::TypedValue;

/// Escape character declared on every LIKE clause
const LIKE_ESCAPE: char = '\\';

/// SQL text with its bind parameters, in placeholder order
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    pub sql: String,
    pub params: Vec<TypedValue>,
}

/// Renders queries for one dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlRenderer {
    dialect: Dialect,
}

impl SqlRenderer {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Renders a full `SELECT`
    pub fn render(&self, query: &Query) -> SqlStatement {
        let mut params = Vec::new();
        let mut sql = format!("SELECT * FROM {}", quote_ident(&query.table));

        if !query.predicates.is_empty() {
            let clauses: Vec<String> = query
                .predicates
                .iter()
                .map(|p| self.render_predicate(p, &mut params))
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        if !query.order.is_empty() {
            let keys: Vec<String> = query
                .order
                .iter()
                .map(|s| format!("{} {}", quote_ident(&s.column), s.direction.as_sql()))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&keys.join(", "));
        }

        if let Some(limit) = query.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        SqlStatement { sql, params }
    }

    fn render_predicate(&self, predicate: &Predicate, params: &mut Vec<TypedValue>) -> String {
        match predicate {
            Predicate::Compare { column, op, value } => {
                let placeholder = self.bind(params, value.clone());
                format!("{} {} {}", quote_ident(column), op.as_sql(), placeholder)
            }
            Predicate::In { column, values } => {
                if values.is_empty() {
                    return "FALSE".to_string();
                }
                let placeholders: Vec<String> =
                    values.iter().map(|v| self.bind(params, v.clone())).collect();
                format!("{} IN ({})", quote_ident(column), placeholders.join(", "))
            }
            Predicate::Contains {
                column,
                target,
                needle,
            } => {
                let subject = match target {
                    ContainsTarget::Column => quote_ident(column),
                    ContainsTarget::TextCast => format!("CAST({} AS VARCHAR)", quote_ident(column)),
                };
                let placeholder = self.bind(params, TypedValue::Text(like_pattern(needle)));
                format!("{} LIKE {} ESCAPE '{}'", subject, placeholder, LIKE_ESCAPE)
            }
            Predicate::MatchNone => "FALSE".to_string(),
            Predicate::Any(parts) => self.render_group(parts, " OR ", "FALSE", params),
            Predicate::All(parts) => self.render_group(parts, " AND ", "TRUE", params),
        }
    }

    fn render_group(
        &self,
        parts: &[Predicate],
        joiner: &str,
        empty: &str,
        params: &mut Vec<TypedValue>,
    ) -> String {
        if parts.is_empty() {
            return empty.to_string();
        }
        let rendered: Vec<String> = parts
            .iter()
            .map(|p| self.render_predicate(p, params))
            .collect();
        format!("({})", rendered.join(joiner))
    }

    fn bind(&self, params: &mut Vec<TypedValue>, value: TypedValue) -> String {
        params.push(value);
        self.dialect.placeholder(params.len())
    }
}

/// Builds `%needle%` with LIKE metacharacters in the needle escaped
pub fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
