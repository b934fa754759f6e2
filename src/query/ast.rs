//! Query model handed to the storage engine
//!
//! A [`Query`] is a table, a flat conjunction of [`Predicate`]s, an ordering
//! and an optional limit. Disjunction exists only as [`Predicate::Any`],
//! which the keyset paginator uses for its seek condition; the filter
//! compiler never produces it.

use crate::schema::TypedValue;

/// Comparison direction for single-value predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// column = value
    Eq,
    /// column < value
    Lt,
    /// column <= value
    Le,
    /// column > value
    Gt,
    /// column >= value
    Ge,
}

impl CompareOp {
    /// Returns the SQL operator
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }

    /// Returns true if this is an ordering comparison
    pub fn is_range(&self) -> bool {
        !matches!(self, CompareOp::Eq)
    }
}

/// What a substring predicate is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainsTarget {
    /// The text column itself
    Column,
    /// The column cast to its textual rendering
    TextCast,
}

/// A boolean condition over one or more columns
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Single-value comparison
    Compare {
        column: String,
        op: CompareOp,
        value: TypedValue,
    },
    /// Set membership
    In {
        column: String,
        values: Vec<TypedValue>,
    },
    /// Case-sensitive substring match; `needle` is literal, not a pattern
    Contains {
        column: String,
        target: ContainsTarget,
        needle: String,
    },
    /// Matches no rows
    MatchNone,
    /// Disjunction
    Any(Vec<Predicate>),
    /// Conjunction
    All(Vec<Predicate>),
}

impl Predicate {
    /// Create a comparison predicate
    pub fn compare(column: impl Into<String>, op: CompareOp, value: TypedValue) -> Self {
        Predicate::Compare {
            column: column.into(),
            op,
            value,
        }
    }

    /// Create an equality predicate
    pub fn eq(column: impl Into<String>, value: TypedValue) -> Self {
        Self::compare(column, CompareOp::Eq, value)
    }

    /// Create a `>` predicate
    pub fn gt(column: impl Into<String>, value: TypedValue) -> Self {
        Self::compare(column, CompareOp::Gt, value)
    }

    /// Create a `>=` predicate
    pub fn ge(column: impl Into<String>, value: TypedValue) -> Self {
        Self::compare(column, CompareOp::Ge, value)
    }

    /// Create a `<` predicate
    pub fn lt(column: impl Into<String>, value: TypedValue) -> Self {
        Self::compare(column, CompareOp::Lt, value)
    }

    /// Create a `<=` predicate
    pub fn le(column: impl Into<String>, value: TypedValue) -> Self {
        Self::compare(column, CompareOp::Le, value)
    }

    /// Create a membership predicate; an empty list matches nothing
    pub fn in_list(column: impl Into<String>, values: Vec<TypedValue>) -> Self {
        if values.is_empty() {
            return Predicate::MatchNone;
        }
        Predicate::In {
            column: column.into(),
            values,
        }
    }

    /// Create a substring predicate
    pub fn contains(
        column: impl Into<String>,
        target: ContainsTarget,
        needle: impl Into<String>,
    ) -> Self {
        Predicate::Contains {
            column: column.into(),
            target,
            needle: needle.into(),
        }
    }

    /// Returns the columns this predicate reads, in order of appearance
    pub fn columns(&self) -> Vec<&str> {
        match self {
            Predicate::Compare { column, .. }
            | Predicate::In { column, .. }
            | Predicate::Contains { column, .. } => vec![column.as_str()],
            Predicate::MatchNone => Vec::new(),
            Predicate::Any(parts) | Predicate::All(parts) => {
                parts.iter().flat_map(|p| p.columns()).collect()
            }
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Sort specification for one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Column to sort by
    pub column: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Desc,
        }
    }

    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

/// A query against one table
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Target table
    pub table: String,
    /// Filter predicates, all combined with AND
    pub predicates: Vec<Predicate>,
    /// Ordering, most significant first
    pub order: Vec<SortSpec>,
    /// Maximum rows to return
    pub limit: Option<usize>,
}

impl Query {
    /// Creates an unfiltered query over `table`
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            predicates: Vec::new(),
            order: Vec::new(),
            limit: None,
        }
    }

    /// Narrows the query with one more predicate
    pub fn and_where(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Appends a sort key
    pub fn order_by(mut self, sort: SortSpec) -> Self {
        self.order.push(sort);
        self
    }

    /// Sets the limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true if no predicates were added
    pub fn is_unfiltered(&self) -> bool {
        self.predicates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_accumulates_conjunction() {
        let query = Query::new("user")
            .and_where(Predicate::eq("name", TypedValue::Text("User5".into())))
            .and_where(Predicate::gt("age", TypedValue::Integer64(18)))
            .order_by(SortSpec::asc("created_at"))
            .with_limit(20);

        assert_eq!(query.predicates.len(), 2);
        assert_eq!(query.order.len(), 1);
        assert_eq!(query.limit, Some(20));
        assert!(!query.is_unfiltered());
    }

    #[test]
    fn test_empty_in_list_matches_none() {
        assert_eq!(Predicate::in_list("name", vec![]), Predicate::MatchNone);
    }

    #[test]
    fn test_predicate_columns() {
        let seek = Predicate::All(vec![
            Predicate::ge("created_at", TypedValue::Integer64(1)),
            Predicate::Any(vec![
                Predicate::gt("id", TypedValue::Integer64(2)),
                Predicate::gt("created_at", TypedValue::Integer64(1)),
            ]),
        ]);
        assert_eq!(seek.columns(), vec!["created_at", "id", "created_at"]);
    }

    #[test]
    fn test_compare_op_sql() {
        assert_eq!(CompareOp::Le.as_sql(), "<=");
        assert!(CompareOp::Gt.is_range());
        assert!(!CompareOp::Eq.is_range());
    }
}
