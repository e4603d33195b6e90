//! Expression nodes: composable renderers of SQL fragments.
//!
//! Only the small surface the schema layer relies on lives here. A node
//! renders itself with [`Expression::resolve`] and may embed the output of
//! other nodes. Full select queries come from outside through [`ToSql`].

use sea_query::{PostgresQueryBuilder, SelectStatement};

pub trait Expression {
    fn resolve(&self) -> String;
}

/// A fully formed query that can be embedded as a subquery.
pub trait ToSql {
    fn to_sql(&self) -> String;
}

impl ToSql for SelectStatement {
    fn to_sql(&self) -> String {
        self.to_string(PostgresQueryBuilder)
    }
}

impl ToSql for str {
    fn to_sql(&self) -> String {
        self.to_string()
    }
}

impl ToSql for String {
    fn to_sql(&self) -> String {
        self.clone()
    }
}

impl<T: ToSql + ?Sized> ToSql for &T {
    fn to_sql(&self) -> String {
        (**self).to_sql()
    }
}

impl<T: Expression + ?Sized> Expression for Box<T> {
    fn resolve(&self) -> String {
        (**self).resolve()
    }
}

impl<T: Expression + ?Sized> Expression for &T {
    fn resolve(&self) -> String {
        (**self).resolve()
    }
}

/// A verbatim SQL fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Raw(pub String);

impl Raw {
    pub fn new(sql: impl Into<String>) -> Self {
        Self(sql.into())
    }
}

impl Expression for Raw {
    fn resolve(&self) -> String {
        self.0.clone()
    }
}

/// A bare column reference, optionally qualified by its table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    pub table: Option<String>,
    pub name: String,
}

impl ColumnRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            table: None,
            name: name.into(),
        }
    }

    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            name: name.into(),
        }
    }
}

impl Expression for ColumnRef {
    fn resolve(&self) -> String {
        match self.table {
            Some(ref table) => format!("{}.{}", table, self.name),
            None => self.name.clone(),
        }
    }
}

/// Membership of `target` in the rows of a subquery:
/// `<target> IN ( <select> )`.
#[derive(Debug, Clone)]
pub struct InSubquery<E, Q> {
    target: E,
    select: Q,
    negated: bool,
}

impl<E: Expression, Q: ToSql> InSubquery<E, Q> {
    pub fn new(target: E, select: Q) -> Self {
        Self {
            target,
            select,
            negated: false,
        }
    }

    /// Render as `NOT IN` instead.
    pub fn negated(mut self) -> Self {
        self.negated = !self.negated;
        self
    }
}

impl<E: Expression, Q: ToSql> Expression for InSubquery<E, Q> {
    fn resolve(&self) -> String {
        let keyword = if self.negated { "NOT IN" } else { "IN" };
        format!(
            "{} {} ( {} )",
            self.target.resolve(),
            keyword,
            self.select.to_sql()
        )
    }
}
