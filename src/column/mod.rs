mod types;

pub use types::{ColumnType, TIMESTAMP, TIMESTAMP_TZ};

use std::fmt;

use crate::expression::Expression;

/// A column as it appears in a `CREATE TABLE` body.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub sql_type: String,
    pub nullable: bool,
    pub default: Option<ColumnDefault>,
    pub primary: bool,
}

impl Column {
    /// `name type [NOT NULL] [DEFAULT <expr>] [PRIMARY KEY]`
    pub fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.sql_type);
        if !self.nullable {
            sql.push_str(" NOT NULL");
        }
        if let Some(ref default) = self.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default.to_string());
        }
        if self.primary {
            sql.push_str(" PRIMARY KEY");
        }
        sql
    }
}

/// Default value of a column: a literal or a raw SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnDefault {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Expression(String),
}

impl ColumnDefault {
    pub fn raw(sql: impl Into<String>) -> Self {
        ColumnDefault::Expression(sql.into())
    }

    /// Use the rendered form of an expression node as the default.
    pub fn expression(expr: &dyn Expression) -> Self {
        ColumnDefault::Expression(expr.resolve())
    }

    pub fn now() -> Self {
        ColumnDefault::Expression("now()".to_string())
    }
}

impl fmt::Display for ColumnDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnDefault::Null => write!(f, "NULL"),
            ColumnDefault::Bool(true) => write!(f, "TRUE"),
            ColumnDefault::Bool(false) => write!(f, "FALSE"),
            ColumnDefault::Int(n) => write!(f, "{}", n),
            ColumnDefault::Float(n) if n.is_nan() => write!(f, "'NaN'"),
            ColumnDefault::Float(n) if n.is_infinite() && *n > 0.0 => write!(f, "'Infinity'"),
            ColumnDefault::Float(n) if n.is_infinite() => write!(f, "'-Infinity'"),
            ColumnDefault::Float(n) => write!(f, "{}", n),
            ColumnDefault::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            ColumnDefault::Expression(sql) => f.write_str(sql),
        }
    }
}

impl From<bool> for ColumnDefault {
    fn from(value: bool) -> Self {
        ColumnDefault::Bool(value)
    }
}

impl From<i32> for ColumnDefault {
    fn from(value: i32) -> Self {
        ColumnDefault::Int(value.into())
    }
}

impl From<i64> for ColumnDefault {
    fn from(value: i64) -> Self {
        ColumnDefault::Int(value)
    }
}

impl From<f64> for ColumnDefault {
    fn from(value: f64) -> Self {
        ColumnDefault::Float(value)
    }
}

impl From<&str> for ColumnDefault {
    fn from(value: &str) -> Self {
        ColumnDefault::Text(value.to_string())
    }
}

impl From<String> for ColumnDefault {
    fn from(value: String) -> Self {
        ColumnDefault::Text(value)
    }
}

/// Everything `add_column` accepts: the column itself plus the index
/// triggers. `unique` wins over `index` when both are set.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub sql_type: String,
    pub nullable: bool,
    pub default: Option<ColumnDefault>,
    pub primary: bool,
    pub index: bool,
    pub unique: bool,
}

impl ColumnDef {
    /// A column with a literal SQL type.
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            nullable: true,
            default: None,
            primary: false,
            index: false,
            unique: false,
        }
    }

    /// A column declared through a type shorthand such as `string` or `long`.
    pub fn of(kind: &str, name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::from_alias(kind).as_sql())
    }

    pub fn not_null(self) -> Self {
        self.nullable(false)
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn default(mut self, value: impl Into<ColumnDefault>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn primary_key(self) -> Self {
        self.primary(true)
    }

    pub fn primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }

    pub fn index(mut self) -> Self {
        self.index = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub(crate) fn into_column(self) -> Column {
        Column {
            name: self.name,
            sql_type: self.sql_type,
            nullable: self.nullable,
            default: self.default,
            primary: self.primary,
        }
    }
}
