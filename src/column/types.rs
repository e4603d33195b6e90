use std::fmt;

pub const TIMESTAMP: &str = "timestamp without time zone";
pub const TIMESTAMP_TZ: &str = "timestamp with time zone";

/// Column type named by a declaration shorthand.
///
/// Shorthands outside the alias table are kept verbatim as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    BigInt,
    Timestamp,
    TimestampTz,
    Custom(String),
}

impl ColumnType {
    pub fn from_alias(kind: &str) -> Self {
        match kind {
            "string" => ColumnType::Text,
            "int32" | "integer" => ColumnType::Integer,
            "int64" | "long" => ColumnType::BigInt,
            "datetime" => ColumnType::Timestamp,
            "datetimetz" => ColumnType::TimestampTz,
            other => ColumnType::Custom(other.to_string()),
        }
    }

    pub fn as_sql(&self) -> &str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Integer => "integer",
            ColumnType::BigInt => "bigint",
            ColumnType::Timestamp => TIMESTAMP,
            ColumnType::TimestampTz => TIMESTAMP_TZ,
            ColumnType::Custom(sql) => sql,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}
