use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// Only table creation is modeled; altering an existing table is not.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Migration {migration} is irreversible: {reason}")]
    Irreversible { migration: String, reason: String },

    #[error("Duplicate migration version: {0}")]
    DuplicateVersion(u64),

    #[error("Migration not found: {0}")]
    NotFound(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_display() {
        assert_eq!(
            SchemaError::NotImplemented("alter table users".to_string()).to_string(),
            "Not implemented: alter table users"
        );
        assert_eq!(
            SchemaError::Irreversible {
                migration: "0002_drop_legacy".to_string(),
                reason: "drops data".to_string(),
            }
            .to_string(),
            "Migration 0002_drop_legacy is irreversible: drops data"
        );
        assert_eq!(
            SchemaError::DuplicateVersion(3).to_string(),
            "Duplicate migration version: 3"
        );
        assert_eq!(SchemaError::NotFound(9).to_string(), "Migration not found: 9");
    }
}
