use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Malformed or missing required fields on an entity write. Rejected
    /// before persistence; no recalculation is triggered.
    #[error("validation failed for {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Duplicate po_number or vendor_code.
    #[error("duplicate {field}: {value}")]
    UniqueConstraint { field: &'static str, value: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Reserved for the authenticating collaborator in front of this crate.
    #[error("unauthorized: {0}")]
    Auth(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<diesel::result::Error> for Error {
    fn from(e: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};
        match e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                // SQLite reports "UNIQUE constraint failed: <table>.<column>".
                let message = info.message();
                let field = if message.contains("po_number") {
                    "po_number"
                } else if message.contains("vendor_code") {
                    "vendor_code"
                } else {
                    "unique key"
                };
                Error::UniqueConstraint {
                    field,
                    value: message.to_string(),
                }
            }
            other => Error::Database(other.to_string()),
        }
    }
}
