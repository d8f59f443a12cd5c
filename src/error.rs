use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("database unreachable: {context}")]
    Connectivity {
        context: String,
        #[source]
        source: SqlxError,
    },

    #[error("query failed: {context}")]
    Query {
        context: String,
        #[source]
        source: SqlxError,
    },

    #[error("row mapping failed: {context}")]
    Mapping {
        context: String,
        #[source]
        source: SqlxError,
    },

    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error("background worker unavailable: {context}")]
    Worker { context: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Triage sqlx failures into the three classes callers care about:
/// reaching the database, executing a statement, decoding a row.
impl From<SqlxError> for StoreError {
    fn from(e: SqlxError) -> Self {
        match e {
            SqlxError::Io(_)
            | SqlxError::Tls(_)
            | SqlxError::PoolTimedOut
            | SqlxError::PoolClosed
            | SqlxError::Configuration(_) => StoreError::Connectivity {
                context: "connection could not be established or borrowed".to_string(),
                source: e,
            },
            SqlxError::ColumnDecode { .. }
            | SqlxError::ColumnNotFound(_)
            | SqlxError::ColumnIndexOutOfBounds { .. }
            | SqlxError::TypeNotFound { .. }
            | SqlxError::Decode(_) => StoreError::Mapping {
                context: "fetched row did not match the expected shape".to_string(),
                source: e,
            },
            _ => StoreError::Query {
                context: "statement was rejected by the database".to_string(),
                source: e,
            },
        }
    }
}

impl StoreError {
    pub fn config(message: impl Into<String>) -> Self {
        StoreError::Config {
            message: message.into(),
        }
    }

    pub fn worker(context: impl Into<String>) -> Self {
        StoreError::Worker {
            context: context.into(),
        }
    }
}
