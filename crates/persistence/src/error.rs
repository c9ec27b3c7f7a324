// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campus_complaints::StoreError;
use campus_complaints_domain::ComplaintId;
use diesel::result::DatabaseErrorKind;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Another writer holds the database or a transaction could not commit.
    WriteConflict(String),
    /// The requested complaint was not found.
    ComplaintNotFound(ComplaintId),
    /// A stored row could not be turned back into a valid complaint.
    CorruptRecord { id: Option<i64>, reason: String },
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::WriteConflict(msg) => write!(f, "Write conflict: {msg}"),
            Self::ComplaintNotFound(id) => write!(f, "Complaint not found: {id}"),
            Self::CorruptRecord { id, reason } => match id {
                Some(id) => write!(f, "Corrupt complaint record {id}: {reason}"),
                None => write!(f, "Corrupt complaint record: {reason}"),
            },
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::DatabaseError(
                DatabaseErrorKind::SerializationFailure | DatabaseErrorKind::UniqueViolation,
                info,
            ) => Self::WriteConflict(info.message().to_string()),
            // SQLite reports a busy or locked database as a plain error message
            diesel::result::Error::DatabaseError(_, ref info)
                if info.message().contains("locked") || info.message().contains("busy") =>
            {
                Self::WriteConflict(info.message().to_string())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<PersistenceError> for StoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::ComplaintNotFound(id) => Self::NotFound(id),
            PersistenceError::WriteConflict(msg) => Self::Conflict(msg),
            PersistenceError::CorruptRecord { id, reason } => Self::Corrupt {
                id: id.map(ComplaintId::new),
                reason,
            },
            PersistenceError::SerializationError(reason) => Self::Corrupt { id: None, reason },
            PersistenceError::DatabaseError(_)
            | PersistenceError::DatabaseConnectionFailed(_)
            | PersistenceError::MigrationFailed(_)
            | PersistenceError::QueryFailed(_)
            | PersistenceError::InitializationError(_)
            | PersistenceError::ForeignKeyEnforcementNotEnabled => {
                Self::Unavailable(err.to_string())
            }
        }
    }
}
