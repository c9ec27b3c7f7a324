// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use campus_complaints::{CoreError, StoreError};
use campus_complaints_domain::DomainError;
use thiserror::Error;

/// API-level errors.
///
/// These are distinct from domain/core/store errors and represent the API
/// contract. Each variant has a stable [`ApiError::kind`] string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The session carries no identity.
    #[error("Authentication required: {reason}")]
    Unauthenticated {
        /// What was missing.
        reason: String,
    },
    /// The session's role label does not name an authority.
    #[error("Invalid role: '{label}' is not a recognised authority")]
    InvalidRole {
        /// The label as supplied.
        label: String,
    },
    /// The caller's authority does not currently hold the complaint.
    #[error("Complaint {complaint_id} is assigned to {assigned_to}; {acting} cannot act on it")]
    NotAssigned {
        complaint_id: String,
        acting: String,
        assigned_to: String,
    },
    /// The complaint is outside the caller's view.
    #[error("Complaint {complaint_id} is not visible to {role}")]
    NotVisible { complaint_id: String, role: String },
    /// The vice-chancellor holds the complaint.
    #[error("Complaint {complaint_id} cannot be escalated further")]
    TerminalAuthority { complaint_id: String },
    /// The complaint is already resolved.
    #[error("Complaint {complaint_id} is already resolved")]
    AlreadyTerminal { complaint_id: String },
    /// An explicit escalation target was rejected.
    #[error("Invalid escalation target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// No such complaint.
    #[error("Complaint {complaint_id} not found")]
    NotFound { complaint_id: String },
    /// A concurrent write interfered; safe to retry.
    #[error("Conflicting update, please retry: {message}")]
    Conflict { message: String },
    /// The store failed; safe to retry.
    #[error("Complaint store unavailable: {message}")]
    StoreUnavailable { message: String },
}

impl ApiError {
    /// Stable machine-readable name of the failure.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated { .. } => "Unauthenticated",
            Self::InvalidRole { .. } => "InvalidRole",
            Self::NotAssigned { .. } => "NotAssigned",
            Self::NotVisible { .. } => "NotVisible",
            Self::TerminalAuthority { .. } => "TerminalAuthority",
            Self::AlreadyTerminal { .. } => "AlreadyTerminal",
            Self::InvalidTarget { .. } => "InvalidTarget",
            Self::InvalidInput { .. } => "InvalidInput",
            Self::NotFound { .. } => "NotFound",
            Self::Conflict { .. } => "Conflict",
            Self::StoreUnavailable { .. } => "StoreUnavailable",
        }
    }

    /// Returns true if retrying the same request may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict { .. } | Self::StoreUnavailable { .. })
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidRole { label } => ApiError::InvalidRole { label },
        DomainError::InvalidComplaintType { .. } => ApiError::InvalidInput {
            field: String::from("complaint_type"),
            message: err.to_string(),
        },
        DomainError::InvalidStatus { .. } => ApiError::InvalidInput {
            field: String::from("status"),
            message: err.to_string(),
        },
        DomainError::InvalidComplaintId { .. } => ApiError::InvalidInput {
            field: String::from("complaint_id"),
            message: err.to_string(),
        },
        DomainError::EmptyField { field } => ApiError::InvalidInput {
            field: field.to_string(),
            message: err.to_string(),
        },
        DomainError::InvalidTimestamp { .. } | DomainError::InvariantViolation { .. } => {
            ApiError::StoreUnavailable {
                message: err.to_string(),
            }
        }
    }
}

/// Translates a core transition error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::NotAssigned {
            complaint_id,
            acting,
            assigned_to,
        } => ApiError::NotAssigned {
            complaint_id: complaint_id.to_string(),
            acting: acting.display_name().to_string(),
            assigned_to: assigned_to.display_name().to_string(),
        },
        CoreError::TerminalAuthority { complaint_id } => ApiError::TerminalAuthority {
            complaint_id: complaint_id.to_string(),
        },
        CoreError::AlreadyTerminal { complaint_id } => ApiError::AlreadyTerminal {
            complaint_id: complaint_id.to_string(),
        },
        CoreError::InvalidTarget { target, reason } => ApiError::InvalidTarget { target, reason },
        CoreError::DomainViolation(e) => translate_domain_error(e),
    }
}

/// Translates a store error into an API error.
///
/// Store failures are never turned into empty results here; read-side
/// aggregates decide separately whether to degrade.
#[must_use]
pub fn translate_store_error(err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound(id) => ApiError::NotFound {
            complaint_id: id.to_string(),
        },
        StoreError::Conflict(message) => ApiError::Conflict { message },
        StoreError::Unavailable(_) | StoreError::Corrupt { .. } => ApiError::StoreUnavailable {
            message: err.to_string(),
        },
    }
}
