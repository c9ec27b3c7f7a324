// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A role label does not map to one of the six canonical authorities.
    #[error("Invalid role: '{label}' is not a recognised authority")]
    InvalidRole {
        /// The label as it was supplied.
        label: String,
    },
    /// A complaint type string is not part of the closed enumeration.
    #[error("Invalid complaint type: '{value}'")]
    InvalidComplaintType {
        /// The rejected value.
        value: String,
    },
    /// A status string is not part of the closed enumeration.
    #[error("Invalid complaint status: '{value}'")]
    InvalidStatus {
        /// The rejected value.
        value: String,
    },
    /// A complaint identifier could not be parsed.
    #[error("Invalid complaint id: '{value}'")]
    InvalidComplaintId {
        /// The rejected value.
        value: String,
    },
    /// A required field was empty after trimming.
    #[error("Field '{field}' cannot be empty")]
    EmptyField {
        /// The name of the field.
        field: &'static str,
    },
    /// A timestamp could not be parsed or formatted.
    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp {
        /// The offending value.
        value: String,
        /// The parser's explanation.
        reason: String,
    },
    /// A complaint record violates a lifecycle invariant.
    #[error("Complaint invariant violated: {reason}")]
    InvariantViolation {
        /// Description of the violated invariant.
        reason: String,
    },
}
