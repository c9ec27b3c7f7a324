// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campus_complaints_domain::{ComplaintId, DomainError, Role};
use thiserror::Error;

/// Errors that can occur during complaint transitions.
///
/// A failed transition never produces an update, so the stored complaint is
/// left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The acting role does not currently hold the complaint.
    #[error("Complaint {complaint_id} is assigned to {assigned_to}, not {acting}")]
    NotAssigned {
        complaint_id: ComplaintId,
        acting: Role,
        assigned_to: Role,
    },
    /// The complaint is held by the vice-chancellor and cannot go higher.
    #[error("Complaint {complaint_id} is with the vice chancellor and cannot be escalated further")]
    TerminalAuthority { complaint_id: ComplaintId },
    /// The complaint is already resolved.
    #[error("Complaint {complaint_id} is already resolved")]
    AlreadyTerminal { complaint_id: ComplaintId },
    /// An explicit escalation target is unknown or is the current assignee.
    #[error("Invalid escalation target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
}
