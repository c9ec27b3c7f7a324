// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campus_complaints_audit::{AuditEvent, StateSnapshot};
use campus_complaints_domain::{
    Complaint, ComplaintStatus, EscalationChain, NewComplaint, Role, Stamp,
};
use time::OffsetDateTime;

/// The lifecycle fields a transition was computed from.
///
/// The store only writes an update while the row still holds this state;
/// otherwise another writer got there first and the update is a conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorState {
    pub status: ComplaintStatus,
    pub assigned_to: Role,
    pub escalation_chain: EscalationChain,
}

impl PriorState {
    /// The lifecycle state of `complaint` as loaded.
    #[must_use]
    pub fn of(complaint: &Complaint) -> Self {
        Self {
            status: complaint.status,
            assigned_to: complaint.assigned_to,
            escalation_chain: complaint.escalation_chain.clone(),
        }
    }
}

/// The fields a transition changes, written by the store in one update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintUpdate {
    /// The state the row must still be in for the write to apply.
    pub expected: PriorState,
    /// The new status.
    pub status: ComplaintStatus,
    /// The refreshed modification time.
    pub updated_at: OffsetDateTime,
    /// Transition-specific fields.
    pub change: LifecycleChange,
}

/// Transition-specific part of a [`ComplaintUpdate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleChange {
    /// Sets `resolved_at` / `resolved_by`.
    Resolved(Stamp),
    /// Moves responsibility to another authority.
    Escalated {
        assigned_to: Role,
        previous_authority: Role,
        escalation_chain: EscalationChain,
        /// `None` leaves any earlier reason in place.
        reason: Option<String>,
        stamp: Stamp,
    },
}

impl ComplaintUpdate {
    /// Produces the complaint as it looks after this update.
    #[must_use]
    pub fn apply_to(&self, complaint: &Complaint) -> Complaint {
        let mut updated: Complaint = complaint.clone();
        updated.status = self.status;
        updated.updated_at = self.updated_at;
        match &self.change {
            LifecycleChange::Resolved(stamp) => {
                updated.resolved = Some(stamp.clone());
            }
            LifecycleChange::Escalated {
                assigned_to,
                previous_authority,
                escalation_chain,
                reason,
                stamp,
            } => {
                updated.assigned_to = *assigned_to;
                updated.previous_authority = Some(*previous_authority);
                updated.escalation_chain = escalation_chain.clone();
                if let Some(reason) = reason {
                    updated.escalation_reason = Some(reason.clone());
                }
                updated.escalated = Some(stamp.clone());
            }
        }
        updated
    }
}

/// The result of a successful transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The complaint after the transition.
    pub new_complaint: Complaint,
    /// The fields to persist.
    pub update: ComplaintUpdate,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of a student submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    /// The complaint to create.
    pub new_complaint: NewComplaint,
    /// The audit event, not yet scoped to a complaint id.
    pub audit_event: AuditEvent,
}

/// Converts a complaint to a snapshot for audit purposes.
#[must_use]
pub fn snapshot_of(
    status: ComplaintStatus,
    assigned_to: Role,
    chain: &EscalationChain,
) -> StateSnapshot {
    let chain_text: Vec<&str> = chain.roles().iter().map(Role::as_str).collect();
    StateSnapshot::new(format!(
        "status={},assigned_to={},chain={}",
        status.as_str(),
        assigned_to.as_str(),
        chain_text.join(">")
    ))
}

/// Snapshot of a stored complaint.
#[must_use]
pub fn complaint_snapshot(complaint: &Complaint) -> StateSnapshot {
    snapshot_of(
        complaint.status,
        complaint.assigned_to,
        &complaint.escalation_chain,
    )
}
