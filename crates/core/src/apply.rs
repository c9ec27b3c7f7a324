// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{
    ComplaintUpdate, LifecycleChange, PriorState, SubmissionResult, TransitionResult,
    complaint_snapshot, snapshot_of,
};
use campus_complaints_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use campus_complaints_domain::{
    ActingAdmin, Complaint, ComplaintStatus, ComplaintSubmission, EscalationChain, NewComplaint,
    Role, Stamp,
};
use time::OffsetDateTime;

/// Turns a validated student submission into a new complaint and its audit event.
///
/// The complaint starts `pending`, assigned to the initial authority for
/// its type, with an empty escalation chain.
///
/// # Arguments
///
/// * `submission` - The validated submission
/// * `cause` - The cause or reason for this action
/// * `now` - The submission time
#[must_use]
pub fn submit(
    submission: ComplaintSubmission,
    cause: Cause,
    now: OffsetDateTime,
) -> SubmissionResult {
    let actor: Actor = Actor::student(submission.filer());
    let new_complaint: NewComplaint = submission.into_new_complaint(now);

    let after: StateSnapshot = snapshot_of(
        new_complaint.status,
        new_complaint.assigned_to,
        &EscalationChain::new(),
    );
    let action: Action = Action::new(
        String::from("SubmitComplaint"),
        Some(format!(
            "{} complaint filed by {}, assigned to {}",
            new_complaint.complaint_type.display_label(),
            new_complaint.filer.enrollment_number,
            new_complaint.assigned_to.display_name()
        )),
    );

    let audit_event: AuditEvent = AuditEvent::new(
        None,
        actor,
        cause,
        action,
        StateSnapshot::absent(),
        after,
        now,
    );

    SubmissionResult {
        new_complaint,
        audit_event,
    }
}

/// Applies an admin command to a complaint, producing the updated complaint,
/// the fields to persist, and an audit event.
///
/// This function is pure. On error nothing changes and no event is produced.
/// Checks run in a fixed order: terminal state, terminal authority (escalate
/// only), assignment, then target resolution (escalate only).
///
/// # Arguments
///
/// * `complaint` - The complaint as currently stored
/// * `command` - The command to apply
/// * `admin` - The admin acting, with their resolved authority
/// * `cause` - The cause or reason for this action
/// * `now` - The transition time
///
/// # Errors
///
/// Returns an error if:
/// - The complaint is already resolved (`AlreadyTerminal`)
/// - Escalation is attempted while the vice-chancellor holds it (`TerminalAuthority`)
/// - The admin's authority is not the current assignee (`NotAssigned`)
/// - An explicit escalation target is unknown or is the current assignee (`InvalidTarget`)
pub fn apply(
    complaint: &Complaint,
    command: Command,
    admin: &ActingAdmin,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    if complaint.status.is_terminal() {
        return Err(CoreError::AlreadyTerminal {
            complaint_id: complaint.id,
        });
    }

    // updated_at never moves backwards, even with a skewed caller clock
    let at: OffsetDateTime = now.max(complaint.updated_at);
    let stamp: Stamp = Stamp {
        at,
        by: admin.clone(),
    };
    let action_name: &'static str = command.action_name();

    let (update, details): (ComplaintUpdate, String) = match command {
        Command::Resolve => {
            require_assignee(complaint, admin)?;
            let details: String = format!(
                "Resolved by {} ({})",
                admin.role.display_name(),
                admin.id
            );
            (
                ComplaintUpdate {
                    expected: PriorState::of(complaint),
                    status: ComplaintStatus::Resolved,
                    updated_at: at,
                    change: LifecycleChange::Resolved(stamp),
                },
                details,
            )
        }
        Command::Escalate { target, reason } => {
            if complaint.assigned_to.is_terminal_authority() {
                return Err(CoreError::TerminalAuthority {
                    complaint_id: complaint.id,
                });
            }
            require_assignee(complaint, admin)?;

            let next: Role = resolve_next_authority(complaint.assigned_to, target.as_deref())?;
            let reason: Option<String> = reason
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty());

            let mut escalation_chain: EscalationChain = complaint.escalation_chain.clone();
            escalation_chain.push(complaint.assigned_to);
            escalation_chain.push(next);

            let details: String = reason.as_ref().map_or_else(
                || {
                    format!(
                        "Escalated from {} to {}",
                        complaint.assigned_to.display_name(),
                        next.display_name()
                    )
                },
                |r| {
                    format!(
                        "Escalated from {} to {}: {r}",
                        complaint.assigned_to.display_name(),
                        next.display_name()
                    )
                },
            );
            (
                ComplaintUpdate {
                    expected: PriorState::of(complaint),
                    status: ComplaintStatus::Escalated,
                    updated_at: at,
                    change: LifecycleChange::Escalated {
                        assigned_to: next,
                        previous_authority: complaint.assigned_to,
                        escalation_chain,
                        reason,
                        stamp,
                    },
                },
                details,
            )
        }
    };

    let new_complaint: Complaint = update.apply_to(complaint);
    new_complaint.validate_invariants()?;

    let audit_event: AuditEvent = AuditEvent::new(
        Some(complaint.id),
        Actor::admin(admin),
        cause,
        Action::new(action_name.to_string(), Some(details)),
        complaint_snapshot(complaint),
        complaint_snapshot(&new_complaint),
        at,
    );

    Ok(TransitionResult {
        new_complaint,
        update,
        audit_event,
    })
}

/// Resolves the authority an escalation moves to.
///
/// An explicit target label wins over the default ladder. The target must
/// name a known role other than `current`.
///
/// # Errors
///
/// Returns `CoreError::InvalidTarget` if the label is unknown, names the
/// current assignee, or no default exists for `current`.
pub fn resolve_next_authority(current: Role, target: Option<&str>) -> Result<Role, CoreError> {
    let Some(label) = target.map(str::trim).filter(|t| !t.is_empty()) else {
        return current
            .default_escalation_target()
            .ok_or_else(|| CoreError::InvalidTarget {
                target: current.as_str().to_string(),
                reason: String::from("no higher authority exists"),
            });
    };

    let role: Role = Role::from_label(label).map_err(|_| CoreError::InvalidTarget {
        target: label.to_string(),
        reason: String::from("not a recognised authority"),
    })?;
    if role == current {
        return Err(CoreError::InvalidTarget {
            target: label.to_string(),
            reason: format!("complaint is already assigned to {}", current.display_name()),
        });
    }
    Ok(role)
}

fn require_assignee(complaint: &Complaint, admin: &ActingAdmin) -> Result<(), CoreError> {
    if complaint.assigned_to != admin.role {
        return Err(CoreError::NotAssigned {
            complaint_id: complaint.id,
            acting: admin.role,
            assigned_to: complaint.assigned_to,
        });
    }
    Ok(())
}
