// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use campus_complaints_domain::{ActingAdmin, ComplaintId, Filer};
use time::OffsetDateTime;

#[cfg(test)]
mod tests;

/// Represents the entity performing an action.
///
/// An actor is either a student filing a complaint or an admin acting
/// under one of the six authorities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor: `"student"` or a role token such as `"registrar"`.
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// The actor for a student submission.
    #[must_use]
    pub fn student(filer: &Filer) -> Self {
        Self::new(filer.student_id.clone(), String::from("student"))
    }

    /// The actor for an admin transition, typed by the authority acted under.
    #[must_use]
    pub fn admin(admin: &ActingAdmin) -> Self {
        Self::new(admin.id.clone(), admin.role.as_str().to_string())
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`SubmitComplaint`", "`EscalateComplaint`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// The lifecycle-relevant fields of a complaint at a point in time.
///
/// Snapshots are compact `key=value` strings, e.g.
/// `status=escalated,assigned_to=registrar,chain=warden>registrar`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// A string representation of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// The snapshot recorded as "before" a complaint exists.
    #[must_use]
    pub fn absent() -> Self {
        Self::new(String::from("none"))
    }
}

/// An immutable audit event representing a complaint transition.
///
/// Every successful state change produces exactly one audit event, stored
/// in the same transaction as the change itself. An event captures:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The state before and after the transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The complaint this event belongs to. `None` until a newly submitted
    /// complaint has been assigned an id by the store.
    pub complaint_id: Option<ComplaintId>,
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
    /// When the transition happened.
    pub recorded_at: OffsetDateTime,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `complaint_id` - The complaint, if it already has an id
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    /// * `recorded_at` - When the transition happened
    #[must_use]
    pub const fn new(
        complaint_id: Option<ComplaintId>,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        recorded_at: OffsetDateTime,
    ) -> Self {
        Self {
            complaint_id,
            actor,
            cause,
            action,
            before,
            after,
            recorded_at,
        }
    }

    /// Returns a copy scoped to the given complaint.
    #[must_use]
    pub fn for_complaint(mut self, complaint_id: ComplaintId) -> Self {
        self.complaint_id = Some(complaint_id);
        self
    }
}
