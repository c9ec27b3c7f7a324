// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The persistence contract the lifecycle engine is driven against.
//!
//! The engine never talks to a database itself. Callers load a complaint
//! through [`ComplaintStore::get`], apply a command, and write the resulting
//! [`ComplaintUpdate`] back with a single [`ComplaintStore::update`] call.
//! Implementations must apply that update and record its audit event
//! atomically. Concurrent writers resolve as last write wins.

use crate::state::ComplaintUpdate;
use campus_complaints_audit::AuditEvent;
use campus_complaints_domain::{Complaint, ComplaintId, ComplaintStatus, NewComplaint, Role};
use thiserror::Error;

/// Failures reported by a [`ComplaintStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No complaint with this id exists.
    #[error("Complaint {0} not found")]
    NotFound(ComplaintId),
    /// A concurrent write prevented this one from being applied.
    #[error("Write conflict: {0}")]
    Conflict(String),
    /// The store could not be reached or failed to execute the request.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    /// A stored record could not be turned back into a valid complaint.
    #[error("Stored complaint {id:?} is corrupt: {reason}")]
    Corrupt {
        id: Option<ComplaintId>,
        reason: String,
    },
}

/// Query filter for [`ComplaintStore::query`].
///
/// All set terms must match. Results are ordered newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintFilter {
    /// Status must be one of these.
    pub statuses: Option<Vec<ComplaintStatus>>,
    /// Current assignee must equal this role.
    pub assigned_to: Option<Role>,
    /// Filed under this enrollment number (compared upper-cased).
    pub enrollment_number: Option<String>,
    /// Filed by this student id.
    pub filed_by: Option<String>,
    /// Must be visible to this role (assignee or in the escalation chain).
    pub visible_to: Option<Role>,
    /// Return at most this many complaints.
    pub limit: Option<usize>,
}

impl ComplaintFilter {
    /// A filter that matches every complaint.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to a single status.
    #[must_use]
    pub fn with_status(self, status: ComplaintStatus) -> Self {
        self.with_statuses(&[status])
    }

    /// Restricts to a set of statuses.
    #[must_use]
    pub fn with_statuses(mut self, statuses: &[ComplaintStatus]) -> Self {
        self.statuses = Some(statuses.to_vec());
        self
    }

    /// Restricts to complaints currently assigned to `role`.
    #[must_use]
    pub const fn assigned_to(mut self, role: Role) -> Self {
        self.assigned_to = Some(role);
        self
    }

    /// Restricts to one student's complaints.
    #[must_use]
    pub fn enrollment_number(mut self, enrollment_number: &str) -> Self {
        self.enrollment_number = Some(enrollment_number.trim().to_uppercase());
        self
    }

    /// Restricts to complaints filed by one student id.
    #[must_use]
    pub fn filed_by(mut self, student_id: &str) -> Self {
        self.filed_by = Some(student_id.trim().to_string());
        self
    }

    /// Restricts to complaints `role` may see.
    #[must_use]
    pub const fn visible_to(mut self, role: Role) -> Self {
        self.visible_to = Some(role);
        self
    }

    /// Caps the number of results.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Reference semantics of the filter, excluding `limit`.
    ///
    /// Store implementations may push terms into their query language but
    /// must return exactly the complaints this predicate accepts.
    #[must_use]
    pub fn matches(&self, complaint: &Complaint) -> bool {
        self.statuses
            .as_ref()
            .is_none_or(|statuses| statuses.contains(&complaint.status))
            && self
                .assigned_to
                .is_none_or(|role| complaint.assigned_to == role)
            && self
                .enrollment_number
                .as_ref()
                .is_none_or(|en| complaint.filer.enrollment_number == *en)
            && self
                .filed_by
                .as_ref()
                .is_none_or(|id| complaint.filer.student_id == *id)
            && self
                .visible_to
                .is_none_or(|role| complaint.is_visible_to(role))
    }
}

/// Document-style storage of complaints and their audit history.
pub trait ComplaintStore {
    /// Stores a new complaint and its submission event; returns the assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the write fails.
    fn create(
        &mut self,
        complaint: &NewComplaint,
        event: &AuditEvent,
    ) -> Result<ComplaintId, StoreError>;

    /// Loads a complaint.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no such complaint exists.
    fn get(&mut self, id: ComplaintId) -> Result<Complaint, StoreError>;

    /// Applies a transition's fields and records its event in one atomic write.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the complaint vanished, or
    /// `StoreError::Conflict` / `StoreError::Unavailable` if the write failed.
    /// On error nothing is written.
    fn update(
        &mut self,
        id: ComplaintId,
        update: &ComplaintUpdate,
        event: &AuditEvent,
    ) -> Result<(), StoreError>;

    /// Lists complaints matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the query fails.
    fn query(&mut self, filter: &ComplaintFilter) -> Result<Vec<Complaint>, StoreError>;

    /// Audit events for a complaint, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no such complaint exists.
    fn history(&mut self, id: ComplaintId) -> Result<Vec<AuditEvent>, StoreError>;
}
