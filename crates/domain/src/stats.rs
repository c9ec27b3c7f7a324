// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dashboard statistics.
//!
//! Statistics are **computed**, not stored. They are a pure function of
//! the complaints passed in and play no part in the lifecycle.

use crate::complaint::Complaint;
use crate::role::Role;
use crate::status::ComplaintStatus;
use serde::{Deserialize, Serialize};

/// Counts shown on an admin's dashboard.
///
/// `pending` counts every open complaint currently assigned to the role,
/// including complaints escalated *to* it, so a complaint can be counted in
/// both `pending` and `escalated`. The overlap is a display convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminDashboardStats {
    /// Complaints visible to the role.
    pub total: usize,
    /// Open complaints awaiting this role's action.
    pub pending: usize,
    /// Visible complaints that have been resolved.
    pub resolved: usize,
    /// Visible complaints currently in the escalated state.
    pub escalated: usize,
}

/// Counts shown on a student's dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDashboardStats {
    pub total: usize,
    /// Anything not yet resolved.
    pub pending: usize,
    pub resolved: usize,
}

/// Returns true if the complaint is open and waiting on `role`.
#[must_use]
pub fn is_awaiting_action(complaint: &Complaint, role: Role) -> bool {
    complaint.assigned_to == role && complaint.status.is_open()
}

/// Computes admin statistics over the complaints visible to `role`.
///
/// Complaints not visible to the role are ignored, so callers may pass an
/// unfiltered slice.
#[must_use]
pub fn compute_admin_stats(complaints: &[Complaint], role: Role) -> AdminDashboardStats {
    complaints
        .iter()
        .filter(|c| c.is_visible_to(role))
        .fold(AdminDashboardStats::default(), |mut stats, c| {
            stats.total += 1;
            if is_awaiting_action(c, role) {
                stats.pending += 1;
            }
            match c.status {
                ComplaintStatus::Resolved => stats.resolved += 1,
                ComplaintStatus::Escalated => stats.escalated += 1,
                ComplaintStatus::Pending | ComplaintStatus::InProgress => {}
            }
            stats
        })
}

/// Computes a student's statistics over their own complaints.
#[must_use]
pub fn compute_student_stats(complaints: &[Complaint]) -> StudentDashboardStats {
    let resolved: usize = complaints
        .iter()
        .filter(|c| c.status == ComplaintStatus::Resolved)
        .count();
    StudentDashboardStats {
        total: complaints.len(),
        pending: complaints.len() - resolved,
        resolved,
    }
}
