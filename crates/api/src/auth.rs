// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Turning a session into an acting authority, and view checks.

use campus_complaints_domain::{ActingAdmin, Complaint, Role};
use tracing::warn;

use crate::error::ApiError;
use crate::session::SessionProvider;

/// Resolves the session into the admin acting and the authority they act as.
///
/// The role label is normalised through [`Role::from_label`]. There is no
/// fallback authority: an unrecognised label is rejected.
///
/// # Errors
///
/// Returns `ApiError::Unauthenticated` if the session has no actor id or
/// role, or `ApiError::InvalidRole` if the role label is not recognised.
pub fn authenticate_admin<P: SessionProvider + ?Sized>(
    session: &P,
) -> Result<ActingAdmin, ApiError> {
    let actor_id: String = session
        .current_actor_id()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::Unauthenticated {
            reason: String::from("no actor id in session"),
        })?;
    let label: String = session
        .current_role()
        .filter(|label| !label.trim().is_empty())
        .ok_or_else(|| ApiError::Unauthenticated {
            reason: String::from("no role in session"),
        })?;

    let role: Role = Role::from_label(&label).map_err(|_| {
        warn!(actor_id = %actor_id, label = %label, "Rejected unrecognised role label");
        ApiError::InvalidRole { label }
    })?;

    Ok(ActingAdmin::new(actor_id, role))
}

/// Checks that the admin's authority may see the complaint.
///
/// # Errors
///
/// Returns `ApiError::NotVisible` if the authority is neither the assignee
/// nor in the escalation chain.
pub fn authorize_view(complaint: &Complaint, admin: &ActingAdmin) -> Result<(), ApiError> {
    if complaint.is_visible_to(admin.role) {
        return Ok(());
    }
    Err(ApiError::NotVisible {
        complaint_id: complaint.id.to_string(),
        role: admin.role.display_name().to_string(),
    })
}
