// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Complaint inserts and lifecycle updates.

use campus_complaints::{ComplaintUpdate, LifecycleChange};
use campus_complaints_domain::{ComplaintId, NewComplaint, Residence, Role, format_timestamp};
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::complaints;
use crate::error::PersistenceError;
use crate::queries::complaint_exists;

fn timestamp_text(value: OffsetDateTime) -> Result<String, PersistenceError> {
    format_timestamp(value).map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Serializes an escalation chain for the `escalation_chain` column.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn chain_json(roles: &[Role]) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(roles)?)
}

/// Inserts a newly submitted complaint and returns the id the database assigned.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `complaint` - The complaint to insert
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_complaint(
    conn: &mut SqliteConnection,
    complaint: &NewComplaint,
) -> Result<ComplaintId, PersistenceError> {
    let (house_name, room_number, address): (Option<&str>, Option<&str>, Option<&str>) =
        match &complaint.residence {
            Residence::Hosteller {
                house_name,
                room_number,
            } => (Some(house_name.as_str()), room_number.as_deref(), None),
            Residence::DayScholar { address } => (None, None, Some(address.as_str())),
        };
    let created_at: String = timestamp_text(complaint.created_at)?;

    diesel::insert_into(complaints::table)
        .values((
            complaints::student_id.eq(&complaint.filer.student_id),
            complaints::student_name.eq(&complaint.filer.student_name),
            complaints::enrollment_number.eq(&complaint.filer.enrollment_number),
            complaints::house_name.eq(house_name),
            complaints::room_number.eq(room_number),
            complaints::address.eq(address),
            complaints::complaint_type.eq(complaint.complaint_type.as_str()),
            complaints::complaint_description.eq(&complaint.description),
            complaints::status.eq(complaint.status.as_str()),
            complaints::assigned_to.eq(complaint.assigned_to.as_str()),
            complaints::escalation_chain.eq(chain_json(&[])?),
            complaints::created_at.eq(&created_at),
            complaints::updated_at.eq(&created_at),
        ))
        .execute(conn)?;

    let id: ComplaintId = ComplaintId::new(get_last_insert_rowid(conn)?);
    debug!(complaint_id = %id, assigned_to = %complaint.assigned_to, "Inserted complaint");
    Ok(id)
}

/// Writes the fields changed by a lifecycle transition.
///
/// The row is only written while its status, assignee, and chain still
/// match the state the transition was computed from. An escalation without
/// a reason leaves any earlier reason in place.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `id` - The complaint to update
/// * `update` - The changed fields
///
/// # Errors
///
/// Returns `PersistenceError::ComplaintNotFound` if no row has this id,
/// `PersistenceError::WriteConflict` if the row has moved on since it was
/// read, or a database error if the update fails.
pub fn apply_complaint_update(
    conn: &mut SqliteConnection,
    id: ComplaintId,
    update: &ComplaintUpdate,
) -> Result<(), PersistenceError> {
    let updated_at: String = timestamp_text(update.updated_at)?;
    let expected_chain: String = chain_json(update.expected.escalation_chain.roles())?;
    let target = complaints::table
        .filter(complaints::id.eq(id.value()))
        .filter(complaints::status.eq(update.expected.status.as_str()))
        .filter(complaints::assigned_to.eq(update.expected.assigned_to.as_str()))
        .filter(complaints::escalation_chain.eq(&expected_chain));

    let rows: usize = match &update.change {
        LifecycleChange::Resolved(stamp) => diesel::update(target)
            .set((
                complaints::status.eq(update.status.as_str()),
                complaints::updated_at.eq(&updated_at),
                complaints::resolved_at.eq(timestamp_text(stamp.at)?),
                complaints::resolved_by_id.eq(&stamp.by.id),
                complaints::resolved_by_role.eq(stamp.by.role.as_str()),
            ))
            .execute(conn)?,
        LifecycleChange::Escalated {
            assigned_to,
            previous_authority,
            escalation_chain,
            reason,
            stamp,
        } => {
            let rows: usize = diesel::update(target)
                .set((
                    complaints::status.eq(update.status.as_str()),
                    complaints::updated_at.eq(&updated_at),
                    complaints::assigned_to.eq(assigned_to.as_str()),
                    complaints::previous_authority.eq(previous_authority.as_str()),
                    complaints::escalation_chain.eq(chain_json(escalation_chain.roles())?),
                    complaints::escalated_at.eq(timestamp_text(stamp.at)?),
                    complaints::escalated_by_id.eq(&stamp.by.id),
                    complaints::escalated_by_role.eq(stamp.by.role.as_str()),
                ))
                .execute(conn)?;

            if let Some(reason) = reason.as_deref().filter(|_| rows > 0) {
                diesel::update(complaints::table.find(id.value()))
                    .set(complaints::escalation_reason.eq(reason))
                    .execute(conn)?;
            }
            rows
        }
    };

    if rows == 0 {
        if !complaint_exists(conn, id)? {
            return Err(PersistenceError::ComplaintNotFound(id));
        }
        return Err(PersistenceError::WriteConflict(format!(
            "complaint {id} is no longer {} with {}",
            update.expected.status.as_str(),
            update.expected.assigned_to.as_str()
        )));
    }

    debug!(complaint_id = %id, status = %update.status, "Updated complaint");
    Ok(())
}
