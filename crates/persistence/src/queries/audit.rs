// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use campus_complaints_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use campus_complaints_domain::{ComplaintId, parse_timestamp};
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{ActionData, ActorData, AuditEventRow, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

fn event_from_row(row: AuditEventRow) -> Result<AuditEvent, PersistenceError> {
    let actor_data: ActorData = serde_json::from_str(&row.actor_json)?;
    let cause_data: CauseData = serde_json::from_str(&row.cause_json)?;
    let action_data: ActionData = serde_json::from_str(&row.action_json)?;
    let before_data: StateSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
    let after_data: StateSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;
    let recorded_at = parse_timestamp(&row.recorded_at).map_err(|e| {
        PersistenceError::SerializationError(format!("audit event {}: {e}", row.event_id))
    })?;

    Ok(AuditEvent::new(
        Some(ComplaintId::new(row.complaint_id)),
        Actor::new(actor_data.id, actor_data.actor_type),
        Cause::new(cause_data.id, cause_data.description),
        Action::new(action_data.name, action_data.details),
        StateSnapshot::new(before_data.data),
        StateSnapshot::new(after_data.data),
        recorded_at,
    ))
}

/// Retrieves the audit events for a complaint, oldest first.
///
/// Returns an empty list for an unknown complaint; the caller decides
/// whether that is an error.
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be deserialized.
pub fn get_complaint_history(
    conn: &mut SqliteConnection,
    complaint_id: ComplaintId,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::complaint_id.eq(complaint_id.value()))
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load::<AuditEventRow>(conn)?;

    rows.into_iter().map(event_from_row).collect()
}
