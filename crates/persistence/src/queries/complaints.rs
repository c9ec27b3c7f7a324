// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Complaint queries.
//!
//! Rows are decoded strictly: an unknown role token, status, or type, or a
//! record that breaks a complaint invariant, is reported as corrupt rather
//! than patched up.

use campus_complaints::ComplaintFilter;
use campus_complaints_domain::{
    ActingAdmin, Complaint, ComplaintId, ComplaintStatus, ComplaintType, EscalationChain, Filer,
    Residence, Role, Stamp, parse_timestamp,
};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use std::str::FromStr;
use time::OffsetDateTime;
use tracing::debug;

use crate::data_models::ComplaintRow;
use crate::diesel_schema::complaints;
use crate::error::PersistenceError;

fn corrupt(id: i64, reason: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::CorruptRecord {
        id: Some(id),
        reason: reason.to_string(),
    }
}

fn parse_field<T>(id: i64, value: &str) -> Result<T, PersistenceError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    T::from_str(value).map_err(|e| corrupt(id, e))
}

fn parse_time(id: i64, value: &str) -> Result<OffsetDateTime, PersistenceError> {
    parse_timestamp(value).map_err(|e| corrupt(id, e))
}

fn parse_stamp(
    id: i64,
    at: Option<&str>,
    by_id: Option<&str>,
    by_role: Option<&str>,
) -> Result<Option<Stamp>, PersistenceError> {
    match (at, by_id, by_role) {
        (None, None, None) => Ok(None),
        (Some(at), Some(by_id), Some(by_role)) => Ok(Some(Stamp {
            at: parse_time(id, at)?,
            by: ActingAdmin::new(by_id.to_string(), parse_field(id, by_role)?),
        })),
        _ => Err(corrupt(id, "partially recorded transition stamp")),
    }
}

/// Decodes a complaint row into a validated complaint.
///
/// # Errors
///
/// Returns `PersistenceError::CorruptRecord` if any column fails to decode
/// or the decoded complaint violates an invariant.
pub fn complaint_from_row(row: ComplaintRow) -> Result<Complaint, PersistenceError> {
    let id: i64 = row.id;

    let filer: Filer = Filer::new(&row.student_id, &row.student_name, &row.enrollment_number)
        .map_err(|e| corrupt(id, e))?;
    let residence: Residence = match (&row.house_name, &row.address) {
        (Some(house_name), None) => Residence::hosteller(house_name, row.room_number.as_deref()),
        (None, Some(address)) => Residence::day_scholar(address),
        _ => return Err(corrupt(id, "residence must be exactly one of hostel or address")),
    }
    .map_err(|e| corrupt(id, e))?;

    let chain_roles: Vec<Role> =
        serde_json::from_str(&row.escalation_chain).map_err(|e| corrupt(id, e))?;
    let escalation_chain: EscalationChain =
        EscalationChain::from_roles(chain_roles).map_err(|e| corrupt(id, e))?;

    let previous_authority: Option<Role> = row
        .previous_authority
        .as_deref()
        .map(|token| parse_field(id, token))
        .transpose()?;

    let complaint: Complaint = Complaint {
        id: ComplaintId::new(id),
        filer,
        residence,
        complaint_type: parse_field::<ComplaintType>(id, &row.complaint_type)?,
        description: row.complaint_description,
        status: parse_field::<ComplaintStatus>(id, &row.status)?,
        assigned_to: parse_field::<Role>(id, &row.assigned_to)?,
        escalation_chain,
        previous_authority,
        escalation_reason: row.escalation_reason,
        created_at: parse_time(id, &row.created_at)?,
        updated_at: parse_time(id, &row.updated_at)?,
        resolved: parse_stamp(
            id,
            row.resolved_at.as_deref(),
            row.resolved_by_id.as_deref(),
            row.resolved_by_role.as_deref(),
        )?,
        escalated: parse_stamp(
            id,
            row.escalated_at.as_deref(),
            row.escalated_by_id.as_deref(),
            row.escalated_by_role.as_deref(),
        )?,
    };

    complaint
        .validate_invariants()
        .map_err(|e| corrupt(id, e))?;
    Ok(complaint)
}

/// Returns true if a complaint with this id exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn complaint_exists(
    conn: &mut SqliteConnection,
    id: ComplaintId,
) -> Result<bool, PersistenceError> {
    let count: i64 = complaints::table
        .filter(complaints::id.eq(id.value()))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Loads a single complaint.
///
/// # Errors
///
/// Returns `PersistenceError::ComplaintNotFound` if no row has this id, or
/// `PersistenceError::CorruptRecord` if the row cannot be decoded.
pub fn get_complaint(
    conn: &mut SqliteConnection,
    id: ComplaintId,
) -> Result<Complaint, PersistenceError> {
    let row: ComplaintRow = complaints::table
        .find(id.value())
        .select(ComplaintRow::as_select())
        .first::<ComplaintRow>(conn)
        .optional()?
        .ok_or(PersistenceError::ComplaintNotFound(id))?;

    complaint_from_row(row)
}

/// Lists complaints matching a filter, newest first.
///
/// Every filter term is pushed into SQL. The visibility term uses a text
/// match on the JSON chain, so results are re-checked with
/// [`ComplaintFilter::matches`] after decoding.
///
/// # Errors
///
/// Returns an error if the query fails or a matching row is corrupt.
pub fn query_complaints(
    conn: &mut SqliteConnection,
    filter: &ComplaintFilter,
) -> Result<Vec<Complaint>, PersistenceError> {
    let mut query = complaints::table
        .select(ComplaintRow::as_select())
        .into_boxed::<Sqlite>();

    if let Some(statuses) = &filter.statuses {
        let tokens: Vec<String> = statuses.iter().map(|s| s.as_str().to_string()).collect();
        query = query.filter(complaints::status.eq_any(tokens));
    }
    if let Some(role) = filter.assigned_to {
        query = query.filter(complaints::assigned_to.eq(role.as_str()));
    }
    if let Some(enrollment_number) = &filter.enrollment_number {
        query = query.filter(complaints::enrollment_number.eq(enrollment_number.clone()));
    }
    if let Some(student_id) = &filter.filed_by {
        query = query.filter(complaints::student_id.eq(student_id.clone()));
    }
    if let Some(role) = filter.visible_to {
        let chain_pattern: String = format!("%\"{}\"%", role.as_str());
        query = query.filter(
            complaints::assigned_to
                .eq(role.as_str())
                .or(complaints::escalation_chain.like(chain_pattern)),
        );
    }

    let rows: Vec<ComplaintRow> = query
        .order(complaints::id.desc())
        .load::<ComplaintRow>(conn)?;
    debug!(rows = rows.len(), ?filter, "Loaded complaint rows");

    let mut found: Vec<Complaint> = rows
        .into_iter()
        .map(complaint_from_row)
        .collect::<Result<Vec<Complaint>, PersistenceError>>()?;
    found.retain(|c| filter.matches(c));
    // Stable, so rows sharing a timestamp stay in id order
    found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    if let Some(limit) = filter.limit {
        found.truncate(limit);
    }

    Ok(found)
}
