// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for complaint submission, transitions, and reads.
//!
//! Handlers are synchronous and generic over [`ComplaintStore`]. Each
//! mutating handler performs exactly one read-modify-write: load, apply the
//! pure lifecycle engine, then a single atomic `update`.

use std::str::FromStr;

use campus_complaints::{
    Command, ComplaintFilter, ComplaintStore, SubmissionResult, TransitionResult, apply, submit,
};
use campus_complaints_audit::{AuditEvent, Cause};
use campus_complaints_domain::{
    ActingAdmin, AdminDashboardStats, Complaint, ComplaintId, ComplaintStatus,
    ComplaintSubmission, ComplaintType, Filer, Residence, StudentDashboardStats,
    compute_admin_stats, compute_student_stats,
};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::auth::{authenticate_admin, authorize_view};
use crate::error::{ApiError, translate_core_error, translate_domain_error, translate_store_error};
use crate::request_response::{
    AdminStatsResponse, ComplaintListResponse, ComplaintResponse, EscalateRequest,
    HistoryEntryResponse, HistoryResponse, ResidenceRequest, StudentStatsResponse,
    SubmitComplaintRequest, TransitionResponse,
};
use crate::session::SessionProvider;

/// Statuses that still wait on the assignee.
const OPEN_STATUSES: [ComplaintStatus; 3] = [
    ComplaintStatus::Pending,
    ComplaintStatus::InProgress,
    ComplaintStatus::Escalated,
];

/// Parses a complaint id from a path segment.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the value is not a complaint id.
pub fn parse_complaint_id(value: &str) -> Result<ComplaintId, ApiError> {
    ComplaintId::from_str(value).map_err(translate_domain_error)
}

/// Parses a comma-separated status filter such as `pending,escalated`.
///
/// Returns `None` for an absent or blank filter.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if any entry is not a status.
pub fn parse_status_filter(value: Option<&str>) -> Result<Option<Vec<ComplaintStatus>>, ApiError> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| ComplaintStatus::from_str(s).map_err(translate_domain_error))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn to_response(complaint: &Complaint) -> Result<ComplaintResponse, ApiError> {
    ComplaintResponse::from_complaint(complaint).map_err(translate_domain_error)
}

fn to_list_response(complaints: &[Complaint]) -> Result<ComplaintListResponse, ApiError> {
    Ok(ComplaintListResponse {
        complaints: complaints
            .iter()
            .map(to_response)
            .collect::<Result<Vec<_>, _>>()?,
    })
}

fn build_submission(
    student_id: &str,
    request: &SubmitComplaintRequest,
) -> Result<ComplaintSubmission, ApiError> {
    let filer: Filer = Filer::new(
        student_id,
        &request.student_name,
        &request.enrollment_number,
    )
    .map_err(translate_domain_error)?;
    let residence: Residence = match &request.residence {
        ResidenceRequest::Hosteller {
            house_name,
            room_number,
        } => Residence::hosteller(house_name, room_number.as_deref()),
        ResidenceRequest::DayScholar { address } => Residence::day_scholar(address),
    }
    .map_err(translate_domain_error)?;
    let complaint_type: ComplaintType =
        ComplaintType::from_str(&request.complaint_type).map_err(translate_domain_error)?;

    ComplaintSubmission::new(filer, residence, complaint_type, &request.description)
        .map_err(translate_domain_error)
}

/// Files a new complaint on behalf of a student.
///
/// The complaint is stored `pending` and assigned to the initial authority
/// for its type.
///
/// # Arguments
///
/// * `store` - The complaint store
/// * `student_id` - Identity of the submitting student account
/// * `request` - The submission
/// * `cause` - The cause or reason for this action
/// * `now` - The submission time
///
/// # Errors
///
/// Returns an error if:
/// - The student id or a required field is blank, or the type is unknown
/// - The store write fails
pub fn submit_complaint<S: ComplaintStore + ?Sized>(
    store: &mut S,
    student_id: &str,
    request: &SubmitComplaintRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ComplaintResponse, ApiError> {
    let submission: ComplaintSubmission = build_submission(student_id, request)?;
    let SubmissionResult {
        new_complaint,
        audit_event,
    } = submit(submission, cause, now);

    let id: ComplaintId = store
        .create(&new_complaint, &audit_event)
        .map_err(translate_store_error)?;

    info!(
        complaint_id = %id,
        complaint_type = %new_complaint.complaint_type,
        assigned_to = %new_complaint.assigned_to,
        "Complaint submitted"
    );
    to_response(&new_complaint.with_id(id))
}

/// Loads a complaint the caller's authority may see.
///
/// # Errors
///
/// Returns an error if:
/// - The session is missing or carries an unknown role
/// - The complaint does not exist
/// - The complaint is not visible to the caller's authority
pub fn get_complaint<S, P>(
    store: &mut S,
    session: &P,
    id: ComplaintId,
) -> Result<ComplaintResponse, ApiError>
where
    S: ComplaintStore + ?Sized,
    P: SessionProvider + ?Sized,
{
    let admin: ActingAdmin = authenticate_admin(session)?;
    let complaint: Complaint = store.get(id).map_err(translate_store_error)?;
    authorize_view(&complaint, &admin)?;
    to_response(&complaint)
}

fn run_transition<S, P>(
    store: &mut S,
    session: &P,
    id: ComplaintId,
    command: Command,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, ApiError>
where
    S: ComplaintStore + ?Sized,
    P: SessionProvider + ?Sized,
{
    let admin: ActingAdmin = authenticate_admin(session)?;
    let complaint: Complaint = store.get(id).map_err(translate_store_error)?;
    let action: &'static str = command.action_name();

    let result: TransitionResult = apply(&complaint, command, &admin, cause, now).map_err(|e| {
        warn!(
            complaint_id = %id,
            action,
            acting = %admin.role,
            error = %e,
            "Transition rejected"
        );
        translate_core_error(e)
    })?;

    store
        .update(id, &result.update, &result.audit_event)
        .map_err(translate_store_error)?;

    info!(
        complaint_id = %id,
        action,
        actor_id = %admin.id,
        status = %result.new_complaint.status,
        assigned_to = %result.new_complaint.assigned_to,
        "Transition applied"
    );
    Ok(result)
}

/// Resolves a complaint held by the caller's authority.
///
/// # Errors
///
/// Returns an error if:
/// - The session is missing or carries an unknown role
/// - The complaint does not exist or is already resolved
/// - The caller's authority is not the assignee
/// - The store write fails; the complaint is then unchanged
pub fn resolve_complaint<S, P>(
    store: &mut S,
    session: &P,
    id: ComplaintId,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResponse, ApiError>
where
    S: ComplaintStore + ?Sized,
    P: SessionProvider + ?Sized,
{
    let result: TransitionResult =
        run_transition(store, session, id, Command::Resolve, cause, now)?;
    Ok(TransitionResponse {
        complaint: to_response(&result.new_complaint)?,
        message: format!("Complaint {id} resolved"),
    })
}

/// Escalates a complaint held by the caller's authority.
///
/// Without an explicit target the default ladder applies.
///
/// # Errors
///
/// Returns an error if:
/// - The session is missing or carries an unknown role
/// - The complaint does not exist or is already resolved
/// - The vice-chancellor holds the complaint
/// - The caller's authority is not the assignee
/// - The explicit target is unknown or is the current assignee
/// - The store write fails; the complaint is then unchanged
pub fn escalate_complaint<S, P>(
    store: &mut S,
    session: &P,
    id: ComplaintId,
    request: EscalateRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResponse, ApiError>
where
    S: ComplaintStore + ?Sized,
    P: SessionProvider + ?Sized,
{
    let command: Command = Command::Escalate {
        target: request.target_role,
        reason: request.reason,
    };
    let result: TransitionResult = run_transition(store, session, id, command, cause, now)?;
    Ok(TransitionResponse {
        message: format!(
            "Complaint {id} escalated to {}",
            result.new_complaint.assigned_to.display_name()
        ),
        complaint: to_response(&result.new_complaint)?,
    })
}

fn query_visible<S, P>(
    store: &mut S,
    session: &P,
    build: impl FnOnce(ComplaintFilter, &ActingAdmin) -> ComplaintFilter,
) -> Result<ComplaintListResponse, ApiError>
where
    S: ComplaintStore + ?Sized,
    P: SessionProvider + ?Sized,
{
    let admin: ActingAdmin = authenticate_admin(session)?;
    let filter: ComplaintFilter = build(ComplaintFilter::new().visible_to(admin.role), &admin);
    debug!(role = %admin.role, ?filter, "Listing complaints");
    let complaints: Vec<Complaint> = store.query(&filter).map_err(translate_store_error)?;
    to_list_response(&complaints)
}

/// Lists complaints visible to the caller's authority, newest first.
///
/// # Errors
///
/// Returns an error if the session is invalid or the store query fails.
pub fn list_role_queue<S, P>(
    store: &mut S,
    session: &P,
    statuses: Option<&[ComplaintStatus]>,
) -> Result<ComplaintListResponse, ApiError>
where
    S: ComplaintStore + ?Sized,
    P: SessionProvider + ?Sized,
{
    query_visible(store, session, |mut filter, _| {
        if let Some(statuses) = statuses {
            filter.statuses = Some(statuses.to_vec());
        }
        filter
    })
}

/// Lists open complaints waiting on the caller's authority.
///
/// # Errors
///
/// Returns an error if the session is invalid or the store query fails.
pub fn list_pending<S, P>(store: &mut S, session: &P) -> Result<ComplaintListResponse, ApiError>
where
    S: ComplaintStore + ?Sized,
    P: SessionProvider + ?Sized,
{
    query_visible(store, session, |filter, admin| {
        filter.assigned_to(admin.role).with_statuses(&OPEN_STATUSES)
    })
}

/// Lists resolved complaints visible to the caller's authority.
///
/// # Errors
///
/// Returns an error if the session is invalid or the store query fails.
pub fn list_resolved<S, P>(store: &mut S, session: &P) -> Result<ComplaintListResponse, ApiError>
where
    S: ComplaintStore + ?Sized,
    P: SessionProvider + ?Sized,
{
    list_role_queue(store, session, Some(&[ComplaintStatus::Resolved]))
}

/// Lists escalated complaints visible to the caller's authority.
///
/// # Errors
///
/// Returns an error if the session is invalid or the store query fails.
pub fn list_escalated<S, P>(store: &mut S, session: &P) -> Result<ComplaintListResponse, ApiError>
where
    S: ComplaintStore + ?Sized,
    P: SessionProvider + ?Sized,
{
    list_role_queue(store, session, Some(&[ComplaintStatus::Escalated]))
}

fn require_enrollment(enrollment_number: &str) -> Result<&str, ApiError> {
    let trimmed: &str = enrollment_number.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("enrollment_number"),
            message: String::from("Field 'enrollment_number' cannot be empty"),
        });
    }
    Ok(trimmed)
}

fn student_filter(student_id: &str, enrollment_number: &str) -> Result<ComplaintFilter, ApiError> {
    if student_id.trim().is_empty() {
        return Err(ApiError::Unauthenticated {
            reason: String::from("no student id"),
        });
    }
    Ok(ComplaintFilter::new()
        .enrollment_number(require_enrollment(enrollment_number)?)
        .filed_by(student_id))
}

/// Lists a student's complaints, newest first, optionally only the latest `limit`.
///
/// Only complaints filed by `student_id` under the enrollment number are
/// returned.
///
/// # Errors
///
/// Returns an error if the student id or enrollment number is blank, or
/// the query fails.
pub fn list_student_complaints<S: ComplaintStore + ?Sized>(
    store: &mut S,
    student_id: &str,
    enrollment_number: &str,
    limit: Option<usize>,
) -> Result<ComplaintListResponse, ApiError> {
    let mut filter: ComplaintFilter = student_filter(student_id, enrollment_number)?;
    if let Some(limit) = limit {
        filter = filter.limit(limit);
    }
    let complaints: Vec<Complaint> = store.query(&filter).map_err(translate_store_error)?;
    to_list_response(&complaints)
}

/// Dashboard counts for the caller's authority.
///
/// A store failure yields zeroed counts flagged `degraded`.
///
/// # Errors
///
/// Returns an error only if the session is invalid.
pub fn admin_stats<S, P>(store: &mut S, session: &P) -> Result<AdminStatsResponse, ApiError>
where
    S: ComplaintStore + ?Sized,
    P: SessionProvider + ?Sized,
{
    let admin: ActingAdmin = authenticate_admin(session)?;
    let filter: ComplaintFilter = ComplaintFilter::new().visible_to(admin.role);

    let (stats, degraded): (AdminDashboardStats, bool) = match store.query(&filter) {
        Ok(complaints) => (compute_admin_stats(&complaints, admin.role), false),
        Err(e) => {
            warn!(role = %admin.role, error = %e, "Admin statistics degraded");
            (AdminDashboardStats::default(), true)
        }
    };

    Ok(AdminStatsResponse {
        role: admin.role,
        stats,
        degraded,
    })
}

/// Dashboard counts for one student.
///
/// A store failure yields zeroed counts flagged `degraded`.
///
/// # Errors
///
/// Returns an error only if the student id or enrollment number is blank.
pub fn student_stats<S: ComplaintStore + ?Sized>(
    store: &mut S,
    student_id: &str,
    enrollment_number: &str,
) -> Result<StudentStatsResponse, ApiError> {
    let filter: ComplaintFilter = student_filter(student_id, enrollment_number)?;
    let enrollment_number: String = filter.enrollment_number.clone().unwrap_or_default();

    let (stats, degraded): (StudentDashboardStats, bool) = match store.query(&filter) {
        Ok(complaints) => (compute_student_stats(&complaints), false),
        Err(e) => {
            warn!(
                enrollment_number = %enrollment_number,
                error = %e,
                "Student statistics degraded"
            );
            (StudentDashboardStats::default(), true)
        }
    };

    Ok(StudentStatsResponse {
        enrollment_number,
        stats,
        degraded,
    })
}

/// Audit history of a complaint the caller's authority may see, oldest first.
///
/// # Errors
///
/// Returns an error if:
/// - The session is missing or carries an unknown role
/// - The complaint does not exist or is not visible to the caller
/// - The store query fails
pub fn complaint_history<S, P>(
    store: &mut S,
    session: &P,
    id: ComplaintId,
) -> Result<HistoryResponse, ApiError>
where
    S: ComplaintStore + ?Sized,
    P: SessionProvider + ?Sized,
{
    let admin: ActingAdmin = authenticate_admin(session)?;
    let complaint: Complaint = store.get(id).map_err(translate_store_error)?;
    authorize_view(&complaint, &admin)?;

    let events: Vec<AuditEvent> = store.history(id).map_err(translate_store_error)?;
    Ok(HistoryResponse {
        complaint_id: id.to_string(),
        entries: events
            .iter()
            .map(|e| HistoryEntryResponse::from_event(e).map_err(translate_domain_error))
            .collect::<Result<Vec<_>, _>>()?,
    })
}
