// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Timestamps are RFC 3339 strings and complaint ids use the `CMPL-0001`
//! form, so responses can be rendered without knowing domain types.

use campus_complaints_audit::AuditEvent;
use campus_complaints_domain::{
    AdminDashboardStats, Complaint, DomainError, Residence, Role, Stamp, StudentDashboardStats,
    format_timestamp,
};

/// Where a submitting student lives.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResidenceRequest {
    /// Lives in a hostel house.
    Hosteller {
        house_name: String,
        #[serde(default)]
        room_number: Option<String>,
    },
    /// Lives off campus.
    DayScholar { address: String },
}

/// API request to file a complaint.
///
/// The student id comes from the caller's identity, not the body.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitComplaintRequest {
    /// The student's name.
    pub student_name: String,
    /// Enrollment number; stored upper-cased.
    pub enrollment_number: String,
    /// Hostel or day-scholar details.
    pub residence: ResidenceRequest,
    /// One of `hostel`, `academic`, `exam`, `disciplinary`, `other`.
    pub complaint_type: String,
    /// What went wrong.
    pub description: String,
}

/// API request to escalate a complaint.
///
/// Both fields are optional. Without a target the default ladder applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EscalateRequest {
    /// Free-text role label of the authority to escalate to.
    #[serde(default)]
    pub target_role: Option<String>,
    /// Why the complaint is being escalated.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Who performed a transition and when.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StampResponse {
    pub at: String,
    pub by_id: String,
    /// Role token, e.g. `registrar`.
    pub by_role: Role,
}

/// A complaint as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ComplaintResponse {
    /// Display id, e.g. `CMPL-0042`.
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub enrollment_number: String,
    /// `Hostel: House A, Room 101` or `Day Scholar: <address>`.
    pub residence: String,
    pub complaint_type: String,
    pub complaint_type_label: String,
    pub description: String,
    pub status: String,
    pub status_label: String,
    pub assigned_to: Role,
    pub assigned_to_label: String,
    pub escalation_chain: Vec<Role>,
    pub previous_authority: Option<Role>,
    pub escalation_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub resolved: Option<StampResponse>,
    pub escalated: Option<StampResponse>,
}

fn stamp_response(stamp: &Stamp) -> Result<StampResponse, DomainError> {
    Ok(StampResponse {
        at: format_timestamp(stamp.at)?,
        by_id: stamp.by.id.clone(),
        by_role: stamp.by.role,
    })
}

fn residence_text(residence: &Residence) -> String {
    match residence {
        Residence::Hosteller {
            house_name,
            room_number: Some(room),
        } => format!("Hostel: {house_name}, Room {room}"),
        Residence::Hosteller {
            house_name,
            room_number: None,
        } => format!("Hostel: {house_name}"),
        Residence::DayScholar { address } => format!("Day Scholar: {address}"),
    }
}

impl ComplaintResponse {
    /// Builds the response for a complaint.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimestamp` if a timestamp cannot be formatted.
    pub fn from_complaint(complaint: &Complaint) -> Result<Self, DomainError> {
        Ok(Self {
            id: complaint.id.to_string(),
            student_id: complaint.filer.student_id.clone(),
            student_name: complaint.filer.student_name.clone(),
            enrollment_number: complaint.filer.enrollment_number.clone(),
            residence: residence_text(&complaint.residence),
            complaint_type: complaint.complaint_type.as_str().to_string(),
            complaint_type_label: complaint.complaint_type.display_label().to_string(),
            description: complaint.description.clone(),
            status: complaint.status.as_str().to_string(),
            status_label: complaint.status.display_label().to_string(),
            assigned_to: complaint.assigned_to,
            assigned_to_label: complaint.assigned_to.display_name().to_string(),
            escalation_chain: complaint.escalation_chain.roles().to_vec(),
            previous_authority: complaint.previous_authority,
            escalation_reason: complaint.escalation_reason.clone(),
            created_at: format_timestamp(complaint.created_at)?,
            updated_at: format_timestamp(complaint.updated_at)?,
            resolved: complaint.resolved.as_ref().map(stamp_response).transpose()?,
            escalated: complaint.escalated.as_ref().map(stamp_response).transpose()?,
        })
    }
}

/// Response for a successful resolve or escalate.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransitionResponse {
    /// The complaint after the transition.
    pub complaint: ComplaintResponse,
    /// A success message.
    pub message: String,
}

/// A list of complaints, newest first.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ComplaintListResponse {
    pub complaints: Vec<ComplaintResponse>,
}

/// Admin dashboard counts.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AdminStatsResponse {
    /// The authority the counts were computed for.
    pub role: Role,
    #[serde(flatten)]
    pub stats: AdminDashboardStats,
    /// True if the store failed and the counts are placeholders.
    pub degraded: bool,
}

/// Student dashboard counts.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StudentStatsResponse {
    pub enrollment_number: String,
    #[serde(flatten)]
    pub stats: StudentDashboardStats,
    /// True if the store failed and the counts are placeholders.
    pub degraded: bool,
}

/// One entry in a complaint's history.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HistoryEntryResponse {
    pub action: String,
    pub details: Option<String>,
    pub actor_id: String,
    pub actor_type: String,
    pub before: String,
    pub after: String,
    pub recorded_at: String,
}

impl HistoryEntryResponse {
    /// Builds the response for an audit event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimestamp` if the timestamp cannot be formatted.
    pub fn from_event(event: &AuditEvent) -> Result<Self, DomainError> {
        Ok(Self {
            action: event.action.name.clone(),
            details: event.action.details.clone(),
            actor_id: event.actor.id.clone(),
            actor_type: event.actor.actor_type.clone(),
            before: event.before.data.clone(),
            after: event.after.data.clone(),
            recorded_at: format_timestamp(event.recorded_at)?,
        })
    }
}

/// A complaint's audit history, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HistoryResponse {
    pub complaint_id: String,
    pub entries: Vec<HistoryEntryResponse>,
}
