// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use campus_complaints::{
    Command, ComplaintFilter, ComplaintStore, ComplaintUpdate, StoreError, TransitionResult, apply,
};
use campus_complaints_audit::{AuditEvent, Cause};
use campus_complaints_domain::{ActingAdmin, Complaint, ComplaintId, NewComplaint};
use campus_complaints_persistence::Persistence;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::{
    ComplaintResponse, EscalateRequest, ResidenceRequest, StaticSession, SubmitComplaintRequest,
    TransitionResponse, escalate_complaint, parse_complaint_id, resolve_complaint,
    submit_complaint,
};

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-02 09:30:00 UTC)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn create_test_store() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

/// A session for `label`, with an actor id derived from it.
pub fn session(label: &str) -> StaticSession {
    StaticSession::new(&format!("{}-admin", label.to_lowercase()), label)
}

pub fn create_test_request(
    enrollment_number: &str,
    complaint_type: &str,
) -> SubmitComplaintRequest {
    SubmitComplaintRequest {
        student_name: String::from("Priya Sharma"),
        enrollment_number: enrollment_number.to_string(),
        residence: ResidenceRequest::Hosteller {
            house_name: String::from("House A"),
            room_number: Some(String::from("101")),
        },
        complaint_type: complaint_type.to_string(),
        description: String::from("Water supply cut off since Monday"),
    }
}

/// Files a complaint `minutes` after the test epoch and returns its id.
pub fn file_complaint(
    store: &mut Persistence,
    enrollment_number: &str,
    complaint_type: &str,
    minutes: i64,
) -> ComplaintId {
    let response: ComplaintResponse = submit_complaint(
        store,
        "stu-001",
        &create_test_request(enrollment_number, complaint_type),
        create_test_cause(),
        test_now() + Duration::minutes(minutes),
    )
    .unwrap();
    parse_complaint_id(&response.id).unwrap()
}

pub fn escalate_as(
    store: &mut Persistence,
    label: &str,
    id: ComplaintId,
    target: Option<&str>,
) -> TransitionResponse {
    escalate_complaint(
        store,
        &session(label),
        id,
        EscalateRequest {
            target_role: target.map(str::to_string),
            reason: None,
        },
        create_test_cause(),
        test_now() + Duration::hours(1),
    )
    .unwrap()
}

pub fn resolve_as(store: &mut Persistence, label: &str, id: ComplaintId) -> TransitionResponse {
    resolve_complaint(
        store,
        &session(label),
        id,
        create_test_cause(),
        test_now() + Duration::hours(2),
    )
    .unwrap()
}

/// A store whose every call fails as if the database were down.
pub struct FailingStore;

impl FailingStore {
    fn down() -> StoreError {
        StoreError::Unavailable(String::from("database is down"))
    }
}

impl ComplaintStore for FailingStore {
    fn create(&mut self, _: &NewComplaint, _: &AuditEvent) -> Result<ComplaintId, StoreError> {
        Err(Self::down())
    }

    fn get(&mut self, _: ComplaintId) -> Result<Complaint, StoreError> {
        Err(Self::down())
    }

    fn update(
        &mut self,
        _: ComplaintId,
        _: &ComplaintUpdate,
        _: &AuditEvent,
    ) -> Result<(), StoreError> {
        Err(Self::down())
    }

    fn query(&mut self, _: &ComplaintFilter) -> Result<Vec<Complaint>, StoreError> {
        Err(Self::down())
    }

    fn history(&mut self, _: ComplaintId) -> Result<Vec<AuditEvent>, StoreError> {
        Err(Self::down())
    }
}

/// A store where another admin resolves the complaint right after the
/// first read, so the caller's write is computed from a stale row.
pub struct RacingStore {
    pub inner: Persistence,
    raced: bool,
}

impl RacingStore {
    pub const fn new(inner: Persistence) -> Self {
        Self {
            inner,
            raced: false,
        }
    }
}

impl ComplaintStore for RacingStore {
    fn create(
        &mut self,
        complaint: &NewComplaint,
        event: &AuditEvent,
    ) -> Result<ComplaintId, StoreError> {
        self.inner.create(complaint, event)
    }

    fn get(&mut self, id: ComplaintId) -> Result<Complaint, StoreError> {
        let complaint: Complaint = self.inner.get(id)?;
        if !self.raced {
            self.raced = true;
            let other: ActingAdmin =
                ActingAdmin::new(String::from("other-admin"), complaint.assigned_to);
            let result: TransitionResult = apply(
                &complaint,
                Command::Resolve,
                &other,
                create_test_cause(),
                test_now() + Duration::minutes(30),
            )
            .unwrap();
            self.inner
                .update(id, &result.update, &result.audit_event)
                .unwrap();
        }
        Ok(complaint)
    }

    fn update(
        &mut self,
        id: ComplaintId,
        update: &ComplaintUpdate,
        event: &AuditEvent,
    ) -> Result<(), StoreError> {
        self.inner.update(id, update, event)
    }

    fn query(&mut self, filter: &ComplaintFilter) -> Result<Vec<Complaint>, StoreError> {
        self.inner.query(filter)
    }

    fn history(&mut self, id: ComplaintId) -> Result<Vec<AuditEvent>, StoreError> {
        self.inner.history(id)
    }
}
