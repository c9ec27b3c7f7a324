// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::Persistence;
use campus_complaints::{Command, ComplaintStore, SubmissionResult, TransitionResult, apply, submit};
use campus_complaints_audit::Cause;
use campus_complaints_domain::{
    ActingAdmin, Complaint, ComplaintId, ComplaintSubmission, ComplaintType, Filer, Residence,
    Role,
};
use time::{Duration, OffsetDateTime};
use time::macros::datetime;

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-02 09:30:00 UTC)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn admin(role: Role) -> ActingAdmin {
    ActingAdmin::new(format!("{}-admin", role.as_str()), role)
}

pub fn create_test_submission(
    enrollment_number: &str,
    complaint_type: ComplaintType,
) -> ComplaintSubmission {
    ComplaintSubmission::new(
        Filer::new("stu-001", "Priya Sharma", enrollment_number).unwrap(),
        Residence::hosteller("House A", Some("101")).unwrap(),
        complaint_type,
        "Water supply cut off since Monday",
    )
    .unwrap()
}

/// Submits and stores a complaint, `minutes` after the test epoch.
pub fn store_complaint(
    persistence: &mut Persistence,
    enrollment_number: &str,
    complaint_type: ComplaintType,
    minutes: i64,
) -> ComplaintId {
    let result: SubmissionResult = submit(
        create_test_submission(enrollment_number, complaint_type),
        create_test_cause(),
        test_now() + Duration::minutes(minutes),
    );
    persistence
        .create(&result.new_complaint, &result.audit_event)
        .unwrap()
}

/// Loads, applies, and stores a command as the current assignee.
pub fn transition(persistence: &mut Persistence, id: ComplaintId, command: Command) -> Complaint {
    let complaint: Complaint = persistence.get(id).unwrap();
    let result: TransitionResult = apply(
        &complaint,
        command,
        &admin(complaint.assigned_to),
        create_test_cause(),
        test_now() + Duration::hours(1),
    )
    .unwrap();
    persistence
        .update(id, &result.update, &result.audit_event)
        .unwrap();
    result.new_complaint
}

pub fn escalate_default() -> Command {
    Command::Escalate {
        target: None,
        reason: None,
    }
}
