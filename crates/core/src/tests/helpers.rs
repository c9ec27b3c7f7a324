// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, SubmissionResult, submit};
use campus_complaints_audit::Cause;
use campus_complaints_domain::{
    ActingAdmin, Complaint, ComplaintId, ComplaintSubmission, ComplaintType, Filer, Residence,
    Role,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-02 09:30:00 UTC)
}

pub fn later() -> OffsetDateTime {
    datetime!(2026-03-03 14:00:00 UTC)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Admin request"))
}

pub fn admin(role: Role) -> ActingAdmin {
    ActingAdmin::new(format!("{}-admin", role.as_str()), role)
}

pub fn escalate_default() -> Command {
    Command::Escalate {
        target: None,
        reason: None,
    }
}

pub fn escalate_to(target: &str) -> Command {
    Command::Escalate {
        target: Some(target.to_string()),
        reason: None,
    }
}

pub fn create_test_submission(complaint_type: ComplaintType) -> ComplaintSubmission {
    ComplaintSubmission::new(
        Filer::new("stu-001", "Priya Sharma", "EN-98765").unwrap(),
        Residence::hosteller("House A", Some("101")).unwrap(),
        complaint_type,
        "Water supply cut off since Monday",
    )
    .unwrap()
}

/// Submits a complaint and gives it a stored id.
pub fn create_test_complaint(complaint_type: ComplaintType) -> Complaint {
    let result: SubmissionResult = submit(
        create_test_submission(complaint_type),
        create_test_cause(),
        test_now(),
    );
    result.new_complaint.with_id(ComplaintId::new(1))
}
