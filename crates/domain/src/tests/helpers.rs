// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ActingAdmin, Complaint, ComplaintId, ComplaintStatus, ComplaintSubmission, ComplaintType,
    Filer, Residence, Role, Stamp,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-02 09:30:00 UTC)
}

pub fn create_test_submission(complaint_type: ComplaintType) -> ComplaintSubmission {
    ComplaintSubmission::new(
        Filer::new("stu-001", "Priya Sharma", "en-98765").unwrap(),
        Residence::hosteller("House A", Some("101")).unwrap(),
        complaint_type,
        "Broken window in room",
    )
    .unwrap()
}

pub fn create_test_complaint(complaint_type: ComplaintType) -> Complaint {
    create_test_submission(complaint_type)
        .into_new_complaint(test_now())
        .with_id(ComplaintId::new(7))
}

/// Builds a complaint that has climbed the given chain and is now escalated
/// to its last entry.
pub fn create_escalated_complaint(chain: &[Role]) -> Complaint {
    let mut complaint = create_test_complaint(ComplaintType::Hostel);
    for role in chain {
        complaint.escalation_chain.push(*role);
    }
    let last = *chain.last().unwrap();
    complaint.previous_authority = chain.get(chain.len().wrapping_sub(2)).copied();
    complaint.assigned_to = last;
    complaint.status = ComplaintStatus::Escalated;
    complaint.escalated = Some(Stamp {
        at: test_now(),
        by: ActingAdmin::new(String::from("admin-1"), chain[0]),
    });
    complaint
}
