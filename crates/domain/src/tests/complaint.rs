// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    create_escalated_complaint, create_test_complaint, create_test_submission, test_now,
};
use crate::{
    ActingAdmin, ComplaintId, ComplaintStatus, ComplaintSubmission, ComplaintType, DomainError,
    EscalationChain, Filer, Residence, Role, Stamp, format_timestamp, parse_timestamp,
};
use time::Duration;

#[test]
fn test_complaint_id_display_and_parse() {
    let id = ComplaintId::new(42);
    assert_eq!(id.to_string(), "CMPL-0042");
    assert_eq!("CMPL-0042".parse::<ComplaintId>().unwrap(), id);
    assert_eq!("cmpl-42".parse::<ComplaintId>().unwrap(), id);
    assert_eq!("42".parse::<ComplaintId>().unwrap(), id);
    assert_eq!(ComplaintId::new(12345).to_string(), "CMPL-12345");
}

#[test]
fn test_complaint_id_rejects_garbage() {
    for value in ["", "CMPL-", "CMPL-abc", "0", "-3", "TICKET-4"] {
        assert!(
            matches!(
                value.parse::<ComplaintId>(),
                Err(DomainError::InvalidComplaintId { .. })
            ),
            "'{value}' should not parse"
        );
    }
}

#[test]
fn test_filer_trims_and_uppercases_enrollment() {
    let filer = Filer::new(" stu-1 ", " Rajesh Kumar ", "en-54321").unwrap();
    assert_eq!(filer.student_id, "stu-1");
    assert_eq!(filer.student_name, "Rajesh Kumar");
    assert_eq!(filer.enrollment_number, "EN-54321");
}

#[test]
fn test_filer_rejects_blank_fields() {
    let result = Filer::new("stu-1", "   ", "EN-1");
    assert_eq!(
        result.unwrap_err(),
        DomainError::EmptyField {
            field: "student_name"
        }
    );
}

#[test]
fn test_residence_variants() {
    let hosteller = Residence::hosteller("House B", Some("  ")).unwrap();
    assert_eq!(
        hosteller,
        Residence::Hosteller {
            house_name: String::from("House B"),
            room_number: None,
        }
    );
    assert!(Residence::day_scholar("").is_err());
    assert!(Residence::hosteller("", Some("12")).is_err());
}

#[test]
fn test_submission_requires_description() {
    let result = ComplaintSubmission::new(
        Filer::new("stu-1", "A Student", "EN-1").unwrap(),
        Residence::day_scholar("12 Lake Road").unwrap(),
        ComplaintType::Academic,
        "  \n ",
    );
    assert_eq!(
        result.unwrap_err(),
        DomainError::EmptyField {
            field: "complaint_description"
        }
    );
}

#[test]
fn test_new_complaint_is_pending_with_initial_authority() {
    let complaint = create_test_submission(ComplaintType::Exam)
        .into_new_complaint(test_now())
        .with_id(ComplaintId::new(1));

    assert_eq!(complaint.status, ComplaintStatus::Pending);
    assert_eq!(complaint.assigned_to, Role::ExamCell);
    assert!(complaint.escalation_chain.is_empty());
    assert_eq!(complaint.created_at, complaint.updated_at);
    assert!(complaint.validate_invariants().is_ok());
}

#[test]
fn test_chain_never_repeats_consecutively() {
    let mut chain = EscalationChain::new();
    chain.push(Role::Warden);
    chain.push(Role::Warden);
    chain.push(Role::Registrar);
    chain.push(Role::Warden);
    assert_eq!(chain.roles(), &[Role::Warden, Role::Registrar, Role::Warden]);
}

#[test]
fn test_chain_from_roles_rejects_consecutive_duplicates() {
    let result = EscalationChain::from_roles(vec![Role::Mentor, Role::Mentor]);
    assert!(matches!(
        result,
        Err(DomainError::InvariantViolation { .. })
    ));
    assert!(EscalationChain::from_roles(vec![Role::Mentor, Role::Registrar, Role::Mentor]).is_ok());
}

#[test]
fn test_visibility_for_assignee_and_chain_only() {
    let complaint = create_escalated_complaint(&[Role::Warden, Role::Registrar]);

    for role in Role::ALL {
        let expected = matches!(role, Role::Warden | Role::Registrar);
        assert_eq!(complaint.is_visible_to(role), expected, "role {role}");
    }
}

#[test]
fn test_visibility_before_any_escalation() {
    let complaint = create_test_complaint(ComplaintType::Exam);
    assert!(complaint.is_visible_to(Role::ExamCell));
    assert!(!complaint.is_visible_to(Role::Registrar));
}

#[test]
fn test_label_visibility_normalises() {
    let complaint = create_test_complaint(ComplaintType::Exam);
    assert!(complaint.is_visible_to_label("Exam Cell").unwrap());
    assert!(!complaint.is_visible_to_label("Registrar").unwrap());
    assert!(complaint.is_visible_to_label("Dean").is_err());
}

#[test]
fn test_invariants_catch_timestamp_regression() {
    let mut complaint = create_test_complaint(ComplaintType::Hostel);
    complaint.updated_at = complaint.created_at - Duration::seconds(1);
    assert!(complaint.validate_invariants().is_err());
}

#[test]
fn test_invariants_require_resolution_stamp() {
    let mut complaint = create_test_complaint(ComplaintType::Hostel);
    complaint.status = ComplaintStatus::Resolved;
    assert!(complaint.validate_invariants().is_err());

    complaint.resolved = Some(Stamp {
        at: test_now(),
        by: ActingAdmin::new(String::from("warden-1"), Role::Warden),
    });
    assert!(complaint.validate_invariants().is_ok());
}

#[test]
fn test_invariants_for_escalated_chain_tail() {
    let mut complaint = create_escalated_complaint(&[Role::Mentor, Role::Registrar]);
    assert!(complaint.validate_invariants().is_ok());

    complaint.assigned_to = Role::ViceChancellor;
    assert!(complaint.validate_invariants().is_err());
}

#[test]
fn test_timestamp_round_trip() {
    let text = format_timestamp(test_now()).unwrap();
    assert_eq!(text, "2026-03-02T09:30:00Z");
    assert_eq!(parse_timestamp(&text).unwrap(), test_now());
    assert!(parse_timestamp("yesterday").is_err());
}
