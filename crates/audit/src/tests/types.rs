// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use campus_complaints_domain::{ActingAdmin, ComplaintId, Filer, Role};
use time::macros::datetime;

fn create_test_event(complaint_id: Option<ComplaintId>) -> AuditEvent {
    AuditEvent::new(
        complaint_id,
        Actor::new(String::from("warden-1"), String::from("warden")),
        Cause::new(String::from("req-456"), String::from("Escalate request")),
        Action::new(String::from("EscalateComplaint"), None),
        StateSnapshot::new(String::from("status=pending,assigned_to=warden,chain=")),
        StateSnapshot::new(String::from(
            "status=escalated,assigned_to=registrar,chain=warden>registrar",
        )),
        datetime!(2026-03-02 10:00:00 UTC),
    )
}

#[test]
fn test_student_actor_uses_student_id() {
    let filer = Filer::new("stu-9", "A Student", "EN-9").unwrap();
    let actor = Actor::student(&filer);

    assert_eq!(actor.id, "stu-9");
    assert_eq!(actor.actor_type, "student");
}

#[test]
fn test_admin_actor_is_typed_by_role_token() {
    let admin = ActingAdmin::new(String::from("ec-1"), Role::ExamCell);
    let actor = Actor::admin(&admin);

    assert_eq!(actor.id, "ec-1");
    assert_eq!(actor.actor_type, "examcell");
}

#[test]
fn test_action_creation_with_details() {
    let action = Action::new(
        String::from("EscalateComplaint"),
        Some(String::from("warden -> registrar")),
    );

    assert_eq!(action.name, "EscalateComplaint");
    assert_eq!(action.details.as_deref(), Some("warden -> registrar"));
}

#[test]
fn test_absent_snapshot() {
    assert_eq!(StateSnapshot::absent().data, "none");
}

#[test]
fn test_event_can_be_scoped_after_creation() {
    let event = create_test_event(None);
    assert_eq!(event.complaint_id, None);

    let scoped = event.clone().for_complaint(ComplaintId::new(3));
    assert_eq!(scoped.complaint_id, Some(ComplaintId::new(3)));
    assert_eq!(scoped.action, event.action);
    assert_eq!(scoped.recorded_at, event.recorded_at);
}

#[test]
fn test_audit_event_equality() {
    let id = Some(ComplaintId::new(1));
    assert_eq!(create_test_event(id), create_test_event(id));
    assert_ne!(create_test_event(id), create_test_event(None));
}
