// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campus_complaints_domain::{ActingAdmin, ComplaintType, Role};

use crate::{ApiError, SessionProvider, StaticSession, authenticate_admin};

/// A session provider backed by a profile lookup, as a host app might have.
struct ProfileSession {
    profile_role: &'static str,
}

impl SessionProvider for ProfileSession {
    fn current_role(&self) -> Option<String> {
        Some(self.profile_role.to_string())
    }

    fn current_actor_id(&self) -> Option<String> {
        Some(String::from("uid-77"))
    }
}

#[test]
fn test_authenticate_normalises_role_labels() {
    for (label, expected) in [
        ("Warden", Role::Warden),
        ("Exam Cell", Role::ExamCell),
        ("exam-cell", Role::ExamCell),
        ("Disciplinary Committee", Role::Disciplinary),
        ("Vice Chancellor", Role::ViceChancellor),
        ("VC", Role::ViceChancellor),
    ] {
        let admin: ActingAdmin = authenticate_admin(&StaticSession::new("a-1", label)).unwrap();
        assert_eq!(admin.role, expected, "label {label}");
        assert_eq!(admin.id, "a-1");
    }
}

#[test]
fn test_authenticate_accepts_any_session_provider() {
    let admin: ActingAdmin = authenticate_admin(&ProfileSession {
        profile_role: "Registrar",
    })
    .unwrap();
    assert_eq!(admin, ActingAdmin::new(String::from("uid-77"), Role::Registrar));
}

#[test]
fn test_authenticate_has_no_fallback_role() {
    let err: ApiError = authenticate_admin(&StaticSession::new("a-1", "Principal")).unwrap_err();
    assert_eq!(
        err,
        ApiError::InvalidRole {
            label: String::from("Principal")
        }
    );
}

#[test]
fn test_authenticate_requires_actor_and_role() {
    let no_actor = StaticSession::from_parts(None, Some(String::from("warden")));
    let blank_actor =
        StaticSession::from_parts(Some(String::from("  ")), Some(String::from("warden")));
    let no_role = StaticSession::from_parts(Some(String::from("a-1")), None);
    let blank_role =
        StaticSession::from_parts(Some(String::from("a-1")), Some(String::from(" \t ")));

    for session in [
        no_actor,
        blank_actor,
        no_role,
        blank_role,
        StaticSession::anonymous(),
    ] {
        assert!(matches!(
            authenticate_admin(&session).unwrap_err(),
            ApiError::Unauthenticated { .. }
        ));
    }
}

#[test]
fn test_display_names_authenticate_as_their_role() {
    for complaint_type in ComplaintType::ALL {
        let admin: ActingAdmin = authenticate_admin(&StaticSession::new(
            "a-1",
            complaint_type.initial_authority().display_name(),
        ))
        .unwrap();
        assert_eq!(admin.role, complaint_type.initial_authority());
    }
}
