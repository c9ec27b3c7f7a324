// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity supplied by whatever fronts the API.
//!
//! The API never reads ambient session state. Every admin operation takes
//! a [`SessionProvider`] argument and derives the acting authority from it.

/// Source of the caller's identity.
pub trait SessionProvider {
    /// The caller's role label as stored in their profile, e.g. `"Exam Cell"`.
    fn current_role(&self) -> Option<String>;

    /// The caller's account identifier.
    fn current_actor_id(&self) -> Option<String>;
}

/// A session fixed at construction, as built from request headers or in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSession {
    actor_id: Option<String>,
    role: Option<String>,
}

impl StaticSession {
    /// A session for the given admin and role label.
    #[must_use]
    pub fn new(actor_id: &str, role: &str) -> Self {
        Self {
            actor_id: Some(actor_id.to_string()),
            role: Some(role.to_string()),
        }
    }

    /// A session from optional parts, e.g. headers that may be missing.
    #[must_use]
    pub const fn from_parts(actor_id: Option<String>, role: Option<String>) -> Self {
        Self { actor_id, role }
    }

    /// A session with no identity.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl SessionProvider for StaticSession {
    fn current_role(&self) -> Option<String> {
        self.role.clone()
    }

    fn current_actor_id(&self) -> Option<String> {
        self.actor_id.clone()
    }
}
