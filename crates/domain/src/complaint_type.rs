// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The category a student files a complaint under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintType {
    /// Hostel and mess facilities.
    Hostel,
    /// Academic matters.
    Academic,
    /// Examinations.
    Exam,
    /// Disciplinary issues.
    Disciplinary,
    /// Anything else.
    Other,
}

impl ComplaintType {
    /// All complaint types.
    pub const ALL: [Self; 5] = [
        Self::Hostel,
        Self::Academic,
        Self::Exam,
        Self::Disciplinary,
        Self::Other,
    ];

    /// Returns the stored token for this type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hostel => "hostel",
            Self::Academic => "academic",
            Self::Exam => "exam",
            Self::Disciplinary => "disciplinary",
            Self::Other => "other",
        }
    }

    /// Label shown to students and admins.
    #[must_use]
    pub const fn display_label(&self) -> &'static str {
        match self {
            Self::Hostel => "Hostel/Mess",
            Self::Academic => "Academic",
            Self::Exam => "Exam Related",
            Self::Disciplinary => "Disciplinary Issue",
            Self::Other => "Other",
        }
    }

    /// The authority a newly filed complaint of this type is assigned to.
    #[must_use]
    pub const fn initial_authority(&self) -> Role {
        match self {
            Self::Hostel => Role::Warden,
            Self::Academic => Role::Mentor,
            Self::Exam => Role::ExamCell,
            Self::Disciplinary => Role::Disciplinary,
            Self::Other => Role::Registrar,
        }
    }
}

impl FromStr for ComplaintType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalised)
            .ok_or_else(|| DomainError::InvalidComplaintType {
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for ComplaintType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
