// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Administrative authorities and the escalation ladder.
//!
//! Roles are a closed set. Free-text labels coming from a session or an
//! admin profile are normalised through [`Role::from_label`]; anything that
//! does not normalise to one of the six authorities is rejected.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the six administrative authorities that can hold a complaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Hostel warden.
    #[serde(rename = "warden")]
    Warden,
    /// Academic mentor.
    #[serde(rename = "mentor")]
    Mentor,
    /// Examination cell.
    #[serde(rename = "examcell")]
    ExamCell,
    /// Disciplinary committee.
    #[serde(rename = "disciplinary")]
    Disciplinary,
    /// Registrar.
    #[serde(rename = "registrar")]
    Registrar,
    /// Vice-chancellor. Terminal authority: cannot escalate further.
    #[serde(rename = "vc")]
    ViceChancellor,
}

impl Role {
    /// Every role, in ladder order.
    pub const ALL: [Self; 6] = [
        Self::Warden,
        Self::Mentor,
        Self::ExamCell,
        Self::Disciplinary,
        Self::Registrar,
        Self::ViceChancellor,
    ];

    /// Returns the canonical token stored in `assignedTo` and the chain.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Warden => "warden",
            Self::Mentor => "mentor",
            Self::ExamCell => "examcell",
            Self::Disciplinary => "disciplinary",
            Self::Registrar => "registrar",
            Self::ViceChancellor => "vc",
        }
    }

    /// Human-facing name of the authority.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Warden => "Warden",
            Self::Mentor => "Mentor",
            Self::ExamCell => "Exam Cell",
            Self::Disciplinary => "Disciplinary Committee",
            Self::Registrar => "Registrar",
            Self::ViceChancellor => "Vice Chancellor",
        }
    }

    /// Resolves a free-text role label to a canonical role.
    ///
    /// Matching is case-insensitive and ignores whitespace, hyphens and
    /// underscores, so `"Exam Cell"`, `"exam-cell"` and `"EXAMCELL"` all
    /// resolve to [`Role::ExamCell`], and `"Vice Chancellor"` resolves to
    /// [`Role::ViceChancellor`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRole` if the label does not name one of
    /// the six authorities. There is no fallback role.
    pub fn from_label(label: &str) -> Result<Self, DomainError> {
        let compact: String = label
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match compact.as_str() {
            "warden" => Ok(Self::Warden),
            "mentor" => Ok(Self::Mentor),
            "examcell" => Ok(Self::ExamCell),
            "disciplinary" | "disciplinarycommittee" => Ok(Self::Disciplinary),
            "registrar" => Ok(Self::Registrar),
            "vc" | "vicechancellor" => Ok(Self::ViceChancellor),
            _ => Err(DomainError::InvalidRole {
                label: label.to_string(),
            }),
        }
    }

    /// The authority a complaint moves to when escalated without an
    /// explicit target.
    ///
    /// Returns `None` for the vice-chancellor, who is terminal.
    #[must_use]
    pub const fn default_escalation_target(&self) -> Option<Self> {
        match self {
            Self::Warden | Self::Mentor | Self::ExamCell | Self::Disciplinary => {
                Some(Self::Registrar)
            }
            Self::Registrar => Some(Self::ViceChancellor),
            Self::ViceChancellor => None,
        }
    }

    /// Returns true if no escalation is accepted from this role.
    #[must_use]
    pub const fn is_terminal_authority(&self) -> bool {
        matches!(self, Self::ViceChancellor)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    /// Strict parse of a canonical token, as stored by the persistence layer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| DomainError::InvalidRole {
                label: s.to_string(),
            })
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
