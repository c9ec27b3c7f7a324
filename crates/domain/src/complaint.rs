// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The complaint record and its component types.

use crate::complaint_type::ComplaintType;
use crate::error::DomainError;
use crate::role::Role;
use crate::status::ComplaintStatus;
use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Store-assigned identifier of a complaint.
///
/// Rendered as `CMPL-0042`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComplaintId(i64);

impl ComplaintId {
    const PREFIX: &'static str = "CMPL-";

    /// Wraps a raw store identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw store identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:04}", Self::PREFIX, self.0)
    }
}

impl FromStr for ComplaintId {
    type Err = DomainError;

    /// Accepts `CMPL-0042`, `cmpl-42`, or a bare `42`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: &str = s.trim();
        let digits: &str = trimmed
            .get(..Self::PREFIX.len())
            .filter(|head| head.eq_ignore_ascii_case(Self::PREFIX))
            .map_or(trimmed, |_| &trimmed[Self::PREFIX.len()..]);

        match digits.parse::<i64>() {
            Ok(value) if value > 0 => Ok(Self(value)),
            _ => Err(DomainError::InvalidComplaintId {
                value: s.to_string(),
            }),
        }
    }
}

/// The student who filed a complaint. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filer {
    /// Identity of the student account.
    pub student_id: String,
    /// The student's name.
    pub student_name: String,
    /// Enrollment number, stored upper-cased.
    pub enrollment_number: String,
}

impl Filer {
    /// Builds a filer, trimming fields and upper-casing the enrollment number.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyField` if any field is blank.
    pub fn new(
        student_id: &str,
        student_name: &str,
        enrollment_number: &str,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            student_id: require("student_id", student_id)?,
            student_name: require("student_name", student_name)?,
            enrollment_number: require("enrollment_number", enrollment_number)?.to_uppercase(),
        })
    }
}

/// Where the student lives, used as contact context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Residence {
    /// Lives in a college hostel.
    Hosteller {
        /// Name of the hostel house.
        house_name: String,
        /// Room number, if given.
        room_number: Option<String>,
    },
    /// Lives off campus.
    DayScholar {
        /// Postal address.
        address: String,
    },
}

impl Residence {
    /// Builds a hosteller residence.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyField` if the house name is blank.
    pub fn hosteller(house_name: &str, room_number: Option<&str>) -> Result<Self, DomainError> {
        Ok(Self::Hosteller {
            house_name: require("house_name", house_name)?,
            room_number: optional(room_number),
        })
    }

    /// Builds a day-scholar residence.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyField` if the address is blank.
    pub fn day_scholar(address: &str) -> Result<Self, DomainError> {
        Ok(Self::DayScholar {
            address: require("address", address)?,
        })
    }
}

/// An admin acting under one of the six authorities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActingAdmin {
    /// The admin's account identifier.
    pub id: String,
    /// The authority the admin acts as.
    pub role: Role,
}

impl ActingAdmin {
    /// Creates a new acting admin.
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }
}

/// Who performed a transition and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    /// When the transition happened.
    pub at: OffsetDateTime,
    /// Who performed it.
    pub by: ActingAdmin,
}

/// Ordered roles that have held responsibility for a complaint, earliest first.
///
/// Append-only. Never holds the same role twice in a row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EscalationChain(Vec<Role>);

impl EscalationChain {
    /// Creates an empty chain.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds a chain from stored entries.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvariantViolation` if two consecutive entries
    /// are the same role.
    pub fn from_roles(roles: Vec<Role>) -> Result<Self, DomainError> {
        if let Some(pair) = roles.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(DomainError::InvariantViolation {
                reason: format!("escalation chain repeats '{}' consecutively", pair[0]),
            });
        }
        Ok(Self(roles))
    }

    /// Appends a role unless it is already the last entry.
    pub fn push(&mut self, role: Role) {
        if self.last() != Some(role) {
            self.0.push(role);
        }
    }

    /// The most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<Role> {
        self.0.last().copied()
    }

    /// Returns true if the role appears anywhere in the chain.
    #[must_use]
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// The entries, earliest first.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.0
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the complaint has never been escalated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A complaint that has been validated but not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComplaint {
    pub filer: Filer,
    pub residence: Residence,
    pub complaint_type: ComplaintType,
    pub description: String,
    pub status: ComplaintStatus,
    pub assigned_to: Role,
    pub created_at: OffsetDateTime,
}

impl NewComplaint {
    /// Attaches the store-assigned identifier.
    #[must_use]
    pub fn with_id(self, id: ComplaintId) -> Complaint {
        Complaint {
            id,
            filer: self.filer,
            residence: self.residence,
            complaint_type: self.complaint_type,
            description: self.description,
            status: self.status,
            assigned_to: self.assigned_to,
            escalation_chain: EscalationChain::new(),
            previous_authority: None,
            escalation_reason: None,
            created_at: self.created_at,
            updated_at: self.created_at,
            resolved: None,
            escalated: None,
        }
    }
}

/// A stored complaint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Complaint {
    pub id: ComplaintId,
    pub filer: Filer,
    pub residence: Residence,
    pub complaint_type: ComplaintType,
    pub description: String,
    pub status: ComplaintStatus,
    /// The authority currently responsible.
    pub assigned_to: Role,
    pub escalation_chain: EscalationChain,
    /// The authority that held the complaint before the latest escalation.
    pub previous_authority: Option<Role>,
    pub escalation_reason: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    /// Set once, on the transition into `resolved`.
    pub resolved: Option<Stamp>,
    /// Refreshed on every escalation.
    pub escalated: Option<Stamp>,
}

impl Complaint {
    /// Returns true if the role may list and act on this complaint: it is
    /// the current assignee or appears in the escalation chain.
    #[must_use]
    pub fn is_visible_to(&self, role: Role) -> bool {
        self.assigned_to == role || self.escalation_chain.contains(role)
    }

    /// Label-based visibility check.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRole` if the label does not resolve.
    pub fn is_visible_to_label(&self, label: &str) -> Result<bool, DomainError> {
        Ok(self.is_visible_to(Role::from_label(label)?))
    }

    /// Checks the record-level invariants.
    ///
    /// Used when a complaint is loaded from storage.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvariantViolation` describing the first
    /// violated invariant.
    pub fn validate_invariants(&self) -> Result<(), DomainError> {
        if self.updated_at < self.created_at {
            return Err(violation("updated_at precedes created_at"));
        }
        if self.description.trim().is_empty() {
            return Err(violation("description is empty"));
        }
        match (self.status, &self.resolved) {
            (ComplaintStatus::Resolved, None) => {
                return Err(violation("resolved complaint has no resolution stamp"));
            }
            (status, Some(_)) if status != ComplaintStatus::Resolved => {
                return Err(violation("unresolved complaint carries a resolution stamp"));
            }
            _ => {}
        }
        if self.status == ComplaintStatus::Escalated {
            if self.escalation_chain.last() != Some(self.assigned_to) {
                return Err(violation(
                    "escalated complaint's chain does not end with its assignee",
                ));
            }
            if self.escalated.is_none() {
                return Err(violation("escalated complaint has no escalation stamp"));
            }
        }
        Ok(())
    }
}

/// Formats a timestamp as RFC 3339 for storage and responses.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimestamp` if the value cannot be formatted.
pub fn format_timestamp(value: OffsetDateTime) -> Result<String, DomainError> {
    value
        .format(&Rfc3339)
        .map_err(|e| DomainError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Parses an RFC 3339 timestamp.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimestamp` if the text is not RFC 3339.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, DomainError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| DomainError::InvalidTimestamp {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn violation(reason: &str) -> DomainError {
    DomainError::InvariantViolation {
        reason: reason.to_string(),
    }
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<String, DomainError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}

pub(crate) fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}
