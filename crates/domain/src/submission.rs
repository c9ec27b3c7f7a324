// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::complaint::{Filer, NewComplaint, Residence, require};
use crate::complaint_type::ComplaintType;
use crate::error::DomainError;
use crate::status::ComplaintStatus;
use time::OffsetDateTime;

/// A validated student submission.
///
/// Construction trims and checks every field, so a value of this type can
/// always become a [`NewComplaint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintSubmission {
    filer: Filer,
    residence: Residence,
    complaint_type: ComplaintType,
    description: String,
}

impl ComplaintSubmission {
    /// Validates a submission.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyField` if the description is blank.
    pub fn new(
        filer: Filer,
        residence: Residence,
        complaint_type: ComplaintType,
        description: &str,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            filer,
            residence,
            complaint_type,
            description: require("complaint_description", description)?,
        })
    }

    #[must_use]
    pub const fn filer(&self) -> &Filer {
        &self.filer
    }

    #[must_use]
    pub const fn complaint_type(&self) -> ComplaintType {
        self.complaint_type
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Builds the pending complaint, assigned to the type's initial authority.
    #[must_use]
    pub fn into_new_complaint(self, now: OffsetDateTime) -> NewComplaint {
        NewComplaint {
            assigned_to: self.complaint_type.initial_authority(),
            filer: self.filer,
            residence: self.residence,
            complaint_type: self.complaint_type,
            description: self.description,
            status: ComplaintStatus::Pending,
            created_at: now,
        }
    }
}
