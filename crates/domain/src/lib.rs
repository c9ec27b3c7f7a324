// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod complaint;
mod complaint_type;
mod error;
mod role;
mod stats;
mod status;
mod submission;

#[cfg(test)]
mod tests;

pub use complaint::{
    ActingAdmin, Complaint, ComplaintId, EscalationChain, Filer, NewComplaint, Residence, Stamp,
    format_timestamp, parse_timestamp,
};
pub use complaint_type::ComplaintType;
pub use error::DomainError;
pub use role::Role;
pub use stats::{
    AdminDashboardStats, StudentDashboardStats, compute_admin_stats, compute_student_stats,
    is_awaiting_action,
};
pub use status::ComplaintStatus;
pub use submission::ComplaintSubmission;
