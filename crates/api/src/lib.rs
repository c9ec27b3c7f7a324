// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Campus Complaints system.
//!
//! Callers supply a [`ComplaintStore`](campus_complaints::ComplaintStore), a
//! [`SessionProvider`], a [`Cause`](campus_complaints_audit::Cause), and the
//! current time. Handlers authenticate the session, run the lifecycle
//! engine, persist the result, and return serializable responses. All
//! failures surface as [`ApiError`].

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

mod auth;
mod error;
mod handlers;
mod request_response;
mod session;

#[cfg(test)]
mod tests;

pub use auth::{authenticate_admin, authorize_view};
pub use error::{ApiError, translate_core_error, translate_domain_error, translate_store_error};
pub use handlers::{
    admin_stats, complaint_history, escalate_complaint, get_complaint, list_escalated,
    list_pending, list_resolved, list_role_queue, list_student_complaints, parse_complaint_id,
    parse_status_filter, resolve_complaint, student_stats, submit_complaint,
};
pub use request_response::{
    AdminStatsResponse, ComplaintListResponse, ComplaintResponse, EscalateRequest,
    HistoryEntryResponse, HistoryResponse, ResidenceRequest, StampResponse, StudentStatsResponse,
    SubmitComplaintRequest, TransitionResponse,
};
pub use session::{SessionProvider, StaticSession};
