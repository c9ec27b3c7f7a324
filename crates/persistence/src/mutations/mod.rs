// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `audit` - Audit event persistence
//! - `complaints` - Complaint inserts and lifecycle updates
//!
//! Callers in `lib.rs` wrap these in a transaction so a complaint change
//! and its audit event land together or not at all.

pub mod audit;
pub mod complaints;

pub use audit::persist_audit_event;
pub use complaints::{apply_complaint_update, insert_complaint};
