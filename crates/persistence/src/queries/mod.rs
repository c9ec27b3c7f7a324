// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `audit` - Complaint history
//! - `complaints` - Complaint lookup, filtered listing, and row decoding

pub mod audit;
pub mod complaints;

pub use audit::get_complaint_history;
pub use complaints::{complaint_exists, get_complaint, query_complaints};
