// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// A command represents admin intent against one complaint, as data only.
///
/// Commands are the only way to request a lifecycle change. Submission is
/// handled separately by [`crate::submit`] because no complaint exists yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Close the complaint.
    Resolve,
    /// Hand the complaint to a higher authority.
    Escalate {
        /// Free-text role label of the explicit target. When absent the
        /// default ladder decides.
        target: Option<String>,
        /// Why the complaint is being escalated.
        reason: Option<String>,
    },
}

impl Command {
    /// The audit action name recorded for this command.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::Resolve => "ResolveComplaint",
            Self::Escalate { .. } => "EscalateComplaint",
        }
    }
}
