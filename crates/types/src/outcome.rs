//! Classified outcomes delivered back to domain adapters.

use crate::SwitchError;
use serde_json::Value;

/// The data a successful switch handed back.
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnData {
    /// The full return URI, query string included, for browser switches.
    Uri(String),
    /// The structured document a companion app returned.
    Document(Value),
}

/// The classified result of one switch, delivered exactly once per slot.
#[derive(Debug)]
pub enum SwitchOutcome {
    Success(ReturnData),
    /// The user backed out. First-class, not an error.
    UserCanceled,
    Error(SwitchError),
}

impl SwitchOutcome {
    /// Returns `true` for [`SwitchOutcome::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
