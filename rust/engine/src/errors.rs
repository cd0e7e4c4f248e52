use thiserror::Error;

use crate::hand::Street;

/// Reasons a recorded action log cannot be turned into a [`crate::hand::Hand`].
///
/// All three are local to one hand: batch evaluation reports them next to the
/// successful tag tables instead of aborting.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LogError {
    #[error("Malformed action log: {0}")]
    MalformedLog(String),
    #[error("Unknown action '{kind}' on {street}")]
    UnknownAction { street: Street, kind: String },
    #[error("Unknown player '{player}' on {street}")]
    UnknownPlayer { street: Street, player: String },
}

impl LogError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        LogError::MalformedLog(msg.into())
    }

    /// Short machine-readable class name used in reports and exports.
    pub fn class(&self) -> &'static str {
        match self {
            LogError::MalformedLog(_) => "malformed_log",
            LogError::UnknownAction { .. } => "unknown_action",
            LogError::UnknownPlayer { .. } => "unknown_player",
        }
    }
}
