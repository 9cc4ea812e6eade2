//! Stage kind enum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The role a stage plays in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Validates the request; may reject, never mutates.
    Guard,
    /// Adjusts the request; never rejects.
    Transform,
    /// Produces the approval; has no successor.
    Terminal,
}

impl Default for StageKind {
    fn default() -> Self {
        Self::Guard
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guard => write!(f, "guard"),
            Self::Transform => write!(f, "transform"),
            Self::Terminal => write!(f, "terminal"),
        }
    }
}

impl StageKind {
    /// Returns true if a stage of this kind ends the chain.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal)
    }

    /// Returns true if a stage of this kind may reject.
    #[must_use]
    pub fn may_reject(&self) -> bool {
        matches!(self, Self::Guard)
    }
}
