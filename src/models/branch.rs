//! Branch-level models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Branch name used when the current branch cannot be determined.
pub const UNKNOWN_BRANCH: &str = "unknown";

/// Outcome of asking the VCS for the current branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchResolution {
    /// The checked-out branch (or `HEAD` when detached).
    Resolved(String),
    /// git is missing, the directory is not a repository, or the query failed.
    Unavailable,
}

impl BranchResolution {
    /// Returns the resolved name, or [`UNKNOWN_BRANCH`].
    #[must_use]
    pub fn name_or_unknown(&self) -> &str {
        match self {
            Self::Resolved(name) => name,
            Self::Unavailable => UNKNOWN_BRANCH,
        }
    }

    /// Consumes the resolution, returning the name or [`UNKNOWN_BRANCH`].
    #[must_use]
    pub fn into_name_or_unknown(self) -> String {
        match self {
            Self::Resolved(name) => name,
            Self::Unavailable => UNKNOWN_BRANCH.to_string(),
        }
    }
}

impl fmt::Display for BranchResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name_or_unknown())
    }
}

/// Saved context for a branch, or its absence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextLookup {
    /// The literal saved text.
    Saved(String),
    /// No context file exists for the branch.
    Absent,
}

/// Which artifacts a branch directory holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchDataSummary {
    /// Branch name, `/`-separated for nested names.
    pub branch: String,
    /// Whether `notes.json` exists.
    pub has_notes: bool,
    /// Whether `context.txt` exists.
    pub has_context: bool,
}
