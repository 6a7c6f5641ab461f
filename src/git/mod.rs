//! Git operations.
//!
//! The version-control collaborator: current branch resolution, diff
//! statistics between two refs, and the raw branch listing.

mod cli;

pub use cli::GitCli;

use crate::Result;
use crate::models::BranchResolution;

/// Version-control queries the operation layer depends on.
///
/// [`GitCli`] shells out to the `git` binary; tests provide in-memory fakes.
pub trait VcsClient: Send + Sync {
    /// Resolves the currently checked-out branch.
    ///
    /// Never fails: any error collapses to [`BranchResolution::Unavailable`].
    fn current_branch(&self) -> BranchResolution;

    /// Returns `git diff --stat from..to` output.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Vcs`] carrying git's stderr when the command fails.
    fn diff_stat(&self, from: &str, to: &str) -> Result<String>;

    /// Returns `git branch -a` output.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Vcs`] carrying git's stderr when the command fails.
    fn list_branches(&self) -> Result<String>;
}
