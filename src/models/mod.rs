//! Data models for branchctx.
//!
//! Notes, branch resolutions, context lookups and listing summaries.

mod branch;
mod note;

pub use branch::{BranchDataSummary, BranchResolution, ContextLookup, UNKNOWN_BRANCH};
pub use note::{DEFAULT_CATEGORY, Note, current_iso_timestamp};
