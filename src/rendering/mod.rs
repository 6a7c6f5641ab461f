//! Text rendering for note listings and branch reports.
//!
//! Output is plain text meant to be relayed verbatim by the host.

mod listing;

pub use listing::{group_by_category, render_branch_report, render_note_listing};
