//! Storage layer.
//!
//! Per-branch artifacts on the local filesystem:
//!
//! ```text
//! <root>/
//!   main/
//!     notes.json     JSON array of notes, insertion order
//!     context.txt    raw context text
//!   feature/
//!     login/
//!       notes.json
//! ```
//!
//! Each artifact is independently optional; a branch directory may exist with
//! neither.

mod branch_store;

pub use branch_store::{BranchStore, CONTEXT_FILE, NOTES_FILE};
