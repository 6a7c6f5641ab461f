//! # branchctx
//!
//! Per-branch notes and context for AI coding assistants.
//!
//! branchctx keeps a small scratchpad for every git branch: an ordered log of
//! categorized notes and a single free-text context blob. Both live on local
//! disk under a storage root (`.branch_data/<branch>/` by default) and are
//! exposed to an assistant host through an MCP server (tools, resources and
//! prompt templates) or directly from the command line.
//!
//! ## Layout
//!
//! - [`git`]: branch resolution and the `git` subprocess collaborator
//! - [`storage`]: the per-branch filesystem store
//! - [`services`]: the operation layer combining store and git
//! - [`rendering`]: human-readable listings
//! - [`mcp`]: JSON-RPC server, tools, resources, prompts
//!
//! ## Example
//!
//! ```rust,ignore
//! use branchctx::{BranchService, BranchStore, GitCli};
//! use std::sync::Arc;
//!
//! let store = BranchStore::new(".branch_data");
//! let service = BranchService::new(store, Arc::new(GitCli::new(".")));
//! println!("{}", service.save_note("fix login bug", "todo")?);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod config;
pub mod git;
pub mod mcp;
pub mod models;
pub mod observability;
pub mod rendering;
pub mod services;
pub mod storage;

pub use config::BranchCtxConfig;
pub use git::{GitCli, VcsClient};
pub use models::{BranchDataSummary, BranchResolution, ContextLookup, Note};
pub use services::BranchService;
pub use storage::BranchStore;

/// Error type for branchctx operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Bad tool arguments, unknown tool, unsafe branch names |
/// | `OperationFailed` | Filesystem or stdio I/O fails |
/// | `Decode` | A persisted notes file is not a valid JSON note array |
/// | `Vcs` | A `git` command exits non-zero or cannot be spawned |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - Tool arguments fail to deserialize or carry unknown fields
    /// - A branch name would escape the storage root
    /// - An unknown tool is called
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - Creating branch directories fails
    /// - Reading or writing notes/context files fails
    /// - Reading stdin or writing stdout fails in the server loop
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// Persisted data could not be decoded.
    ///
    /// Not recovered anywhere; the host sees it as a tool execution error.
    #[error("failed to decode {path}: {cause}")]
    Decode {
        /// File that failed to decode.
        path: String,
        /// The decoder's message.
        cause: String,
    },

    /// A version-control command failed.
    ///
    /// `stderr` is git's own error output, kept verbatim so callers can
    /// surface it unchanged.
    #[error("git {command} failed: {stderr}")]
    Vcs {
        /// The git subcommand that was run.
        command: String,
        /// Standard error of the failed command.
        stderr: String,
    },
}

/// Result type alias for branchctx operations.
pub type Result<T> = std::result::Result<T, Error>;
