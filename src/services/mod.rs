//! Business logic services.
//!
//! The operation layer: combines the branch resolver, the branch store and
//! the git collaborator into the actions exposed over MCP and the CLI.

mod branch;

pub use branch::BranchService;
