//! MCP server implementation.
//!
//! Exposes the branch operations to an assistant host over the Model Context
//! Protocol.
//!
//! ## Features
//!
//! - **Tools**: `save_branch_note`, `list_branch_notes`, `clear_branch_notes`,
//!   `save_branch_context`, `compare_branches`, `list_all_branches_with_notes`
//! - **Resources**: `branch://current`, `branch://context`, `branch://notes`,
//!   `branch://list`
//! - **Prompts**: `branch_summary`, `switch_branch`, `branch_compare`
//!
//! ## Usage
//!
//! ```bash
//! branchctx serve
//! ```
//!
//! ### Claude Desktop Configuration
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "branchctx": {
//!       "command": "branchctx",
//!       "args": ["serve"]
//!     }
//!   }
//! }
//! ```

// Allow ok_or with function calls - the error path is uncommon.
#![allow(clippy::or_fun_call)]
// Allow option_if_let_else for clearer match statements.
#![allow(clippy::option_if_let_else)]

mod dispatch;
mod prompts;
mod resources;
mod server;
mod tool_types;
mod tools;

pub use dispatch::McpMethod;
pub use prompts::{PromptArgument, PromptContent, PromptDefinition, PromptMessage, PromptRegistry};
pub use resources::{ResourceContent, ResourceDefinition, ResourceHandler};
pub use server::{McpServer, PROTOCOL_VERSION, SERVER_NAME};
pub use tools::{ToolContent, ToolDefinition, ToolRegistry, ToolResult};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::git::VcsClient;
    use crate::models::BranchResolution;
    use crate::services::BranchService;
    use crate::storage::BranchStore;
    use crate::Result;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Always reports the same branch; diffs are empty.
    struct FixedBranch(String);

    impl VcsClient for FixedBranch {
        fn current_branch(&self) -> BranchResolution {
            BranchResolution::Resolved(self.0.clone())
        }

        fn diff_stat(&self, _from: &str, _to: &str) -> Result<String> {
            Ok(String::new())
        }

        fn list_branches(&self) -> Result<String> {
            Ok(format!("* {}\n", self.0))
        }
    }

    /// A service over a fresh temporary store, checked out on `branch`.
    pub fn service_on(branch: &str) -> (TempDir, BranchService) {
        let dir = TempDir::new().unwrap();
        let service = BranchService::new(
            BranchStore::new(dir.path().join(".branch_data")),
            Arc::new(FixedBranch(branch.to_string())),
        );
        (dir, service)
    }
}
