//! MCP tool implementations.
//!
//! Provides tool handlers for the Model Context Protocol.
//!
//! # Module Structure
//!
//! - [`definitions`]: Tool schema definitions (JSON Schema for input validation)
//! - [`handlers`]: Tool execution logic, delegating to [`BranchService`]

mod definitions;
mod handlers;

use crate::services::BranchService;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Registry of MCP tools.
pub struct ToolRegistry {
    /// Available tools.
    tools: HashMap<String, ToolDefinition>,
    /// Operation layer the handlers call into.
    service: BranchService,
}

impl ToolRegistry {
    /// Creates a new tool registry with all branch tools.
    #[must_use]
    pub fn new(service: BranchService) -> Self {
        let tools = [
            definitions::save_branch_note_tool(),
            definitions::list_branch_notes_tool(),
            definitions::clear_branch_notes_tool(),
            definitions::save_branch_context_tool(),
            definitions::compare_branches_tool(),
            definitions::list_all_branches_with_notes_tool(),
        ]
        .into_iter()
        .map(|tool| (tool.name.clone(), tool))
        .collect();

        Self { tools, service }
    }

    /// Returns all tool definitions, sorted by name.
    #[must_use]
    pub fn list_tools(&self) -> Vec<&ToolDefinition> {
        let mut tools: Vec<_> = self.tools.values().collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    /// Gets a tool definition by name.
    #[must_use]
    pub fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    /// Executes a tool with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the tool is unknown, the arguments are invalid, or
    /// the underlying storage operation fails.
    pub fn execute(&self, name: &str, arguments: Value) -> Result<ToolResult> {
        let service = &self.service;
        match name {
            "save_branch_note" => handlers::execute_save_note(service, arguments),
            "list_branch_notes" => handlers::execute_list_notes(service, arguments),
            "clear_branch_notes" => handlers::execute_clear_notes(service, arguments),
            "save_branch_context" => handlers::execute_save_context(service, arguments),
            "compare_branches" => handlers::execute_compare_branches(service, arguments),
            "list_all_branches_with_notes" => handlers::execute_list_branches(service, arguments),
            _ => Err(Error::InvalidInput(format!("Unknown tool: {name}"))),
        }
    }
}

/// Definition of an MCP tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name.
    pub name: String,
    /// Tool description.
    pub description: String,
    /// JSON Schema for input validation.
    pub input_schema: Value,
}

/// Result of a tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    /// Content returned by the tool.
    pub content: Vec<ToolContent>,
    /// Whether the result represents an error.
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    /// A successful single-text result.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// A single-text result flagged as an error.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::text(text)
        }
    }
}

/// Content types that can be returned by tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
}
