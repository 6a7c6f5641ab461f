//! Tool definitions for MCP tools.
//!
//! Contains the JSON Schema definitions for all branch tools.

use super::ToolDefinition;

/// Defines the save note tool.
pub fn save_branch_note_tool() -> ToolDefinition {
    ToolDefinition {
        name: "save_branch_note".to_string(),
        description: "Save a note specific to the current branch (context, TODOs, decisions)"
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "note": {
                    "type": "string",
                    "description": "Note content to save"
                },
                "category": {
                    "type": "string",
                    "description": "Category: general, todo, decision, issue",
                    "default": "general"
                }
            },
            "required": ["note"]
        }),
    }
}

/// Defines the list notes tool.
pub fn list_branch_notes_tool() -> ToolDefinition {
    ToolDefinition {
        name: "list_branch_notes".to_string(),
        description: "List all notes for the current branch or a specific branch".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "branch_name": {
                    "type": "string",
                    "description": "Branch name (empty = current branch)",
                    "default": ""
                }
            },
            "required": []
        }),
    }
}

/// Defines the clear notes tool.
pub fn clear_branch_notes_tool() -> ToolDefinition {
    ToolDefinition {
        name: "clear_branch_notes".to_string(),
        description: "Clear all notes for the current branch".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        }),
    }
}

/// Defines the save context tool.
pub fn save_branch_context_tool() -> ToolDefinition {
    ToolDefinition {
        name: "save_branch_context".to_string(),
        description: "Save important context about what you're working on in this branch"
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "context": {
                    "type": "string",
                    "description": "Context description (purpose, status, blockers, etc.)"
                }
            },
            "required": ["context"]
        }),
    }
}

/// Defines the compare branches tool.
pub fn compare_branches_tool() -> ToolDefinition {
    ToolDefinition {
        name: "compare_branches".to_string(),
        description: "Compare two branches to see what's different".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "branch1": {
                    "type": "string",
                    "description": "First branch name"
                },
                "branch2": {
                    "type": "string",
                    "description": "Second branch name"
                }
            },
            "required": ["branch1", "branch2"]
        }),
    }
}

/// Defines the branch listing tool.
pub fn list_all_branches_with_notes_tool() -> ToolDefinition {
    ToolDefinition {
        name: "list_all_branches_with_notes".to_string(),
        description: "List all branches that have saved notes or context".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        }),
    }
}
