//! Tool execution handlers.
//!
//! Each handler validates its arguments and delegates to [`BranchService`].

use crate::mcp::tool_types::{
    CompareBranchesArgs, ListNotesArgs, MAX_BRANCH_LENGTH, MAX_CATEGORY_LENGTH, MAX_TEXT_LENGTH,
    NoArgs, SaveContextArgs, SaveNoteArgs, parse_args, validate_input_length,
};
use crate::services::BranchService;
use crate::Result;
use serde_json::Value;

use super::ToolResult;

/// Executes `save_branch_note`.
pub fn execute_save_note(service: &BranchService, arguments: Value) -> Result<ToolResult> {
    let args: SaveNoteArgs = parse_args(arguments)?;
    validate_input_length(&args.note, "note", MAX_TEXT_LENGTH)?;
    validate_input_length(&args.category, "category", MAX_CATEGORY_LENGTH)?;

    Ok(ToolResult::text(service.save_note(&args.note, &args.category)?))
}

/// Executes `list_branch_notes`.
pub fn execute_list_notes(service: &BranchService, arguments: Value) -> Result<ToolResult> {
    let args: ListNotesArgs = parse_args(arguments)?;
    validate_input_length(&args.branch_name, "branch_name", MAX_BRANCH_LENGTH)?;

    Ok(ToolResult::text(
        service.list_notes(Some(args.branch_name.as_str()))?,
    ))
}

/// Executes `clear_branch_notes`.
pub fn execute_clear_notes(service: &BranchService, arguments: Value) -> Result<ToolResult> {
    let NoArgs {} = parse_args(arguments)?;
    Ok(ToolResult::text(service.clear_notes()?))
}

/// Executes `save_branch_context`.
pub fn execute_save_context(service: &BranchService, arguments: Value) -> Result<ToolResult> {
    let args: SaveContextArgs = parse_args(arguments)?;
    validate_input_length(&args.context, "context", MAX_TEXT_LENGTH)?;

    Ok(ToolResult::text(service.save_context(&args.context)?))
}

/// Executes `compare_branches`.
pub fn execute_compare_branches(service: &BranchService, arguments: Value) -> Result<ToolResult> {
    let args: CompareBranchesArgs = parse_args(arguments)?;
    validate_input_length(&args.branch1, "branch1", MAX_BRANCH_LENGTH)?;
    validate_input_length(&args.branch2, "branch2", MAX_BRANCH_LENGTH)?;

    Ok(ToolResult::text(
        service.compare_branches(&args.branch1, &args.branch2),
    ))
}

/// Executes `list_all_branches_with_notes`.
pub fn execute_list_branches(service: &BranchService, arguments: Value) -> Result<ToolResult> {
    let NoArgs {} = parse_args(arguments)?;
    Ok(ToolResult::text(service.list_branches_with_data()?))
}
