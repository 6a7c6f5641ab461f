//! MCP pre-defined prompts.
//!
//! Provides prompt templates for the Model Context Protocol.
//!
//! # Module Structure
//!
//! - [`types`]: Core data structures (`PromptDefinition`, `PromptMessage`, etc.)
//! - [`templates`]: Static content strings for prompts
//! - [`generators`]: Prompt message generation logic

mod generators;
mod templates;
mod types;

pub use types::{PromptArgument, PromptContent, PromptDefinition, PromptMessage};

use crate::services::BranchService;
use serde_json::Value;
use std::collections::HashMap;

/// Registry of pre-defined prompts.
pub struct PromptRegistry {
    /// Available prompts.
    prompts: HashMap<String, PromptDefinition>,
    /// Resolves the current branch interpolated into every prompt.
    service: BranchService,
}

impl PromptRegistry {
    /// Creates a new prompt registry.
    #[must_use]
    pub fn new(service: BranchService) -> Self {
        let prompts = Self::all_prompts()
            .into_iter()
            .map(|prompt| (prompt.name.clone(), prompt))
            .collect();

        Self { prompts, service }
    }

    /// Returns all prompt definitions.
    fn all_prompts() -> Vec<PromptDefinition> {
        vec![
            Self::branch_summary_prompt(),
            Self::switch_branch_prompt(),
            Self::branch_compare_prompt(),
        ]
    }

    fn branch_summary_prompt() -> PromptDefinition {
        PromptDefinition {
            name: "branch_summary".to_string(),
            description: Some("Generate a summary of the current branch's work".to_string()),
            arguments: vec![],
        }
    }

    fn switch_branch_prompt() -> PromptDefinition {
        PromptDefinition {
            name: "switch_branch".to_string(),
            description: Some("Prepare context before switching to another branch".to_string()),
            arguments: vec![PromptArgument {
                name: "target_branch".to_string(),
                description: Some("Branch you are about to switch to".to_string()),
                required: true,
            }],
        }
    }

    fn branch_compare_prompt() -> PromptDefinition {
        PromptDefinition {
            name: "branch_compare".to_string(),
            description: Some("Compare the current branch with another branch".to_string()),
            arguments: vec![PromptArgument {
                name: "other_branch".to_string(),
                description: Some("Branch to compare against".to_string()),
                required: true,
            }],
        }
    }

    /// Returns all prompt definitions, sorted by name.
    #[must_use]
    pub fn list_prompts(&self) -> Vec<&PromptDefinition> {
        let mut prompts: Vec<_> = self.prompts.values().collect();
        prompts.sort_by(|a, b| a.name.cmp(&b.name));
        prompts
    }

    /// Gets a prompt definition by name.
    #[must_use]
    pub fn get_prompt(&self, name: &str) -> Option<&PromptDefinition> {
        self.prompts.get(name)
    }

    /// Generates prompt messages for a given prompt and arguments.
    ///
    /// Returns `None` for unknown prompts. The current branch is resolved
    /// only for known ones.
    #[must_use]
    pub fn get_prompt_messages(&self, name: &str, arguments: &Value) -> Option<Vec<PromptMessage>> {
        if !self.prompts.contains_key(name) {
            return None;
        }

        let current = self.service.current_branch();
        match name {
            "branch_summary" => Some(generators::generate_branch_summary_prompt(&current)),
            "switch_branch" => Some(generators::generate_switch_branch_prompt(
                &current, arguments,
            )),
            "branch_compare" => Some(generators::generate_branch_compare_prompt(
                &current, arguments,
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::test_support::service_on;
    use serde_json::json;

    fn text_of(messages: &[PromptMessage]) -> &str {
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "user");
        let PromptContent::Text { text } = &messages[0].content;
        text
    }

    #[test]
    fn test_prompt_registry_creation() {
        let (_dir, service) = service_on("main");
        let registry = PromptRegistry::new(service);
        let names: Vec<_> = registry
            .list_prompts()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["branch_compare", "branch_summary", "switch_branch"]);
    }

    #[test]
    fn test_prompt_definitions() {
        let (_dir, service) = service_on("main");
        let registry = PromptRegistry::new(service);

        assert!(registry.get_prompt("branch_summary").unwrap().arguments.is_empty());
        let switch = registry.get_prompt("switch_branch").unwrap();
        assert_eq!(switch.arguments[0].name, "target_branch");
        assert!(switch.arguments[0].required);
        let compare = registry.get_prompt("branch_compare").unwrap();
        assert_eq!(compare.arguments[0].name, "other_branch");
    }

    #[test]
    fn test_branch_summary_prompt() {
        let (_dir, service) = service_on("feature-x");
        let registry = PromptRegistry::new(service);
        let messages = registry
            .get_prompt_messages("branch_summary", &json!({}))
            .unwrap();
        let text = text_of(&messages);
        assert!(text.starts_with("Please create a comprehensive summary of branch 'feature-x':"));
        assert!(text.contains("@branch://context"));
        assert!(text.contains("@branch://notes"));
    }

    #[test]
    fn test_switch_branch_prompt() {
        let (_dir, service) = service_on("main");
        let registry = PromptRegistry::new(service);
        let messages = registry
            .get_prompt_messages("switch_branch", &json!({"target_branch": "feature-y"}))
            .unwrap();
        let text = text_of(&messages);
        assert!(text.starts_with("I'm about to switch from 'main' to 'feature-y'."));
        assert!(text.contains("Don't actually switch branches"));
    }

    #[test]
    fn test_branch_compare_prompt_missing_argument() {
        let (_dir, service) = service_on("main");
        let registry = PromptRegistry::new(service);
        let messages = registry
            .get_prompt_messages("branch_compare", &json!({}))
            .unwrap();
        let text = text_of(&messages);
        assert!(text.starts_with("Compare branch 'main' with '':"));
        assert!(text.contains("compare_branches tool"));
    }

    #[test]
    fn test_unknown_prompt() {
        let (_dir, service) = service_on("main");
        let registry = PromptRegistry::new(service);
        assert!(registry.get_prompt("branch_history").is_none());
        assert!(registry
            .get_prompt_messages("branch_history", &json!({}))
            .is_none());
    }

    #[test]
    fn test_prompt_message_serialization() {
        let value = serde_json::to_value(PromptMessage::user("hi".to_string())).unwrap();
        assert_eq!(value, json!({"role": "user", "content": {"type": "text", "text": "hi"}}));
    }
}
