//! Prompt message generation logic.
//!
//! Every generator returns a single `user` message. Missing arguments
//! interpolate as empty strings.

use serde_json::Value;

use super::templates::{BRANCH_COMPARE, BRANCH_SUMMARY, SWITCH_BRANCH};
use super::types::PromptMessage;

/// Substitutes `{name}` placeholders in one left-to-right pass.
///
/// Substituted values are copied verbatim and never rescanned, so a branch
/// name containing `{target}` stays intact. Unmatched braces pass through.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let substitution = tail.find('}').and_then(|close| {
            let key = &tail[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close))
        });
        match substitution {
            Some((value, close)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            },
            None => {
                out.push('{');
                rest = tail;
            },
        }
    }
    out.push_str(rest);
    out
}

fn string_arg<'a>(arguments: &'a Value, name: &str) -> &'a str {
    arguments.get(name).and_then(|v| v.as_str()).unwrap_or("")
}

/// Generates the `branch_summary` prompt.
pub fn generate_branch_summary_prompt(current: &str) -> Vec<PromptMessage> {
    vec![PromptMessage::user(fill(BRANCH_SUMMARY, &[("current", current)]))]
}

/// Generates the `switch_branch` prompt.
pub fn generate_switch_branch_prompt(current: &str, arguments: &Value) -> Vec<PromptMessage> {
    let target = string_arg(arguments, "target_branch");
    vec![PromptMessage::user(fill(
        SWITCH_BRANCH,
        &[("current", current), ("target", target)],
    ))]
}

/// Generates the `branch_compare` prompt.
pub fn generate_branch_compare_prompt(current: &str, arguments: &Value) -> Vec<PromptMessage> {
    let other = string_arg(arguments, "other_branch");
    vec![PromptMessage::user(fill(
        BRANCH_COMPARE,
        &[("current", current), ("other", other)],
    ))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::prompts::types::PromptContent;
    use serde_json::json;

    fn text(messages: &[PromptMessage]) -> &str {
        let PromptContent::Text { text } = &messages[0].content;
        text
    }

    #[test]
    fn test_fill_leaves_unknown_and_unclosed_braces() {
        assert_eq!(fill("{a} {b} {a", &[("a", "1")]), "1 {b} {a");
    }

    #[test]
    fn test_placeholder_in_branch_name_is_not_expanded() {
        let messages =
            generate_switch_branch_prompt("x{target}", &json!({"target_branch": "main"}));
        let text = text(&messages);
        assert!(text.starts_with("I'm about to switch from 'x{target}' to 'main'."));
        assert!(text.contains("current work on 'x{target}'"));
    }

    #[test]
    fn test_placeholder_in_argument_is_not_expanded() {
        let messages =
            generate_branch_compare_prompt("main", &json!({"other_branch": "{current}"}));
        assert!(text(&messages).starts_with("Compare branch 'main' with '{current}':"));
    }
}
