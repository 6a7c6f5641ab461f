//! MCP method identifiers.
//!
//! ```text
//! McpMethod
//!   ├── Initialize        initialize
//!   ├── ListTools         tools/list
//!   ├── CallTool          tools/call
//!   ├── ListResources     resources/list
//!   ├── ReadResource      resources/read
//!   ├── ListPrompts       prompts/list
//!   ├── GetPrompt         prompts/get
//!   ├── Ping              ping
//!   ├── Notification(..)  notifications/*
//!   └── Unknown(..)
//! ```

use std::fmt;

const NOTIFICATION_PREFIX: &str = "notifications/";

/// MCP method identifier.
///
/// Unknown methods are captured for error reporting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum McpMethod {
    /// Initialize the MCP session.
    Initialize,
    /// List available tools.
    ListTools,
    /// Call a specific tool.
    CallTool,
    /// List available resources.
    ListResources,
    /// Read a specific resource.
    ReadResource,
    /// List available prompts.
    ListPrompts,
    /// Get a specific prompt.
    GetPrompt,
    /// Liveness check.
    Ping,
    /// A client notification such as `notifications/initialized`.
    Notification(String),
    /// Unknown method.
    Unknown(String),
}

impl McpMethod {
    /// Returns the MCP protocol method name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Initialize => "initialize",
            Self::ListTools => "tools/list",
            Self::CallTool => "tools/call",
            Self::ListResources => "resources/list",
            Self::ReadResource => "resources/read",
            Self::ListPrompts => "prompts/list",
            Self::GetPrompt => "prompts/get",
            Self::Ping => "ping",
            Self::Notification(s) | Self::Unknown(s) => s.as_str(),
        }
    }

    /// Metric label for this method; unknown names collapse to `unknown`.
    #[must_use]
    pub const fn metric_label(&self) -> &str {
        match self {
            Self::Notification(_) => "notification",
            Self::Unknown(_) => "unknown",
            known => known.as_str(),
        }
    }
}

impl From<&str> for McpMethod {
    fn from(s: &str) -> Self {
        match s {
            "initialize" => Self::Initialize,
            "tools/list" => Self::ListTools,
            "tools/call" => Self::CallTool,
            "resources/list" => Self::ListResources,
            "resources/read" => Self::ReadResource,
            "prompts/list" => Self::ListPrompts,
            "prompts/get" => Self::GetPrompt,
            "ping" => Self::Ping,
            n if n.starts_with(NOTIFICATION_PREFIX) => Self::Notification(n.to_string()),
            unknown => Self::Unknown(unknown.to_string()),
        }
    }
}

impl fmt::Display for McpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("initialize", McpMethod::Initialize)]
    #[test_case("tools/list", McpMethod::ListTools)]
    #[test_case("tools/call", McpMethod::CallTool)]
    #[test_case("resources/list", McpMethod::ListResources)]
    #[test_case("resources/read", McpMethod::ReadResource)]
    #[test_case("prompts/list", McpMethod::ListPrompts)]
    #[test_case("prompts/get", McpMethod::GetPrompt)]
    #[test_case("ping", McpMethod::Ping)]
    fn test_method_round_trip(name: &str, expected: McpMethod) {
        let method = McpMethod::from(name);
        assert_eq!(method, expected);
        assert_eq!(method.as_str(), name);
        assert_eq!(method.metric_label(), name);
    }

    #[test]
    fn test_notification_method() {
        let method = McpMethod::from("notifications/initialized");
        assert_eq!(
            method,
            McpMethod::Notification("notifications/initialized".to_string())
        );
        assert_eq!(method.metric_label(), "notification");
    }

    #[test]
    fn test_unknown_method() {
        let method = McpMethod::from("branches/delete");
        assert_eq!(method, McpMethod::Unknown("branches/delete".to_string()));
        assert_eq!(method.to_string(), "branches/delete");
        assert_eq!(method.metric_label(), "unknown");
    }
}
