//! MCP resource handlers.
//!
//! Read-only projections of the current branch's state, addressed with the
//! `branch://` scheme:
//!
//! - `branch://current`: the resolved branch name
//! - `branch://context`: the saved context text
//! - `branch://notes`: the notes array as JSON
//! - `branch://list`: raw `git branch -a` output

use crate::services::BranchService;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

const SCHEME: &str = "branch://";
const TEXT_PLAIN: &str = "text/plain";
const APPLICATION_JSON: &str = "application/json";

/// The fixed set of branch resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BranchResource {
    Current,
    Context,
    Notes,
    List,
}

impl BranchResource {
    const ALL: [Self; 4] = [Self::Current, Self::Context, Self::Notes, Self::List];

    const fn path(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Context => "context",
            Self::Notes => "notes",
            Self::List => "list",
        }
    }

    const fn title(self) -> &'static str {
        match self {
            Self::Current => "Current Branch",
            Self::Context => "Current Branch Context",
            Self::Notes => "Current Branch Notes",
            Self::List => "All Git Branches",
        }
    }

    const fn description(self) -> &'static str {
        match self {
            Self::Current => "Name of the currently checked-out git branch",
            Self::Context => "Saved context for the current branch",
            Self::Notes => "All notes saved for the current branch",
            Self::List => "Output of git branch -a",
        }
    }

    const fn mime_type(self) -> &'static str {
        match self {
            Self::Notes => APPLICATION_JSON,
            Self::Current | Self::Context | Self::List => TEXT_PLAIN,
        }
    }

    fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.path() == path)
    }
}

/// Handler for MCP resources (`branch://` scheme).
pub struct ResourceHandler {
    service: BranchService,
}

impl ResourceHandler {
    /// Creates a new resource handler.
    #[must_use]
    pub fn new(service: BranchService) -> Self {
        Self { service }
    }

    /// Lists all available resources.
    #[must_use]
    pub fn list_resources(&self) -> Vec<ResourceDefinition> {
        BranchResource::ALL
            .into_iter()
            .map(|r| ResourceDefinition {
                uri: format!("{SCHEME}{}", r.path()),
                name: r.title().to_string(),
                description: Some(r.description().to_string()),
                mime_type: Some(r.mime_type().to_string()),
            })
            .collect()
    }

    /// Gets a resource by URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the URI is not a known `branch://` resource or the
    /// underlying store cannot be read.
    pub fn get_resource(&self, uri: &str) -> Result<ResourceContent> {
        let uri = uri.trim();

        let path = uri
            .strip_prefix(SCHEME)
            .ok_or_else(|| Error::InvalidInput(format!("Invalid URI scheme: {uri}")))?;
        let resource = BranchResource::from_path(path)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown resource: {uri}")))?;

        let text = match resource {
            BranchResource::Current => self.service.current_branch(),
            BranchResource::Context => self.service.branch_context()?,
            BranchResource::Notes => self.service.branch_notes_json()?,
            BranchResource::List => self.service.list_git_branches(),
        };

        Ok(ResourceContent {
            uri: uri.to_string(),
            mime_type: Some(resource.mime_type().to_string()),
            text: Some(text),
        })
    }
}

/// Definition of an MCP resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDefinition {
    /// Resource URI.
    pub uri: String,
    /// Human-readable name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// MIME type of the resource.
    pub mime_type: Option<String>,
}

/// Content of an MCP resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContent {
    /// Resource URI.
    pub uri: String,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Text content.
    pub text: Option<String>,
}
