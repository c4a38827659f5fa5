pub mod actions;
pub mod options;
pub mod outputs;

use thiserror::Error;

use crate::clients::scout::ScoutError;

pub use actions::{
    AttestationAction, CacheAction, EnvironmentAction, RepoAction, VexAction, WatchAction,
};
pub use options::*;
pub use outputs::*;

/// Tool-level failure. Rendered inside a successful `tools/call` response with
/// `isError` set, never as a JSON-RPC error.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{} are required", .0.join(" and "))]
    MissingAll(&'static [&'static str]),
    #[error("{field} is required for {action}")]
    MissingFor { field: &'static str, action: &'static str },
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("unsupported {tool} action: {action}")]
    UnsupportedAction { tool: &'static str, action: String },
    #[error(transparent)]
    Scout(#[from] ScoutError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_messages_name_the_fields() {
        assert_eq!(ToolError::Missing("image").to_string(), "image is required");
        assert_eq!(
            ToolError::MissingAll(&["base_image", "target_image"]).to_string(),
            "base_image and target_image are required"
        );
        assert_eq!(
            ToolError::MissingFor { field: "repo", action: "enable" }.to_string(),
            "repo is required for enable"
        );
    }

    #[test]
    fn unsupported_action_names_tool_and_action() {
        let e = ToolError::UnsupportedAction { tool: "repo", action: "nuke".into() };
        assert_eq!(e.to_string(), "unsupported repo action: nuke");
    }
}
