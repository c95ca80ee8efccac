use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dom::NodeId;

/// Stable message raised when overlay state is read outside a live orchestrator.
pub const OUTSIDE_ORCHESTRATOR_MESSAGE: &str =
    "[Orchestrator] overlay state must be accessed within an initialized Orchestrator";

#[derive(Debug, Error)]
pub enum RuioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid DOM snapshot: {0}")]
    Snapshot(String),

    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Root element '{0}' not found in snapshot")]
    UnknownRoot(String),

    #[error("Hierarchy request error: {0}")]
    Hierarchy(String),

    #[error("{}", OUTSIDE_ORCHESTRATOR_MESSAGE)]
    Uninitialized,
}

impl RuioError {
    pub fn snapshot(message: impl Into<String>) -> Self {
        RuioError::Snapshot(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        RuioError::Config(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            RuioError::Io(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            RuioError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Check that the snapshot/event file is valid JSON.",
            ),
            RuioError::Yaml(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Check that the event script is valid YAML.",
            ),
            RuioError::Toml(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check the config file syntax (TOML).",
            ),
            RuioError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("depth") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Use depth bounds with 1 <= min <= default <= max.",
                    )
                } else if lower.contains("exclusion") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Set exclusion_class to a non-empty class token without whitespace.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags/paths and the config file (--config or RUIO_CONFIG).",
                    )
                }
            }
            RuioError::Snapshot(msg) => ErrorPayload::new(
                ErrorCategory::Input,
                msg.to_string(),
                "Verify node ids, parent/children references and that exactly one root exists.",
            ),
            RuioError::UnknownNode(id) => ErrorPayload::new(
                ErrorCategory::Input,
                format!("Unknown node: {id}"),
                "Use node ids obtained from the same document.",
            ),
            RuioError::UnknownRoot(key) => ErrorPayload::new(
                ErrorCategory::Input,
                format!("Root element '{key}' not found in snapshot"),
                "Pass a --root id that exists in the snapshot.",
            ),
            RuioError::Hierarchy(msg) => ErrorPayload::new(
                ErrorCategory::Input,
                msg.to_string(),
                "An element cannot be inserted below itself or one of its descendants.",
            ),
            RuioError::Uninitialized => ErrorPayload::new(
                ErrorCategory::Usage,
                OUTSIDE_ORCHESTRATOR_MESSAGE.to_string(),
                "Read overlay state only while its Orchestrator is alive.",
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, RuioError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Input,
    Usage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
