//! Error Types
//!
//! Only two things in the core can fail loudly: loading configuration data and
//! equipping a tool the catalog does not know. Everything else (missed rays,
//! stale references, cooldown rejections) is absorbed as a no-op.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating configuration and catalog files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors returned by `ToolManager::equip` and friends.
///
/// The equipped tool and any held object's pose are left untouched when one
/// of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("unknown tool id `{0}`")]
    UnknownTool(String),
    #[error("no tool in catalog slot {0}")]
    EmptySlot(usize),
}

/// Return `ConfigError::Invalid` with `message` unless `condition` holds.
pub(crate) fn ensure(condition: bool, message: impl Into<String>) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::Invalid(message.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_passes_and_fails() {
        assert!(ensure(true, "never").is_ok());
        let err = ensure(false, "speed must be positive").unwrap_err();
        assert!(err.to_string().contains("speed must be positive"));
    }

    #[test]
    fn test_unknown_tool_message() {
        let err = ToolError::UnknownTool("saw".into());
        assert_eq!(err.to_string(), "unknown tool id `saw`");
    }
}
