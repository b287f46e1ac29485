//! Error types for preset resource handling.
//!
//! Resource failures are never fatal to prompt assembly: the store loader
//! consumes them and degrades to a minimal fallback, while strict entry
//! points (`PresetStore::from_json_str`, the `check` command) surface them
//! to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for preset operations
#[derive(Error, Debug)]
pub enum PresetError {
    // =========================================================================
    // Resource Errors
    // =========================================================================
    /// Preset resource could not be read from disk
    #[error("Failed to read preset resource {path}: {source}")]
    ResourceLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Preset resource was not a JSON object of presets
    #[error("Failed to parse preset resource: {detail}")]
    ResourceParse { detail: String },
}

impl PresetError {
    // =========================================================================
    // Constructor helpers
    // =========================================================================

    /// Create a resource load error
    pub fn resource_load(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ResourceLoad {
            path: path.into(),
            source,
        }
    }

    /// Create a resource parse error
    pub fn resource_parse(detail: impl Into<String>) -> Self {
        Self::ResourceParse {
            detail: detail.into(),
        }
    }

    // =========================================================================
    // Classification helpers
    // =========================================================================

    /// Check if this error means the resource simply does not exist
    pub fn is_missing_resource(&self) -> bool {
        matches!(
            self,
            Self::ResourceLoad { source, .. }
                if source.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Get error code for exit status
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ResourceLoad { .. } => 2,
            Self::ResourceParse { .. } => 3,
        }
    }
}

impl From<serde_json::Error> for PresetError {
    fn from(err: serde_json::Error) -> Self {
        Self::resource_parse(err.to_string())
    }
}

/// Type alias for preset results
pub type Result<T> = std::result::Result<T, PresetError>;
