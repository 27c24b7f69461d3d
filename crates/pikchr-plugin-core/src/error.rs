//! Error types for the pikchr plugin

use thiserror::Error;

use crate::abi::RENDER_FAILED_MESSAGE;

/// Result type for plugin operations
pub type Result<T> = std::result::Result<T, PluginError>;

/// Errors that can end a plugin call
#[derive(Debug, Error)]
pub enum PluginError {
    /// The input buffer could not be acquired
    #[error("Out of memory: could not allocate {requested} bytes")]
    OutOfMemory { requested: usize },

    /// The renderer returned no output
    #[error("{}", RENDER_FAILED_MESSAGE)]
    RenderFailed,

    /// The options argument is not a valid options document
    #[error("Invalid render options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    /// The class label cannot be passed to the renderer
    #[error("Invalid class label {0:?}: contains a NUL byte")]
    InvalidClass(String),
}

impl PluginError {
    /// Message delivered to the host for this error.
    ///
    /// Allocation failures are reported through the status code alone.
    pub fn host_message(&self) -> Option<String> {
        match self {
            PluginError::OutOfMemory { .. } => None,
            other => Some(other.to_string()),
        }
    }
}
