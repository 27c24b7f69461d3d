//! Error types for the plugin host

use thiserror::Error;

/// Result type for host operations
pub type Result<T> = std::result::Result<T, HostError>;

/// Errors that can occur while calling into a plugin
#[derive(Debug, Error)]
pub enum HostError {
    /// The plugin reported failure; carries the result it sent
    #[error("{0}")]
    Plugin(String),

    /// Plugin file could not be read
    #[error("Failed to read plugin {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The plugin has no export with this name
    #[error("Plugin does not export function: {0}")]
    MissingExport(String),

    /// The plugin does not export its linear memory
    #[error("Plugin does not export its memory")]
    MissingMemory,

    /// The plugin passed a pointer range outside its memory
    #[error("Plugin accessed {len} bytes at {ptr:#x}, outside its memory")]
    OutOfBounds { ptr: u32, len: usize },

    /// An argument is longer than a 32-bit guest can address
    #[error("Argument of {0} bytes is too large for the plugin")]
    ArgumentTooLarge(usize),

    /// The plugin returned a status other than 0 or 1
    #[error("Plugin returned unexpected status {0}")]
    UnexpectedStatus(i32),

    /// WASM runtime error
    #[error("WASM runtime error: {0}")]
    WasmRuntime(String),

    /// Options could not be encoded
    #[error(transparent)]
    Options(#[from] pikchr_plugin_core::PluginError),
}
