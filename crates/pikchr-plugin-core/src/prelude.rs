//! Prelude module for convenient imports
//!
//! ```rust
//! use pikchr_plugin_core::prelude::*;
//! ```

pub use crate::abi::{DEFAULT_CLASS, RENDER_FAILED_MESSAGE, Status};
pub use crate::adapter::{render, render_with_options};
pub use crate::buffer::InputBuffer;
pub use crate::error::{PluginError, Result};
pub use crate::host::{HostProtocol, RecordingHost};
pub use crate::options::RenderOptions;
pub use crate::renderer::{DiagramRenderer, RenderFlags, RenderOutcome, Rendered};
