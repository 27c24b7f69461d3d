//! Pikchr Host
//!
//! Native implementation of the host side of the wasm-minimal-protocol,
//! enough to drive the pikchr plugin (or any other plugin speaking the same
//! protocol) without Typst.
//!
//! ```rust,ignore
//! use pikchr_host::PluginHost;
//!
//! let host = PluginHost::from_file("pikchr_plugin.wasm".as_ref())?;
//! let svg = host.render(b"box \"Hello\"")?;
//! ```

pub mod error;
pub mod runner;

pub use error::{HostError, Result};
pub use runner::PluginHost;
