//! Pikchr Plugin Core
//!
//! Target-independent half of the pikchr Typst plugin. The host speaks the
//! wasm-minimal-protocol: it calls an exported function with the byte length
//! of each argument, the plugin asks the host to copy the argument bytes into
//! its memory, and the plugin answers with one result byte sequence and a
//! status code.
//!
//! The host functions and the diagram renderer are both injected, so the
//! render flow in [`adapter`] runs unchanged against the real `typst_env`
//! imports and the pikchr C library, or against in-process doubles.
//!
//! # Example
//!
//! ```rust
//! use std::ffi::CStr;
//! use pikchr_plugin_core::prelude::*;
//!
//! let mut host = RecordingHost::with_args(&[b"box \"hi\""]);
//! let mut renderer = |markup: &CStr, _: &CStr, _: RenderFlags| {
//!     RenderOutcome::text(format!("<svg>{}</svg>", markup.to_string_lossy()))
//! };
//!
//! let status = render(&mut host, &mut renderer, 8);
//! assert_eq!(status, Status::Success);
//! assert_eq!(host.single_result(), Some(&b"<svg>box \"hi\"</svg>"[..]));
//! ```

pub mod abi;
pub mod adapter;
pub mod buffer;
pub mod error;
pub mod host;
pub mod options;
pub mod prelude;
pub mod renderer;

// Re-exports
pub use abi::Status;
pub use adapter::{render, render_with_options};
pub use error::{PluginError, Result};
pub use host::{HostProtocol, RecordingHost};
pub use options::RenderOptions;
pub use renderer::{DiagramRenderer, RenderFlags, RenderOutcome, Rendered};
