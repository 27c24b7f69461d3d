//! Per-call render options passed as a JSON document.

use std::ffi::CString;

use serde::{Deserialize, Serialize};

use crate::abi::DEFAULT_CLASS;
use crate::error::{PluginError, Result};
use crate::renderer::RenderFlags;

/// Options for one render call.
///
/// Missing fields fall back to the defaults used by the plain `render` export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Class attribute put on the generated `<svg>` element.
    pub class: String,
    /// Use colors suitable for a dark background.
    pub dark_mode: bool,
    /// Report markup errors as plain text.
    pub plaintext_errors: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            class: String::from_utf8_lossy(DEFAULT_CLASS.to_bytes()).into_owned(),
            dark_mode: false,
            plaintext_errors: false,
        }
    }
}

impl RenderOptions {
    /// Parse an options document. Empty input yields the defaults.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Encode as the JSON document accepted by [`RenderOptions::from_json`].
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn flags(&self) -> RenderFlags {
        let mut flags = RenderFlags::empty();
        if self.dark_mode {
            flags |= RenderFlags::DARK_MODE;
        }
        if self.plaintext_errors {
            flags |= RenderFlags::PLAINTEXT_ERRORS;
        }
        flags
    }

    /// Class label as a C string for the renderer.
    pub fn class_cstring(&self) -> Result<CString> {
        CString::new(self.class.as_str()).map_err(|_| PluginError::InvalidClass(self.class.clone()))
    }
}
