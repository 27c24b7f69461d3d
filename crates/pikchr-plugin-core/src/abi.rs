//! Fixed constants of the wasm-minimal-protocol as used by the pikchr plugin.

use std::ffi::CStr;

/// Represents a pointer into guest memory (32-bit Wasm).
pub type Ptr = u32;

/// Represents the length of a guest memory region (32-bit Wasm).
pub type Len = u32;

/// Import module the host functions live in.
pub const HOST_MODULE: &str = "typst_env";

/// Host function that copies the pending argument bytes into guest memory.
pub const WRITE_ARGS_TO_BUFFER: &str = "wasm_minimal_protocol_write_args_to_buffer";

/// Host function that receives the result bytes of a call.
pub const SEND_RESULT_TO_HOST: &str = "wasm_minimal_protocol_send_result_to_host";

/// Export rendering markup with the default class and flags.
pub const RENDER_EXPORT: &str = "render";

/// Export rendering markup with a JSON options document as second argument.
pub const RENDER_WITH_OPTIONS_EXPORT: &str = "render_with_options";

/// Result payload sent when the renderer returns no output.
pub const RENDER_FAILED_MESSAGE: &str = "Pikchr rendering failed";

/// Class label passed to the renderer unless options say otherwise.
pub const DEFAULT_CLASS: &CStr = c"pikchr";

/// Status code returned from every exported entry point.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The result bytes are the rendered output.
    Success = 0,
    /// The call failed; result bytes, if any, carry an error message.
    Failure = 1,
}

impl Status {
    pub fn is_success(self) -> bool {
        self == Status::Success
    }
}

impl From<Status> for i32 {
    fn from(status: Status) -> Self {
        status as i32
    }
}

impl TryFrom<i32> for Status {
    type Error = i32;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Status::Success),
            1 => Ok(Status::Failure),
            other => Err(other),
        }
    }
}
