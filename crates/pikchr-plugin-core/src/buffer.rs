//! Scoped buffer for argument bytes received from the host.

use std::ffi::CStr;

use crate::error::{PluginError, Result};
use crate::host::HostProtocol;

/// Argument bytes plus one byte of room for a terminator.
///
/// The allocation is released when the buffer is dropped.
#[derive(Debug)]
pub struct InputBuffer {
    bytes: Vec<u8>,
    data_len: usize,
}

impl InputBuffer {
    /// Acquire room for `data_len` argument bytes and a terminator.
    ///
    /// Fails without aborting when the length overflows or the allocator
    /// cannot satisfy the request.
    pub fn try_allocate(data_len: usize) -> Result<Self> {
        let requested = data_len
            .checked_add(1)
            .ok_or(PluginError::OutOfMemory { requested: usize::MAX })?;

        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(requested)
            .map_err(|_| PluginError::OutOfMemory { requested })?;
        bytes.resize(requested, 0);

        Ok(Self { bytes, data_len })
    }

    /// Number of argument bytes the buffer holds.
    pub fn len(&self) -> usize {
        self.data_len
    }

    pub fn is_empty(&self) -> bool {
        self.data_len == 0
    }

    /// Ask the host to write the argument bytes.
    pub fn fill_from<H: HostProtocol + ?Sized>(&mut self, host: &mut H) {
        host.write_args_to_buffer(&mut self.bytes[..self.data_len]);
    }

    /// Argument bytes starting at `offset`.
    pub fn data_from(&self, offset: usize) -> &[u8] {
        &self.bytes[offset.min(self.data_len)..self.data_len]
    }

    /// Write the terminator at `offset` and view everything before it as text.
    ///
    /// Bytes after `offset` are no longer part of the data. An interior NUL in
    /// the data ends the text early.
    pub fn terminate(&mut self, offset: usize) -> &CStr {
        let end = offset.min(self.data_len);
        self.bytes[end] = 0;
        self.data_len = end;
        CStr::from_bytes_until_nul(&self.bytes[..=end]).unwrap_or_default()
    }
}
