//! Host functions imported from the Typst environment.

use pikchr_plugin_core::HostProtocol;

#[link(wasm_import_module = "typst_env")]
unsafe extern "C" {
    /// Copy the pending argument bytes to `ptr`.
    fn wasm_minimal_protocol_write_args_to_buffer(ptr: *mut u8);

    /// Hand `len` bytes at `ptr` to the host as the call's result.
    fn wasm_minimal_protocol_send_result_to_host(ptr: *const u8, len: usize);
}

/// The host that loaded this module.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypstEnv;

impl HostProtocol for TypstEnv {
    fn write_args_to_buffer(&mut self, buffer: &mut [u8]) {
        // Safety: the host writes exactly the total argument length, which is
        // the length the buffer was sized for.
        unsafe { wasm_minimal_protocol_write_args_to_buffer(buffer.as_mut_ptr()) }
    }

    fn send_result_to_host(&mut self, result: &[u8]) {
        // Safety: the host copies the bytes before returning.
        unsafe { wasm_minimal_protocol_send_result_to_host(result.as_ptr(), result.len()) }
    }
}
