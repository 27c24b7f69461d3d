//! Binding to the pikchr C library.

use std::ffi::{CStr, c_char, c_int, c_uint, c_void};
use std::ptr::NonNull;

use pikchr_plugin_core::{DiagramRenderer, RenderFlags, RenderOutcome, Rendered};

unsafe extern "C" {
    /// Render `z_text`. Returns a malloc'ed NUL-terminated string, or null
    /// when memory runs out.
    fn pikchr(
        z_text: *const c_char,
        z_class: *const c_char,
        m_flags: c_uint,
        pn_width: *mut c_int,
        pn_height: *mut c_int,
    ) -> *mut c_char;

    /// Allocator paired with the malloc pikchr uses.
    fn free(ptr: *mut c_void);
}

/// Renderer calling into pikchr.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pikchr;

impl DiagramRenderer for Pikchr {
    type Output = PikchrSvg;

    fn render(&mut self, markup: &CStr, class: &CStr, flags: RenderFlags) -> RenderOutcome<PikchrSvg> {
        let mut width: c_int = 0;
        let mut height: c_int = 0;

        // Safety: both strings are NUL-terminated and outlive the call.
        let raw = unsafe {
            pikchr(
                markup.as_ptr(),
                class.as_ptr(),
                flags.bits(),
                &mut width,
                &mut height,
            )
        };

        match NonNull::new(raw) {
            // A markup error still yields a document (with width -1); it is
            // relayed like any other output.
            Some(ptr) => RenderOutcome::Rendered(Rendered {
                output: PikchrSvg::from_raw(ptr),
                width,
                height,
            }),
            None => RenderOutcome::Failed,
        }
    }
}

/// Output string owned by the C allocator, freed on drop.
#[derive(Debug)]
pub struct PikchrSvg {
    ptr: NonNull<c_char>,
    len: usize,
}

impl PikchrSvg {
    fn from_raw(ptr: NonNull<c_char>) -> Self {
        // Safety: pikchr returns a NUL-terminated string.
        let len = unsafe { CStr::from_ptr(ptr.as_ptr()) }.count_bytes();
        Self { ptr, len }
    }
}

impl AsRef<[u8]> for PikchrSvg {
    fn as_ref(&self) -> &[u8] {
        // Safety: `len` bytes were measured before the terminator and stay
        // valid until drop.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr().cast::<u8>(), self.len) }
    }
}

impl Drop for PikchrSvg {
    fn drop(&mut self) {
        // Safety: the pointer came from pikchr's allocator and is freed once.
        unsafe { free(self.ptr.as_ptr().cast::<c_void>()) }
    }
}
