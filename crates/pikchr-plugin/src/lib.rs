//! Pikchr Typst plugin
//!
//! Wasm guest that renders pikchr markup to SVG for Typst. Build it for
//! `wasm32-unknown-unknown` with a static `libpikchr.a` in `PIKCHR_LIB_DIR`:
//!
//! ```sh
//! PIKCHR_LIB_DIR=build cargo build -p pikchr-plugin --target wasm32-unknown-unknown --release
//! ```
//!
//! and load it from Typst:
//!
//! ```typ
//! #let pikchr = plugin("pikchr_plugin.wasm")
//! #image(pikchr.render(bytes("box \"Hello\"")), format: "svg")
//! #image(pikchr.render_with_options(
//!   bytes("circle"),
//!   bytes(json.encode((dark_mode: true))),
//! ), format: "svg")
//! ```
//!
//! On other targets the crate compiles to nothing.

#[cfg(target_arch = "wasm32")]
mod pikchr;
#[cfg(target_arch = "wasm32")]
mod typst_env;

#[cfg(target_arch = "wasm32")]
pub use pikchr::{Pikchr, PikchrSvg};
#[cfg(target_arch = "wasm32")]
pub use typst_env::TypstEnv;

/// Render markup with the default class and no flags.
///
/// Returns 0 with the SVG as result, or 1 with an error message as result
/// (no result at all when memory runs out).
#[cfg(target_arch = "wasm32")]
#[unsafe(no_mangle)]
pub extern "C" fn render(input_len: usize) -> i32 {
    pikchr_plugin_core::render(&mut TypstEnv, &mut Pikchr, input_len).into()
}

/// Render markup with a JSON options document as second argument.
#[cfg(target_arch = "wasm32")]
#[unsafe(no_mangle)]
pub extern "C" fn render_with_options(markup_len: usize, options_len: usize) -> i32 {
    pikchr_plugin_core::render_with_options(&mut TypstEnv, &mut Pikchr, markup_len, options_len)
        .into()
}
