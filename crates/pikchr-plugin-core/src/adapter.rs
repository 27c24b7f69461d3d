//! The render flow behind each exported entry point.
//!
//! One call acquires the argument buffer, lets the host fill it, terminates the
//! markup, runs the renderer, releases the buffer and sends exactly one result
//! to the host. The only exception is a failed allocation, which is reported
//! through the status code alone.

use std::ffi::CStr;

use tracing::{debug, warn};

use crate::abi::{DEFAULT_CLASS, Status};
use crate::buffer::InputBuffer;
use crate::error::{PluginError, Result};
use crate::host::HostProtocol;
use crate::options::RenderOptions;
use crate::renderer::{DiagramRenderer, RenderFlags};

/// Render `input_len` bytes of markup with the default class and no flags.
pub fn render<H, R>(host: &mut H, renderer: &mut R, input_len: usize) -> Status
where
    H: HostProtocol + ?Sized,
    R: DiagramRenderer + ?Sized,
{
    let rendered = InputBuffer::try_allocate(input_len).and_then(|mut input| {
        input.fill_from(host);
        let markup = input.terminate(input_len);
        invoke(renderer, markup, DEFAULT_CLASS, RenderFlags::empty())
    });

    respond(host, rendered)
}

/// Render markup followed by a JSON options document.
///
/// The host writes both arguments back to back; the first `markup_len` bytes
/// are the markup and the next `options_len` bytes are the options.
pub fn render_with_options<H, R>(
    host: &mut H,
    renderer: &mut R,
    markup_len: usize,
    options_len: usize,
) -> Status
where
    H: HostProtocol + ?Sized,
    R: DiagramRenderer + ?Sized,
{
    let rendered = markup_len
        .checked_add(options_len)
        .ok_or(PluginError::OutOfMemory { requested: usize::MAX })
        .and_then(InputBuffer::try_allocate)
        .and_then(|mut input| {
            input.fill_from(host);
            let options = RenderOptions::from_json(input.data_from(markup_len))?;
            let class = options.class_cstring()?;
            let markup = input.terminate(markup_len);
            invoke(renderer, markup, &class, options.flags())
        });

    respond(host, rendered)
}

fn invoke<R>(renderer: &mut R, markup: &CStr, class: &CStr, flags: RenderFlags) -> Result<R::Output>
where
    R: DiagramRenderer + ?Sized,
{
    debug!(markup_len = markup.count_bytes(), ?class, ?flags, "invoking renderer");
    let rendered = renderer.render(markup, class, flags).into_result()?;
    // Width and height are not part of the protocol result.
    debug!(width = rendered.width, height = rendered.height, "renderer returned output");
    Ok(rendered.output)
}

fn respond<H, T>(host: &mut H, rendered: Result<T>) -> Status
where
    H: HostProtocol + ?Sized,
    T: AsRef<[u8]>,
{
    match rendered {
        Ok(output) => {
            host.send_result_to_host(output.as_ref());
            Status::Success
        }
        Err(err) => {
            warn!(error = %err, "render call failed");
            if let Some(message) = err.host_message() {
                host.send_result_to_host(message.as_bytes());
            }
            Status::Failure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::RENDER_FAILED_MESSAGE;
    use crate::host::RecordingHost;
    use crate::renderer::RenderOutcome;

    fn echo(markup: &CStr, _: &CStr, _: RenderFlags) -> RenderOutcome<Vec<u8>> {
        RenderOutcome::text(markup.to_bytes().to_vec())
    }

    fn failing(_: &CStr, _: &CStr, _: RenderFlags) -> RenderOutcome<Vec<u8>> {
        RenderOutcome::Failed
    }

    #[test]
    fn success_relays_output() {
        let mut host = RecordingHost::with_args(&[b"circle"]);
        let status = render(&mut host, &mut echo, 6);
        assert_eq!(status, Status::Success);
        assert_eq!(host.single_result(), Some(&b"circle"[..]));
    }

    #[test]
    fn failure_sends_fixed_message() {
        let mut host = RecordingHost::with_args(&[b"circle"]);
        let status = render(&mut host, &mut failing, 6);
        assert_eq!(status, Status::Failure);
        assert_eq!(host.single_result(), Some(RENDER_FAILED_MESSAGE.as_bytes()));
    }

    #[test]
    fn allocation_failure_skips_host() {
        let mut host = RecordingHost::default();
        let mut calls = 0;
        let mut renderer = |_: &CStr, _: &CStr, _: RenderFlags| {
            calls += 1;
            RenderOutcome::text(Vec::new())
        };
        let status = render(&mut host, &mut renderer, usize::MAX);
        assert_eq!(status, Status::Failure);
        assert_eq!(host.writes, 0);
        assert!(host.results.is_empty());
        assert_eq!(calls, 0);
    }

    #[test]
    fn invalid_options_do_not_reach_renderer() {
        let mut host = RecordingHost::with_args(&[b"box", b"{"]);
        let mut calls = 0;
        let mut renderer = |_: &CStr, _: &CStr, _: RenderFlags| {
            calls += 1;
            RenderOutcome::text(Vec::new())
        };
        let status = render_with_options(&mut host, &mut renderer, 3, 1);
        assert_eq!(status, Status::Failure);
        assert_eq!(calls, 0);
        let message = String::from_utf8(host.single_result().unwrap().to_vec()).unwrap();
        assert!(message.starts_with("Invalid render options"));
    }
}
