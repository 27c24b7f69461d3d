//! Host capability consumed by the plugin
//!
//! The two functions the host imports into the guest are modelled as a trait
//! so the render flow can run against the real `typst_env` imports or against
//! an in-process host.

/// Functions the host provides to the plugin.
pub trait HostProtocol {
    /// Copy the pending argument bytes into `buffer`.
    fn write_args_to_buffer(&mut self, buffer: &mut [u8]);

    /// Deliver the result bytes of the current call.
    fn send_result_to_host(&mut self, result: &[u8]);
}

impl<H: HostProtocol + ?Sized> HostProtocol for &mut H {
    fn write_args_to_buffer(&mut self, buffer: &mut [u8]) {
        (**self).write_args_to_buffer(buffer)
    }

    fn send_result_to_host(&mut self, result: &[u8]) {
        (**self).send_result_to_host(result)
    }
}

/// In-process host serving fixed argument bytes and recording results.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    args: Vec<u8>,
    /// Number of `write_args_to_buffer` calls received.
    pub writes: usize,
    /// Every result sent, in order.
    pub results: Vec<Vec<u8>>,
}

impl RecordingHost {
    /// Create a host whose arguments are the concatenation of `args`.
    pub fn with_args(args: &[&[u8]]) -> Self {
        Self {
            args: args.concat(),
            ..Default::default()
        }
    }

    /// The single result sent, if exactly one was sent.
    pub fn single_result(&self) -> Option<&[u8]> {
        match self.results.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

impl HostProtocol for RecordingHost {
    fn write_args_to_buffer(&mut self, buffer: &mut [u8]) {
        self.writes += 1;
        let len = self.args.len().min(buffer.len());
        buffer[..len].copy_from_slice(&self.args[..len]);
    }

    fn send_result_to_host(&mut self, result: &[u8]) {
        self.results.push(result.to_vec());
    }
}
