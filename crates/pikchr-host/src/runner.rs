//! wasm-minimal-protocol host built on wasmtime
//!
//! Every call runs in a fresh store: the arguments are staged in host state,
//! handed to the guest when it asks for them, and whatever the guest sends
//! back becomes the call's result or error message.

use std::path::Path;

use pikchr_plugin_core::abi::{
    HOST_MODULE, Len, Ptr, RENDER_EXPORT, RENDER_WITH_OPTIONS_EXPORT, SEND_RESULT_TO_HOST, Status,
    WRITE_ARGS_TO_BUFFER,
};
use pikchr_plugin_core::RenderOptions;
use tracing::{debug, warn};
use wasmtime::{Caller, Engine, Extern, Linker, Memory, Module, Store, Val};

use crate::error::{HostError, Result};

/// Per-call state shared with the host functions.
#[derive(Debug, Default)]
struct ProtocolState {
    /// Concatenated argument bytes.
    args: Vec<u8>,
    /// Last result sent by the guest.
    result: Option<Vec<u8>>,
    /// First protocol violation seen during the call.
    fault: Option<HostError>,
}

impl ProtocolState {
    fn record_fault(&mut self, fault: HostError) {
        warn!(error = %fault, "plugin violated the protocol");
        self.fault.get_or_insert(fault);
    }
}

/// A compiled plugin ready to be called.
pub struct PluginHost {
    engine: Engine,
    module: Module,
    linker: Linker<ProtocolState>,
}

impl PluginHost {
    /// Load a plugin from a `.wasm` (or `.wat`) file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| HostError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    /// Compile a plugin from its binary or text form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let engine = Engine::default();
        let module = Module::new(&engine, bytes).map_err(wasm_error)?;

        let mut linker = Linker::new(&engine);
        linker
            .func_wrap(HOST_MODULE, WRITE_ARGS_TO_BUFFER, write_args_to_buffer)
            .map_err(wasm_error)?;
        linker
            .func_wrap(HOST_MODULE, SEND_RESULT_TO_HOST, send_result_to_host)
            .map_err(wasm_error)?;

        Ok(Self {
            engine,
            module,
            linker,
        })
    }

    /// Call `export` with one length parameter per argument.
    ///
    /// Status 0 yields the result bytes; status 1 yields
    /// [`HostError::Plugin`] carrying the result as text.
    pub fn call(&self, export: &str, args: &[&[u8]]) -> Result<Vec<u8>> {
        let params = args
            .iter()
            .map(|arg| {
                i32::try_from(arg.len())
                    .map(Val::I32)
                    .map_err(|_| HostError::ArgumentTooLarge(arg.len()))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(export, args = args.len(), "calling plugin");

        let state = ProtocolState {
            args: args.concat(),
            ..Default::default()
        };
        let mut store = Store::new(&self.engine, state);
        let instance = self
            .linker
            .instantiate(&mut store, &self.module)
            .map_err(wasm_error)?;
        let func = instance
            .get_func(&mut store, export)
            .ok_or_else(|| HostError::MissingExport(export.to_string()))?;

        let mut results = [Val::I32(0)];
        func.call(&mut store, &params, &mut results)
            .map_err(wasm_error)?;

        let state = store.into_data();
        if let Some(fault) = state.fault {
            return Err(fault);
        }

        let code = results[0].i32().ok_or(HostError::UnexpectedStatus(-1))?;
        let result = state.result.unwrap_or_default();
        match Status::try_from(code) {
            Ok(Status::Success) => Ok(result),
            Ok(Status::Failure) => Err(HostError::Plugin(
                String::from_utf8_lossy(&result).into_owned(),
            )),
            Err(code) => Err(HostError::UnexpectedStatus(code)),
        }
    }

    /// Render markup through the plugin's `render` export.
    pub fn render(&self, markup: &[u8]) -> Result<Vec<u8>> {
        self.call(RENDER_EXPORT, &[markup])
    }

    /// Render markup through the plugin's `render_with_options` export.
    pub fn render_with_options(&self, markup: &[u8], options: &RenderOptions) -> Result<Vec<u8>> {
        let options = options.to_json()?;
        self.call(RENDER_WITH_OPTIONS_EXPORT, &[markup, &options])
    }
}

fn wasm_error(err: impl std::fmt::Display) -> HostError {
    HostError::WasmRuntime(err.to_string())
}

fn guest_memory(caller: &mut Caller<'_, ProtocolState>) -> Option<Memory> {
    caller.get_export("memory").and_then(Extern::into_memory)
}

fn write_args_to_buffer(mut caller: Caller<'_, ProtocolState>, ptr: Ptr) {
    let Some(memory) = guest_memory(&mut caller) else {
        caller.data_mut().record_fault(HostError::MissingMemory);
        return;
    };

    let args = std::mem::take(&mut caller.data_mut().args);
    if memory.write(&mut caller, ptr as usize, &args).is_err() {
        caller.data_mut().record_fault(HostError::OutOfBounds {
            ptr,
            len: args.len(),
        });
    }
    caller.data_mut().args = args;
}

fn send_result_to_host(mut caller: Caller<'_, ProtocolState>, ptr: Ptr, len: Len) {
    let Some(memory) = guest_memory(&mut caller) else {
        caller.data_mut().record_fault(HostError::MissingMemory);
        return;
    };

    let mut result = vec![0u8; len as usize];
    if memory.read(&caller, ptr as usize, &mut result).is_err() {
        caller.data_mut().record_fault(HostError::OutOfBounds {
            ptr,
            len: len as usize,
        });
        return;
    }
    caller.data_mut().result = Some(result);
}
