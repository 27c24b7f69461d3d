//! Protocol behaviour of the host runner, driven by a hand-written guest.

use pikchr_host::{HostError, PluginHost};
use rstest::rstest;

const GUEST: &str = r#"
(module
  (import "typst_env" "wasm_minimal_protocol_write_args_to_buffer" (func $write (param i32)))
  (import "typst_env" "wasm_minimal_protocol_send_result_to_host" (func $send (param i32 i32)))
  (memory (export "memory") 1)
  (data (i32.const 0) "boom")

  (func (export "echo") (param $len i32) (result i32)
    (call $write (i32.const 1024))
    (call $send (i32.const 1024) (local.get $len))
    (i32.const 0))

  (func (export "concat") (param $a i32) (param $b i32) (result i32)
    (call $write (i32.const 1024))
    (call $send (i32.const 1024) (i32.add (local.get $a) (local.get $b)))
    (i32.const 0))

  (func (export "fail") (param $len i32) (result i32)
    (call $send (i32.const 0) (i32.const 4))
    (i32.const 1))

  (func (export "silent_fail") (param $len i32) (result i32)
    (i32.const 1))

  (func (export "weird") (param $len i32) (result i32)
    (i32.const 7))

  (func (export "escape") (param $len i32) (result i32)
    (call $send (i32.const 65530) (i32.const 100))
    (i32.const 0))

  (func (export "overflow") (param $len i32) (result i32)
    (call $write (i32.const 65535))
    (i32.const 0))
)
"#;

fn guest() -> PluginHost {
    PluginHost::from_bytes(GUEST.as_bytes()).unwrap()
}

#[rstest]
#[case(b"" as &[u8])]
#[case(b"box")]
#[case(b"circle \"A\"; arrow; box \"B\"")]
fn echo_returns_arguments(#[case] markup: &[u8]) {
    assert_eq!(guest().call("echo", &[markup]).unwrap(), markup);
}

#[test]
fn arguments_are_concatenated() {
    let result = guest().call("concat", &[b"box".as_slice(), br#"{"dark_mode":true}"#.as_slice()]).unwrap();
    assert_eq!(result, br#"box{"dark_mode":true}"#);
}

#[test]
fn failure_status_carries_message() {
    let err = guest().call("fail", &[b"x".as_slice()]).unwrap_err();
    assert!(matches!(err, HostError::Plugin(ref message) if message == "boom"));
}

#[test]
fn failure_without_result_has_empty_message() {
    let err = guest().call("silent_fail", &[b"x".as_slice()]).unwrap_err();
    assert!(matches!(err, HostError::Plugin(ref message) if message.is_empty()));
}

#[test]
fn unknown_status_is_rejected() {
    let err = guest().call("weird", &[b"x".as_slice()]).unwrap_err();
    assert!(matches!(err, HostError::UnexpectedStatus(7)));
}

#[test]
fn result_outside_memory_is_rejected() {
    let err = guest().call("escape", &[b"x".as_slice()]).unwrap_err();
    assert!(matches!(err, HostError::OutOfBounds { ptr: 65530, len: 100 }));
}

#[test]
fn arguments_outside_memory_are_rejected() {
    let err = guest().call("overflow", &[b"four".as_slice()]).unwrap_err();
    assert!(matches!(err, HostError::OutOfBounds { ptr: 65535, len: 4 }));
}

#[test]
fn missing_export_is_reported() {
    let err = guest().call("render", &[b"box".as_slice()]).unwrap_err();
    assert!(matches!(err, HostError::MissingExport(ref name) if name == "render"));
}

#[test]
fn wrong_arity_is_a_runtime_error() {
    let err = guest().call("echo", &[b"a".as_slice(), b"b".as_slice()]).unwrap_err();
    assert!(matches!(err, HostError::WasmRuntime(_)));
}

#[test]
fn invalid_module_is_rejected() {
    assert!(matches!(
        PluginHost::from_bytes(b"not a module"),
        Err(HostError::WasmRuntime(_))
    ));
}

#[test]
fn missing_file_names_the_path() {
    let err = PluginHost::from_file("/nonexistent/plugin.wasm".as_ref())
        .err()
        .unwrap();
    assert!(err.to_string().contains("/nonexistent/plugin.wasm"));
}

#[test]
fn calls_do_not_share_state() {
    let host = guest();
    assert_eq!(host.call("echo", &[b"first".as_slice()]).unwrap(), b"first");
    assert_eq!(host.call("echo", &[b"2nd".as_slice()]).unwrap(), b"2nd");
}
