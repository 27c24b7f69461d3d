use std::env;

fn main() {
    println!("cargo::rerun-if-changed=build.rs");
    println!("cargo::rerun-if-env-changed=PIKCHR_LIB_DIR");

    // The pikchr C library is built separately (for example with clang
    // --target=wasm32) and linked statically into the guest.
    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    if target_arch != "wasm32" {
        return;
    }

    match env::var("PIKCHR_LIB_DIR") {
        Ok(dir) if !dir.is_empty() => {
            println!("cargo::rustc-link-search=native={}", dir);
            println!("cargo::rustc-link-lib=static=pikchr");
        }
        _ => println!("cargo::warning=PIKCHR_LIB_DIR is not set; `pikchr` must be provided at link time"),
    }
}
