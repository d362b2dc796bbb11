use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rustc-check-cfg=cfg(avx_kernels)");

    // Cargo exposes the *target's* configuration to build scripts through these variables; `cfg!`
    // in here would describe the host instead.
    let simd = env::var_os("CARGO_FEATURE_SIMD").is_some();
    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let features = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();
    let avx = features.split(',').any(|feature| feature == "avx");

    if simd && arch == "x86_64" && avx {
        println!("cargo:rustc-cfg=avx_kernels");
    }
}
