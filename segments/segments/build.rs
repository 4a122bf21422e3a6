use std::env;

fn main() {
    // `correct` has to start on a page boundary and stable Rust can't align a function. The
    // linker script adds a page-aligned output section for it to the default layout. Tests link
    // with it too, so they can check the address in-process.
    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap();

    println!("cargo::rerun-if-changed=link.ld");
    if target_os == "linux" {
        println!("cargo::rustc-link-arg=-T{crate_dir}/link.ld");
    }
}
