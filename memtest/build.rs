fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();

    // Only link the bare-metal image with the custom script
    if os == "none" {
        println!("cargo:rustc-link-arg-bins=-T{}/src/linker.ld", manifest_dir);
    }

    println!("cargo:rerun-if-changed=src/linker.ld");
}
