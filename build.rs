// Simple build script that assembles the deployable site under `dist/`.
use std::{fs, path::Path};

use fs_extra::dir::{self, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=static");

    // Mirror static/ into dist/. The wasm bundle itself is produced by
    // `wasm-pack` (see src/main.rs) into static/pkg, so a fresh copy here
    // always picks up the latest artifacts.
    let out_dir = Path::new("dist");
    if out_dir.exists() {
        fs::remove_dir_all(out_dir).ok();
    }
    fs::create_dir_all(out_dir).ok();

    let static_dir = Path::new("static");
    if static_dir.exists() {
        let mut options = CopyOptions::new();
        options.overwrite = true;
        options.content_only = true;
        if let Err(err) = dir::copy(static_dir, out_dir, &options) {
            println!("cargo:warning=failed to copy static assets: {err}");
        }
    }
}
