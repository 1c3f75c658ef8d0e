use std::env;
use std::path::{Path, PathBuf};

// ffmpeg-sys-next finds FFmpeg through pkg-config everywhere except Windows,
// where it needs FFMPEG_DIR. Point vcpkg users at the right directory.
fn main() {
    for variable in ["FFMPEG_DIR", "VCPKG_ROOT", "VCPKGRS_DYNAMIC", "VCPKGRS_TRIPLET"] {
        println!("cargo:rerun-if-env-changed={variable}");
    }

    let is_windows = env::var("CARGO_CFG_TARGET_OS").is_ok_and(|os| os == "windows");
    if !is_windows || env::var_os("FFMPEG_DIR").is_some() {
        return;
    }

    match env::var_os("VCPKG_ROOT") {
        Some(root) => report_vcpkg_install(Path::new(&root)),
        None => println!(
            "cargo:warning=FFMPEG_DIR is not set; install FFmpeg (e.g. via vcpkg) and set FFMPEG_DIR to build vidsheet on Windows."
        ),
    }
}

fn report_vcpkg_install(vcpkg_root: &Path) {
    let triplet = env::var("VCPKGRS_TRIPLET").unwrap_or_else(|_| "x64-windows".to_string());
    let install: PathBuf = vcpkg_root.join("installed").join(&triplet);

    if !install.exists() {
        println!(
            "cargo:warning=No vcpkg FFmpeg install found at {}.",
            install.display()
        );
        return;
    }

    println!(
        "cargo:warning=Found vcpkg FFmpeg at {0}; set FFMPEG_DIR={0} so ffmpeg-sys-next uses it.",
        install.display()
    );
    if env::var_os("VCPKGRS_DYNAMIC").is_none() {
        println!("cargo:warning=Set VCPKGRS_DYNAMIC=1 if this is a dynamic FFmpeg build.");
    }
}
