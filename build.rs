//! Build script: fills in `EXA_GIT_COMMIT` from git when the build
//! environment does not provide it.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=EXA_GIT_COMMIT");
    println!("cargo:rerun-if-env-changed=EXA_BUILD_DATE");

    if env::var_os("EXA_GIT_COMMIT").is_none() {
        if let Some(hash) = git_hash() {
            println!("cargo:rustc-env=EXA_GIT_COMMIT={hash}");
        }
    }
}

fn git_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (!hash.is_empty()).then(|| hash.to_owned())
}
