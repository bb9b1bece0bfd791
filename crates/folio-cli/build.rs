//! Records the version shown by `folio --version`.
//!
//! Release builds from a tag show the package version. Anything else also
//! shows the commit it was built from, e.g. `0.1.0 (3f2a9c1-dirty)`.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let package = env!("CARGO_PKG_VERSION");
    let version = match describe() {
        Some(rev) if rev.trim_start_matches('v') == package => package.to_string(),
        Some(rev) => format!("{} ({})", package, rev),
        None => package.to_string(),
    };

    println!("cargo:rustc-env=FOLIO_VERSION={}", version);
}

fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;

    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|rev| !rev.is_empty())
}
