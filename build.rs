use std::process::Command;

fn git_head() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let sha = String::from_utf8(output.stdout).ok()?;
    let sha = sha.trim();
    (!sha.is_empty()).then(|| sha.to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");

    // Builds from exported tarballs have no repository to ask.
    let sha = git_head().unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=COMPASS_WEB_GIT_SHA={sha}");
}
