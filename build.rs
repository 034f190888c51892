use std::process::Command;

/// Run a git command and return trimmed stdout when it succeeds.
fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");
    println!("cargo:rerun-if-changed=.git/refs/tags/");

    let hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_string());
    let tagged = git(&["describe", "--exact-match", "--tags", "HEAD"]).is_some();
    let dirty = git(&["status", "--porcelain"]).is_some_and(|out| !out.is_empty());

    let suffix = if dirty { "-dirty" } else { "" };
    println!("cargo:rustc-env=AURA_GIT_HASH={hash}{suffix}");
    println!("cargo:rustc-env=AURA_IS_RELEASE={tagged}");
}
