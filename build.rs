fn main() {
    println!("cargo:rerun-if-env-changed=SNOWFALL_BUILD");
    println!("cargo:rerun-if-env-changed=GITHUB_SHA");

    let build_id = std::env::var("SNOWFALL_BUILD")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(target_build_id);
    println!("cargo:rustc-env=SNOWFALL_BUILD={}", build_id);

    let sha = git_short_sha()
        .or_else(|| env_short_sha("GITHUB_SHA"))
        .unwrap_or_default();
    println!("cargo:rustc-env=SNOWFALL_GIT_SHA={}", sha);
}

fn short_hex(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let short = &raw[..raw.len().min(7)];
    if short.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(short.to_ascii_lowercase())
    } else {
        None
    }
}

fn env_short_sha(name: &str) -> Option<String> {
    short_hex(&std::env::var(name).ok()?)
}

fn git_short_sha() -> Option<String> {
    let out = std::process::Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    short_hex(&String::from_utf8(out.stdout).ok()?)
}

fn target_build_id() -> String {
    let os = match std::env::var("CARGO_CFG_TARGET_OS").as_deref() {
        Ok("macos") => "darwin".to_string(),
        Ok(other) => other.to_string(),
        Err(_) => "unknown".to_string(),
    };
    let arch = std::env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_else(|_| "unknown".to_string());
    format!("{os}-{arch}")
}
