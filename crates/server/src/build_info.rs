#![forbid(unsafe_code)]

use std::sync::OnceLock;

pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn build_profile_label() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

pub fn build_git_sha() -> Option<&'static str> {
    option_env!("DASH_GIT_SHA")
        .map(str::trim)
        .filter(|sha| !sha.is_empty())
}

/// Semver with build metadata, e.g. `0.1.0+git.1a2b3c4d5e6f.release`.
pub fn build_fingerprint_static() -> &'static str {
    static FINGERPRINT: OnceLock<String> = OnceLock::new();
    FINGERPRINT
        .get_or_init(|| {
            let profile = build_profile_label();
            match build_git_sha() {
                Some(sha) => format!("{SERVER_VERSION}+git.{sha}.{profile}"),
                None => format!("{SERVER_VERSION}+{profile}"),
            }
        })
        .as_str()
}
