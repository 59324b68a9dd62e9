#![forbid(unsafe_code)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const SHA_ENV: &str = "DASH_GIT_SHA";
const SHORT_SHA_LEN: usize = 12;

fn main() {
    println!("cargo:rerun-if-env-changed={SHA_ENV}");
    if let Some(sha) = head_sha() {
        let short: String = sha.chars().take(SHORT_SHA_LEN).collect();
        println!("cargo:rustc-env={SHA_ENV}={short}");
    }
}

fn head_sha() -> Option<String> {
    let manifest_dir = env::var_os("CARGO_MANIFEST_DIR").map(PathBuf::from)?;
    let git_dir = manifest_dir.ancestors().find_map(git_dir_at)?;

    let head_path = git_dir.join("HEAD");
    println!("cargo:rerun-if-changed={}", head_path.display());
    let head = fs::read_to_string(&head_path).ok()?;
    let head = head.trim();

    match head.strip_prefix("ref:") {
        Some(reference) => lookup_ref(&git_dir, reference.trim()),
        None => non_empty(head),
    }
}

/// `.git` is a directory in a normal checkout and a `gitdir:` pointer file in
/// worktrees and submodules.
fn git_dir_at(dir: &Path) -> Option<PathBuf> {
    let dot_git = dir.join(".git");
    if dot_git.is_dir() {
        return Some(dot_git);
    }
    let pointer = fs::read_to_string(&dot_git).ok()?;
    let target = pointer.lines().next()?.strip_prefix("gitdir:")?.trim();
    Some(dir.join(target))
}

fn lookup_ref(git_dir: &Path, reference: &str) -> Option<String> {
    let loose = git_dir.join(reference);
    if loose.is_file() {
        println!("cargo:rerun-if-changed={}", loose.display());
        return fs::read_to_string(&loose).ok().and_then(|s| non_empty(&s));
    }

    let packed = git_dir.join("packed-refs");
    println!("cargo:rerun-if-changed={}", packed.display());
    let text = fs::read_to_string(&packed).ok()?;
    text.lines()
        .filter(|line| !line.starts_with('#') && !line.starts_with('^'))
        .filter_map(|line| line.split_once(' '))
        .find(|(_, name)| name.trim() == reference)
        .and_then(|(sha, _)| non_empty(sha))
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
