use std::path::{Path, PathBuf};
use std::process::Command;

fn git_executable() -> PathBuf {
    [
        "/usr/bin/git",
        "/opt/homebrew/bin/git",
        "/usr/local/bin/git",
        "/bin/git",
    ]
    .into_iter()
    .map(PathBuf::from)
    .find(|p| p.exists())
    .unwrap_or_else(|| PathBuf::from("git"))
}

pub(crate) fn run_git(repo: &Path, args: &[&str]) {
    let status = Command::new(git_executable())
        .current_dir(repo)
        .args(args)
        .status();
    assert!(status.is_ok_and(|s| s.success()), "git {args:?}");
}

pub(crate) fn write_file(path: &Path, contents: impl AsRef<[u8]>) {
    let parent = path.parent().unwrap();
    std::fs::create_dir_all(parent).unwrap();
    std::fs::write(path, contents).unwrap();
}
