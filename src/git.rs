use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug)]
pub enum GitError {
    NotInstalled,
    NotARepo,
    CommandFailed(String),
}

impl std::fmt::Display for GitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitError::NotInstalled => write!(f, "git is not installed"),
            GitError::NotARepo => write!(f, "not a git repository"),
            GitError::CommandFailed(msg) => write!(f, "git command failed: {}", msg.trim()),
        }
    }
}

impl std::error::Error for GitError {}

/// Files that differ between the working tree and `HEAD`.
pub fn modified_files(root: &Path) -> Result<Vec<PathBuf>, GitError> {
    list_paths(
        root,
        &["diff", "--name-only", "-z", "--relative", "--diff-filter=d", "HEAD"],
    )
}

/// Files that differ between the index and `HEAD`.
pub fn staged_files(root: &Path) -> Result<Vec<PathBuf>, GitError> {
    list_paths(
        root,
        &["diff", "--name-only", "-z", "--relative", "--diff-filter=d", "--cached"],
    )
}

/// Files on disk that are neither tracked nor ignored.
pub fn untracked_files(root: &Path) -> Result<Vec<PathBuf>, GitError> {
    list_paths(root, &["ls-files", "-z", "--others", "--exclude-standard"])
}

pub fn repo_root(path: &Path) -> Result<PathBuf, GitError> {
    let stdout = git_stdout(path, &["rev-parse", "--show-toplevel"])?;
    Ok(PathBuf::from(stdout.trim()))
}

/// Runs a listing command that was given `-z`, so names arrive unquoted
/// and NUL separated.
fn list_paths(root: &Path, args: &[&str]) -> Result<Vec<PathBuf>, GitError> {
    let stdout = git_stdout(root, args)?;
    let files = stdout
        .split('\0')
        .filter(|name| !name.is_empty())
        .map(PathBuf::from)
        .collect();

    Ok(files)
}

fn git_stdout(dir: &Path, args: &[&str]) -> Result<String, GitError> {
    log::debug!("git {}", args.join(" "));

    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|_| GitError::NotInstalled)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.to_lowercase().contains("not a git repository") {
            return Err(GitError::NotARepo);
        }
        return Err(GitError::CommandFailed(stderr.to_string()));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
