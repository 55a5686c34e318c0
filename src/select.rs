use crate::exclude::is_excluded;
use crate::git::{self, GitError};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use walkdir::WalkDir;

pub const SOURCE_EXTENSION: &str = "py";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    All,
    ModifiedWorkingTree,
    ModifiedStaged,
    Untracked,
}

impl FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(SelectionMode::All),
            "modified" => Ok(SelectionMode::ModifiedWorkingTree),
            "modified-cached" => Ok(SelectionMode::ModifiedStaged),
            "untracked" => Ok(SelectionMode::Untracked),
            _ => Err(format!(
                "Invalid mode: {}. Use all, modified, modified-cached or untracked",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionToken {
    Directory(PathBuf),
    File(PathBuf),
    Mode(SelectionMode),
}

#[derive(Debug)]
pub enum SelectError {
    InvalidSelectionToken(String),
    Git(GitError),
}

impl std::fmt::Display for SelectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectError::InvalidSelectionToken(token) => write!(
                f,
                "'{}' is not a file, a directory or one of: all, modified, modified-cached, untracked",
                token
            ),
            SelectError::Git(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SelectError {}

impl From<GitError> for SelectError {
    fn from(e: GitError) -> Self {
        SelectError::Git(e)
    }
}

/// Resolves a token against `root`. Something on disk wins over a mode
/// keyword, so a directory literally named `all` is still a directory.
pub fn resolve_token(root: &Path, token: &str) -> Result<SelectionToken, SelectError> {
    let candidate = root.join(token);
    if candidate.is_dir() {
        return Ok(SelectionToken::Directory(PathBuf::from(token)));
    }
    if candidate.is_file() {
        return Ok(SelectionToken::File(PathBuf::from(token)));
    }
    token
        .parse::<SelectionMode>()
        .map(SelectionToken::Mode)
        .map_err(|_| SelectError::InvalidSelectionToken(token.to_string()))
}

/// Builds the ordered file list for `tokens`. Every token is resolved
/// before anything is enumerated, so a bad token fails the whole
/// selection without touching git.
pub fn select(root: &Path, tokens: &[String]) -> Result<Vec<PathBuf>, SelectError> {
    let resolved = tokens
        .iter()
        .map(|t| resolve_token(root, t))
        .collect::<Result<Vec<_>, _>>()?;

    let mut files = Vec::new();
    for token in resolved {
        let candidates = match token {
            SelectionToken::Directory(dir) => source_files_under(root, &dir),
            SelectionToken::File(file) => vec![relative_to(root, &file)],
            SelectionToken::Mode(mode) => mode_files(root, mode)?,
        };

        files.extend(candidates.into_iter().filter(|p| {
            let excluded = is_excluded(p);
            if excluded {
                log::debug!("excluded {}", p.display());
            }
            !excluded
        }));
    }

    Ok(files)
}

fn mode_files(root: &Path, mode: SelectionMode) -> Result<Vec<PathBuf>, GitError> {
    let listed = match mode {
        SelectionMode::All => return Ok(source_files_under(root, Path::new(""))),
        SelectionMode::ModifiedWorkingTree => git::modified_files(root)?,
        SelectionMode::ModifiedStaged => git::staged_files(root)?,
        SelectionMode::Untracked => git::untracked_files(root)?,
    };

    Ok(listed
        .into_iter()
        .filter(|p| has_source_extension(p) && root.join(p).is_file())
        .collect())
}

fn has_source_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION)
}

/// Recursively lists `*.py` files under `dir`, returned relative to
/// `root` when `dir` lives inside it. Symlinks are not followed.
fn source_files_under(root: &Path, dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(root.join(dir))
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("unreadable entry: {}", e);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| has_source_extension(e.path()))
        .map(|e| relative_to(root, e.path()))
        .collect()
}

fn relative_to(root: &Path, path: &Path) -> PathBuf {
    match path.strip_prefix(root) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => path.to_path_buf(),
    }
}
