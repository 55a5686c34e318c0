use glob::Pattern;
use lazy_static::lazy_static;
use std::path::{Component, Path};

/// Directory in the working tree that `black` is pointed at for its cache.
pub const FORMATTER_CACHE_DIR: &str = ".black_cache";

const DENYLIST: &[&str] = &[
    // version control
    ".git",
    ".hg",
    ".svn",
    // environments and dependencies
    ".direnv",
    ".eggs",
    "*.egg-info",
    ".nox",
    ".tox",
    ".venv",
    "venv",
    "env",
    "__pypackages__",
    "node_modules",
    // build output
    "_build",
    "buck-out",
    "build",
    "dist",
    // caches
    ".ipynb_checkpoints",
    ".mypy_cache",
    ".pytest_cache",
    ".ruff_cache",
    "__pycache__",
    FORMATTER_CACHE_DIR,
    // editor
    ".vscode",
];

lazy_static! {
    static ref EXCLUDED_SEGMENTS: Vec<Pattern> = DENYLIST
        .iter()
        .filter_map(|fragment| Pattern::new(fragment).ok())
        .collect();
}

/// Returns true when any segment of `path` names a build, cache,
/// virtual-env or VCS directory. Matching is per segment, so `env`
/// rejects `env/x.py` but not `envious.py`.
pub fn is_excluded(path: &Path) -> bool {
    path.components().any(|component| match component {
        Component::Normal(segment) => segment
            .to_str()
            .map(is_excluded_segment)
            .unwrap_or(false),
        _ => false,
    })
}

fn is_excluded_segment(segment: &str) -> bool {
    EXCLUDED_SEGMENTS.iter().any(|p| p.matches(segment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn excluded(p: &str) -> bool {
        is_excluded(Path::new(p))
    }

    #[test]
    fn test_denylisted_segments() {
        assert!(excluded("./.venv/lib/x.py"));
        assert!(excluded(".git/hooks/pre-commit.py"));
        assert!(excluded("pkg/__pycache__/mod.py"));
        assert!(excluded("build/lib/pkg/mod.py"));
        assert!(excluded("src/mypkg.egg-info/setup.py"));
        assert!(excluded("a/b/node_modules/c/d.py"));
        assert!(excluded("env/bin/activate_this.py"));
        assert!(excluded(".black_cache/23.1/x.py"));
    }

    #[test]
    fn test_substrings_are_not_segments() {
        assert!(!excluded("./src/envious.py"));
        assert!(!excluded("src/builder.py"));
        assert!(!excluded("distribution/x.py"));
        assert!(!excluded("my.venv.py"));
        assert!(!excluded("src/git_tools.py"));
    }

    #[test]
    fn test_plain_sources() {
        assert!(!excluded("src/a.py"));
        assert!(!excluded("./main.py"));
        assert!(!excluded("tests/test_app.py"));
    }

    proptest! {
        #[test]
        fn test_denylisted_dir_always_excluded(
            prefix in "[a-z]{1,8}(/[a-z]{1,8}){0,3}",
            dir in prop::sample::select(vec![".git", ".venv", "venv", "__pycache__", "dist", ".tox"]),
            file in "[a-z]{1,8}\\.py",
        ) {
            let path = format!("{}/{}/{}", prefix, dir, file);
            prop_assert!(excluded(&path));
        }

        #[test]
        fn test_clean_paths_never_excluded(s in "[a-z]{10,12}(/[a-z]{10,12}){0,4}\\.py") {
            // segments of ten or more lowercase letters cannot equal a denylist entry
            prop_assert!(!excluded(&s));
        }
    }
}
