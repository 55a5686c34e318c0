use crate::config::RunConfig;
use crate::tools::ToolPaths;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::OnceLock;
use tempfile::TempDir;

// tests/integration.rs installs the same fixtures for the binary tests.
// Keep the two installers in sync.
const FAKE_ISORT: &str = include_str!("../tests/fixtures/isort");
const FAKE_BLACK: &str = include_str!("../tests/fixtures/black");

// Installed once per test process: writing an executable while other
// threads fork can leave it busy when it is first exec'd.
static FAKE_BIN: OnceLock<TempDir> = OnceLock::new();

/// Paths to the isort/black test doubles.
pub fn fake_tools() -> ToolPaths {
    let bin = FAKE_BIN.get_or_init(|| {
        let dir = TempDir::new().unwrap();
        install(dir.path(), "isort", FAKE_ISORT);
        install(dir.path(), "black", FAKE_BLACK);
        dir
    });

    ToolPaths {
        ordering: bin.path().join("isort"),
        formatting: bin.path().join("black"),
    }
}

fn install(dir: &Path, name: &str, script: &str) {
    let path = dir.join(name);
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

pub fn run_config(workdir: &Path, diff: bool) -> RunConfig {
    RunConfig {
        selection: Vec::new(),
        diff,
        workdir: workdir.to_path_buf(),
        ..RunConfig::default()
    }
}
