use crate::config::RunConfig;
use crate::exclude::FORMATTER_CACHE_DIR;
use crate::output::RunSummary;
use crate::report::Reporter;
use crate::select::{self, SelectError};
use crate::tools::{Confirm, Tool, ToolPaths, ToolRunner};
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub enum RunError {
    MissingDependency(String),
    Select(SelectError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::MissingDependency(tool) => write!(
                f,
                "required tool '{}' not found. Please install it and ensure it's in your PATH",
                tool
            ),
            RunError::Select(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RunError {}

impl From<SelectError> for RunError {
    fn from(e: SelectError) -> Self {
        RunError::Select(e)
    }
}

/// Checks for the tools on `PATH`, then runs both passes.
pub fn run(
    config: &RunConfig,
    reporter: &mut dyn Reporter,
    confirm: &mut dyn Confirm,
) -> Result<RunSummary, RunError> {
    let paths = ToolPaths::detect().map_err(RunError::MissingDependency)?;
    run_with_tools(config, &paths, reporter, confirm)
}

/// Selection, the isort pass over every file, then the black pass over
/// every file. Per-file failures are recorded and the batch carries on.
pub fn run_with_tools(
    config: &RunConfig,
    paths: &ToolPaths,
    reporter: &mut dyn Reporter,
    confirm: &mut dyn Confirm,
) -> Result<RunSummary, RunError> {
    let files = select::select(&config.workdir, &config.selection)?;

    if files.is_empty() {
        reporter.message("No files selected, nothing to do");
        return Ok(RunSummary::default());
    }

    let cache = config.workdir.join(FORMATTER_CACHE_DIR);
    let cache_existed = cache.exists();

    let mut summary = RunSummary::new(files.len());
    {
        let mut runner = ToolRunner::new(config, paths, confirm, reporter);
        for tool in [Tool::Ordering, Tool::Formatting] {
            runner.reporter().pass_started(tool, files.len());
            for file in &files {
                let outcome = runner.run(tool, file);
                summary.record(file, tool, outcome);
            }
        }
    }

    if !cache_existed {
        remove_formatter_cache(&cache);
    }
    reporter.summary(&summary);

    Ok(summary)
}

/// Removes the cache black created during this run.
fn remove_formatter_cache(cache: &Path) {
    if !cache.exists() {
        return;
    }
    match fs::remove_dir_all(cache) {
        Ok(()) => log::debug!("removed {}", cache.display()),
        Err(e) => log::warn!("could not remove {}: {}", cache.display(), e),
    }
}
