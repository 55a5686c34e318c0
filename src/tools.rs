//! Adapters around the two external checks.
//!
//! Each invocation is translated into a closed [`ToolOutcome`]; all exit
//! code and output phrase matching lives in this module.

use crate::config::RunConfig;
use crate::exclude::FORMATTER_CACHE_DIR;
use crate::report::Reporter;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub const ORDERING_TOOL: &str = "isort";
pub const FORMATTING_TOOL: &str = "black";

/// Exit status black uses for internal errors, e.g. unparsable input.
const FORMATTER_INTERNAL_ERROR: i32 = 123;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tool {
    #[serde(rename = "isort")]
    Ordering,
    #[serde(rename = "black")]
    Formatting,
}

impl Tool {
    pub fn program(&self) -> &'static str {
        match self {
            Tool::Ordering => ORDERING_TOOL,
            Tool::Formatting => FORMATTING_TOOL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum ToolOutcome {
    Unchanged,
    ChangesApplied,
    ChangesPendingApproval,
    Error(String),
}

impl ToolOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            ToolOutcome::Unchanged => "unchanged",
            ToolOutcome::ChangesApplied => "fixed",
            ToolOutcome::ChangesPendingApproval => "skipped",
            ToolOutcome::Error(_) => "error",
        }
    }
}

/// What the formatter's check run says about a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatVerdict {
    Unchanged,
    WouldReformat,
    Failed(String),
}

/// Reads black's `--check` result. `report` is its stderr only: stdout
/// carries the diff, which quotes the user's own source lines.
pub fn classify_format_output(code: Option<i32>, report: &str) -> FormatVerdict {
    if code == Some(FORMATTER_INTERNAL_ERROR) {
        return FormatVerdict::Failed(first_line(report));
    }
    if report.contains("left unchanged") || report.contains("already formatted") {
        return FormatVerdict::Unchanged;
    }
    if report.contains("would reformat") || report.contains("would be reformatted") {
        return FormatVerdict::WouldReformat;
    }
    match code {
        Some(0) => FormatVerdict::Unchanged,
        Some(1) => FormatVerdict::WouldReformat,
        _ => FormatVerdict::Failed(first_line(report)),
    }
}

fn first_line(output: &str) -> String {
    output
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("no output")
        .to_string()
}

/// Yes/no decision asked before a change is written.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, question: &str) -> bool {
        self(question)
    }
}

/// Asks on stderr and reads the answer from stdin. Only `y`/`yes` count.
/// stdout is left to the summary, which may be JSON.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, question: &str) -> bool {
        eprint!("{} [y/N] ", question);
        if io::stderr().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => is_yes(&answer),
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Resolved locations of the external programs.
#[derive(Debug, Clone)]
pub struct ToolPaths {
    pub ordering: PathBuf,
    pub formatting: PathBuf,
}

impl ToolPaths {
    /// Looks both tools up on `PATH`, failing with the first one missing.
    pub fn detect() -> Result<Self, String> {
        let find = |name: &str| {
            which::which(name)
                .map(|path| {
                    log::debug!("{} found at {}", name, path.display());
                    path
                })
                .map_err(|_| name.to_string())
        };

        Ok(ToolPaths {
            ordering: find(ORDERING_TOOL)?,
            formatting: find(FORMATTING_TOOL)?,
        })
    }

    fn get(&self, tool: Tool) -> &Path {
        match tool {
            Tool::Ordering => &self.ordering,
            Tool::Formatting => &self.formatting,
        }
    }
}

pub struct ToolRunner<'a> {
    config: &'a RunConfig,
    paths: &'a ToolPaths,
    confirm: &'a mut dyn Confirm,
    reporter: &'a mut dyn Reporter,
}

impl<'a> ToolRunner<'a> {
    pub fn new(
        config: &'a RunConfig,
        paths: &'a ToolPaths,
        confirm: &'a mut dyn Confirm,
        reporter: &'a mut dyn Reporter,
    ) -> Self {
        ToolRunner {
            config,
            paths,
            confirm,
            reporter,
        }
    }

    pub fn reporter(&mut self) -> &mut dyn Reporter {
        &mut *self.reporter
    }

    pub fn run(&mut self, tool: Tool, file: &Path) -> ToolOutcome {
        let outcome = match tool {
            Tool::Ordering => self.run_ordering_check(file),
            Tool::Formatting => self.run_format_check(file),
        };
        self.reporter.outcome(tool, file, &outcome);
        outcome
    }

    /// `isort --check-only --diff`: exit 0 is clean, exit 1 means the
    /// imports need reordering, anything else is a failure.
    pub fn run_ordering_check(&mut self, file: &Path) -> ToolOutcome {
        let output = match self.invoke(Tool::Ordering, &["--check-only", "--diff"], file) {
            Ok(output) => output,
            Err(e) => return ToolOutcome::Error(e),
        };

        match output.status.code() {
            Some(0) => ToolOutcome::Unchanged,
            Some(1) => {
                let diff = String::from_utf8_lossy(&output.stdout).into_owned();
                self.resolve_changes(Tool::Ordering, file, &diff, false)
            }
            code => ToolOutcome::Error(format!(
                "{} exited with {}: {}",
                ORDERING_TOOL,
                describe_code(code),
                first_line(&combined_output(&output))
            )),
        }
    }

    /// `black --check --diff`, classified from its exit status and stderr.
    pub fn run_format_check(&mut self, file: &Path) -> ToolOutcome {
        let output = match self.invoke(Tool::Formatting, &["--check", "--diff"], file) {
            Ok(output) => output,
            Err(e) => return ToolOutcome::Error(e),
        };
        let report = String::from_utf8_lossy(&output.stderr);
        let text = combined_output(&output);

        match classify_format_output(output.status.code(), &report) {
            FormatVerdict::Unchanged => ToolOutcome::Unchanged,
            FormatVerdict::WouldReformat => {
                self.resolve_changes(Tool::Formatting, file, &text, true)
            }
            FormatVerdict::Failed(msg) => ToolOutcome::Error(msg),
        }
    }

    fn resolve_changes(
        &mut self,
        tool: Tool,
        file: &Path,
        output: &str,
        always_show: bool,
    ) -> ToolOutcome {
        if always_show || self.config.diff {
            self.reporter.tool_output(tool, file, output);
        }

        if self.config.diff {
            let question = format!("Apply {} changes to {}?", tool.program(), file.display());
            if !self.confirm.confirm(&question) {
                return ToolOutcome::ChangesPendingApproval;
            }
        }

        self.apply(tool, file)
    }

    fn apply(&mut self, tool: Tool, file: &Path) -> ToolOutcome {
        match self.invoke(tool, &[], file) {
            Ok(output) if output.status.success() => ToolOutcome::ChangesApplied,
            Ok(output) => ToolOutcome::Error(format!(
                "{} could not rewrite the file ({}): {}",
                tool.program(),
                describe_code(output.status.code()),
                first_line(&combined_output(&output))
            )),
            Err(e) => ToolOutcome::Error(e),
        }
    }

    fn base_args(&self, tool: Tool) -> Vec<String> {
        let line_length = self.config.line_length.to_string();
        let mut args = match tool {
            Tool::Ordering => vec![
                "--profile".to_string(),
                "black".to_string(),
                "--line-length".to_string(),
                line_length,
            ],
            Tool::Formatting => vec!["--line-length".to_string(), line_length],
        };
        if self.config.verbose {
            args.push("--verbose".to_string());
        }
        args
    }

    fn invoke(&self, tool: Tool, extra: &[&str], file: &Path) -> Result<Output, String> {
        let mut args = self.base_args(tool);
        args.extend(extra.iter().map(|s| s.to_string()));

        log::debug!("{} {} {}", tool.program(), args.join(" "), file.display());

        Command::new(self.paths.get(tool))
            .args(&args)
            .arg(file)
            .current_dir(&self.config.workdir)
            .env(
                "BLACK_CACHE_DIR",
                self.config.workdir.join(FORMATTER_CACHE_DIR),
            )
            .output()
            .map_err(|e| format!("could not run {}: {}", tool.program(), e))
    }
}

fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(c) => format!("status {}", c),
        None => "a signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_unchanged() {
        let out = "All done! ✨ 🍰 ✨\n1 file would be left unchanged.\n";
        assert_eq!(classify_format_output(Some(0), out), FormatVerdict::Unchanged);
        assert_eq!(
            classify_format_output(Some(0), "a.py already formatted"),
            FormatVerdict::Unchanged
        );
    }

    #[test]
    fn test_classify_would_reformat() {
        let out = "would reformat a.py\n\nOh no! 💥 💔 💥\n1 file would be reformatted.\n";
        assert_eq!(classify_format_output(Some(1), out), FormatVerdict::WouldReformat);
    }

    #[test]
    fn test_classify_falls_back_to_exit_status() {
        assert_eq!(classify_format_output(Some(0), ""), FormatVerdict::Unchanged);
        assert_eq!(classify_format_output(Some(1), ""), FormatVerdict::WouldReformat);
    }

    #[test]
    fn test_classify_internal_error() {
        let out = "error: cannot format a.py: Cannot parse: 1:4\n1 file would fail to reformat.\n";
        assert_eq!(
            classify_format_output(Some(123), out),
            FormatVerdict::Failed("error: cannot format a.py: Cannot parse: 1:4".to_string())
        );
    }

    #[test]
    fn test_classify_unknown_output() {
        assert_eq!(
            classify_format_output(Some(2), ""),
            FormatVerdict::Failed("no output".to_string())
        );
    }

    #[test]
    fn test_yes_answers() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES \n"));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no\n"));
        assert!(!is_yes("yep\n"));
    }

    #[test]
    fn test_closure_confirm() {
        let mut asked = Vec::new();
        let mut confirm = |q: &str| {
            asked.push(q.to_string());
            true
        };
        assert!(Confirm::confirm(&mut confirm, "Apply?"));
        assert_eq!(asked, vec!["Apply?".to_string()]);
    }
}
