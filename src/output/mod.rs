pub mod json;

use crate::tools::{Tool, ToolOutcome};
use colored::*;
use serde::Serialize;
use std::error::Error;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid format: {}. Use text or json", s)),
        }
    }
}

#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassCounts {
    pub unchanged: usize,
    pub changes_applied: usize,
    pub changes_pending: usize,
    pub errors: usize,
}

impl PassCounts {
    fn add(&mut self, outcome: &ToolOutcome) {
        match outcome {
            ToolOutcome::Unchanged => self.unchanged += 1,
            ToolOutcome::ChangesApplied => self.changes_applied += 1,
            ToolOutcome::ChangesPendingApproval => self.changes_pending += 1,
            ToolOutcome::Error(_) => self.errors += 1,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct FileResult {
    pub path: String,
    pub tool: Tool,
    pub outcome: ToolOutcome,
}

#[derive(Serialize, Debug, Default)]
pub struct RunSummary {
    pub files: usize,
    pub ordering: PassCounts,
    pub formatting: PassCounts,
    pub results: Vec<FileResult>,
}

impl RunSummary {
    pub fn new(files: usize) -> Self {
        RunSummary {
            files,
            ..RunSummary::default()
        }
    }

    pub fn record(&mut self, file: &Path, tool: Tool, outcome: ToolOutcome) {
        match tool {
            Tool::Ordering => self.ordering.add(&outcome),
            Tool::Formatting => self.formatting.add(&outcome),
        }
        self.results.push(FileResult {
            path: file.display().to_string(),
            tool,
            outcome,
        });
    }

    pub fn errors(&self) -> usize {
        self.ordering.errors + self.formatting.errors
    }
}

pub fn print_summary(
    summary: &RunSummary,
    format: OutputFormat,
    no_color: bool,
) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => json::output_summary(summary),
        OutputFormat::Text => {
            print_text_summary(summary, no_color);
            Ok(())
        }
    }
}

fn print_text_summary(summary: &RunSummary, no_color: bool) {
    println!("# Files: {}", summary.files);
    for (tool, counts) in [
        (Tool::Ordering, &summary.ordering),
        (Tool::Formatting, &summary.formatting),
    ] {
        let line = format!(
            "# {}: {} unchanged, {} changed, {} pending, {} errors",
            tool.program(),
            counts.unchanged,
            counts.changes_applied,
            counts.changes_pending,
            counts.errors
        );
        if no_color || counts.errors == 0 {
            println!("{}", line);
        } else {
            println!("{}", line.red());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("TEXT".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_record_counts_per_pass() {
        let mut summary = RunSummary::new(2);
        summary.record(Path::new("a.py"), Tool::Ordering, ToolOutcome::ChangesApplied);
        summary.record(Path::new("b.py"), Tool::Ordering, ToolOutcome::Unchanged);
        summary.record(
            Path::new("a.py"),
            Tool::Formatting,
            ToolOutcome::Error("boom".to_string()),
        );
        summary.record(
            Path::new("b.py"),
            Tool::Formatting,
            ToolOutcome::ChangesPendingApproval,
        );

        assert_eq!(summary.ordering.changes_applied, 1);
        assert_eq!(summary.ordering.unchanged, 1);
        assert_eq!(summary.formatting.errors, 1);
        assert_eq!(summary.formatting.changes_pending, 1);
        assert_eq!(summary.errors(), 1);
        assert_eq!(summary.results.len(), 4);
    }
}
