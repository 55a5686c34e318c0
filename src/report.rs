use crate::output::{self, OutputFormat, RunSummary};
use crate::tools::{Tool, ToolOutcome};
use colored::*;
use std::path::Path;

/// Sink for everything the run wants the user to see.
pub trait Reporter {
    fn pass_started(&mut self, tool: Tool, files: usize);
    fn tool_output(&mut self, tool: Tool, file: &Path, output: &str);
    fn outcome(&mut self, tool: Tool, file: &Path, outcome: &ToolOutcome);
    fn message(&mut self, text: &str);
    fn summary(&mut self, summary: &RunSummary);
}

pub struct ConsoleReporter {
    format: OutputFormat,
    no_color: bool,
}

impl ConsoleReporter {
    pub fn new(format: OutputFormat, no_color: bool) -> Self {
        ConsoleReporter { format, no_color }
    }

    // JSON mode keeps stdout for the summary document.
    fn line(&self, text: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", text),
            OutputFormat::Json => eprintln!("{}", text),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn pass_started(&mut self, tool: Tool, files: usize) {
        let header = format!("Running {} on {} file(s)", tool.program(), files);
        let header = if self.no_color {
            header
        } else {
            header.blue().bold().to_string()
        };
        self.line(&header);
    }

    fn tool_output(&mut self, _tool: Tool, _file: &Path, output: &str) {
        let trimmed = output.trim_end();
        if !trimmed.is_empty() {
            self.line(trimmed);
        }
    }

    fn outcome(&mut self, _tool: Tool, file: &Path, outcome: &ToolOutcome) {
        let label = outcome.label();
        let label = if self.no_color {
            label.to_string()
        } else {
            match outcome {
                ToolOutcome::Unchanged => label.dimmed().to_string(),
                ToolOutcome::ChangesApplied => label.green().bold().to_string(),
                ToolOutcome::ChangesPendingApproval => label.yellow().to_string(),
                ToolOutcome::Error(_) => label.red().bold().to_string(),
            }
        };

        match outcome {
            ToolOutcome::Error(msg) => self.line(&format!("{} {}: {}", label, file.display(), msg)),
            _ => self.line(&format!("{} {}", label, file.display())),
        }
    }

    fn message(&mut self, text: &str) {
        self.line(text);
    }

    fn summary(&mut self, summary: &RunSummary) {
        if let Err(e) = output::print_summary(summary, self.format, self.no_color) {
            log::warn!("could not print summary: {}", e);
        }
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;
    use std::path::PathBuf;

    #[derive(Debug, Default)]
    pub struct RecordingReporter {
        pub passes: Vec<(Tool, usize)>,
        pub outputs: Vec<(Tool, PathBuf, String)>,
        pub outcomes: Vec<(Tool, PathBuf, ToolOutcome)>,
        pub messages: Vec<String>,
        pub summaries: usize,
    }

    impl Reporter for RecordingReporter {
        fn pass_started(&mut self, tool: Tool, files: usize) {
            self.passes.push((tool, files));
        }

        fn tool_output(&mut self, tool: Tool, file: &Path, output: &str) {
            self.outputs
                .push((tool, file.to_path_buf(), output.to_string()));
        }

        fn outcome(&mut self, tool: Tool, file: &Path, outcome: &ToolOutcome) {
            self.outcomes
                .push((tool, file.to_path_buf(), outcome.clone()));
        }

        fn message(&mut self, text: &str) {
            self.messages.push(text.to_string());
        }

        fn summary(&mut self, _summary: &RunSummary) {
            self.summaries += 1;
        }
    }
}
