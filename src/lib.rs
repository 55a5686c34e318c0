pub mod cli;
pub mod config;
pub mod exclude;
pub mod git;
pub mod output;
pub mod report;
pub mod run;
pub mod select;
pub mod tools;

#[cfg(all(test, unix))]
mod test_support;

pub use cli::Cli;
pub use config::{load_config, Config, RunConfig};
pub use exclude::is_excluded;
pub use output::{OutputFormat, RunSummary};
pub use report::{ConsoleReporter, Reporter};
pub use run::{run, RunError};
pub use select::{select, SelectError, SelectionMode};
pub use tools::{Confirm, StdinConfirm, Tool, ToolOutcome, ToolRunner};
