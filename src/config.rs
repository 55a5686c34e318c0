use crate::cli::Cli;
use crate::git;
use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_LINE_LENGTH: u32 = 90;
pub const REPO_CONFIG_FILE: &str = ".lintgate.toml";

#[derive(Debug)]
pub enum ConfigError {
    InvalidConfiguration(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidConfiguration(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings read from `~/.lintgate/config.toml` and `.lintgate.toml`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub line_length: Option<u32>,
    pub diff: Option<bool>,
    pub verbose: Option<bool>,
    pub no_color: Option<bool>,
    pub format: Option<String>,
}

impl Config {
    pub fn merge(&mut self, other: Config) {
        if other.line_length.is_some() {
            self.line_length = other.line_length;
        }
        if other.diff.is_some() {
            self.diff = other.diff;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.no_color.is_some() {
            self.no_color = other.no_color;
        }
        if other.format.is_some() {
            self.format = other.format;
        }
    }
}

/// Everything one run needs, fixed before any file is touched.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub selection: Vec<String>,
    pub diff: bool,
    pub verbose: bool,
    pub line_length: u32,
    pub no_color: bool,
    pub format: OutputFormat,
    pub workdir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            selection: Vec::new(),
            diff: false,
            verbose: false,
            line_length: DEFAULT_LINE_LENGTH,
            no_color: false,
            format: OutputFormat::Text,
            workdir: PathBuf::from("."),
        }
    }
}

impl RunConfig {
    /// Command-line values win over config files. Flags can only switch
    /// a setting on, so a file that enables `diff` cannot be overridden.
    pub fn build(cli: Cli, file: Config, workdir: PathBuf) -> Result<Self, ConfigError> {
        let format = match cli.format.or(file.format) {
            Some(fmt) => fmt
                .parse::<OutputFormat>()
                .map_err(ConfigError::InvalidConfiguration)?,
            None => OutputFormat::Text,
        };

        Ok(RunConfig {
            selection: cli.files,
            diff: cli.diff || file.diff.unwrap_or(false),
            verbose: cli.verbose || file.verbose.unwrap_or(false),
            line_length: cli
                .line_length
                .or(file.line_length)
                .unwrap_or(DEFAULT_LINE_LENGTH),
            no_color: cli.no_color || file.no_color.unwrap_or(false),
            format,
            workdir,
        })
    }
}

fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".lintgate").join("config.toml"))
}

fn repo_config_path(workdir: &Path) -> PathBuf {
    match git::repo_root(workdir) {
        Ok(root) => root.join(REPO_CONFIG_FILE),
        Err(_) => workdir.join(REPO_CONFIG_FILE),
    }
}

/// Loads the global file, then the repository file on top of it.
/// Missing files are skipped; malformed ones are an error.
pub fn load_config(workdir: &Path) -> Result<Config, ConfigError> {
    let mut paths = Vec::new();
    if let Some(global) = global_config_path() {
        paths.push(global);
    }
    paths.push(repo_config_path(workdir));

    load_config_files(&paths)
}

pub fn load_config_files(paths: &[PathBuf]) -> Result<Config, ConfigError> {
    let mut config = Config::default();

    for path in paths {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => {
                log::debug!("no config at {}", path.display());
                continue;
            }
        };
        let parsed = toml::from_str::<Config>(&content).map_err(|e| {
            ConfigError::InvalidConfiguration(format!("{}: {}", path.display(), e))
        })?;
        log::debug!("loaded config from {}", path.display());
        config.merge(parsed);
    }

    Ok(config)
}
