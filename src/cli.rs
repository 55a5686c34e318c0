use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "lintgate", version)]
#[command(
    about = "Run isort and black over a selection of Python files",
    long_about = None
)]
pub struct Cli {
    #[arg(
        short,
        long,
        num_args = 1..,
        value_name = "TOKEN",
        help = "Files or directories, or one of: all, modified, modified-cached, untracked"
    )]
    pub files: Vec<String>,

    #[arg(short, long, help = "Show each proposed change and ask before applying it")]
    pub diff: bool,

    #[arg(short, long, help = "Verbose tool output and debug logging")]
    pub verbose: bool,

    #[arg(long, value_name = "N", help = "Line length passed to the tools (default: 90)")]
    pub line_length: Option<u32>,

    #[arg(long, help = "Disable colors")]
    pub no_color: bool,

    #[arg(long, help = "Summary format: text, json (default: text)")]
    pub format: Option<String>,
}
