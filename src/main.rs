use clap::error::ErrorKind;
use clap::Parser;
use lintgate::{load_config, Cli, ConsoleReporter, RunConfig, StdinConfirm};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let workdir = std::env::current_dir()?;
    let file_config = load_config(&workdir)?;
    let config = RunConfig::build(cli, file_config, workdir)?;

    let mut reporter = ConsoleReporter::new(config.format, config.no_color);
    let mut confirm = StdinConfirm;
    lintgate::run(&config, &mut reporter, &mut confirm)?;

    Ok(())
}
