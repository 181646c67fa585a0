use clap::Parser;
use std::process::ExitCode as ProcessExitCode;

use doxref::Settings;
use doxref::cli::commands::{init, resolve, stats};
use doxref::cli::{Cli, Commands};
use doxref::io::ExitCode;

fn load_settings(cli: &Cli) -> Settings {
    let loaded = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    loaded.unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        eprintln!("Using default configuration.");
        Settings::default()
    })
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let settings = load_settings(&cli);
    doxref::logging::init_with_config(&settings.logging);

    match &cli.command {
        Commands::Resolve {
            feed,
            reference,
            kind,
            args,
        } => resolve::run(&settings, feed, reference, *kind, args.as_deref(), cli.compact),
        Commands::Stats { feed } => stats::run(&settings, feed, cli.compact),
        Commands::Config => init::run_config(&settings),
        Commands::Init { force } => Ok(init::run_init(*force)),
    }
}

fn main() -> ProcessExitCode {
    match run(Cli::parse()) {
        Ok(code) => code.into(),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::GeneralError.into()
        }
    }
}
