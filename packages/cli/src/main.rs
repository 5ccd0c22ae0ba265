mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{check, render, update, CheckArgs, RenderArgs, UpdateArgs};
use config::Config;
use tracing_subscriber::EnvFilter;

/// eBL CLI - check, render and edit chapters of the cuneiform corpus
#[derive(Parser, Debug)]
#[command(name = "ebl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate chapter files: structure and enclosures of every line
    Check(CheckArgs),

    /// Print a chapter as ATF
    Render(RenderArgs),

    /// Apply an edit to a stored chapter
    Update(UpdateArgs),
}

fn init_tracing(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = Config::load(&cwd)?;

    init_tracing(&config);
    if !config.color {
        colored::control::set_override(false);
    }

    match cli.command {
        Command::Check(args) => check(args),
        Command::Render(args) => render(args),
        Command::Update(args) => update(args, &config, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
