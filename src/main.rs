//! plume - package/class diagrams from source trees

mod arch_cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plume")]
#[command(about = "Package and class diagrams from source trees", version)]
struct Cli {
    #[command(subcommand)]
    command: arch_cli::ArchCommands,
}

fn main() -> anyhow::Result<()> {
    // stdout carries the diagram, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    arch_cli::run(cli.command)
}
