use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::args::Args;
use crate::commands::Command;
use crate::commands::SortableCommand;
use crate::logging;

/// The main CLI structure that defines the command-line interface
#[derive(Parser)]
#[command(name = "sortable")]
#[command(version, about = "Render sortable table links from template tags")]
pub struct Cli {
    #[command(subcommand)]
    pub command: SortableCommand,

    #[command(flatten)]
    pub args: Args,
}

/// Parse CLI arguments and execute the chosen command
pub fn run(args: Vec<String>) -> Result<ExitCode> {
    let cli = Cli::try_parse_from(args).unwrap_or_else(|e| {
        e.exit();
    });

    let _guard = logging::init_tracing(&cli.args.global);

    cli.command.execute(&cli.args)
}
