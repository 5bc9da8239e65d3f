use anyhow::Result;
use clap::Parser;

use pdfmux::cli::{Cli, Commands};
use pdfmux::commands;
use pdfmux::status::ConsoleStatus;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut status = ConsoleStatus;

    match cli.command {
        Commands::Merge { inputs, output } => {
            commands::merge::run(&inputs, &output, &mut status)?;
        }
        Commands::Extract {
            path,
            pages,
            output,
        } => {
            commands::extract::run(&path, &pages, &output, &mut status)?;
        }
        Commands::Images { inputs, output } => {
            commands::images::run(&inputs, &output, &mut status)?;
        }
    }

    Ok(())
}
