use anyhow::Result;
use clap::Parser;
use command::Command;

mod args;
mod command;

/// Compress files and directories into zstd archives, and extract them again.
///
/// Directories are stored as a tar stream compressed with zstd, single files as a bare zstd
/// stream.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    Cli::parse().command.run()
}
