use std::process::ExitCode;

use clap::Parser;
use fstream_fs::FileSystem;

mod commands;
mod printer;

use commands::Command;
use fstream_runtime::logging;

#[derive(Debug, Parser)]
#[command(
    name = "fstream",
    version,
    about = "Stream-based filesystem walking and manipulation",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    let fs = FileSystem::local();
    match cli.command {
        Command::Ls(args) => commands::ls::run(fs, args).await,
        Command::Tree(args) => commands::tree::run(fs, args).await,
        Command::Cat(args) => commands::cat::run(fs, args).await,
        Command::Write(args) => commands::write::run(fs, args).await,
        Command::Rm(args) => commands::rm::run(fs, args).await,
        Command::Nuke(args) => commands::nuke::run(fs, args).await,
    }
}
