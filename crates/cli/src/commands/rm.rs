use std::{path::PathBuf, process::ExitCode};

use clap::Args;
use fstream_fs::FileSystem;

use crate::commands::{OutputOptions, drain, exit_code};

#[derive(Debug, Args)]
pub struct RmArgs {
    /// Files to delete
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Treat the paths as empty directories instead of files
    #[arg(long, short = 'd')]
    pub dir: bool,

    #[command(flatten)]
    pub output: OutputOptions,
}

pub async fn run(fs: FileSystem, args: RmArgs) -> ExitCode {
    let targets = fs.of(args.paths);
    let pipeline = if args.dir {
        targets.rmdir()
    } else {
        targets.unlink()
    };

    let mut printer = args.output.make_printer(false);
    exit_code("rm", drain(pipeline, printer.as_mut()).await)
}
