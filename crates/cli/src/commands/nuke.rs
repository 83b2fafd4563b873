use std::{path::PathBuf, process::ExitCode};

use clap::Args;
use fstream_fs::FileSystem;

use crate::commands::{OutputOptions, drain, exit_code};

#[derive(Debug, Args)]
pub struct NukeArgs {
    /// Directory to delete together with everything inside it
    pub dir: PathBuf,

    /// Only delete files with this extension, leaving directories in place
    #[arg(long)]
    pub ext: Option<String>,

    #[command(flatten)]
    pub output: OutputOptions,
}

pub async fn run(fs: FileSystem, args: NukeArgs) -> ExitCode {
    let pipeline = match args.ext {
        Some(ext) => fs.expand_dir(args.dir).is_ext(ext).unlink(),
        None => fs.nuke_dir(args.dir),
    };

    let mut printer = args.output.make_printer(false);
    exit_code("nuke", drain(pipeline, printer.as_mut()).await)
}
