use std::{path::PathBuf, process::ExitCode};

use clap::Args;
use fstream_fs::FileSystem;

use crate::commands::{OutputOptions, drain, exit_code};

#[derive(Debug, Args)]
pub struct CatArgs {
    /// File, or directory to search below
    pub root: PathBuf,

    /// Only files with this extension, dot included
    #[arg(long)]
    pub ext: Option<String>,

    /// Only look at the direct entries of the root directory
    #[arg(long, short = 'n')]
    pub shallow: bool,

    #[command(flatten)]
    pub output: OutputOptions,
}

pub async fn run(fs: FileSystem, args: CatArgs) -> ExitCode {
    let pipeline = match (args.shallow, args.ext) {
        (true, Some(ext)) => fs.read_files(args.root, ext),
        (true, None) => fs.list(args.root).file(),
        (false, Some(ext)) => fs.expand_files(args.root, ext),
        (false, None) => fs.expand_dir(args.root).file(),
    };

    let mut printer = args.output.make_printer(true);
    exit_code("cat", drain(pipeline, printer.as_mut()).await)
}
