use std::{path::PathBuf, process::ExitCode};

use clap::Args;
use fstream_fs::FileSystem;
use fstream_runtime::default_root;

use crate::commands::{OutputOptions, drain, exit_code};

#[derive(Debug, Args)]
pub struct LsArgs {
    /// Directory to list (defaults to the current directory)
    pub dir: Option<PathBuf>,

    /// Only regular files with this extension, dot included (e.g. `.rs`)
    #[arg(long)]
    pub ext: Option<String>,

    #[command(flatten)]
    pub output: OutputOptions,
}

pub async fn run(fs: FileSystem, args: LsArgs) -> ExitCode {
    let dir = args.dir.unwrap_or_else(default_root);
    let mut pipeline = fs.ls(dir);
    if let Some(ext) = args.ext {
        pipeline = pipeline.is_ext(ext);
    }

    let mut printer = args.output.make_printer(false);
    exit_code("ls", drain(pipeline, printer.as_mut()).await)
}
