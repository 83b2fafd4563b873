use std::{path::PathBuf, process::ExitCode};

use clap::Args;
use fstream_fs::FileSystem;
use fstream_runtime::default_root;

use crate::commands::{OutputOptions, drain, exit_code};

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Root of the walk (defaults to the current directory)
    pub root: Option<PathBuf>,

    /// Only regular files
    #[arg(long, conflicts_with = "dirs")]
    pub files: bool,

    /// Only directories
    #[arg(long)]
    pub dirs: bool,

    /// Only regular files with this extension, dot included
    #[arg(long, conflicts_with = "dirs")]
    pub ext: Option<String>,

    /// Descend into symlinked directories (no loop detection)
    #[arg(long, short = 'L')]
    pub follow_links: bool,

    #[command(flatten)]
    pub output: OutputOptions,
}

pub async fn run(fs: FileSystem, args: TreeArgs) -> ExitCode {
    let root = args.root.unwrap_or_else(default_root);
    let fs = if args.follow_links {
        let config = fs.config().with_follow_links(true);
        fs.with_config(config)
    } else {
        fs
    };

    let mut pipeline = fs.expand_dir(root);
    if let Some(ext) = args.ext {
        pipeline = pipeline.is_ext(ext);
    } else if args.files {
        pipeline = pipeline.is_file();
    } else if args.dirs {
        pipeline = pipeline.is_directory();
    }

    let mut printer = args.output.make_printer(false);
    exit_code("tree", drain(pipeline, printer.as_mut()).await)
}
