use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Args;
use fstream_fs::FileSystem;
use tokio::io::AsyncReadExt;

use crate::commands::{CommandResult, OutputOptions, drain, exit_code};
use crate::printer::Summary;

#[derive(Debug, Args)]
pub struct WriteArgs {
    /// File to write; missing parent directories are created
    pub path: PathBuf,

    /// Contents to write (read from stdin when omitted)
    pub data: Option<String>,

    #[command(flatten)]
    pub output: OutputOptions,
}

pub async fn run(fs: FileSystem, args: WriteArgs) -> ExitCode {
    exit_code("write", execute(fs, args).await)
}

async fn execute(fs: FileSystem, args: WriteArgs) -> CommandResult<Summary> {
    let data = match args.data {
        Some(data) => data.into_bytes(),
        None => {
            let mut buf = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buf)
                .await
                .context("reading stdin")?;
            buf
        }
    };

    let mut printer = args.output.make_printer(false);
    drain(fs.write_file(args.path, data), printer.as_mut()).await
}
