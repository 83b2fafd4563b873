pub mod cat;
pub mod ls;
pub mod nuke;
pub mod rm;
pub mod tree;
pub mod write;

use std::process::ExitCode;

use clap::{Args, Subcommand};
use fstream_fs::{CancellationToken, Pipeline};
use futures::StreamExt;
use log::{error, warn};

use crate::printer::{ColorChoice, OutputFormat, PrinterConfig, RecordPrinter, Summary, make_printer};

pub use cat::CatArgs;
pub use ls::LsArgs;
pub use nuke::NukeArgs;
pub use rm::RmArgs;
pub use tree::TreeArgs;
pub use write::WriteArgs;

/// Common error type for command handlers
pub type CommandResult<T> = anyhow::Result<T>;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the direct entries of a directory.
    ///
    /// Example:
    ///   fstream ls src
    ///   fstream ls --ext .rs src
    Ls(LsArgs),

    /// Walk a directory tree recursively.
    ///
    /// Example:
    ///   fstream tree --files --ext .toml .
    Tree(TreeArgs),

    /// Print the contents of matching files below a root.
    Cat(CatArgs),

    /// Write a file, creating missing parent directories.
    Write(WriteArgs),

    /// Delete files.
    Rm(RmArgs),

    /// Delete a directory tree.
    Nuke(NukeArgs),
}

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Output results as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// When to use colors: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: String,
}

impl OutputOptions {
    pub fn config(&self, contents: bool) -> PrinterConfig {
        PrinterConfig {
            format: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Human
            },
            color: ColorChoice::parse(&self.color),
            contents,
        }
    }

    pub fn make_printer(&self, contents: bool) -> Box<dyn RecordPrinter> {
        make_printer(self.config(contents))
    }
}

/// Drain `pipeline` into `printer`, stopping early on Ctrl-C.
pub async fn drain(pipeline: Pipeline, printer: &mut dyn RecordPrinter) -> CommandResult<Summary> {
    let token = CancellationToken::new();
    let watcher = {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("[cli] interrupted, cancelling");
                token.cancel();
            }
        })
    };

    let mut summary = Summary::default();
    let mut items = pipeline.cancel_on(token);
    while let Some(item) = items.next().await {
        match item {
            Ok(rec) => {
                summary.records += 1;
                printer.record(&rec)?;
            }
            Err(e) => {
                summary.errors += 1;
                printer.error(&e)?;
            }
        }
    }

    watcher.abort();
    printer.finish(summary)?;
    Ok(summary)
}

/// Map a command outcome to the process exit code.
pub fn exit_code(label: &str, outcome: CommandResult<Summary>) -> ExitCode {
    match outcome {
        Ok(summary) if summary.errors == 0 => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            error!("[{label}] {e:#}");
            eprintln!("[{label}] {e:#}");
            ExitCode::from(2)
        }
    }
}
