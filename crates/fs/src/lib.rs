//! Composable, asynchronous filesystem pipelines.
//!
//! Start from a [`FileSystem`], get a [`Pipeline`] of [`PathRecord`]s from a
//! source (`of`, `list`, `expand_dir`, a single primitive), narrow it with
//! kind filters and finish with reads, writes or removals. Records pick up
//! metadata as they go and each stage only queries what is still missing.

mod adapter;
mod classify;
mod config;
mod decorate;
mod enumerate;
mod error;
mod file_io;
mod pipeline;
mod record;
mod remove;
mod stat;

#[cfg(test)]
mod testing;

pub use adapter::{FileSystem, LocalFs, Primitives};
pub use config::FsConfig;
pub use decorate::{Decoration, decorate};
pub use error::{FsError, Op, Result};
pub use pipeline::{PathStream, Pipeline};
pub use record::PathRecord;
pub use stat::{FileKind, StatInfo};
pub use tokio_util::sync::CancellationToken;
