//! The chaining surface.
//!
//! A [`Pipeline`] is a lazily evaluated stream of `Result<PathRecord>` paired
//! with the [`FileSystem`] its stages call into. Operators consume a pipeline
//! and hand back a new one, so a traversal reads top to bottom:
//!
//! ```no_run
//! # async fn run() -> fstream_fs::Result<()> {
//! use fstream_fs::FileSystem;
//!
//! let sources = FileSystem::local()
//!     .expand_dir("src")
//!     .is_ext(".rs")
//!     .file()
//!     .collect_records()
//!     .await?;
//! # let _ = sources;
//! # Ok(())
//! # }
//! ```
//!
//! Errors travel down the stream as items. A failing record ends only its
//! own branch; records already scheduled keep flowing and the consumer
//! decides whether one error fails the whole run ([`Pipeline::collect_records`]
//! stops at the first).

use std::{
    future::{self, Future},
    path::PathBuf,
    pin::Pin,
    task::{Context, Poll},
};

use futures::{
    Stream, StreamExt, TryStreamExt,
    future::FutureExt,
    stream::{self, BoxStream},
};
use log::debug;
use tokio_util::sync::CancellationToken;

use crate::{
    adapter::FileSystem,
    error::{FsError, Result},
    record::PathRecord,
};

pub type PathStream = BoxStream<'static, Result<PathRecord>>;

#[must_use = "pipelines do nothing unless polled"]
pub struct Pipeline {
    fs: FileSystem,
    inner: PathStream,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("fs", &self.fs)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    pub fn new<S>(fs: FileSystem, inner: S) -> Self
    where
        S: Stream<Item = Result<PathRecord>> + Send + 'static,
    {
        Pipeline {
            fs,
            inner: inner.boxed(),
        }
    }

    pub fn fs(&self) -> &FileSystem {
        &self.fs
    }

    pub fn into_stream(self) -> PathStream {
        self.inner
    }

    /// Replace the underlying stream, keeping the filesystem handle.
    pub fn lift<S, F>(self, f: F) -> Pipeline
    where
        F: FnOnce(PathStream) -> S,
        S: Stream<Item = Result<PathRecord>> + Send + 'static,
    {
        let Pipeline { fs, inner } = self;
        Pipeline::new(fs, f(inner))
    }

    /// Keep records matching `pred`. Errors pass through untouched.
    pub fn keep<F>(self, mut pred: F) -> Pipeline
    where
        F: FnMut(&PathRecord) -> bool + Send + 'static,
    {
        self.lift(move |inner| inner.try_filter(move |rec| future::ready(pred(rec))))
    }

    /// Run `f` on each record, up to `concurrency` at a time, keeping input
    /// order. A failing call replaces its record with the error.
    pub fn and_then_each<F, Fut>(self, mut f: F) -> Pipeline
    where
        F: FnMut(FileSystem, PathRecord) -> Fut + Send + 'static,
        Fut: Future<Output = Result<PathRecord>> + Send + 'static,
    {
        let fs = self.fs.clone();
        let limit = fs.config().concurrency;
        self.lift(move |inner| {
            inner
                .map(move |item| match item {
                    Ok(rec) => f(fs.clone(), rec).boxed(),
                    Err(e) => future::ready(Err(e)).boxed(),
                })
                .buffered(limit)
        })
    }

    /// Replace each record by the pipeline `f` builds for it. Up to
    /// `concurrency` inner pipelines run at once and their items interleave.
    pub fn flat_map_each<F>(self, mut f: F) -> Pipeline
    where
        F: FnMut(FileSystem, PathRecord) -> Pipeline + Send + 'static,
    {
        let fs = self.fs.clone();
        let limit = fs.config().concurrency;
        self.lift(move |inner| {
            inner
                .map(move |item| match item {
                    Ok(rec) => f(fs.clone(), rec).into_stream(),
                    Err(e) => stream::once(future::ready(Err(e))).boxed(),
                })
                .flatten_unordered(limit)
        })
    }

    /// Everything from `self`, then everything from `next`. `next` is not
    /// polled until `self` has finished.
    pub fn concat(self, next: Pipeline) -> Pipeline {
        self.lift(move |inner| inner.chain(next.into_stream()))
    }

    /// Items of both pipelines as they become ready.
    pub fn merge(self, other: Pipeline) -> Pipeline {
        self.lift(move |inner| stream::select(inner, other.into_stream()))
    }

    /// Resume-next boundary: errors are logged and dropped, records pass.
    pub fn best_effort(self) -> Pipeline {
        self.lift(|inner| {
            inner.filter_map(|item| {
                future::ready(match item {
                    Ok(rec) => Some(Ok(rec)),
                    Err(e) => {
                        debug!("[best-effort] ignoring: {e}");
                        None
                    }
                })
            })
        })
    }

    /// Stop as soon as `token` fires, ending with a single
    /// [`FsError::Cancelled`]. Calls already issued finish in the background
    /// and their results are dropped; nothing new is scheduled.
    pub fn cancel_on(self, token: CancellationToken) -> Pipeline {
        self.lift(move |inner| {
            let stopped = token.clone();
            inner
                .take_until(token.cancelled_owned())
                .chain(stream::once(async move { stopped.is_cancelled() }).filter_map(
                    |cancelled| future::ready(cancelled.then_some(Err(FsError::Cancelled))),
                ))
        })
    }

    /// Drain into a vector, failing on the first error.
    pub async fn collect_records(self) -> Result<Vec<PathRecord>> {
        self.inner.try_collect().await
    }

    /// Drain into the paths of the emitted records, failing on the first error.
    pub async fn paths(self) -> Result<Vec<PathBuf>> {
        self.inner
            .map_ok(|rec| rec.path().to_path_buf())
            .try_collect()
            .await
    }

    /// Drain, keeping records and errors apart.
    pub async fn settle(self) -> (Vec<PathRecord>, Vec<FsError>) {
        let mut records = Vec::new();
        let mut errors = Vec::new();
        let mut inner = self.inner;
        while let Some(item) = inner.next().await {
            match item {
                Ok(rec) => records.push(rec),
                Err(e) => errors.push(e),
            }
        }
        (records, errors)
    }
}

impl Stream for Pipeline {
    type Item = Result<PathRecord>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
