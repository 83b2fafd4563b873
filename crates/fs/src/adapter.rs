//! Single-shot filesystem primitives and the handle pipelines run against.
//!
//! Each primitive is one asynchronous call that either succeeds once or
//! fails once. [`FileSystem`] wraps a [`Primitives`] backend and exposes the
//! calls both as plain async helpers (crate-internal, errors already
//! attributed to an [`Op`] and path) and as one-element [`Pipeline`]s.
//! A pipeline built from a primitive does nothing until it is polled, and
//! polling a fresh one repeats the call.

use std::{
    ffi::OsString,
    future::Future,
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use futures::{StreamExt, stream};
use tokio::fs;

use crate::{
    config::FsConfig,
    error::{FsError, Op, Result},
    pipeline::Pipeline,
    record::PathRecord,
    stat::StatInfo,
};

/// Backend for the raw filesystem calls.
///
/// Implementations must not block the calling task. Errors are reported as
/// plain [`io::Error`]s; attributing them to an operation and path is the
/// caller's job.
#[async_trait]
pub trait Primitives: Send + Sync {
    /// Metadata, following symbolic links.
    async fn stat(&self, path: &Path) -> io::Result<StatInfo>;

    /// Metadata of the link itself, never following it.
    async fn lstat(&self, path: &Path) -> io::Result<StatInfo>;

    /// Metadata queried through an opened handle.
    async fn fstat(&self, path: &Path) -> io::Result<StatInfo>;

    /// Names of the direct children of a directory, in no particular order.
    async fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>>;

    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;

    async fn write_file(&self, path: &Path, data: &[u8]) -> io::Result<()>;

    /// Create one directory. Fails with `AlreadyExists` if the path exists.
    async fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Remove an empty directory.
    async fn remove_dir(&self, path: &Path) -> io::Result<()>;

    async fn unlink(&self, path: &Path) -> io::Result<()>;
}

/// The local filesystem through `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

#[async_trait]
impl Primitives for LocalFs {
    async fn stat(&self, path: &Path) -> io::Result<StatInfo> {
        let meta = fs::metadata(path).await?;
        Ok(StatInfo::from(&meta))
    }

    async fn lstat(&self, path: &Path) -> io::Result<StatInfo> {
        let meta = fs::symlink_metadata(path).await?;
        Ok(StatInfo::from(&meta))
    }

    async fn fstat(&self, path: &Path) -> io::Result<StatInfo> {
        let file = fs::File::open(path).await?;
        let meta = file.metadata().await?;
        Ok(StatInfo::from(&meta))
    }

    async fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let mut names = Vec::new();
        let mut dir = fs::read_dir(path).await?;

        while let Some(entry) = dir.next_entry().await? {
            names.push(entry.file_name());
        }

        Ok(names)
    }

    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path).await
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        fs::write(path, data).await
    }

    async fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path).await
    }

    async fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path).await
    }

    async fn unlink(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path).await
    }
}

/// Cheap, cloneable handle to a backend plus the pipeline configuration.
/// Every pipeline carries one so later stages can issue their own calls.
#[derive(Clone)]
pub struct FileSystem {
    prims: Arc<dyn Primitives>,
    config: FsConfig,
}

impl std::fmt::Debug for FileSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSystem")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// The local filesystem with default configuration.
impl Default for FileSystem {
    fn default() -> Self {
        FileSystem::new(LocalFs)
    }
}

impl FileSystem {
    /// The local filesystem with configuration taken from the environment.
    pub fn local() -> Self {
        FileSystem::new(LocalFs).with_config(FsConfig::from_env())
    }

    pub fn new(prims: impl Primitives + 'static) -> Self {
        FileSystem {
            prims: Arc::new(prims),
            config: FsConfig::default(),
        }
    }

    pub fn with_config(self, config: FsConfig) -> Self {
        FileSystem { config, ..self }
    }

    pub fn config(&self) -> &FsConfig {
        &self.config
    }

    /// Seed a pipeline with one undecorated record per path.
    pub fn of<I, P>(&self, paths: I) -> Pipeline
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let records: Vec<PathRecord> = paths
            .into_iter()
            .map(|p| PathRecord::new(p.into()))
            .collect();
        self.from_records(records)
    }

    pub fn from_records<I>(&self, records: I) -> Pipeline
    where
        I: IntoIterator<Item = PathRecord>,
        I::IntoIter: Send + 'static,
    {
        Pipeline::new(self.clone(), stream::iter(records.into_iter().map(Ok::<_, FsError>)))
    }

    pub fn empty(&self) -> Pipeline {
        Pipeline::new(self.clone(), stream::empty())
    }

    /// Wrap one deferred call as a one-element pipeline.
    pub(crate) fn single<F>(&self, call: F) -> Pipeline
    where
        F: Future<Output = Result<PathRecord>> + Send + 'static,
    {
        Pipeline::new(self.clone(), stream::once(call).boxed())
    }

    /// `path` with its followed stat attached.
    pub fn stat(&self, path: impl Into<PathBuf>) -> Pipeline {
        let (fs, path) = (self.clone(), path.into());
        self.single(async move {
            let stat = fs.stat_raw(&path).await?;
            Ok(PathRecord::new(path).with_stat(stat))
        })
    }

    /// `path` with its link stat attached.
    pub fn lstat(&self, path: impl Into<PathBuf>) -> Pipeline {
        let (fs, path) = (self.clone(), path.into());
        self.single(async move {
            let stat = fs.lstat_raw(&path).await?;
            Ok(PathRecord::new(path).with_link_stat(stat))
        })
    }

    /// `path` with its handle stat attached.
    pub fn fstat(&self, path: impl Into<PathBuf>) -> Pipeline {
        let (fs, path) = (self.clone(), path.into());
        self.single(async move {
            let stat = fs.fstat_raw(&path).await?;
            Ok(PathRecord::new(path).with_file_stat(stat))
        })
    }

    /// Stat each path, in the given order.
    pub fn stats_of<I, P>(&self, paths: I) -> Pipeline
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.of(paths).stats()
    }

    /// `path` with its contents attached. Unlike [`Pipeline::file`] this
    /// does not check that the path is a regular file first.
    pub fn read_file(&self, path: impl Into<PathBuf>) -> Pipeline {
        let (fs, path) = (self.clone(), path.into());
        self.single(async move {
            let contents = fs.read_raw(&path).await?;
            Ok(PathRecord::new(path).with_contents(contents))
        })
    }

    /// Create one directory, completing normally if it already exists.
    pub fn mkdir(&self, path: impl Into<PathBuf>) -> Pipeline {
        let (fs, path) = (self.clone(), path.into());
        self.single(async move {
            fs.mkdir_idempotent(&path).await?;
            Ok(PathRecord::new(path))
        })
    }

    /// Remove an empty directory, emitting its record.
    pub fn rmdir(&self, path: impl Into<PathBuf>) -> Pipeline {
        let (fs, path) = (self.clone(), path.into());
        self.single(async move {
            fs.rmdir_raw(&path).await?;
            Ok(PathRecord::new(path))
        })
    }

    /// Delete one file, emitting its record.
    pub fn unlink(&self, path: impl Into<PathBuf>) -> Pipeline {
        let (fs, path) = (self.clone(), path.into());
        self.single(async move {
            fs.unlink_raw(&path).await?;
            Ok(PathRecord::new(path))
        })
    }

    /// Whether anything exists at `path`, following links.
    pub async fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.prims.stat(path.as_ref()).await.is_ok()
    }

    pub(crate) async fn stat_raw(&self, path: &Path) -> Result<StatInfo> {
        self.prims
            .stat(path)
            .await
            .map_err(|e| FsError::from_io(Op::Stat, path, e))
    }

    pub(crate) async fn lstat_raw(&self, path: &Path) -> Result<StatInfo> {
        self.prims
            .lstat(path)
            .await
            .map_err(|e| FsError::from_io(Op::LinkStat, path, e))
    }

    pub(crate) async fn fstat_raw(&self, path: &Path) -> Result<StatInfo> {
        self.prims
            .fstat(path)
            .await
            .map_err(|e| FsError::from_io(Op::FileStat, path, e))
    }

    pub(crate) async fn read_dir_raw(&self, path: &Path) -> Result<Vec<OsString>> {
        self.prims
            .read_dir(path)
            .await
            .map_err(|e| FsError::from_io(Op::ReadDir, path, e))
    }

    pub(crate) async fn read_raw(&self, path: &Path) -> Result<Vec<u8>> {
        self.prims
            .read_file(path)
            .await
            .map_err(|e| FsError::from_io(Op::ReadFile, path, e))
    }

    pub(crate) async fn write_raw(&self, path: &Path, data: &[u8]) -> Result<()> {
        self.prims
            .write_file(path, data)
            .await
            .map_err(|e| FsError::from_io(Op::WriteFile, path, e))
    }

    pub(crate) async fn mkdir_idempotent(&self, path: &Path) -> Result<()> {
        match self.prims.create_dir(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(FsError::from_io(Op::CreateDir, path, e)),
        }
    }

    pub(crate) async fn rmdir_raw(&self, path: &Path) -> Result<()> {
        self.prims
            .remove_dir(path)
            .await
            .map_err(|e| FsError::from_io(Op::RemoveDir, path, e))
    }

    pub(crate) async fn unlink_raw(&self, path: &Path) -> Result<()> {
        self.prims
            .unlink(path)
            .await
            .map_err(|e| FsError::from_io(Op::Unlink, path, e))
    }
}

#[cfg(test)]
#[path = "adapter_tests.rs"]
mod tests;
