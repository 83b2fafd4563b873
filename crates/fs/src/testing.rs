//! Test utilities shared by the unit tests.

use std::{
    ffi::OsString,
    fs, io,
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;

use crate::{
    adapter::{FileSystem, LocalFs, Primitives},
    stat::StatInfo,
};

/// Per-primitive call counters.
#[derive(Debug, Default)]
pub struct Calls {
    pub stat: AtomicUsize,
    pub lstat: AtomicUsize,
    pub fstat: AtomicUsize,
    pub read_dir: AtomicUsize,
    pub read_file: AtomicUsize,
    pub write_file: AtomicUsize,
    pub create_dir: AtomicUsize,
    pub remove_dir: AtomicUsize,
    pub unlink: AtomicUsize,
}

impl Calls {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// Local filesystem that counts every primitive call.
pub struct CountingFs {
    inner: LocalFs,
    calls: Arc<Calls>,
}

impl CountingFs {
    /// A counting [`FileSystem`] and a handle on its counters.
    pub fn filesystem() -> (FileSystem, Arc<Calls>) {
        let calls = Arc::new(Calls::default());
        let fs = FileSystem::new(CountingFs {
            inner: LocalFs,
            calls: Arc::clone(&calls),
        });
        (fs, calls)
    }

    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Primitives for CountingFs {
    async fn stat(&self, path: &Path) -> io::Result<StatInfo> {
        Self::bump(&self.calls.stat);
        self.inner.stat(path).await
    }

    async fn lstat(&self, path: &Path) -> io::Result<StatInfo> {
        Self::bump(&self.calls.lstat);
        self.inner.lstat(path).await
    }

    async fn fstat(&self, path: &Path) -> io::Result<StatInfo> {
        Self::bump(&self.calls.fstat);
        self.inner.fstat(path).await
    }

    async fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        Self::bump(&self.calls.read_dir);
        self.inner.read_dir(path).await
    }

    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        Self::bump(&self.calls.read_file);
        self.inner.read_file(path).await
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        Self::bump(&self.calls.write_file);
        self.inner.write_file(path, data).await
    }

    async fn create_dir(&self, path: &Path) -> io::Result<()> {
        Self::bump(&self.calls.create_dir);
        self.inner.create_dir(path).await
    }

    async fn remove_dir(&self, path: &Path) -> io::Result<()> {
        Self::bump(&self.calls.remove_dir);
        self.inner.remove_dir(path).await
    }

    async fn unlink(&self, path: &Path) -> io::Result<()> {
        Self::bump(&self.calls.unlink);
        self.inner.unlink(path).await
    }
}

/// Build a tree under `root`. Entries ending in `/` are directories, the
/// rest are files whose contents are their own relative path.
pub fn make_tree(root: &Path, entries: &[&str]) {
    for entry in entries {
        let path = root.join(entry.trim_end_matches('/'));
        if entry.ends_with('/') {
            fs::create_dir_all(&path).expect("create dir");
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("create parent");
            }
            fs::write(&path, entry.as_bytes()).expect("write file");
        }
    }
}
