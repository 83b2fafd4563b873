use std::path::{Component, Path, PathBuf};

use futures::{StreamExt, stream};
use log::debug;

use crate::{
    adapter::FileSystem,
    decorate::{Decoration, decorate},
    pipeline::Pipeline,
    record::PathRecord,
};

impl Pipeline {
    /// Regular files with their contents attached. Read failures are
    /// emitted as errors.
    pub fn file(self) -> Pipeline {
        self.is_file()
            .and_then_each(|fs, rec| async move { decorate(&fs, rec, Decoration::Contents).await })
    }

    /// Write one file per record, at `path_of(record)` with `data_of(record)`
    /// as contents, creating missing directories first. Emits the written
    /// records.
    pub fn write_files<P, D>(self, mut path_of: P, mut data_of: D) -> Pipeline
    where
        P: FnMut(&PathRecord) -> PathBuf + Send + 'static,
        D: FnMut(&PathRecord) -> Vec<u8> + Send + 'static,
    {
        self.flat_map_each(move |fs, rec| fs.write_file(path_of(&rec), data_of(&rec)))
    }
}

impl FileSystem {
    /// Files directly in `dir` with extension `ext`, contents attached.
    pub fn read_files(&self, dir: impl Into<PathBuf>, ext: impl Into<String>) -> Pipeline {
        self.list(dir).is_ext(ext).file()
    }

    /// Files anywhere below `root` with extension `ext`, contents attached.
    pub fn expand_files(&self, root: impl Into<PathBuf>, ext: impl Into<String>) -> Pipeline {
        self.expand_dir(root).is_ext(ext).file()
    }

    /// Create every missing ancestor directory of `path`, outermost first,
    /// one at a time. Emits a record per ancestor that exists afterwards and
    /// an error per ancestor that could not be created; existing ones count
    /// as created.
    pub fn make_ancestors(&self, path: impl AsRef<Path>) -> Pipeline {
        let fs = self.clone();
        let dirs = ancestor_dirs(path.as_ref());
        let created = stream::iter(dirs).then(move |dir| {
            let fs = fs.clone();
            async move { fs.mkdir_idempotent(&dir).await.map(|()| PathRecord::new(dir)) }
        });
        Pipeline::new(self.clone(), created)
    }

    /// Write `data` to `path`, creating missing ancestor directories first,
    /// and emit the written record with its contents attached.
    ///
    /// Failures while creating ancestors are ignored; if one of them really
    /// matters the write itself fails and that error is emitted. No byte is
    /// written until every ancestor attempt has resolved.
    ///
    /// Concurrent writes to the same path are not coordinated: the last
    /// write to land wins.
    pub fn write_file(&self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) -> Pipeline {
        let (fs, path, data) = (self.clone(), path.into(), data.into());
        let prepare = self.make_ancestors(&path).best_effort();

        self.single(async move {
            let ready = prepare.count().await;
            debug!("[write] {} ancestor(s) ready for {:?}", ready, path);

            fs.write_raw(&path, &data).await?;
            Ok(PathRecord::new(path).with_contents(data))
        })
    }
}

/// Cumulative ancestor paths of `path`: `a/b/c.txt` gives `a`, `a/b`.
/// A leading `.` is dropped and the filesystem root is never included.
fn ancestor_dirs(path: &Path) -> Vec<PathBuf> {
    let Some(parent) = path.parent() else {
        return Vec::new();
    };

    let mut acc = PathBuf::new();
    let mut dirs = Vec::new();

    for component in parent.components() {
        match component {
            Component::CurDir => {}
            Component::Prefix(_) | Component::RootDir => acc.push(component.as_os_str()),
            Component::ParentDir | Component::Normal(_) => {
                acc.push(component.as_os_str());
                dirs.push(acc.clone());
            }
        }
    }

    dirs
}

#[cfg(test)]
#[path = "file_io_tests.rs"]
mod tests;
