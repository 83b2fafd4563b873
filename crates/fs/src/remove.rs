use std::{cmp::Reverse, collections::BTreeMap, path::PathBuf};

use futures::{StreamExt, stream};
use log::debug;

use crate::{adapter::FileSystem, pipeline::Pipeline, record::PathRecord, stat::StatInfo};

impl Pipeline {
    /// Delete each record's path as a file, emitting the record on success.
    pub fn unlink(self) -> Pipeline {
        self.and_then_each(|fs, rec| async move { fs.unlink_raw(rec.path()).await.map(|()| rec) })
    }

    /// Remove each record's path as an empty directory, emitting the record
    /// on success.
    pub fn rmdir(self) -> Pipeline {
        self.and_then_each(|fs, rec| async move { fs.rmdir_raw(rec.path()).await.map(|()| rec) })
    }
}

impl FileSystem {
    /// Unlink the direct entries of `dir` that are not directories. Entries
    /// are inspected without following links, so a symlink is removed
    /// itself and its target is left alone. With `ext`, only regular files
    /// with that extension are removed.
    pub fn unlink_dir(&self, dir: impl Into<PathBuf>, ext: Option<&str>) -> Pipeline {
        let ext = ext.map(str::to_owned);
        self.list(dir)
            .lstats()
            .keep(move |rec| {
                let Some(stat) = rec.link_stat() else {
                    return false;
                };
                match &ext {
                    Some(ext) => stat.is_file() && rec.extension() == ext,
                    None => !stat.is_directory(),
                }
            })
            .unlink()
    }

    /// Unlink the files of `dir` (see [`FileSystem::unlink_dir`]), then
    /// remove `dir` itself. The removal is only issued after every unlink
    /// has been attempted, and fails with `NotEmpty` if anything is left.
    pub fn clear_dir(&self, dir: impl Into<PathBuf>, ext: Option<&str>) -> Pipeline {
        let dir = dir.into();
        self.unlink_dir(dir.clone(), ext).concat(self.rmdir(dir))
    }

    /// Delete `root` and everything below it.
    ///
    /// The tree is expanded first, then its directories are cleared
    /// deepest level first: every directory at one depth is cleared
    /// (concurrently) before any directory at a shallower depth is
    /// touched, so a parent is only removed after its children. Entries are
    /// classified by link stat and symbolic links are never followed,
    /// whatever the configuration says; a link is unlinked like a file,
    /// including one whose target is gone.
    ///
    /// Emits a record per removed file and directory. Failures are emitted
    /// as errors and the sweep continues.
    pub fn nuke_dir(&self, root: impl Into<PathBuf>) -> Pipeline {
        let fs = self.clone();
        let root: PathBuf = root.into();
        let dirs = fs
            .of([root])
            .expand_unfollowed()
            .keep(|rec| rec.link_stat().is_some_and(StatInfo::is_directory));

        let sweep = async move {
            let (found, errors) = dirs.settle().await;
            debug!(
                "[nuke] {} directories to clear, {} expansion errors",
                found.len(),
                errors.len()
            );

            let limit = fs.config().concurrency;
            let levels = by_depth_descending(found).into_iter().map(move |level| {
                let fs = fs.clone();
                stream::iter(level)
                    .map(move |dir| fs.clear_dir(dir.path(), None).into_stream())
                    .flatten_unordered(limit)
                    .boxed()
            });

            stream::iter(errors.into_iter().map(Err)).chain(stream::iter(levels).flatten())
        };

        Pipeline::new(self.clone(), stream::once(sweep).flatten())
    }
}

/// Group directories by depth, deepest group first.
fn by_depth_descending(dirs: Vec<PathRecord>) -> Vec<Vec<PathRecord>> {
    let mut levels: BTreeMap<Reverse<usize>, Vec<PathRecord>> = BTreeMap::new();
    for dir in dirs {
        levels.entry(Reverse(dir.depth())).or_default().push(dir);
    }
    levels.into_values().collect()
}

#[cfg(test)]
#[path = "remove_tests.rs"]
mod tests;
