//! Directory listing and recursive expansion.

use std::{
    path::{Path, PathBuf},
    pin::Pin,
    task::{Context, Poll},
};

use futures::{
    FutureExt, Stream, StreamExt,
    future::BoxFuture,
    stream::{self, FuturesUnordered},
};
use log::{debug, trace};

use crate::{
    adapter::FileSystem,
    decorate::{Decoration, decorate},
    error::{FsError, Result},
    pipeline::{PathStream, Pipeline},
    record::PathRecord,
};

/// Children of `dir` as undecorated records. A directory that can't be
/// read (gone, not a directory, permission denied) has no children.
pub(crate) async fn list_children(fs: &FileSystem, dir: &Path) -> Vec<PathRecord> {
    match fs.read_dir_raw(dir).await {
        Ok(names) => names
            .into_iter()
            .map(|name| PathRecord::new(dir.join(name)))
            .collect(),
        Err(e) => {
            debug!("[list] treating {:?} as empty: {e}", dir);
            Vec::new()
        }
    }
}

impl FileSystem {
    /// One record per direct child of `dir`. Listing failures yield an
    /// empty pipeline rather than an error.
    pub fn list(&self, dir: impl Into<PathBuf>) -> Pipeline {
        let (fs, dir) = (self.clone(), dir.into());
        let children = async move {
            let records = list_children(&fs, &dir).await;
            stream::iter(records.into_iter().map(Ok::<_, FsError>))
        };
        Pipeline::new(self.clone(), stream::once(children).flatten())
    }

    /// [`FileSystem::list`] with every child stat'ed.
    pub fn ls(&self, dir: impl Into<PathBuf>) -> Pipeline {
        self.list(dir).stats()
    }

    /// Children of `path` if it is a directory; nothing if it is not.
    pub fn dir(&self, path: impl Into<PathBuf>) -> Pipeline {
        self.of([path.into()]).dir()
    }

    /// `root` and everything below it. See [`Pipeline::expand`].
    pub fn expand_dir(&self, root: impl Into<PathBuf>) -> Pipeline {
        self.of([root.into()]).expand()
    }
}

impl Pipeline {
    /// Replace each directory record by its children; other records are
    /// dropped.
    pub fn dir(self) -> Pipeline {
        self.is_directory()
            .flat_map_each(|fs, rec| fs.list(rec.path()))
    }

    /// Recursive traversal.
    ///
    /// Every input record is stat'ed and emitted, then, if it is a
    /// directory, its children are fed back through the same step. Files
    /// and other non-directories are leaves. A directory is always emitted
    /// before any of its descendants; siblings come in no particular order
    /// since up to `concurrency` calls are in flight.
    ///
    /// Directories that can't be listed end their branch quietly. A failed
    /// stat is emitted as an error for that entry and the walk goes on.
    /// Unless `follow_links` is set, a directory reached through a symbolic
    /// link is emitted but not entered.
    pub fn expand(self) -> Pipeline {
        let fs = self.fs().clone();
        let seeds = self.into_stream();
        Pipeline::new(fs.clone(), Expand::new(fs, seeds, Decoration::Stat))
    }

    /// Like [`Pipeline::expand`], but every entry is classified by its link
    /// stat alone. Links are leaves whether or not their target exists, and
    /// only real directories are entered. Records carry `link_stat`, not
    /// `stat`.
    pub(crate) fn expand_unfollowed(self) -> Pipeline {
        let fs = self.fs().clone();
        let seeds = self.into_stream();
        Pipeline::new(fs.clone(), Expand::new(fs, seeds, Decoration::LinkStat))
    }
}

enum Step {
    Visited { record: PathRecord, descend: bool },
    Failed(FsError),
    Listed(Vec<PathRecord>),
}

async fn visit(fs: FileSystem, record: PathRecord) -> Step {
    let record = match decorate(&fs, record, Decoration::Stat).await {
        Ok(rec) => rec,
        Err(e) => return Step::Failed(e),
    };

    let is_dir = record.stat().is_some_and(|s| s.is_directory());
    if !is_dir || fs.config().follow_links {
        return Step::Visited {
            record,
            descend: is_dir,
        };
    }

    match decorate(&fs, record, Decoration::LinkStat).await {
        Ok(record) => {
            let descend = !record.link_stat().is_some_and(|s| s.is_symbolic_link());
            if !descend {
                trace!("[expand] not following link {:?}", record.path());
            }
            Step::Visited { record, descend }
        }
        Err(e) => Step::Failed(e),
    }
}

async fn visit_unfollowed(fs: FileSystem, record: PathRecord) -> Step {
    match decorate(&fs, record, Decoration::LinkStat).await {
        Ok(record) => {
            let descend = record.link_stat().is_some_and(|s| s.is_directory());
            Step::Visited { record, descend }
        }
        Err(e) => Step::Failed(e),
    }
}

async fn list(fs: FileSystem, dir: PathBuf) -> Step {
    Step::Listed(list_children(&fs, &dir).await)
}

/// Work-queue traversal behind [`Pipeline::expand`].
///
/// Records waiting to be visited sit on `frontier` (a stack, so the walk
/// goes deep before wide and the queue stays small); `in_flight` holds at
/// most `concurrency` stat and list calls. Nothing here recurses on the
/// call stack, so nesting depth only costs frontier entries. `inspect`
/// picks the stat that decides whether an entry is entered.
struct Expand {
    fs: FileSystem,
    inspect: Decoration,
    seeds: Option<PathStream>,
    frontier: Vec<PathRecord>,
    in_flight: FuturesUnordered<BoxFuture<'static, Step>>,
}

impl Expand {
    fn new(fs: FileSystem, seeds: PathStream, inspect: Decoration) -> Self {
        Expand {
            fs,
            inspect,
            seeds: Some(seeds),
            frontier: Vec::new(),
            in_flight: FuturesUnordered::new(),
        }
    }

    fn has_room(&self) -> bool {
        self.in_flight.len() < self.fs.config().concurrency
    }

    fn start_visit(&mut self, record: PathRecord) {
        let fs = self.fs.clone();
        let step = match self.inspect {
            Decoration::LinkStat => visit_unfollowed(fs, record).boxed(),
            _ => visit(fs, record).boxed(),
        };
        self.in_flight.push(step);
    }
}

impl Stream for Expand {
    type Item = Result<PathRecord>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            while this.has_room() {
                let Some(record) = this.frontier.pop() else {
                    break;
                };
                this.start_visit(record);
            }

            while this.has_room() {
                let Some(seeds) = this.seeds.as_mut() else {
                    break;
                };
                match seeds.poll_next_unpin(cx) {
                    Poll::Ready(Some(Ok(record))) => this.start_visit(record),
                    Poll::Ready(Some(Err(e))) => return Poll::Ready(Some(Err(e))),
                    Poll::Ready(None) => this.seeds = None,
                    Poll::Pending => break,
                }
            }

            match this.in_flight.poll_next_unpin(cx) {
                Poll::Ready(Some(Step::Visited { record, descend })) => {
                    if descend {
                        let dir = record.path().to_path_buf();
                        this.in_flight.push(list(this.fs.clone(), dir).boxed());
                    }
                    return Poll::Ready(Some(Ok(record)));
                }
                Poll::Ready(Some(Step::Failed(e))) => return Poll::Ready(Some(Err(e))),
                Poll::Ready(Some(Step::Listed(children))) => {
                    trace!("[expand] {} children queued", children.len());
                    this.frontier.extend(children);
                }
                Poll::Ready(None) => {
                    if !this.frontier.is_empty() {
                        continue;
                    }
                    if this.seeds.is_none() {
                        return Poll::Ready(None);
                    }
                    // Seed stream is pending and has registered the waker.
                    return Poll::Pending;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
#[path = "enumerate_tests.rs"]
mod tests;
