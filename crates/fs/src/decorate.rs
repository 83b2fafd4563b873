//! Lazy metadata attachment.
//!
//! A decoration fills one optional slot of a [`PathRecord`]. If the slot is
//! already filled the record is returned as is and no call is made, so
//! stages can ask for `stats()` freely without re-querying the filesystem
//! or seeing a different answer than an earlier stage did.

use crate::{adapter::FileSystem, error::Result, pipeline::Pipeline, record::PathRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decoration {
    /// Metadata following symbolic links
    Stat,
    /// Metadata of the link itself
    LinkStat,
    /// Metadata through an opened handle
    FileStat,
    /// Raw file bytes
    Contents,
}

impl PathRecord {
    pub fn has(&self, kind: Decoration) -> bool {
        match kind {
            Decoration::Stat => self.stat().is_some(),
            Decoration::LinkStat => self.link_stat().is_some(),
            Decoration::FileStat => self.file_stat().is_some(),
            Decoration::Contents => self.contents().is_some(),
        }
    }
}

/// Attach `kind` to `record` unless it is already there. On failure no
/// record is produced, only the error.
pub async fn decorate(fs: &FileSystem, record: PathRecord, kind: Decoration) -> Result<PathRecord> {
    if record.has(kind) {
        return Ok(record);
    }

    match kind {
        Decoration::Stat => {
            let stat = fs.stat_raw(record.path()).await?;
            Ok(record.with_stat(stat))
        }
        Decoration::LinkStat => {
            let stat = fs.lstat_raw(record.path()).await?;
            Ok(record.with_link_stat(stat))
        }
        Decoration::FileStat => {
            let stat = fs.fstat_raw(record.path()).await?;
            Ok(record.with_file_stat(stat))
        }
        Decoration::Contents => {
            let contents = fs.read_raw(record.path()).await?;
            Ok(record.with_contents(contents))
        }
    }
}

impl Pipeline {
    pub fn decorate(self, kind: Decoration) -> Pipeline {
        self.and_then_each(move |fs, rec| async move { decorate(&fs, rec, kind).await })
    }

    pub fn stats(self) -> Pipeline {
        self.decorate(Decoration::Stat)
    }

    pub fn lstats(self) -> Pipeline {
        self.decorate(Decoration::LinkStat)
    }

    pub fn fstats(self) -> Pipeline {
        self.decorate(Decoration::FileStat)
    }
}

#[cfg(test)]
#[path = "decorate_tests.rs"]
mod tests;
