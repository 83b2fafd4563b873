use std::path::{Path, PathBuf};

use crate::stat::StatInfo;

/// A path plus whatever metadata the pipeline has attached to it so far.
///
/// Records are never mutated in place: every decoration consumes the record
/// and returns a new one carrying the old fields plus the new slot, so
/// sibling records can flow through concurrent stages independently.
#[derive(Debug, Clone, PartialEq)]
pub struct PathRecord {
    path: PathBuf,
    /// File name without its final extension
    name: String,
    /// Final extension including the leading dot, e.g. `.rs`; empty if none
    extension: String,
    /// Parent path; empty for a bare name
    location: PathBuf,
    stat: Option<StatInfo>,
    link_stat: Option<StatInfo>,
    file_stat: Option<StatInfo>,
    contents: Option<Vec<u8>>,
}

impl PathRecord {
    /// Build a record for `path`. An empty path names the current directory.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let mut path = path.into();
        if path.as_os_str().is_empty() {
            path = PathBuf::from(".");
        }
        let (name, extension, location) = derive_parts(&path);

        PathRecord {
            path,
            name,
            extension,
            location,
            stat: None,
            link_stat: None,
            file_stat: None,
            contents: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn stat(&self) -> Option<&StatInfo> {
        self.stat.as_ref()
    }

    pub fn link_stat(&self) -> Option<&StatInfo> {
        self.link_stat.as_ref()
    }

    pub fn file_stat(&self) -> Option<&StatInfo> {
        self.file_stat.as_ref()
    }

    pub fn contents(&self) -> Option<&[u8]> {
        self.contents.as_deref()
    }

    /// Contents as UTF-8, if attached and valid.
    pub fn text(&self) -> Option<&str> {
        self.contents().and_then(|c| std::str::from_utf8(c).ok())
    }

    pub fn into_contents(self) -> Option<Vec<u8>> {
        self.contents
    }

    /// Number of path components, used to order directories bottom-up.
    pub fn depth(&self) -> usize {
        self.path.components().count()
    }

    /// Same record pointed at another path. Derived parts are recomputed
    /// and attached metadata is dropped since it described the old path.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        PathRecord::new(path)
    }

    pub(crate) fn with_stat(self, stat: StatInfo) -> Self {
        PathRecord {
            stat: Some(stat),
            ..self
        }
    }

    pub(crate) fn with_link_stat(self, link_stat: StatInfo) -> Self {
        PathRecord {
            link_stat: Some(link_stat),
            ..self
        }
    }

    pub(crate) fn with_file_stat(self, file_stat: StatInfo) -> Self {
        PathRecord {
            file_stat: Some(file_stat),
            ..self
        }
    }

    pub(crate) fn with_contents(self, contents: Vec<u8>) -> Self {
        PathRecord {
            contents: Some(contents),
            ..self
        }
    }
}

impl From<PathBuf> for PathRecord {
    fn from(path: PathBuf) -> Self {
        PathRecord::new(path)
    }
}

impl From<&Path> for PathRecord {
    fn from(path: &Path) -> Self {
        PathRecord::new(path)
    }
}

impl From<&str> for PathRecord {
    fn from(path: &str) -> Self {
        PathRecord::new(path)
    }
}

fn derive_parts(path: &Path) -> (String, String, PathBuf) {
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let location = path.parent().map(Path::to_path_buf).unwrap_or_default();

    (name, extension, location)
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
