use std::{
    fs::{FileType, Metadata},
    time::{SystemTime, UNIX_EPOCH},
};

use bitflags::bitflags;

bitflags! {
    /// Node type reported by a stat call. A stat result carries exactly one
    /// of these bits, or none for node types the platform can't name.
    /// Combinations are only used as filter masks.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FileKind: u8 {
        const FILE         = 0b0000_0001;
        const DIRECTORY    = 0b0000_0010;
        const SYMLINK      = 0b0000_0100;
        const SOCKET       = 0b0000_1000;
        const FIFO         = 0b0001_0000;
        const BLOCK_DEVICE = 0b0010_0000;
        const CHAR_DEVICE  = 0b0100_0000;
    }
}

impl FileKind {
    pub fn of(ft: FileType) -> Self {
        if ft.is_symlink() {
            return FileKind::SYMLINK;
        }
        if ft.is_dir() {
            return FileKind::DIRECTORY;
        }
        if ft.is_file() {
            return FileKind::FILE;
        }
        special_kind(ft)
    }
}

#[cfg(unix)]
fn special_kind(ft: FileType) -> FileKind {
    use std::os::unix::fs::FileTypeExt;

    if ft.is_socket() {
        FileKind::SOCKET
    } else if ft.is_fifo() {
        FileKind::FIFO
    } else if ft.is_block_device() {
        FileKind::BLOCK_DEVICE
    } else if ft.is_char_device() {
        FileKind::CHAR_DEVICE
    } else {
        FileKind::empty()
    }
}

#[cfg(not(unix))]
fn special_kind(_ft: FileType) -> FileKind {
    FileKind::empty()
}

/// Metadata block attached to a [`crate::PathRecord`] by a stat decoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatInfo {
    pub kind: FileKind,
    /// Size in bytes
    pub size: u64,
    pub modified: Option<SystemTime>,
    pub accessed: Option<SystemTime>,
    /// Creation time; unavailable on many Unix filesystems
    pub created: Option<SystemTime>,
    pub readonly: bool,
    /// Raw permission and type bits (0 off Unix)
    pub mode: u32,
}

impl StatInfo {
    pub fn is_file(&self) -> bool {
        self.kind == FileKind::FILE
    }

    pub fn is_directory(&self) -> bool {
        self.kind == FileKind::DIRECTORY
    }

    pub fn is_symbolic_link(&self) -> bool {
        self.kind == FileKind::SYMLINK
    }

    pub fn is_socket(&self) -> bool {
        self.kind == FileKind::SOCKET
    }

    pub fn is_fifo(&self) -> bool {
        self.kind == FileKind::FIFO
    }

    pub fn is_block_device(&self) -> bool {
        self.kind == FileKind::BLOCK_DEVICE
    }

    pub fn is_character_device(&self) -> bool {
        self.kind == FileKind::CHAR_DEVICE
    }

    /// Whether this node's kind is one of `mask`.
    pub fn is_any(&self, mask: FileKind) -> bool {
        mask.intersects(self.kind)
    }

    /// Modification time as whole seconds since the epoch, 0 when unknown.
    pub fn mtime_secs(&self) -> u64 {
        to_unix_secs(self.modified)
    }
}

impl From<&Metadata> for StatInfo {
    fn from(meta: &Metadata) -> Self {
        StatInfo {
            kind: FileKind::of(meta.file_type()),
            size: meta.len(),
            modified: meta.modified().ok(),
            accessed: meta.accessed().ok(),
            created: meta.created().ok(),
            readonly: meta.permissions().readonly(),
            mode: mode_bits(meta),
        }
    }
}

#[cfg(unix)]
fn mode_bits(meta: &Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    meta.mode()
}

#[cfg(not(unix))]
fn mode_bits(_meta: &Metadata) -> u32 {
    0
}

pub(crate) fn to_unix_secs(t: Option<SystemTime>) -> u64 {
    t.and_then(|tt| tt.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "stat_tests.rs"]
mod tests;
