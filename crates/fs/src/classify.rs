use crate::{pipeline::Pipeline, stat::FileKind};

/// Kind filters. Each one stats the records that lack a stat and drops the
/// ones of another kind; dropped records are not errors. Stat failures
/// still come through as errors.
impl Pipeline {
    /// Keep records whose stat kind is one of `mask`.
    pub fn is_kind(self, mask: FileKind) -> Pipeline {
        self.stats()
            .keep(move |rec| rec.stat().is_some_and(|s| s.is_any(mask)))
    }

    pub fn is_file(self) -> Pipeline {
        self.is_kind(FileKind::FILE)
    }

    pub fn is_directory(self) -> Pipeline {
        self.is_kind(FileKind::DIRECTORY)
    }

    pub fn is_socket(self) -> Pipeline {
        self.is_kind(FileKind::SOCKET)
    }

    pub fn is_fifo(self) -> Pipeline {
        self.is_kind(FileKind::FIFO)
    }

    pub fn is_block_device(self) -> Pipeline {
        self.is_kind(FileKind::BLOCK_DEVICE)
    }

    pub fn is_character_device(self) -> Pipeline {
        self.is_kind(FileKind::CHAR_DEVICE)
    }

    /// Uses the link stat, so the link itself is inspected rather than
    /// its target.
    pub fn is_symbolic_link(self) -> Pipeline {
        self.lstats()
            .keep(|rec| rec.link_stat().is_some_and(|s| s.is_symbolic_link()))
    }

    /// Regular files whose extension is exactly `ext`, dot included
    /// (`".rs"`, not `"rs"`).
    pub fn is_ext(self, ext: impl Into<String>) -> Pipeline {
        let ext = ext.into();
        self.is_file().keep(move |rec| rec.extension() == ext)
    }
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
