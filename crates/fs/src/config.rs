use fstream_runtime::{
    DEFAULT_CONCURRENCY, PROGRAM_CONCURRENCY, PROGRAM_FOLLOW_LINKS, env_flag, env_usize,
};

/// Tuning knobs shared by every stage of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsConfig {
    /// Maximum number of records a single stage works on at once.
    /// Larger values overlap more filesystem calls but hold more
    /// in-flight records in memory.
    pub concurrency: usize,
    /// Whether expansion descends into directories reached through a
    /// symbolic link. Off by default; nothing detects link cycles.
    pub follow_links: bool,
}

impl Default for FsConfig {
    fn default() -> Self {
        FsConfig {
            concurrency: DEFAULT_CONCURRENCY,
            follow_links: false,
        }
    }
}

impl FsConfig {
    /// Defaults overridden by `FSTREAM_CONCURRENCY` and `FSTREAM_FOLLOW_LINKS`.
    pub fn from_env() -> Self {
        FsConfig {
            concurrency: env_usize(PROGRAM_CONCURRENCY, DEFAULT_CONCURRENCY),
            follow_links: env_flag(PROGRAM_FOLLOW_LINKS),
        }
    }

    pub fn with_concurrency(self, concurrency: usize) -> Self {
        FsConfig {
            concurrency: concurrency.max(1),
            ..self
        }
    }

    pub fn with_follow_links(self, follow_links: bool) -> Self {
        FsConfig {
            follow_links,
            ..self
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
