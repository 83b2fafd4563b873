use std::path::PathBuf;

pub const PROGRAM_NAME: &str = "fstream";
pub const PROGRAM_LOG_LEVEL: &str = "FSTREAM_LOG_LEVEL";
/// Maximum number of records each pipeline stage works on at once.
pub const PROGRAM_CONCURRENCY: &str = "FSTREAM_CONCURRENCY";
/// When set to a truthy value, expansion descends through symlinked directories.
pub const PROGRAM_FOLLOW_LINKS: &str = "FSTREAM_FOLLOW_LINKS";

pub const DEFAULT_CONCURRENCY: usize = 64;

/// Default root for commands that take an optional path.
pub fn default_root() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Read a positive count from the environment, falling back to `default`
/// when the variable is unset, unparsable or zero.
pub fn env_usize(var: &str, default: usize) -> usize {
    std::env::var(var)
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

/// Read a boolean switch from the environment. Accepts `1`, `true`, `yes`
/// and `on` (any case); everything else is `false`.
pub fn env_flag(var: &str) -> bool {
    std::env::var(var)
        .map(|s| {
            matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
