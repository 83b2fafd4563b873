mod config;
pub mod logging;

pub use config::{
    DEFAULT_CONCURRENCY, PROGRAM_CONCURRENCY, PROGRAM_FOLLOW_LINKS, PROGRAM_LOG_LEVEL,
    PROGRAM_NAME, default_root, env_flag, env_usize,
};

pub use logging::init;
