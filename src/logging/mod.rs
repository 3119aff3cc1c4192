//! Logging and observability
//!
//! The library itself only emits `tracing` events; hosts that want them on
//! the console or on disk call [`init_logging`] once at startup.
//!
//! ```no_run
//! use data_cleaner::config::LoggingConfig;
//! use data_cleaner::logging::init_logging;
//!
//! let _guard = init_logging(&LoggingConfig::default())?;
//! # Ok::<(), data_cleaner::domain::CleanerError>(())
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};
