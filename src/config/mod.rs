//! Configuration management
//!
//! TOML configuration with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `DATA_CLEANER_*` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! format_libraries = ["formats/people.toml"]
//!
//! [generators]
//! defaults = true
//! seed = 42
//!
//! [logging]
//! level = "info"
//! json = false
//! local_enabled = true
//! local_path = "${DATA_CLEANER_LOG_DIR}"
//!
//! [audit]
//! enabled = true
//! log_path = "./audit/cleaner.log"
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_str, substitute_env_vars};
pub use schema::{AuditConfig, CleanerConfig, GeneratorConfig, LoggingConfig};
