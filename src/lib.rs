// Data Cleaner - Record anonymization with declared substitute formats
// Copyright (c) 2025 Data Cleaner Contributors
// Licensed under the MIT License

//! # Data Cleaner
//!
//! Replace selected attributes of structured records with synthetic values,
//! leaving everything else untouched. Intended for test fixtures, bug
//! reports and data exports that must be shared without personal data.
//!
//! ## Architecture
//!
//! - [`domain`] - Values, the [`Record`](domain::Record) object model and errors
//! - [`format`] - Recipes, formats and the [`FormatRegistry`](format::FormatRegistry)
//! - [`generators`] - The generator capability and faker-backed defaults
//! - [`cleaner`] - The recipe [`Resolver`](cleaner::Resolver) and the [`Cleaner`](cleaner::Cleaner)
//! - [`audit`] - Fingerprints and the audit trail
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use data_cleaner::cleaner::Cleaner;
//! use data_cleaner::format::{FormatRegistry, Recipe};
//! use data_cleaner::impl_record;
//!
//! #[derive(Debug, Clone)]
//! struct TopSecret {
//!     name: String,
//!     email: String,
//!     planet: String,
//! }
//!
//! impl_record!(TopSecret { name, email, planet });
//!
//! let mut registry = FormatRegistry::new();
//! registry.register_default_generators(Some(42));
//! registry.declare_format("TopSecret", |f| {
//!     f.sequence("name", [Recipe::generator("first_name"), " ".into(), Recipe::generator("last_name")])
//!         .generator_deferred("email", "email", |record| Ok(record.get("name").unwrap_or_default()));
//! });
//!
//! let agent = TopSecret {
//!     name: "Arthur Dent".to_string(),
//!     email: "arthur@earth.net".to_string(),
//!     planet: "Earth".to_string(),
//! };
//! let cleaned = Cleaner::new(&registry).clean(&agent)?;
//!
//! assert_ne!(cleaned.name, agent.name);
//! assert_eq!(cleaned.planet, "Earth");
//! # Ok::<(), data_cleaner::domain::CleanerError>(())
//! ```
//!
//! ## Override arguments
//!
//! A generator argument may be computed from the record being cleaned. The
//! computed value replaces the static one unless it is [`Value::Null`](domain::Value::Null);
//! `false`, `0` and `""` are real values and do override.
//!
//! ## Configuration
//!
//! [`FormatRegistry::init`](format::FormatRegistry::init) builds a registry
//! from a [`CleanerConfig`](config::CleanerConfig), typically loaded with
//! [`config::load_config`], registering the default generators and every
//! format in the configured TOML format libraries.

pub mod audit;
pub mod cleaner;
pub mod config;
pub mod domain;
pub mod format;
pub mod generators;
pub mod logging;
