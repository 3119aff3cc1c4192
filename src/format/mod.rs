//! Format declarations
//!
//! A [`Format`] lists, per attribute, the [`Recipe`] that produces its
//! substitute value. Formats live in a [`FormatRegistry`] together with the
//! generators their recipes refer to.

pub mod builder;
pub mod library;
pub mod recipe;
pub mod registry;

pub use builder::{Format, FormatAttribute, FormatBuilder};
pub use library::parse_format_library;
pub use recipe::{Arg, Recipe, RecordFn};
pub use registry::FormatRegistry;
