//! Domain models and types for the cleaner.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Values** ([`Value`]) exchanged between records, recipes and generators
//! - **Records** ([`Record`], [`DynamicRecord`], [`JsonRecord`]) the cleaner reads and writes
//! - **Error types** ([`CleanerError`]) and the [`Result`] alias
//!
//! # Records
//!
//! Plain structs become records with [`impl_record!`](crate::impl_record):
//!
//! ```rust
//! use data_cleaner::domain::Record;
//! use data_cleaner::impl_record;
//!
//! #[derive(Clone)]
//! struct TopSecret {
//!     name: String,
//!     secret: i64,
//! }
//!
//! impl_record!(TopSecret { name, secret });
//!
//! let record = TopSecret { name: "Arthur Dent".into(), secret: 42 };
//! assert_eq!(record.text("name").as_deref(), Some("Arthur Dent"));
//! ```

pub mod errors;
pub mod json;
pub mod record;
pub mod result;
pub mod value;

// Re-export commonly used types for convenience
pub use errors::CleanerError;
pub use json::JsonRecord;
pub use record::{DynamicRecord, Record};
pub use result::Result;
pub use value::{FromValue, Value};
