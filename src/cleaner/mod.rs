//! Recipe resolution and record cleaning

pub mod engine;
pub mod resolver;

pub use engine::Cleaner;
pub use resolver::Resolver;
