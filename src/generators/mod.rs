//! Generator capability
//!
//! A generator is a named callable producing a synthetic value from a list
//! of positional arguments. The resolver only sees generators through the
//! [`GeneratorLookup`] trait, so any provider can stand in for the
//! faker-backed defaults in [`faker`].

pub mod faker;

use crate::domain::{CleanerError, Result, Value};

/// Trait for synthetic value generators
pub trait Generator: Send + Sync {
    /// Produce a value from positional arguments
    fn generate(&self, args: &[Value]) -> Result<Value>;
}

impl<F> Generator for F
where
    F: Fn(&[Value]) -> Result<Value> + Send + Sync,
{
    fn generate(&self, args: &[Value]) -> Result<Value> {
        self(args)
    }
}

/// Lookup from generator name to generator
pub trait GeneratorLookup {
    fn generator(&self, name: &str) -> Option<&dyn Generator>;
}

/// Reads an optional integer argument; `Null` or a missing position yields `None`
pub fn int_arg(generator: &str, args: &[Value], index: usize) -> Result<Option<i64>> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Int(i)) => Ok(Some(*i)),
        Some(other) => Err(CleanerError::invalid_argument(
            generator,
            format!("argument {index} must be an integer, got {}", other.kind()),
        )),
    }
}

/// Reads an optional text argument; non-text scalars use their string form
pub fn text_arg(args: &[Value], index: usize) -> Option<String> {
    match args.get(index) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.to_string()),
    }
}

/// Reads an inclusive `[min, max]` pair with defaults
pub fn range_args(
    generator: &str,
    args: &[Value],
    default_min: i64,
    default_max: i64,
) -> Result<(i64, i64)> {
    let min = int_arg(generator, args, 0)?.unwrap_or(default_min);
    let max = int_arg(generator, args, 1)?.unwrap_or(default_max.max(min));
    if min > max {
        return Err(CleanerError::invalid_argument(
            generator,
            format!("minimum {min} is greater than maximum {max}"),
        ));
    }
    Ok((min, max))
}
