//! Recipes describing how to produce a substitute value

use crate::domain::{Record, Result, Value};
use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;

/// Callable evaluated against the record being cleaned
pub type RecordFn = Arc<dyn Fn(&dyn Record) -> Result<Value> + Send + Sync>;

/// A generator argument
///
/// `Override` holds a per-record callable. When the callable returns
/// [`Value::Null`] the `fallback` is passed instead; any other value,
/// including `false`, `0` and `""`, replaces it.
#[derive(Clone)]
pub enum Arg {
    Static(Value),
    Override { fallback: Value, compute: RecordFn },
}

impl Arg {
    /// Override argument with no static fallback
    pub fn deferred<F>(compute: F) -> Self
    where
        F: Fn(&dyn Record) -> Result<Value> + Send + Sync + 'static,
    {
        Self::overriding(Value::Null, compute)
    }

    /// Override argument falling back to `fallback` when `compute` yields null
    pub fn overriding<F>(fallback: impl Into<Value>, compute: F) -> Self
    where
        F: Fn(&dyn Record) -> Result<Value> + Send + Sync + 'static,
    {
        Self::Override {
            fallback: fallback.into(),
            compute: Arc::new(compute),
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Override { .. })
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Override { fallback, .. } => f
                .debug_struct("Override")
                .field("fallback", fallback)
                .finish_non_exhaustive(),
        }
    }
}

macro_rules! arg_from_scalar {
    ($($ty:ty),+) => {
        $(impl From<$ty> for Arg {
            fn from(value: $ty) -> Self {
                Arg::Static(Value::from(value))
            }
        })+
    };
}

arg_from_scalar!(Value, &str, String, i64, i32, u32, f64, bool, NaiveDate);

/// How to produce one attribute's substitute value
#[derive(Clone)]
pub enum Recipe {
    /// Constant value used as-is
    Literal(Value),
    /// Named generator called with positional arguments
    Generator { name: String, args: Vec<Arg> },
    /// Parts resolved independently and concatenated as text
    Sequence(Vec<Recipe>),
    /// Arbitrary computation over the record
    Computed(RecordFn),
}

impl Recipe {
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// Generator reference without arguments
    pub fn generator(name: impl Into<String>) -> Self {
        Self::Generator {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn generator_with<A>(name: impl Into<String>, args: impl IntoIterator<Item = A>) -> Self
    where
        A: Into<Arg>,
    {
        Self::Generator {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn sequence(items: impl IntoIterator<Item = Recipe>) -> Self {
        Self::Sequence(items.into_iter().collect())
    }

    pub fn computed<F>(compute: F) -> Self
    where
        F: Fn(&dyn Record) -> Result<Value> + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(compute))
    }

    /// Variant name, for logs and errors
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Literal(_) => "literal",
            Self::Generator { .. } => "generator",
            Self::Sequence(_) => "sequence",
            Self::Computed(_) => "computed",
        }
    }

    /// True when resolving needs a record instance
    pub fn needs_instance(&self) -> bool {
        match self {
            Self::Literal(_) => false,
            Self::Generator { args, .. } => args.iter().any(Arg::is_deferred),
            Self::Sequence(items) => items.iter().any(Recipe::needs_instance),
            Self::Computed(_) => true,
        }
    }
}

impl fmt::Debug for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Generator { name, args } => f
                .debug_struct("Generator")
                .field("name", name)
                .field("args", args)
                .finish(),
            Self::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<Value> for Recipe {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<&str> for Recipe {
    fn from(value: &str) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<String> for Recipe {
    fn from(value: String) -> Self {
        Self::Literal(Value::from(value))
    }
}
