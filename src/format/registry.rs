//! Registry of declared formats and generators
//!
//! The registry is an owned value rather than global state: build it once at
//! startup (or per test), then hand it to a [`Cleaner`](crate::cleaner::Cleaner).
//! It does no locking; hosts that share it across threads wrap it themselves.

use super::builder::{Format, FormatBuilder};
use super::recipe::Recipe;
use crate::config::CleanerConfig;
use crate::domain::{Result, Value};
use crate::generators::faker::{default_generators, shared_rng};
use crate::generators::{Generator, GeneratorLookup};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Mapping from type name to [`Format`] and from name to [`Generator`]
#[derive(Default)]
pub struct FormatRegistry {
    formats: HashMap<String, Format>,
    generators: HashMap<String, Arc<dyn Generator>>,
}

impl FormatRegistry {
    /// Create an empty registry with no formats and no generators
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from configuration
    ///
    /// Registers the default generators (unless disabled) and declares every
    /// format found in the configured format libraries, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if a format library cannot be read or parsed.
    pub fn init(config: &CleanerConfig) -> Result<Self> {
        let mut registry = Self::new();

        if config.generators.defaults {
            registry.register_default_generators(config.generators.seed);
        }

        for path in &config.format_libraries {
            registry.load_format_library(path)?;
        }

        info!(
            formats = registry.formats.len(),
            generators = registry.generators.len(),
            seeded = config.generators.seed.is_some(),
            "Format registry initialized"
        );

        Ok(registry)
    }

    /// Register the faker-backed generators, seeded when `seed` is given
    pub fn register_default_generators(&mut self, seed: Option<u64>) {
        let rng = shared_rng(seed);
        for (name, generator) in default_generators(&rng) {
            self.insert_generator(name, generator);
        }
    }

    /// Remove every format and generator
    pub fn reset(&mut self) {
        debug!(
            formats = self.formats.len(),
            generators = self.generators.len(),
            "Resetting format registry"
        );
        self.formats.clear();
        self.generators.clear();
    }

    /// Declare the format for `type_name`, replacing any earlier declaration
    pub fn declare_format<F>(&mut self, type_name: impl Into<String>, build: F) -> &Format
    where
        F: FnOnce(&mut FormatBuilder),
    {
        let mut builder = FormatBuilder::new(type_name);
        build(&mut builder);
        self.insert_format(builder.build())
    }

    /// Store a finished format under its type name
    pub fn insert_format(&mut self, format: Format) -> &Format {
        debug!(
            type_name = %format.type_name(),
            attributes = format.len(),
            "Declaring format"
        );

        match self.formats.entry(format.type_name().to_string()) {
            Entry::Occupied(mut slot) => {
                warn!(type_name = %format.type_name(), "Replacing existing format");
                slot.insert(format);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(format),
        }
    }

    pub fn format(&self, type_name: &str) -> Option<&Format> {
        self.formats.get(type_name)
    }

    /// Recipe declared for `attribute` on `type_name`
    pub fn attribute_recipe(&self, type_name: &str, attribute: &str) -> Option<&Recipe> {
        self.format(type_name)?.attribute(attribute)
    }

    /// Remove the format for `type_name`
    pub fn clear_format(&mut self, type_name: &str) -> Option<Format> {
        self.formats.remove(type_name)
    }

    /// Declared type names, sorted
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.formats.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Register a closure as a generator, replacing any earlier one
    pub fn register_generator<F>(&mut self, name: impl Into<String>, generator: F)
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.insert_generator(name, Arc::new(generator));
    }

    /// Register a shared generator, replacing any earlier one
    pub fn insert_generator(&mut self, name: impl Into<String>, generator: Arc<dyn Generator>) {
        let name = name.into();
        if self.generators.insert(name.clone(), generator).is_some() {
            debug!(generator = %name, "Replacing existing generator");
        }
    }

    /// Registered generator names, sorted
    pub fn generator_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.generators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl GeneratorLookup for FormatRegistry {
    fn generator(&self, name: &str) -> Option<&dyn Generator> {
        self.generators.get(name).map(|generator| generator.as_ref())
    }
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("formats", &self.type_names())
            .field("generators", &self.generator_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::faker::DEFAULT_GENERATOR_NAMES;

    #[test]
    fn test_new_registry_is_empty() {
        let registry = FormatRegistry::new();
        assert!(registry.type_names().is_empty());
        assert!(registry.generator_names().is_empty());
    }

    #[test]
    fn test_declare_and_lookup() {
        let mut registry = FormatRegistry::new();
        let format = registry.declare_format("TopSecret", |f| {
            f.literal("name", "Ford Prefect");
        });
        assert_eq!(format.len(), 1);

        assert!(registry.format("TopSecret").is_some());
        assert!(registry.attribute_recipe("TopSecret", "name").is_some());
        assert!(registry.attribute_recipe("TopSecret", "email").is_none());
        assert!(registry.attribute_recipe("Other", "name").is_none());
    }

    #[test]
    fn test_redeclaring_replaces_format() {
        let mut registry = FormatRegistry::new();
        registry.declare_format("TopSecret", |f| {
            f.literal("name", "Ford Prefect").literal("email", "ford@betelgeuse.net");
        });
        registry.declare_format("TopSecret", |f| {
            f.literal("name", "Zaphod");
        });

        assert_eq!(registry.format("TopSecret").map(Format::len), Some(1));
        assert!(registry.attribute_recipe("TopSecret", "email").is_none());
    }

    #[test]
    fn test_clear_format_and_reset() {
        let mut registry = FormatRegistry::new();
        registry.register_default_generators(Some(1));
        registry.declare_format("A", |f| {
            f.literal("x", 1);
        });
        registry.declare_format("B", |f| {
            f.literal("y", 2);
        });

        assert!(registry.clear_format("A").is_some());
        assert_eq!(registry.type_names(), ["B"]);

        registry.reset();
        assert!(registry.type_names().is_empty());
        assert!(registry.generator("first_name").is_none());
    }

    #[test]
    fn test_register_generator_overwrites() {
        let mut registry = FormatRegistry::new();
        registry.register_generator("answer", |_| Ok(Value::Int(41)));
        registry.register_generator("answer", |_| Ok(Value::Int(42)));

        let generator = registry.generator("answer").unwrap();
        assert_eq!(generator.generate(&[]).unwrap(), Value::Int(42));
    }

    #[test]
    fn test_default_generators_registered() {
        let mut registry = FormatRegistry::new();
        registry.register_default_generators(None);
        assert_eq!(registry.generator_names().len(), DEFAULT_GENERATOR_NAMES.len());
    }

    #[test]
    fn test_init_without_defaults() {
        let mut config = CleanerConfig::default();
        config.generators.defaults = false;
        let registry = FormatRegistry::init(&config).unwrap();
        assert!(registry.generator_names().is_empty());
    }
}
