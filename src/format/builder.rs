//! Formats and the builder used to declare them

use super::recipe::{Arg, Recipe};
use crate::domain::{Record, Result, Value};
use tracing::debug;

/// One declared attribute and its recipe
#[derive(Debug, Clone)]
pub struct FormatAttribute {
    pub name: String,
    pub recipe: Recipe,
}

/// Ordered attribute recipes for one type
///
/// Attributes are applied in declaration order, so a computed recipe can
/// read attributes already replaced earlier in the same pass.
#[derive(Debug, Clone)]
pub struct Format {
    type_name: String,
    attributes: Vec<FormatAttribute>,
}

impl Format {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn attributes(&self) -> &[FormatAttribute] {
        &self.attributes
    }

    /// Recipe of the first attribute declared with this name
    pub fn attribute(&self, name: &str) -> Option<&Recipe> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| &attribute.recipe)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Accumulates attribute declarations for a [`Format`]
///
/// Attribute names are open-ended; every method appends one entry and
/// returns the builder for chaining.
///
/// # Examples
///
/// ```
/// use data_cleaner::format::{FormatRegistry, Recipe};
///
/// let mut registry = FormatRegistry::new();
/// registry.declare_format("TopSecret", |f| {
///     f.sequence("name", [Recipe::generator("first_name"), " ".into(), Recipe::generator("last_name")])
///         .generator_with("email", "email", ["test"])
///         .literal("reference", "REDACTED");
/// });
///
/// assert_eq!(registry.format("TopSecret").map(|f| f.len()), Some(3));
/// ```
#[derive(Debug)]
pub struct FormatBuilder {
    type_name: String,
    attributes: Vec<FormatAttribute>,
}

impl FormatBuilder {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes: Vec::new(),
        }
    }

    /// Declare an attribute with any recipe
    pub fn attribute(&mut self, name: impl Into<String>, recipe: impl Into<Recipe>) -> &mut Self {
        let name = name.into();
        if self.attributes.iter().any(|attribute| attribute.name == name) {
            debug!(
                type_name = %self.type_name,
                attribute = %name,
                "Duplicate attribute declared, first declaration wins on lookup"
            );
        }
        self.attributes.push(FormatAttribute {
            name,
            recipe: recipe.into(),
        });
        self
    }

    pub fn literal(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.attribute(name, Recipe::literal(value))
    }

    pub fn generator(&mut self, name: impl Into<String>, generator: impl Into<String>) -> &mut Self {
        self.attribute(name, Recipe::generator(generator))
    }

    pub fn generator_with<A>(
        &mut self,
        name: impl Into<String>,
        generator: impl Into<String>,
        args: impl IntoIterator<Item = A>,
    ) -> &mut Self
    where
        A: Into<Arg>,
    {
        self.attribute(name, Recipe::generator_with(generator, args))
    }

    /// Generator whose argument list ends with a per-record argument
    ///
    /// The static `args` are passed as they are; `compute` does not replace
    /// any of them. Its result is appended as one extra trailing argument,
    /// `Null` when it yields nothing. Use [`Arg::overriding`] to let a
    /// computed value stand in for a specific static argument.
    pub fn generator_with_override<A, F>(
        &mut self,
        name: impl Into<String>,
        generator: impl Into<String>,
        args: impl IntoIterator<Item = A>,
        compute: F,
    ) -> &mut Self
    where
        A: Into<Arg>,
        F: Fn(&dyn Record) -> Result<Value> + Send + Sync + 'static,
    {
        let mut args: Vec<Arg> = args.into_iter().map(Into::into).collect();
        args.push(Arg::deferred(compute));
        self.attribute(name, Recipe::generator_with(generator, args))
    }

    /// Generator whose only argument is a per-record override
    pub fn generator_deferred<F>(
        &mut self,
        name: impl Into<String>,
        generator: impl Into<String>,
        compute: F,
    ) -> &mut Self
    where
        F: Fn(&dyn Record) -> Result<Value> + Send + Sync + 'static,
    {
        self.attribute(name, Recipe::generator_with(generator, [Arg::deferred(compute)]))
    }

    pub fn sequence(&mut self, name: impl Into<String>, items: impl IntoIterator<Item = Recipe>) -> &mut Self {
        self.attribute(name, Recipe::sequence(items))
    }

    pub fn computed<F>(&mut self, name: impl Into<String>, compute: F) -> &mut Self
    where
        F: Fn(&dyn Record) -> Result<Value> + Send + Sync + 'static,
    {
        self.attribute(name, Recipe::computed(compute))
    }

    pub fn build(self) -> Format {
        Format {
            type_name: self.type_name,
            attributes: self.attributes,
        }
    }
}
