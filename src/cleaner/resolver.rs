//! Recursive recipe interpreter

use crate::domain::{CleanerError, Record, Result, Value};
use crate::format::{Arg, Recipe};
use crate::generators::GeneratorLookup;
use tracing::trace;

/// Turns a [`Recipe`] into a concrete [`Value`]
///
/// The resolver never mutates the recipe it is given. Errors raised by
/// generators and user callables are returned unchanged.
pub struct Resolver<'a> {
    generators: &'a dyn GeneratorLookup,
}

impl<'a> Resolver<'a> {
    pub fn new(generators: &'a dyn GeneratorLookup) -> Self {
        Self { generators }
    }

    /// Resolve `recipe`, optionally against a record instance
    ///
    /// # Errors
    ///
    /// - [`CleanerError::UnknownGenerator`] if a generator reference is not registered
    /// - [`CleanerError::MissingInstance`] if the recipe reads the instance and none is given
    /// - any error returned by a generator or user callable
    pub fn resolve(&self, recipe: &Recipe, instance: Option<&dyn Record>) -> Result<Value> {
        match recipe {
            Recipe::Literal(value) => Ok(value.clone()),
            Recipe::Sequence(items) => {
                let mut joined = String::new();
                for item in items {
                    joined.push_str(&self.resolve(item, instance)?.to_string());
                }
                Ok(Value::Text(joined))
            }
            Recipe::Generator { name, args } => self.call_generator(name, args, instance),
            Recipe::Computed(compute) => {
                let record = instance.ok_or_else(|| {
                    CleanerError::MissingInstance("a computed recipe".to_string())
                })?;
                compute(record)
            }
        }
    }

    fn call_generator(
        &self,
        name: &str,
        args: &[Arg],
        instance: Option<&dyn Record>,
    ) -> Result<Value> {
        let args = args
            .iter()
            .map(|arg| resolve_arg(name, arg, instance))
            .collect::<Result<Vec<_>>>()?;

        let generator = self
            .generators
            .generator(name)
            .ok_or_else(|| CleanerError::UnknownGenerator(name.to_string()))?;

        trace!(generator = %name, args = args.len(), "Calling generator");
        generator.generate(&args)
    }
}

/// Static arguments are copied; overrides replace the fallback unless they yield null
fn resolve_arg(generator: &str, arg: &Arg, instance: Option<&dyn Record>) -> Result<Value> {
    match arg {
        Arg::Static(value) => Ok(value.clone()),
        Arg::Override { fallback, compute } => {
            let record = instance.ok_or_else(|| {
                CleanerError::MissingInstance(format!(
                    "an override argument of generator '{generator}'"
                ))
            })?;
            match compute(record)? {
                Value::Null => Ok(fallback.clone()),
                value => Ok(value),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DynamicRecord;
    use crate::generators::Generator;
    use std::collections::HashMap;

    struct StubGenerators(HashMap<&'static str, Box<dyn Generator>>);

    impl GeneratorLookup for StubGenerators {
        fn generator(&self, name: &str) -> Option<&dyn Generator> {
            self.0.get(name).map(|generator| generator.as_ref())
        }
    }

    fn stubs() -> StubGenerators {
        let mut generators: HashMap<&'static str, Box<dyn Generator>> = HashMap::new();
        generators.insert("first_name", Box::new(|_: &[Value]| -> Result<Value> { Ok(Value::from("Ford")) }));
        generators.insert("last_name", Box::new(|_: &[Value]| -> Result<Value> { Ok(Value::from("Prefect")) }));
        generators.insert(
            "echo",
            Box::new(|args: &[Value]| -> Result<Value> { Ok(args.first().cloned().unwrap_or_default()) }),
        );
        StubGenerators(generators)
    }

    #[test]
    fn test_literal() {
        let generators = stubs();
        let resolver = Resolver::new(&generators);
        let value = resolver.resolve(&Recipe::literal("V"), None).unwrap();
        assert_eq!(value, Value::from("V"));
    }

    #[test]
    fn test_sequence_concatenates() {
        let generators = stubs();
        let resolver = Resolver::new(&generators);
        let recipe = Recipe::sequence([
            Recipe::generator("first_name"),
            " ".into(),
            Recipe::generator("last_name"),
        ]);
        assert_eq!(resolver.resolve(&recipe, None).unwrap(), Value::from("Ford Prefect"));
    }

    #[test]
    fn test_nested_sequence_and_non_text_items() {
        let generators = stubs();
        let resolver = Resolver::new(&generators);
        let recipe = Recipe::sequence([
            Recipe::sequence([Recipe::generator("first_name"), "-".into()]),
            Recipe::literal(42),
            Recipe::literal(Value::Null),
        ]);
        assert_eq!(resolver.resolve(&recipe, None).unwrap(), Value::from("Ford-42"));
    }

    #[test]
    fn test_empty_sequence_is_empty_text() {
        let generators = stubs();
        let resolver = Resolver::new(&generators);
        let value = resolver.resolve(&Recipe::sequence([]), None).unwrap();
        assert_eq!(value, Value::from(""));
    }

    #[test]
    fn test_sequence_passes_instance_to_nested_overrides() {
        let generators = stubs();
        let resolver = Resolver::new(&generators);
        let recipe = Recipe::sequence([
            Recipe::generator_with("echo", ["test"]),
            ", ".into(),
            Recipe::generator_with(
                "echo",
                [Arg::deferred(|record| Ok(record.get("name").unwrap_or_default()))],
            ),
        ]);
        let record = DynamicRecord::new("TopSecret").with("name", "Arthur");

        assert_eq!(
            resolver.resolve(&recipe, Some(&record)).unwrap(),
            Value::from("test, Arthur")
        );
        assert!(matches!(
            resolver.resolve(&recipe, None),
            Err(CleanerError::MissingInstance(_))
        ));
    }

    #[test]
    fn test_unknown_generator() {
        let generators = stubs();
        let resolver = Resolver::new(&generators);
        let err = resolver.resolve(&Recipe::generator("nope"), None).unwrap_err();
        assert!(matches!(err, CleanerError::UnknownGenerator(ref name) if name == "nope"));
    }

    #[test]
    fn test_override_replaces_and_falls_back() {
        let generators = stubs();
        let resolver = Resolver::new(&generators);
        let recipe = Recipe::generator_with(
            "echo",
            [Arg::overriding("static", |record| Ok(record.get("name").unwrap_or_default()))],
        );

        let named = DynamicRecord::new("TopSecret").with("name", "Arthur");
        assert_eq!(resolver.resolve(&recipe, Some(&named)).unwrap(), Value::from("Arthur"));

        let unnamed = DynamicRecord::new("TopSecret");
        assert_eq!(resolver.resolve(&recipe, Some(&unnamed)).unwrap(), Value::from("static"));
    }

    #[test]
    fn test_recipe_is_not_mutated_by_override() {
        let generators = stubs();
        let resolver = Resolver::new(&generators);
        let recipe = Recipe::generator_with("echo", [Arg::overriding("static", |_| Ok(Value::from("x")))]);
        let record = DynamicRecord::new("TopSecret");

        resolver.resolve(&recipe, Some(&record)).unwrap();
        match &recipe {
            Recipe::Generator { args, .. } => {
                assert!(matches!(&args[0], Arg::Override { fallback, .. } if *fallback == Value::from("static")));
            }
            other => panic!("unexpected recipe {other:?}"),
        }
    }

    #[test]
    fn test_missing_instance() {
        let generators = stubs();
        let resolver = Resolver::new(&generators);

        let computed = Recipe::computed(|_| Ok(Value::Null));
        assert!(matches!(
            resolver.resolve(&computed, None),
            Err(CleanerError::MissingInstance(_))
        ));

        let deferred = Recipe::generator_with("echo", [Arg::deferred(|_| Ok(Value::Null))]);
        assert!(matches!(
            resolver.resolve(&deferred, None),
            Err(CleanerError::MissingInstance(_))
        ));
    }

    #[test]
    fn test_callback_errors_pass_through() {
        let generators = stubs();
        let resolver = Resolver::new(&generators);
        let recipe = Recipe::computed(|_| Err(anyhow::anyhow!("boom").into()));
        let record = DynamicRecord::new("TopSecret");

        let err = resolver.resolve(&recipe, Some(&record)).unwrap_err();
        assert!(matches!(err, CleanerError::Callback(_)));
        assert_eq!(err.to_string(), "boom");
    }
}
