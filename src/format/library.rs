//! Format libraries loaded from TOML
//!
//! A library declares formats without code:
//!
//! ```toml
//! [[formats]]
//! type = "TopSecret"
//!
//! [[formats.attributes]]
//! name = "name"
//! sequence = [{ generator = "first_name" }, " ", { generator = "last_name" }]
//!
//! [[formats.attributes]]
//! name = "rank"
//! literal = "Captain"
//!
//! [[formats.attributes]]
//! name = "age"
//! generator = "number"
//! args = [18, 90]
//! ```
//!
//! Each attribute table holds exactly one of `literal`, `generator` or
//! `sequence`. Sequence items are bare strings (literals) or nested recipe
//! tables. Computed recipes and override arguments need code and have no
//! TOML form.

use super::builder::{Format, FormatBuilder};
use super::recipe::{Arg, Recipe};
use super::registry::FormatRegistry;
use crate::domain::{CleanerError, Result, Value};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct FormatLibrary {
    #[serde(default)]
    formats: Vec<FormatSpec>,
}

#[derive(Debug, Deserialize)]
struct FormatSpec {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    attributes: Vec<AttributeSpec>,
}

#[derive(Debug, Deserialize)]
struct AttributeSpec {
    name: String,
    #[serde(flatten)]
    recipe: RecipeSpec,
}

#[derive(Debug, Default, Deserialize)]
struct RecipeSpec {
    literal: Option<ScalarSpec>,
    generator: Option<String>,
    #[serde(default)]
    args: Vec<ScalarSpec>,
    sequence: Option<Vec<SequenceItem>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScalarSpec {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SequenceItem {
    Text(String),
    Recipe(RecipeSpec),
}

impl From<ScalarSpec> for Value {
    fn from(spec: ScalarSpec) -> Self {
        match spec {
            ScalarSpec::Bool(b) => Value::Bool(b),
            ScalarSpec::Int(i) => Value::Int(i),
            ScalarSpec::Float(f) => Value::Float(f),
            ScalarSpec::Text(s) => Value::Text(s),
        }
    }
}

impl RecipeSpec {
    fn into_recipe(self, location: &str) -> Result<Recipe> {
        let RecipeSpec {
            literal,
            generator,
            args,
            sequence,
        } = self;

        match (literal, generator, sequence) {
            (Some(value), None, None) if args.is_empty() => Ok(Recipe::Literal(value.into())),
            (None, Some(name), None) => Ok(Recipe::Generator {
                name,
                args: args.into_iter().map(|arg| Arg::Static(arg.into())).collect(),
            }),
            (None, None, Some(items)) if args.is_empty() => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| match item {
                    SequenceItem::Text(text) => Ok(Recipe::Literal(Value::Text(text))),
                    SequenceItem::Recipe(spec) => spec.into_recipe(&format!("{location}[{index}]")),
                })
                .collect::<Result<Vec<_>>>()
                .map(Recipe::Sequence),
            (Some(_), None, None) | (None, None, Some(_)) => Err(CleanerError::Configuration(
                format!("'args' is only allowed with 'generator' in {location}"),
            )),
            _ => Err(CleanerError::Configuration(format!(
                "Expected exactly one of 'literal', 'generator' or 'sequence' in {location}"
            ))),
        }
    }
}

impl FormatSpec {
    fn into_format(self) -> Result<Format> {
        if self.type_name.trim().is_empty() {
            return Err(CleanerError::Configuration(
                "Format type name cannot be empty".to_string(),
            ));
        }

        let mut builder = FormatBuilder::new(self.type_name.clone());
        for attribute in self.attributes {
            let location = format!("{}.{}", self.type_name, attribute.name);
            let recipe = attribute.recipe.into_recipe(&location)?;
            builder.attribute(attribute.name, recipe);
        }
        Ok(builder.build())
    }
}

/// Parse a TOML format library into formats, in document order
///
/// # Errors
///
/// Returns [`CleanerError::Configuration`] if the document is not valid TOML
/// or an attribute table is malformed.
pub fn parse_format_library(content: &str) -> Result<Vec<Format>> {
    let library: FormatLibrary = toml::from_str(content).map_err(|e| {
        CleanerError::Configuration(format!("Failed to parse format library: {e}"))
    })?;

    library
        .formats
        .into_iter()
        .map(FormatSpec::into_format)
        .collect()
}

impl FormatRegistry {
    /// Declare every format in the TOML library at `path`
    ///
    /// Returns the number of formats declared. Earlier declarations of the
    /// same types are replaced.
    pub fn load_format_library(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CleanerError::Configuration(format!(
                "Failed to read format library {}: {e}",
                path.display()
            ))
        })?;

        let count = self.load_format_library_str(&content)?;
        info!(path = %path.display(), formats = count, "Loaded format library");
        Ok(count)
    }

    /// Declare every format in a TOML library document
    ///
    /// Nothing is declared unless the whole document is valid.
    pub fn load_format_library_str(&mut self, content: &str) -> Result<usize> {
        let formats = parse_format_library(content)?;
        let count = formats.len();
        for format in formats {
            self.insert_format(format);
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIBRARY: &str = r#"
[[formats]]
type = "TopSecret"

[[formats.attributes]]
name = "name"
sequence = [{ generator = "first_name" }, " ", { generator = "last_name" }]

[[formats.attributes]]
name = "rank"
literal = "Captain"

[[formats.attributes]]
name = "age"
generator = "number"
args = [18, 90]

[[formats.attributes]]
name = "active"
literal = false
"#;

    #[test]
    fn test_parse_library() {
        let formats = parse_format_library(LIBRARY).unwrap();
        assert_eq!(formats.len(), 1);

        let format = &formats[0];
        assert_eq!(format.type_name(), "TopSecret");
        assert_eq!(format.len(), 4);

        match format.attribute("name") {
            Some(Recipe::Sequence(items)) => {
                assert_eq!(items.len(), 3);
                assert!(matches!(&items[1], Recipe::Literal(Value::Text(s)) if s == " "));
            }
            other => panic!("unexpected recipe {other:?}"),
        }

        match format.attribute("age") {
            Some(Recipe::Generator { name, args }) => {
                assert_eq!(name, "number");
                assert!(matches!(args[0], Arg::Static(Value::Int(18))));
                assert!(matches!(args[1], Arg::Static(Value::Int(90))));
            }
            other => panic!("unexpected recipe {other:?}"),
        }

        assert!(matches!(
            format.attribute("active"),
            Some(Recipe::Literal(Value::Bool(false)))
        ));
    }

    #[test]
    fn test_empty_document_declares_nothing() {
        assert!(parse_format_library("").unwrap().is_empty());
    }

    #[test]
    fn test_attribute_with_two_recipes_is_rejected() {
        let toml = r#"
[[formats]]
type = "TopSecret"

[[formats.attributes]]
name = "name"
literal = "Ford"
generator = "first_name"
"#;
        let err = parse_format_library(toml).unwrap_err();
        assert!(matches!(err, CleanerError::Configuration(ref msg) if msg.contains("TopSecret.name")));
    }

    #[test]
    fn test_attribute_without_recipe_is_rejected() {
        let toml = r#"
[[formats]]
type = "TopSecret"

[[formats.attributes]]
name = "name"
"#;
        assert!(matches!(
            parse_format_library(toml),
            Err(CleanerError::Configuration(_))
        ));
    }

    #[test]
    fn test_args_on_literal_are_rejected() {
        let toml = r#"
[[formats]]
type = "TopSecret"

[[formats.attributes]]
name = "name"
literal = "Ford"
args = [1]
"#;
        assert!(parse_format_library(toml).is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_format_library("[[formats]\ntype =").unwrap_err();
        assert!(matches!(err, CleanerError::Configuration(_)));
    }

    #[test]
    fn test_load_str_replaces_existing_format() {
        let mut registry = FormatRegistry::new();
        registry.declare_format("TopSecret", |f| {
            f.literal("email", "ford@betelgeuse.net");
        });

        assert_eq!(registry.load_format_library_str(LIBRARY).unwrap(), 1);
        assert!(registry.attribute_recipe("TopSecret", "email").is_none());
        assert!(registry.attribute_recipe("TopSecret", "rank").is_some());
    }

    #[test]
    fn test_load_missing_file() {
        let mut registry = FormatRegistry::new();
        let err = registry
            .load_format_library("/nonexistent/formats.toml")
            .unwrap_err();
        assert!(matches!(err, CleanerError::Configuration(_)));
    }
}
