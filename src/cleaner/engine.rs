//! Applies declared formats to records

use super::resolver::Resolver;
use crate::audit::{fingerprint, AuditLogger, AuditReplacement};
use crate::domain::{CleanerError, Record, Result, Value};
use crate::format::{Format, FormatRegistry};
use tracing::{debug, trace};

/// Replaces declared attributes of records with substitute values
///
/// A cleaner borrows the registry; it holds no state of its own beyond an
/// optional [`AuditLogger`].
///
/// # Examples
///
/// ```
/// use data_cleaner::cleaner::Cleaner;
/// use data_cleaner::domain::{DynamicRecord, Record, Value};
/// use data_cleaner::format::FormatRegistry;
///
/// let mut registry = FormatRegistry::new();
/// registry.declare_format("TopSecret", |f| {
///     f.literal("name", "Ford Prefect");
/// });
///
/// let original = DynamicRecord::new("TopSecret")
///     .with("name", "Arthur Dent")
///     .with("planet", "Earth");
/// let cleaned = Cleaner::new(&registry).clean(&original)?;
///
/// assert_eq!(cleaned.get("name"), Some(Value::from("Ford Prefect")));
/// assert_eq!(cleaned.get("planet"), Some(Value::from("Earth")));
/// assert_eq!(original.get("name"), Some(Value::from("Arthur Dent")));
/// # Ok::<(), data_cleaner::domain::CleanerError>(())
/// ```
pub struct Cleaner<'a> {
    registry: &'a FormatRegistry,
    audit: Option<&'a AuditLogger>,
}

impl<'a> Cleaner<'a> {
    pub fn new(registry: &'a FormatRegistry) -> Self {
        Self {
            registry,
            audit: None,
        }
    }

    /// Write an audit entry for every cleaned record
    pub fn with_audit(mut self, audit: &'a AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Clean a copy of `instance`; the original is left untouched
    pub fn clean<R>(&self, instance: &R) -> Result<R>
    where
        R: Record + Clone,
    {
        let mut copy = instance.clone();
        self.clean_in_place(&mut copy)?;
        Ok(copy)
    }

    /// Clean every record of a slice into new copies, stopping at the first error
    pub fn clean_all<R>(&self, instances: &[R]) -> Result<Vec<R>>
    where
        R: Record + Clone,
    {
        let cleaned = instances
            .iter()
            .map(|instance| self.clean(instance))
            .collect::<Result<Vec<_>>>()?;
        debug!(records = cleaned.len(), "Cleaned batch");
        Ok(cleaned)
    }

    /// Replace the declared attributes of `instance` in declaration order
    ///
    /// Each recipe sees the record as left by the attributes before it.
    /// Attributes written before a failure stay written and, with an audit
    /// logger attached, are still recorded in the audit trail.
    ///
    /// # Errors
    ///
    /// Returns [`CleanerError::NoFormatDeclared`] if the record's type has no
    /// format, or the first error raised while resolving or assigning.
    pub fn clean_in_place<'r, R>(&self, instance: &'r mut R) -> Result<&'r mut R>
    where
        R: Record,
    {
        let type_name = instance.type_name().to_string();
        let format = self
            .registry
            .format(&type_name)
            .ok_or_else(|| CleanerError::no_format(type_name.as_str()))?;

        debug!(type_name = %type_name, attributes = format.len(), "Cleaning record");

        let mut replacements = self.audit.map(|_| Vec::with_capacity(format.len()));
        let outcome = self.apply_format(format, &type_name, &mut *instance, replacements.as_mut());

        // Attributes written before a failure are audited too
        if let (Some(audit), Some(replacements)) = (self.audit, replacements.as_deref()) {
            audit.log_record(&type_name, replacements)?;
        }

        outcome?;
        Ok(instance)
    }

    fn apply_format<R>(
        &self,
        format: &Format,
        type_name: &str,
        instance: &mut R,
        mut replacements: Option<&mut Vec<AuditReplacement>>,
    ) -> Result<()>
    where
        R: Record,
    {
        let resolver = Resolver::new(self.registry);

        for attribute in format.attributes() {
            let original = instance.get(&attribute.name).unwrap_or_default();
            let current: &dyn Record = &*instance;
            let value = resolver.resolve(&attribute.recipe, Some(current))?;

            trace!(
                type_name = %type_name,
                attribute = %attribute.name,
                recipe = attribute.recipe.kind(),
                original_hash = %fingerprint(&original),
                "Replacing attribute"
            );

            instance.set(&attribute.name, value)?;
            if let Some(replacements) = replacements.as_deref_mut() {
                replacements.push(AuditReplacement::new(
                    attribute.name.as_str(),
                    attribute.recipe.kind(),
                    &original,
                ));
            }
        }

        Ok(())
    }

    /// Resolve the recipe declared for one attribute of `type_name`
    ///
    /// `instance` is only needed when the recipe reads it.
    ///
    /// # Errors
    ///
    /// - [`CleanerError::NoFormatDeclared`] if the type or attribute is not declared
    /// - [`CleanerError::MissingInstance`] if the recipe needs an instance and none is given
    pub fn clean_value(
        &self,
        attribute: &str,
        type_name: &str,
        instance: Option<&dyn Record>,
    ) -> Result<Value> {
        let format = self
            .registry
            .format(type_name)
            .ok_or_else(|| CleanerError::no_format(type_name))?;

        let recipe = format
            .attribute(attribute)
            .ok_or_else(|| CleanerError::NoFormatDeclared {
                type_name: type_name.to_string(),
                attribute: Some(attribute.to_string()),
            })?;

        Resolver::new(self.registry).resolve(recipe, instance)
    }
}
