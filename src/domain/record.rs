//! Object model for cleanable records
//!
//! The cleaner reads and writes attributes by name through the [`Record`]
//! trait. Copying is left to [`Clone`], which only [`Cleaner::clean`] needs.
//!
//! [`Cleaner::clean`]: crate::cleaner::Cleaner::clean

use super::errors::CleanerError;
use super::result::Result;
use super::value::Value;
use std::collections::BTreeMap;

/// A record whose attributes can be read and written by name
pub trait Record {
    /// Type identifier used to find the record's format
    fn type_name(&self) -> &str;

    /// Reads an attribute, `None` if the record has no such attribute
    fn get(&self, attribute: &str) -> Option<Value>;

    /// Writes an attribute
    fn set(&mut self, attribute: &str, value: Value) -> Result<()>;

    /// Reads a text attribute
    fn text(&self, attribute: &str) -> Option<String> {
        self.get(attribute).and_then(Value::into_text)
    }
}

/// A free-form record holding any attribute name
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
    type_name: String,
    attributes: BTreeMap<String, Value>,
}

impl DynamicRecord {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Sets an attribute, builder style
    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(attribute.into(), value.into());
        self
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }
}

impl Record for DynamicRecord {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn get(&self, attribute: &str) -> Option<Value> {
        self.attributes.get(attribute).cloned()
    }

    fn set(&mut self, attribute: &str, value: Value) -> Result<()> {
        self.attributes.insert(attribute.to_string(), value);
        Ok(())
    }
}

/// Builds the error reported when a struct field rejects a value
#[doc(hidden)]
pub fn invalid_attribute_value(type_name: &str, attribute: &str, err: CleanerError) -> CleanerError {
    CleanerError::InvalidAttributeValue {
        type_name: type_name.to_string(),
        attribute: attribute.to_string(),
        reason: err.to_string(),
    }
}

/// Implements [`Record`] for a plain struct
///
/// Listed fields must be `Clone + Into<Value>` and implement
/// [`FromValue`](crate::domain::FromValue). The type name is the struct's
/// identifier.
///
/// # Examples
///
/// ```
/// use data_cleaner::domain::{Record, Value};
/// use data_cleaner::impl_record;
///
/// #[derive(Clone)]
/// struct Customer {
///     name: String,
///     visits: i64,
/// }
///
/// impl_record!(Customer { name, visits });
///
/// let mut customer = Customer { name: "Arthur Dent".into(), visits: 3 };
/// customer.set("visits", Value::Int(4)).unwrap();
/// assert_eq!(customer.type_name(), "Customer");
/// assert_eq!(customer.get("visits"), Some(Value::Int(4)));
/// assert!(customer.set("address", Value::Null).is_err());
/// ```
#[macro_export]
macro_rules! impl_record {
    ($ty:ident { $($field:ident),+ $(,)? }) => {
        impl $crate::domain::Record for $ty {
            fn type_name(&self) -> &str {
                stringify!($ty)
            }

            fn get(&self, attribute: &str) -> ::std::option::Option<$crate::domain::Value> {
                match attribute {
                    $(stringify!($field) => ::std::option::Option::Some(
                        $crate::domain::Value::from(::std::clone::Clone::clone(&self.$field)),
                    ),)+
                    _ => ::std::option::Option::None,
                }
            }

            fn set(
                &mut self,
                attribute: &str,
                value: $crate::domain::Value,
            ) -> $crate::domain::Result<()> {
                match attribute {
                    $(stringify!($field) => {
                        self.$field = $crate::domain::FromValue::from_value(value).map_err(|err| {
                            $crate::domain::record::invalid_attribute_value(stringify!($ty), attribute, err)
                        })?;
                        ::std::result::Result::Ok(())
                    })+
                    _ => ::std::result::Result::Err($crate::domain::CleanerError::UnknownAttribute {
                        type_name: stringify!($ty).to_string(),
                        attribute: attribute.to_string(),
                    }),
                }
            }
        }
    };
}
