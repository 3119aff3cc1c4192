//! Dynamic attribute values
//!
//! [`Value`] is the currency passed between records, recipes and generators.
//! Its [`Display`](std::fmt::Display) output is the string form used when a
//! sequence recipe concatenates its parts.

use super::errors::CleanerError;
use super::result::Result;
use chrono::NaiveDate;
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single attribute value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
}

impl Value {
    /// Returns true for [`Value::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrows the text of a [`Value::Text`]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Consumes a [`Value::Text`] and returns its string
    pub fn into_text(self) -> Option<String> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Date(_) => "date",
        }
    }

    /// Converts into a JSON scalar; dates become ISO strings
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Date(d) => serde_json::Value::String(d.format(DATE_FORMAT).to_string()),
        }
    }

    /// Converts a JSON scalar. Arrays and objects are rejected.
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Value::Int(i)),
                None => n.as_f64().map(Value::Float).ok_or_else(|| CleanerError::TypeMismatch {
                    expected: "a representable number",
                    found: n.to_string(),
                }),
            },
            serde_json::Value::String(s) => Ok(Value::Text(s.clone())),
            other => Err(CleanerError::TypeMismatch {
                expected: "a JSON scalar",
                found: other.to_string(),
            }),
        }
    }

    fn mismatch(expected: &'static str, found: &Value) -> CleanerError {
        CleanerError::TypeMismatch {
            expected,
            found: found.kind().to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Conversion from a [`Value`] back into a typed struct field
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl FromValue for String {
    /// Any non-null value is accepted through its string form.
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Text(s) => Ok(s),
            Value::Null => Err(Value::mismatch("text", &Value::Null)),
            other => Ok(other.to_string()),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Int(i) => Ok(i),
            Value::Text(ref s) => s.trim().parse().map_err(|_| Value::mismatch("integer", &value)),
            other => Err(Value::mismatch("integer", &other)),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: Value) -> Result<Self> {
        let found = value.kind().to_string();
        let wide = i64::from_value(value)?;
        i32::try_from(wide).map_err(|_| CleanerError::TypeMismatch {
            expected: "a 32-bit integer",
            found: format!("{found} {wide}"),
        })
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float(x) => Ok(x),
            Value::Int(i) => Ok(i as f64),
            other => Err(Value::mismatch("float", &other)),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(Value::mismatch("bool", &other)),
        }
    }
}

impl FromValue for NaiveDate {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Date(d) => Ok(d),
            Value::Text(ref s) => {
                NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| Value::mismatch("date", &value))
            }
            other => Err(Value::mismatch("date", &other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_is_concatenation_form() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from("Ford").to_string(), "Ford");
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(2.0).to_string(), "2.0");
        assert_eq!(Value::from(-3.0).to_string(), "-3.0");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::Float(f64::NAN).to_string(), "NaN");
        let date = NaiveDate::from_ymd_opt(1978, 3, 8).unwrap();
        assert_eq!(Value::from(date).to_string(), "1978-03-08");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<String>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    }

    #[test]
    fn test_string_field_accepts_any_non_null() {
        assert_eq!(String::from_value(Value::Int(7)).unwrap(), "7");
        assert!(String::from_value(Value::Null).is_err());
    }

    #[test]
    fn test_integer_conversions() {
        assert_eq!(i64::from_value(Value::Text(" 41 ".into())).unwrap(), 41);
        assert!(i64::from_value(Value::Text("forty".into())).is_err());
        assert!(i32::from_value(Value::Int(i64::MAX)).is_err());
    }

    #[test]
    fn test_date_from_text() {
        let date = NaiveDate::from_value(Value::Text("2004-04-28".into())).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2004, 4, 28).unwrap());
    }

    #[test]
    fn test_optional_field() {
        assert_eq!(Option::<i64>::from_value(Value::Null).unwrap(), None);
        assert_eq!(Option::<i64>::from_value(Value::Int(3)).unwrap(), Some(3));
    }

    #[test]
    fn test_json_scalars() {
        assert_eq!(Value::from_json(&json!(5)).unwrap(), Value::Int(5));
        assert_eq!(Value::from_json(&json!(1.5)).unwrap(), Value::Float(1.5));
        assert_eq!(Value::from_json(&json!("a")).unwrap(), Value::from("a"));
        assert!(Value::from_json(&json!([1, 2])).is_err());

        let date = NaiveDate::from_ymd_opt(2004, 4, 28).unwrap();
        assert_eq!(Value::Date(date).to_json(), json!("2004-04-28"));
    }
}
