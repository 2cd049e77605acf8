//! Typed access to loosely-typed configuration property maps.
//!
//! Secret-provider plugins receive their configuration as a flat map of
//! dotted property names to loosely typed values. The helpers here chop
//! prefixes off such maps and coerce values to the types plugins expect,
//! promoting string representations of numbers and booleans along the way.

use std::collections::BTreeMap;

use crate::error::PropertyError;
use crate::secret::Secret;

/// A loosely typed configuration property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// A boolean
    Bool(bool),
    /// An integer
    Int(i64),
    /// A string
    String(String),
    /// A resolved secret
    Secret(Secret),
}

/// A flat configuration property map with dotted names.
pub type Properties = BTreeMap<String, PropertyValue>;

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Secret> for PropertyValue {
    fn from(value: Secret) -> Self {
        Self::Secret(value)
    }
}

/// Conversion from a [`PropertyValue`] to a typed configuration value.
///
/// String values are promoted when they parse as the target type, so
/// `"42"` can be read as an integer and `"true"` as a boolean.
pub trait FromProperty: Sized {
    /// Target type name used in error messages.
    const TARGET: &'static str;

    /// Attempts the coercion, returning `None` when the stored value does
    /// not fit the target type.
    fn from_property(value: &PropertyValue) -> Option<Self>;
}

impl FromProperty for bool {
    const TARGET: &'static str = "a boolean";

    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Bool(b) => Some(*b),
            PropertyValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl FromProperty for i64 {
    const TARGET: &'static str = "an integer";

    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Int(i) => Some(*i),
            PropertyValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl FromProperty for i32 {
    const TARGET: &'static str = "an integer";

    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Int(i) => Self::try_from(*i).ok(),
            PropertyValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl FromProperty for String {
    const TARGET: &'static str = "a string";

    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

/// Reads a typed property.
///
/// # Errors
///
/// Returns [`PropertyError::Missing`] when no value is present and
/// [`PropertyError::Unsupported`] when the stored value cannot be coerced.
pub fn get_property<T: FromProperty>(
    properties: &Properties,
    name: &str,
) -> Result<T, PropertyError> {
    let value = properties.get(name).ok_or_else(|| PropertyError::Missing {
        name: name.to_string(),
    })?;
    T::from_property(value).ok_or_else(|| PropertyError::Unsupported {
        name: name.to_string(),
        target: T::TARGET,
    })
}

/// Reads a typed property, falling back to `default` when the property is
/// absent or cannot be coerced.
pub fn get_property_or<T: FromProperty>(properties: &Properties, name: &str, default: T) -> T {
    properties
        .get(name)
        .and_then(T::from_property)
        .unwrap_or(default)
}

/// Reads a property that may hold either a plain string or a [`Secret`],
/// in both cases as a string.
///
/// # Errors
///
/// Returns [`PropertyError::Missing`] when no value is present and
/// [`PropertyError::Unsupported`] for non-string, non-secret values.
pub fn get_secret_as_string(properties: &Properties, name: &str) -> Result<String, PropertyError> {
    match properties.get(name) {
        Some(PropertyValue::Secret(secret)) => Ok(secret.as_str().into_owned()),
        Some(PropertyValue::String(s)) => Ok(s.clone()),
        Some(_) => Err(PropertyError::Unsupported {
            name: name.to_string(),
            target: "a string or secret",
        }),
        None => Err(PropertyError::Missing {
            name: name.to_string(),
        }),
    }
}

/// Like [`get_secret_as_string`], falling back to `default` when the
/// property is absent.
///
/// # Errors
///
/// Returns [`PropertyError::Unsupported`] for non-string, non-secret
/// values.
pub fn get_secret_as_string_or(
    properties: &Properties,
    name: &str,
    default: &str,
) -> Result<String, PropertyError> {
    match get_secret_as_string(properties, name) {
        Err(PropertyError::Missing { .. }) => Ok(default.to_string()),
        other => other,
    }
}

/// Returns the entries whose names start with `prefix` followed by a dot,
/// with that lead chopped off. Non-matching entries are dropped.
#[must_use]
pub fn remove_prefix(properties: &Properties, prefix: &str) -> Properties {
    let prefix = format!("{prefix}.");
    properties
        .iter()
        .filter_map(|(name, value)| {
            name.strip_prefix(&prefix)
                .map(|rest| (rest.to_string(), value.clone()))
        })
        .collect()
}
