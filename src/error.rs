//! Error types for secret URL parsing and its collaborators.

use std::fmt;

/// Error raised when a string does not follow the secret URL grammar.
///
/// The message restates the canonical format so the caller does not have to
/// re-derive the grammar from documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    /// The input that failed to parse
    pub input: String,
}

impl FormatError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "secret URL '{}' should have the following format \
             secret://<provider>/<path or name>[:<key>][?option=value1&option=value2]",
            self.input
        )
    }
}

impl std::error::Error for FormatError {}

/// Error raised when a `keymap` query parameter entry is malformed.
///
/// Raised lazily by [`SecretUrl::well_known_key_map`], not during initial
/// parsing: an entry must split on `:` into exactly two non-blank parts.
///
/// [`SecretUrl::well_known_key_map`]: crate::SecretUrl::well_known_key_map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMappingError {
    /// The offending `keymap` entry
    pub entry: String,
}

impl KeyMappingError {
    pub(crate) fn new(entry: &str) -> Self {
        Self {
            entry: entry.to_string(),
        }
    }
}

impl fmt::Display for KeyMappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "keymap '{}' is not valid", self.entry)
    }
}

impl std::error::Error for KeyMappingError {}

/// Errors raised when validating a [`SecretSpec`].
///
/// [`SecretSpec`]: crate::SecretSpec
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// A spec must either be generated or carry an id, never both or neither
    IdXorGenerated,
    /// A spec must either use an EL key or specify one, never both or neither
    KeyXorElKey,
    /// The environment id is missing or blank
    MissingEnvId,
    /// The uri is missing or blank
    MissingUri,
    /// The uri does not start with the path separator
    UriMissingSeparator,
    /// The name is shorter than the minimum length
    NameTooShort,
    /// The name is not in normalized form
    NameNotNormalized {
        /// The offending name
        name: String,
    },
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdXorGenerated => write!(f, "spec is either generated or contains an id"),
            Self::KeyXorElKey => write!(f, "spec either uses an EL key or specifies one"),
            Self::MissingEnvId => write!(f, "spec must contain an envId"),
            Self::MissingUri => write!(f, "spec must contain a uri"),
            Self::UriMissingSeparator => write!(f, "uri must start with '/'"),
            Self::NameTooShort => write!(f, "spec name min length is 3"),
            Self::NameNotNormalized { name } => {
                write!(f, "spec name '{name}' is not normalized")
            }
        }
    }
}

impl std::error::Error for SpecError {}

/// Errors raised when reading a typed value out of a property map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    /// No value is present for the property
    Missing {
        /// Name of the property
        name: String,
    },
    /// The stored value cannot be coerced to the requested type
    Unsupported {
        /// Name of the property
        name: String,
        /// The requested target type
        target: &'static str,
    },
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { name } => write!(f, "no value for property '{name}'"),
            Self::Unsupported { name, target } => {
                write!(f, "property '{name}' cannot be read as {target}")
            }
        }
    }
}

impl std::error::Error for PropertyError {}

/// Error raised when a base64-encoded secret payload cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretDecodeError {
    /// Why decoding failed
    pub reason: String,
}

impl fmt::Display for SecretDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid base64 secret payload: {}", self.reason)
    }
}

impl std::error::Error for SecretDecodeError {}
