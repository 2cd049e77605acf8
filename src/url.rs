//! Main secret URL type.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::constants::{KEY_SEPARATOR, KEYMAP_PARAM, SCHEME, URL_SEPARATOR, WATCH_PARAM};
use crate::error::{FormatError, KeyMappingError};
use crate::query::QueryParams;
use crate::well_known::WellKnownSecretKey;

/// A parsed and validated secret URL.
///
/// A secret URL locates a secret inside a pluggable secret-management
/// backend.
///
/// # Structure
///
/// ```text
/// secret://<provider>/<path or name>[:<key>][?option=value1&option=value2]
/// ```
///
/// - `provider` names the backend plugin the secret lives in.
/// - `path or name` locates the secret within the provider's namespace and
///   may itself contain forward slashes. Empty or blank segments
///   (`//`, `/ /`) are rejected.
/// - `key` optionally names a field inside the secret's value map. It cannot
///   replace the path.
/// - the query string is an ordered multimap; a value-less parameter stores
///   `"true"`.
///
/// The bare-URI form omits `secret://` and starts with a single `/` instead;
/// it is selected with the `is_uri` argument of [`SecretUrl::parse`].
///
/// # Examples
///
/// ```
/// use secret_url::SecretUrl;
///
/// let url = SecretUrl::parse("secret://vault/kv/tls:cert?watch=true", false).unwrap();
/// assert_eq!(url.provider(), "vault");
/// assert_eq!(url.path(), "kv/tls");
/// assert_eq!(url.key(), Some("cert"));
/// assert!(url.is_watchable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretUrl {
    provider: String,
    path: String,
    key: Option<String>,
    query: QueryParams,
    is_uri: bool,
}

impl SecretUrl {
    /// Parses a string into a `SecretUrl`.
    ///
    /// With `is_uri == false` the input must carry the `secret://` scheme.
    /// With `is_uri == true` the scheme is absent and exactly one leading
    /// separator character is stripped instead.
    ///
    /// The input is trimmed before parsing. Query parsing is permissive
    /// (see [`QueryParams::parse`]); the provider/path grammar is strict.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if:
    /// - the scheme is missing when required
    /// - no path separator follows the provider, or nothing follows it
    /// - the provider is blank
    /// - the path is empty before the query marker, blank, or contains a
    ///   blank segment
    pub fn parse(input: &str, is_uri: bool) -> Result<Self, FormatError> {
        let url = input.trim();

        let scheme_less = if is_uri {
            url.get(1..).ok_or_else(|| FormatError::new(url))?
        } else {
            url.strip_prefix(SCHEME).ok_or_else(|| FormatError::new(url))?
        };

        let first_slash = scheme_less
            .find(URL_SEPARATOR)
            .ok_or_else(|| FormatError::new(url))?;
        if first_slash + 1 == scheme_less.len() {
            return Err(FormatError::new(url));
        }

        let provider = scheme_less[..first_slash].trim();
        if provider.is_empty() {
            return Err(FormatError::new(url));
        }

        let rest = &scheme_less[first_slash + 1..];
        // an empty path before the query marker cannot be recovered from
        if rest.starts_with('?') {
            return Err(FormatError::new(url));
        }

        let (raw_path, query) = match rest.find('?') {
            Some(q_idx) => (&rest[..q_idx], QueryParams::parse(&rest[q_idx + 1..])),
            None => (rest, QueryParams::new()),
        };

        let mut path = raw_path.trim();
        // the colon splits off a key only when it qualifies the final
        // segment, not an intermediate one
        let key = match path.rfind(KEY_SEPARATOR) {
            Some(colon_idx)
                if path
                    .rfind(URL_SEPARATOR)
                    .is_none_or(|slash_idx| colon_idx > slash_idx) =>
            {
                let key = path[colon_idx + 1..].to_string();
                path = &path[..colon_idx];
                Some(key)
            }
            _ => None,
        };

        let path = path.trim_end_matches(URL_SEPARATOR);
        if path.trim().is_empty() {
            return Err(FormatError::new(url));
        }
        if path
            .split(URL_SEPARATOR)
            .any(|segment| segment.trim().is_empty())
        {
            return Err(FormatError::new(url));
        }

        Ok(Self {
            provider: provider.to_string(),
            path: path.to_string(),
            key,
            query,
            is_uri,
        })
    }

    /// Returns the provider identifier.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Returns the path locating the secret within its provider, with
    /// trailing separators stripped.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the key within the secret's value map, if one was given.
    ///
    /// A present key may still be blank; use [`Self::is_key_empty`] to
    /// check for usability.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns true if no key was given, or the given key is blank.
    #[must_use]
    pub fn is_key_empty(&self) -> bool {
        self.key
            .as_deref()
            .is_none_or(|key| key.trim().is_empty())
    }

    /// Returns the query parameters.
    #[must_use]
    pub const fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Returns true if the original string used the bare-URI form.
    #[must_use]
    pub const fn is_uri(&self) -> bool {
        self.is_uri
    }

    /// Returns an iterator over the path segments.
    pub fn path_segments(&self) -> impl Iterator<Item = &str> {
        self.path.split(URL_SEPARATOR)
    }

    /// Returns true if the query parameter exists, regardless of value.
    #[must_use]
    pub fn query_param_exists(&self, name: &str) -> bool {
        self.query.contains(name)
    }

    /// Returns true if any value of the query parameter `name` equals
    /// `value` ignoring ASCII case. Absence of the name yields false.
    #[must_use]
    pub fn query_param_equals_ignore_case(&self, name: &str, value: &str) -> bool {
        self.query.equals_ignore_case(name, value)
    }

    /// Returns true if `watch=true` (any case on the value) is present.
    #[must_use]
    pub fn is_watchable(&self) -> bool {
        self.query_param_equals_ignore_case(WATCH_PARAM, "true")
    }

    /// Extracts the well-known key mapping from the `keymap` query
    /// parameters.
    ///
    /// Each entry has the form `<role>:<key in secret>`, for example
    /// `certificate:tls.crt`. Unknown roles are ignored; when two entries
    /// name the same secret key, the later one wins.
    ///
    /// # Errors
    ///
    /// Returns [`KeyMappingError`] when an entry does not split into exactly
    /// two non-blank parts. One malformed entry aborts the whole extraction.
    ///
    /// # Examples
    ///
    /// ```
    /// use secret_url::{SecretUrl, WellKnownSecretKey};
    ///
    /// let url = SecretUrl::parse(
    ///     "secret://foo/bar?keymap=certificate:tls.crt&keymap=private_key:tls.key",
    ///     false,
    /// )
    /// .unwrap();
    /// let mapping = url.well_known_key_map().unwrap();
    /// assert_eq!(mapping["tls.crt"], WellKnownSecretKey::Certificate);
    /// assert_eq!(mapping["tls.key"], WellKnownSecretKey::PrivateKey);
    /// ```
    pub fn well_known_key_map(
        &self,
    ) -> Result<BTreeMap<String, WellKnownSecretKey>, KeyMappingError> {
        let mut mapping = BTreeMap::new();
        for entry in self.query.all(KEYMAP_PARAM) {
            let parts: Vec<&str> = entry.split(KEY_SEPARATOR).collect();
            let (role, secret_key) = match parts.as_slice() {
                [role, secret_key] => (role.trim(), secret_key.trim()),
                _ => return Err(KeyMappingError::new(entry)),
            };
            if role.is_empty() || secret_key.is_empty() {
                return Err(KeyMappingError::new(entry));
            }
            if let Some(well_known) = WellKnownSecretKey::matching(role) {
                // later entries for the same secret key win
                mapping.insert(secret_key.to_string(), well_known);
            }
        }
        Ok(mapping)
    }
}

impl fmt::Display for SecretUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_uri {
            write!(f, "{URL_SEPARATOR}")?;
        } else {
            write!(f, "{SCHEME}")?;
        }
        write!(f, "{}{URL_SEPARATOR}{}", self.provider, self.path)?;
        if let Some(key) = &self.key {
            write!(f, "{KEY_SEPARATOR}{key}")?;
        }
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        Ok(())
    }
}

impl FromStr for SecretUrl {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, false)
    }
}

impl TryFrom<&str> for SecretUrl {
    type Error = FormatError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s, false)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SecretUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SecretUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let is_uri = !s.trim_start().starts_with(SCHEME);
        Self::parse(&s, is_uri).map_err(serde::de::Error::custom)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn serializes_as_canonical_string() {
        let url = SecretUrl::parse("secret://foo/bar:key?watch=true", false).unwrap();
        let json = serde_json::to_string(&url).unwrap();
        assert_eq!(json, "\"secret://foo/bar:key?watch=true\"");
    }

    #[test]
    fn deserializes_both_forms() {
        let url: SecretUrl = serde_json::from_str("\"secret://foo/bar\"").unwrap();
        assert!(!url.is_uri());

        let url: SecretUrl = serde_json::from_str("\"/foo/bar:baz\"").unwrap();
        assert!(url.is_uri());
        assert_eq!(url.key(), Some("baz"));
    }

    #[test]
    fn deserialize_rejects_malformed_input() {
        let result: Result<SecretUrl, _> = serde_json::from_str("\"secret://foo\"");
        assert!(result.is_err());
    }
}
