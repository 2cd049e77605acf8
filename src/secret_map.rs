//! Resolved secret map with a well-known-role view.

use std::collections::BTreeMap;

use crate::secret::Secret;
use crate::url::SecretUrl;
use crate::well_known::WellKnownSecretKey;

/// The value map of a resolved secret: field names mapped to [`Secret`]s.
///
/// On top of the raw fields, a map can carry a well-known view assigning a
/// [`WellKnownSecretKey`] role to selected fields, populated from the
/// `keymap` mapping extracted by [`SecretUrl::well_known_key_map`].
///
/// # Examples
///
/// ```
/// use secret_url::{Secret, SecretMap, SecretUrl, WellKnownSecretKey};
///
/// let url = SecretUrl::parse("secret://foo/tls?keymap=certificate:tls.crt", false).unwrap();
/// let mut map = SecretMap::from_iter([("tls.crt", Secret::from("---cert---"))]);
/// map.handle_well_known_secret_keys(&url.well_known_key_map().unwrap());
///
/// let cert = map.well_known(WellKnownSecretKey::Certificate).unwrap();
/// assert_eq!(cert.as_str(), "---cert---");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SecretMap {
    secrets: BTreeMap<String, Secret>,
    well_known: BTreeMap<WellKnownSecretKey, Secret>,
}

impl SecretMap {
    /// Creates an empty secret map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the secret stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Secret> {
        self.secrets.get(key)
    }

    /// Returns the secret selected by the URL's key.
    ///
    /// Yields `None` when the URL carries no usable key or the key names no
    /// field in this map.
    #[must_use]
    pub fn get_secret(&self, url: &SecretUrl) -> Option<&Secret> {
        if url.is_key_empty() {
            return None;
        }
        url.key().and_then(|key| self.secrets.get(key))
    }

    /// Returns true if the map holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    /// Returns an iterator over `(field name, secret)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Secret)> {
        self.secrets.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Assigns well-known roles to fields of this map.
    ///
    /// `mapping` associates field names with roles, as produced by
    /// [`SecretUrl::well_known_key_map`]. Field names absent from this map
    /// are ignored.
    pub fn handle_well_known_secret_keys(
        &mut self,
        mapping: &BTreeMap<String, WellKnownSecretKey>,
    ) {
        for (secret_key, role) in mapping {
            if let Some(secret) = self.secrets.get(secret_key) {
                self.well_known.insert(*role, secret.clone());
            }
        }
    }

    /// Returns the secret assigned to a well-known role, if any.
    #[must_use]
    pub fn well_known(&self, role: WellKnownSecretKey) -> Option<&Secret> {
        self.well_known.get(&role)
    }
}

impl<K: Into<String>> FromIterator<(K, Secret)> for SecretMap {
    fn from_iter<I: IntoIterator<Item = (K, Secret)>>(iter: I) -> Self {
        Self {
            secrets: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            well_known: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tls_map() -> SecretMap {
        SecretMap::from_iter([
            ("tls.crt", Secret::from("---cert---")),
            ("tls.key", Secret::from("---key---")),
        ])
    }

    #[test]
    fn get_by_field_name() {
        let map = tls_map();
        assert_eq!(map.get("tls.crt").unwrap().as_str(), "---cert---");
        assert!(map.get("missing").is_none());
        assert_eq!(map.len(), 2);
        assert!(!map.is_empty());
    }

    #[test]
    fn get_secret_uses_url_key() {
        let map = tls_map();

        let url = SecretUrl::parse("secret://foo/tls:tls.key", false).unwrap();
        assert_eq!(map.get_secret(&url).unwrap().as_str(), "---key---");

        let no_key = SecretUrl::parse("secret://foo/tls", false).unwrap();
        assert!(map.get_secret(&no_key).is_none());

        let blank_key = SecretUrl::parse("secret://foo/tls:", false).unwrap();
        assert!(map.get_secret(&blank_key).is_none());
    }

    #[test]
    fn well_known_roles_are_assigned_from_mapping() {
        let url = SecretUrl::parse(
            "secret://foo/tls?keymap=certificate:tls.crt&keymap=private_key:tls.key",
            false,
        )
        .unwrap();
        let mut map = tls_map();
        map.handle_well_known_secret_keys(&url.well_known_key_map().unwrap());

        assert_eq!(
            map.well_known(WellKnownSecretKey::Certificate).unwrap().as_str(),
            "---cert---"
        );
        assert_eq!(
            map.well_known(WellKnownSecretKey::PrivateKey).unwrap().as_str(),
            "---key---"
        );
        assert!(map.well_known(WellKnownSecretKey::Password).is_none());
    }

    #[test]
    fn mapping_to_absent_field_is_ignored() {
        let url =
            SecretUrl::parse("secret://foo/tls?keymap=certificate:nope", false).unwrap();
        let mut map = tls_map();
        map.handle_well_known_secret_keys(&url.well_known_key_map().unwrap());
        assert!(map.well_known(WellKnownSecretKey::Certificate).is_none());
    }
}
