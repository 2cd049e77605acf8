//! Plugin seam for secret-provider backends.
//!
//! These traits define the boundary between this crate and secret-manager
//! plugins. Resolution transports, watching and plugin lifecycle live on the
//! plugin side; this crate only hands a parsed [`SecretUrl`] across the seam
//! and receives a [`SecretMap`] back.

use crate::secret_map::SecretMap;
use crate::url::SecretUrl;

/// Configuration consumed by a secret-provider plugin.
pub trait SecretManagerConfiguration {
    /// Returns true when the provider is enabled by configuration.
    fn is_enabled(&self) -> bool;
}

/// A secret-provider backend able to resolve secret URLs.
pub trait SecretProvider {
    /// Error produced when resolution fails.
    type Error: std::error::Error;

    /// Resolves the secret located by `url` into its value map.
    ///
    /// # Errors
    ///
    /// Implementations fail when the location does not exist or the backend
    /// cannot be reached.
    fn resolve(&self, url: &SecretUrl) -> Result<SecretMap, Self::Error>;
}

/// Factory for plugins of type "secret-provider".
pub trait SecretProviderFactory {
    /// Configuration type the factory consumes.
    type Configuration: SecretManagerConfiguration;
    /// Provider type the factory creates.
    type Provider: SecretProvider;

    /// Creates a new provider, or `None` when the configuration cannot be
    /// consumed.
    fn create(&self, configuration: Self::Configuration) -> Option<Self::Provider>;
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::fmt;

    use super::*;
    use crate::secret::Secret;
    use crate::well_known::WellKnownSecretKey;

    #[derive(Debug)]
    struct NotFound(String);

    impl fmt::Display for NotFound {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "no secret at '{}'", self.0)
        }
    }

    impl std::error::Error for NotFound {}

    struct InMemoryConfiguration {
        enabled: bool,
        secrets: BTreeMap<String, SecretMap>,
    }

    impl SecretManagerConfiguration for InMemoryConfiguration {
        fn is_enabled(&self) -> bool {
            self.enabled
        }
    }

    struct InMemoryProvider {
        secrets: BTreeMap<String, SecretMap>,
    }

    impl SecretProvider for InMemoryProvider {
        type Error = NotFound;

        fn resolve(&self, url: &SecretUrl) -> Result<SecretMap, Self::Error> {
            let mut map = self
                .secrets
                .get(url.path())
                .cloned()
                .ok_or_else(|| NotFound(url.path().to_string()))?;
            let mapping = map_or_empty(url);
            map.handle_well_known_secret_keys(&mapping);
            Ok(map)
        }
    }

    fn map_or_empty(url: &SecretUrl) -> BTreeMap<String, WellKnownSecretKey> {
        url.well_known_key_map().unwrap_or_default()
    }

    struct InMemoryFactory;

    impl SecretProviderFactory for InMemoryFactory {
        type Configuration = InMemoryConfiguration;
        type Provider = InMemoryProvider;

        fn create(&self, configuration: Self::Configuration) -> Option<Self::Provider> {
            configuration.is_enabled().then(|| InMemoryProvider {
                secrets: configuration.secrets,
            })
        }
    }

    fn tls_configuration(enabled: bool) -> InMemoryConfiguration {
        let map = SecretMap::from_iter([
            ("tls.crt", Secret::from("---cert---")),
            ("tls.key", Secret::from("---key---")),
        ]);
        InMemoryConfiguration {
            enabled,
            secrets: BTreeMap::from([("kv/tls".to_string(), map)]),
        }
    }

    #[test]
    fn factory_honors_configuration() {
        assert!(InMemoryFactory.create(tls_configuration(false)).is_none());
        assert!(InMemoryFactory.create(tls_configuration(true)).is_some());
    }

    #[test]
    fn resolves_a_parsed_url_end_to_end() {
        let provider = InMemoryFactory.create(tls_configuration(true)).unwrap();
        let url = SecretUrl::parse(
            "secret://memory/kv/tls:tls.crt?keymap=certificate:tls.crt",
            false,
        )
        .unwrap();

        let map = provider.resolve(&url).unwrap();
        assert_eq!(map.get_secret(&url).unwrap().as_str(), "---cert---");
        assert_eq!(
            map.well_known(WellKnownSecretKey::Certificate).unwrap().as_str(),
            "---cert---"
        );
    }

    #[test]
    fn missing_location_is_an_error() {
        let provider = InMemoryFactory.create(tls_configuration(true)).unwrap();
        let url = SecretUrl::parse("secret://memory/kv/nope", false).unwrap();
        let err = provider.resolve(&url).unwrap_err();
        assert_eq!(err.to_string(), "no secret at 'kv/nope'");
    }
}
