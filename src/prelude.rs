//! Convenient re-exports for glob imports.
//!
//! This module provides a single import for all common types:
//!
//! ```rust
//! use secret_url::prelude::*;
//!
//! let url = SecretUrl::parse("secret://vault/kv/tls:cert", false).unwrap();
//! assert_eq!(url.provider(), "vault");
//! ```

pub use crate::{
    // Core types
    QueryParams, Secret, SecretMap, SecretSpec, SecretSpecBuilder, SecretUrl, WellKnownSecretKey,
    // Plugin seam
    SecretManagerConfiguration, SecretProvider, SecretProviderFactory,
    // Errors
    FormatError, KeyMappingError, PropertyError, SecretDecodeError, SpecError,
    // Constants
    KEY_SEPARATOR, KEYMAP_PARAM, NAMESPACE_PARAM, RELOAD_ON_CHANGE_PARAM, RENEWABLE_PARAM,
    RESOLVE_BEFORE_WATCH_PARAM, SCHEME, URL_SEPARATOR, WATCH_PARAM,
};

pub use crate::config::{FromProperty, Properties, PropertyValue};
