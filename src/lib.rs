//! Parser and validator for the `secret://` URL scheme.
//!
//! This crate implements parsing, validation, and serialization of secret
//! URLs: compact, human-readable addresses locating a secret inside a
//! pluggable secret-management backend.
//!
//! # Overview
//!
//! Secret URLs have the structure:
//!
//! ```text
//! secret://<provider>/<path or name>[:<key>][?option=value1&option=value2]
//! ```
//!
//! - `secret://` is mandatory unless the bare-URI form is selected, which
//!   replaces the scheme with a single leading `/`.
//! - `provider` matches a secret-provider plugin id.
//! - `path or name` is a free string that can contain forward slashes.
//!   Empty or blank segments (`//`, `/ /`) fail parsing.
//! - `key` optionally names a field in the secret's value map; it cannot
//!   replace the path.
//! - query parameters form an ordered multimap: a name may repeat, and a
//!   value-less name stores `"true"`.
//!
//! # Quick Start
//!
//! ```rust
//! use secret_url::{SecretUrl, WellKnownSecretKey};
//!
//! let url = SecretUrl::parse(
//!     "secret://vault/kv/tls:cert?watch=true&keymap=certificate:tls.crt",
//!     false,
//! )
//! .unwrap();
//!
//! assert_eq!(url.provider(), "vault");
//! assert_eq!(url.path(), "kv/tls");
//! assert_eq!(url.key(), Some("cert"));
//! assert!(url.is_watchable());
//!
//! let mapping = url.well_known_key_map().unwrap();
//! assert_eq!(mapping["tls.crt"], WellKnownSecretKey::Certificate);
//! ```
//!
//! # Specifications
//!
//! A [`SecretSpec`] describes a configured secret and folds its key and
//! lifecycle flags back into the canonical string form, which re-parses in
//! bare-URI mode:
//!
//! ```rust
//! use secret_url::SecretSpec;
//!
//! let spec = SecretSpec::builder()
//!     .uri("/vault/kv/tls")
//!     .key("cert")
//!     .env_id("dev")
//!     .generated(true)
//!     .renewable(true)
//!     .build()
//!     .unwrap();
//!
//! let url = spec.to_secret_url().unwrap();
//! assert_eq!(url.path(), "kv/tls");
//! assert_eq!(url.key(), Some("cert"));
//! ```
//!
//! # Error Policy
//!
//! The provider/path grammar is strict: violations raise [`FormatError`]
//! with a message restating the expected format. The query grammar is
//! permissive: malformed pairs are skipped. The `keymap` sub-grammar is
//! strict again, but lazily — [`SecretUrl::well_known_key_map`] raises
//! [`KeyMappingError`] only when the mapping is actually extracted.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
mod constants;
mod error;
pub mod prelude;
mod provider;
mod query;
mod secret;
mod secret_map;
mod spec;
mod url;
mod well_known;

pub use constants::{
    KEY_SEPARATOR, KEYMAP_PARAM, NAMESPACE_PARAM, RELOAD_ON_CHANGE_PARAM, RENEWABLE_PARAM,
    RESOLVE_BEFORE_WATCH_PARAM, SCHEME, URL_SEPARATOR, WATCH_PARAM,
};
pub use error::{FormatError, KeyMappingError, PropertyError, SecretDecodeError, SpecError};
pub use provider::{SecretManagerConfiguration, SecretProvider, SecretProviderFactory};
pub use query::QueryParams;
pub use secret::Secret;
pub use secret_map::SecretMap;
pub use spec::{SecretSpec, SecretSpecBuilder};
pub use url::SecretUrl;
pub use well_known::WellKnownSecretKey;
