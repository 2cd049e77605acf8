//! Secret specification record.

use std::fmt;

use crate::constants::{KEY_SEPARATOR, RELOAD_ON_CHANGE_PARAM, RENEWABLE_PARAM, URL_SEPARATOR};
use crate::error::{FormatError, SpecError};
use crate::url::SecretUrl;

/// What can be configured to resolve a secret and manage its lifecycle.
///
/// A spec carries a bare-form `uri` (starting with `/`, as accepted by
/// [`SecretUrl::parse`] in bare-URI mode) plus the flags that the formatter
/// folds back into the canonical string form.
///
/// Construct through [`SecretSpecBuilder`], which enforces the record
/// invariants:
///
/// - a spec is either generated or carries an id, never both or neither;
/// - a spec either computes its key at runtime (`el_key`) or names one;
/// - `env_id` and `uri` are mandatory, and `uri` starts with `/`;
/// - a `name`, when given, is at least 3 characters, starts and ends with
///   an alphanumeric character, and contains only lowercase alphanumerics,
///   `_`, ` `, `.` and `-`.
///
/// # Examples
///
/// ```
/// use secret_url::SecretSpec;
///
/// let spec = SecretSpec::builder()
///     .uri("/vault/kv/tls")
///     .key("cert")
///     .env_id("dev")
///     .renewable(true)
///     .generated(true)
///     .build()
///     .unwrap();
/// assert_eq!(spec.uri_and_key_and_params(), "/vault/kv/tls:cert?renewable=true");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SecretSpec {
    id: Option<String>,
    name: Option<String>,
    uri: String,
    key: Option<String>,
    is_el_key: bool,
    is_generated: bool,
    env_id: String,
    publish_event_on_value_changed: bool,
    renewable: bool,
}

impl SecretSpec {
    /// Returns a builder with all fields unset.
    #[must_use]
    pub fn builder() -> SecretSpecBuilder {
        SecretSpecBuilder::default()
    }

    /// Returns the spec id, absent when the spec is generated.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the unique-per-environment name, if set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the bare-form uri designating the secret.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the key in the secret map, if known.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns true when the key is computed at runtime.
    #[must_use]
    pub const fn is_el_key(&self) -> bool {
        self.is_el_key
    }

    /// Returns true when the spec was generated from a reference rather
    /// than created by a user.
    #[must_use]
    pub const fn is_generated(&self) -> bool {
        self.is_generated
    }

    /// Returns the environment id this spec applies to.
    #[must_use]
    pub fn env_id(&self) -> &str {
        &self.env_id
    }

    /// Returns true when value changes should be published as events.
    #[must_use]
    pub const fn publish_event_on_value_changed(&self) -> bool {
        self.publish_event_on_value_changed
    }

    /// Returns true when the secret can be renewed.
    #[must_use]
    pub const fn renewable(&self) -> bool {
        self.renewable
    }

    /// Concatenates a uri, an optional key and the flag parameters into the
    /// canonical string form.
    ///
    /// Produces `uri[:key][?renewable=true][&reloadOnChange=true]`. The
    /// output is re-parseable by [`SecretUrl::parse`] in bare-URI mode.
    #[must_use]
    pub fn format_uri_and_key_and_params(
        uri: &str,
        key: Option<&str>,
        renewable: bool,
        reload_on_change: bool,
    ) -> String {
        let mut params = String::new();
        if renewable {
            params.push('?');
            params.push_str(RENEWABLE_PARAM);
            params.push_str("=true");
        }
        if reload_on_change {
            params.push(if params.is_empty() { '?' } else { '&' });
            params.push_str(RELOAD_ON_CHANGE_PARAM);
            params.push_str("=true");
        }

        let mut out = uri.to_string();
        if let Some(key) = key {
            out.push(KEY_SEPARATOR);
            out.push_str(key);
        }
        out.push_str(&params);
        out
    }

    /// Returns this spec's uri, key and flag parameters in the canonical
    /// string form, as produced by
    /// [`Self::format_uri_and_key_and_params`].
    #[must_use]
    pub fn uri_and_key_and_params(&self) -> String {
        Self::format_uri_and_key_and_params(
            &self.uri,
            self.key.as_deref(),
            self.renewable,
            self.publish_event_on_value_changed,
        )
    }

    /// Converts the spec into the [`SecretUrl`] used to resolve the secret.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] when the spec's uri does not follow the
    /// bare-URI grammar.
    pub fn to_secret_url(&self) -> Result<SecretUrl, FormatError> {
        SecretUrl::parse(&self.uri_and_key_and_params(), true)
    }

    /// Returns the name when set and non-empty, the uri otherwise.
    #[must_use]
    pub fn as_simple_string(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.uri,
        }
    }
}

impl fmt::Display for SecretSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_simple_string())
    }
}

/// Builder for [`SecretSpec`], validating on [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct SecretSpecBuilder {
    id: Option<String>,
    name: Option<String>,
    uri: Option<String>,
    key: Option<String>,
    is_el_key: bool,
    is_generated: bool,
    env_id: Option<String>,
    publish_event_on_value_changed: bool,
    renewable: bool,
}

impl SecretSpecBuilder {
    /// Sets the spec id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the unique-per-environment name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the bare-form uri designating the secret.
    #[must_use]
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Sets the key in the secret map.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Marks the key as computed at runtime.
    #[must_use]
    pub const fn el_key(mut self, is_el_key: bool) -> Self {
        self.is_el_key = is_el_key;
        self
    }

    /// Marks the spec as generated from a reference.
    #[must_use]
    pub const fn generated(mut self, is_generated: bool) -> Self {
        self.is_generated = is_generated;
        self
    }

    /// Sets the environment id.
    #[must_use]
    pub fn env_id(mut self, env_id: impl Into<String>) -> Self {
        self.env_id = Some(env_id.into());
        self
    }

    /// Requests an event when the secret's value changes.
    #[must_use]
    pub const fn publish_event_on_value_changed(mut self, publish: bool) -> Self {
        self.publish_event_on_value_changed = publish;
        self
    }

    /// Marks the secret as renewable.
    #[must_use]
    pub const fn renewable(mut self, renewable: bool) -> Self {
        self.renewable = renewable;
        self
    }

    /// Validates the collected fields and builds the spec.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] when any record invariant is violated.
    pub fn build(self) -> Result<SecretSpec, SpecError> {
        if self.is_generated == has_text(self.id.as_deref()) {
            return Err(SpecError::IdXorGenerated);
        }
        if self.is_el_key == has_text(self.key.as_deref()) {
            return Err(SpecError::KeyXorElKey);
        }
        let Some(env_id) = self.env_id.filter(|v| !v.trim().is_empty()) else {
            return Err(SpecError::MissingEnvId);
        };
        let Some(uri) = self.uri.filter(|v| !v.trim().is_empty()) else {
            return Err(SpecError::MissingUri);
        };
        if !uri.starts_with(URL_SEPARATOR) {
            return Err(SpecError::UriMissingSeparator);
        }
        if let Some(name) = self.name.as_deref() {
            assert_name(name)?;
        }

        Ok(SecretSpec {
            id: self.id,
            name: self.name,
            uri,
            key: self.key,
            is_el_key: self.is_el_key,
            is_generated: self.is_generated,
            env_id,
            publish_event_on_value_changed: self.publish_event_on_value_changed,
            renewable: self.renewable,
        })
    }
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

// char by char analysis to avoid running a regexp on user input
fn assert_name(name: &str) -> Result<(), SpecError> {
    if name.len() < 3 {
        return Err(SpecError::NameTooShort);
    }
    let not_normalized = || SpecError::NameNotNormalized {
        name: name.to_string(),
    };

    let first = name.chars().next().unwrap_or_default();
    let last = name.chars().next_back().unwrap_or_default();
    if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
        return Err(not_normalized());
    }
    for c in name.chars() {
        let allowed = c.is_ascii_digit()
            || c.is_ascii_lowercase()
            || matches!(c, '_' | ' ' | '.' | '-');
        if !allowed {
            return Err(not_normalized());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> SecretSpecBuilder {
        SecretSpec::builder()
            .uri("/vault/kv/tls")
            .key("cert")
            .env_id("dev")
            .generated(true)
    }

    #[test]
    fn builds_a_valid_spec() {
        let spec = base().build().unwrap();
        assert_eq!(spec.uri(), "/vault/kv/tls");
        assert_eq!(spec.key(), Some("cert"));
        assert_eq!(spec.env_id(), "dev");
        assert!(spec.is_generated());
        assert!(spec.id().is_none());
    }

    #[test]
    fn spec_is_either_generated_or_has_an_id() {
        let err = base().id("a1b2").build().unwrap_err();
        assert_eq!(err, SpecError::IdXorGenerated);

        let err = base().generated(false).build().unwrap_err();
        assert_eq!(err, SpecError::IdXorGenerated);

        let with_id = base().generated(false).id("a1b2").build().unwrap();
        assert_eq!(with_id.id(), Some("a1b2"));
    }

    #[test]
    fn spec_either_uses_el_key_or_specifies_one() {
        let err = base().el_key(true).build().unwrap_err();
        assert_eq!(err, SpecError::KeyXorElKey);

        let err = SecretSpec::builder()
            .uri("/vault/kv/tls")
            .env_id("dev")
            .generated(true)
            .build()
            .unwrap_err();
        assert_eq!(err, SpecError::KeyXorElKey);

        let el = SecretSpec::builder()
            .uri("/vault/kv/tls")
            .env_id("dev")
            .generated(true)
            .el_key(true)
            .build()
            .unwrap();
        assert!(el.is_el_key());
        assert!(el.key().is_none());
    }

    #[test]
    fn env_id_and_uri_are_mandatory() {
        let err = SecretSpec::builder()
            .uri("/vault/kv/tls")
            .key("cert")
            .generated(true)
            .build()
            .unwrap_err();
        assert_eq!(err, SpecError::MissingEnvId);

        let err = SecretSpec::builder()
            .key("cert")
            .env_id("dev")
            .generated(true)
            .build()
            .unwrap_err();
        assert_eq!(err, SpecError::MissingUri);

        let err = base().env_id(" ").build().unwrap_err();
        assert_eq!(err, SpecError::MissingEnvId);
    }

    #[test]
    fn uri_must_start_with_separator() {
        let err = base().uri("vault/kv/tls").build().unwrap_err();
        assert_eq!(err, SpecError::UriMissingSeparator);
    }

    #[test]
    fn name_is_validated() {
        assert_eq!(
            base().name("ab").build().unwrap_err(),
            SpecError::NameTooShort
        );
        assert!(matches!(
            base().name("-abc").build().unwrap_err(),
            SpecError::NameNotNormalized { .. }
        ));
        assert!(matches!(
            base().name("abc-").build().unwrap_err(),
            SpecError::NameNotNormalized { .. }
        ));
        assert!(matches!(
            base().name("Abc").build().unwrap_err(),
            SpecError::NameNotNormalized { .. }
        ));

        let spec = base().name("my tls.cert-1_prod").build().unwrap();
        assert_eq!(spec.name(), Some("my tls.cert-1_prod"));
    }

    #[test]
    fn formats_uri_key_and_params() {
        let format = SecretSpec::format_uri_and_key_and_params;
        assert_eq!(format("/foo/bar", None, false, false), "/foo/bar");
        assert_eq!(format("/foo/bar", Some("key"), false, false), "/foo/bar:key");
        assert_eq!(
            format("/foo/bar", None, true, false),
            "/foo/bar?renewable=true"
        );
        assert_eq!(
            format("/foo/bar", None, false, true),
            "/foo/bar?reloadOnChange=true"
        );
        assert_eq!(
            format("/foo/bar", Some("key"), true, true),
            "/foo/bar:key?renewable=true&reloadOnChange=true"
        );
    }

    #[test]
    fn spec_round_trips_through_secret_url() {
        let spec = base()
            .renewable(true)
            .publish_event_on_value_changed(true)
            .build()
            .unwrap();
        let url = spec.to_secret_url().unwrap();

        assert_eq!(url.provider(), "vault");
        assert_eq!(url.path(), "kv/tls");
        assert_eq!(url.key(), Some("cert"));
        assert!(url.query_param_equals_ignore_case("renewable", "true"));
        assert!(url.query_param_equals_ignore_case("reloadOnChange", "true"));
        assert!(url.is_uri());
    }

    #[test]
    fn simple_string_prefers_name() {
        let named = base().name("my-secret").build().unwrap();
        assert_eq!(named.as_simple_string(), "my-secret");
        assert_eq!(named.to_string(), "my-secret");

        let anonymous = base().build().unwrap();
        assert_eq!(anonymous.as_simple_string(), "/vault/kv/tls");
    }
}
