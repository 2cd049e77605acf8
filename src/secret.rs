//! Secret value wrapper.

use std::borrow::Cow;
use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::SecretDecodeError;

/// A single secret value, either textual or binary.
///
/// The payload is wiped from memory when the value is dropped, and `Debug`
/// redacts it so secrets do not leak into logs. A text payload and a binary
/// payload never compare equal, even when their bytes match.
///
/// # Examples
///
/// ```
/// use secret_url::Secret;
///
/// let secret = Secret::from("s3cr3t");
/// assert_eq!(secret.as_str(), "s3cr3t");
/// assert_eq!(secret.as_bytes(), b"s3cr3t");
/// assert!(!secret.is_empty());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Secret {
    payload: Payload,
}

#[derive(Clone, PartialEq, Eq, Hash, Zeroize, ZeroizeOnDrop)]
enum Payload {
    Text(String),
    Binary(Vec<u8>),
}

impl Secret {
    /// Decodes a standard base64 payload into a binary secret.
    ///
    /// # Errors
    ///
    /// Returns [`SecretDecodeError`] when the input is not valid base64.
    ///
    /// # Examples
    ///
    /// ```
    /// use secret_url::Secret;
    ///
    /// let secret = Secret::from_base64("c2VjcmV0").unwrap();
    /// assert_eq!(secret.as_str(), "secret");
    /// ```
    pub fn from_base64(encoded: impl AsRef<[u8]>) -> Result<Self, SecretDecodeError> {
        let bytes = BASE64
            .decode(encoded.as_ref())
            .map_err(|e| SecretDecodeError {
                reason: e.to_string(),
            })?;
        Ok(Self {
            payload: Payload::Binary(bytes),
        })
    }

    /// Returns the payload as text.
    ///
    /// A binary payload is converted lossily from UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Cow<'_, str> {
        match &self.payload {
            Payload::Text(text) => Cow::Borrowed(text),
            Payload::Binary(bytes) => String::from_utf8_lossy(bytes),
        }
    }

    /// Returns the payload as raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match &self.payload {
            Payload::Text(text) => text.as_bytes(),
            Payload::Binary(bytes) => bytes,
        }
    }

    /// Returns true if the payload holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl From<String> for Secret {
    fn from(text: String) -> Self {
        Self {
            payload: Payload::Text(text),
        }
    }
}

impl From<&str> for Secret {
    fn from(text: &str) -> Self {
        Self::from(text.to_string())
    }
}

impl From<Vec<u8>> for Secret {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            payload: Payload::Binary(bytes),
        }
    }
}

impl From<&[u8]> for Secret {
    fn from(bytes: &[u8]) -> Self {
        Self::from(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Secret {
    fn from(bytes: &[u8; N]) -> Self {
        Self::from(bytes.to_vec())
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use std::hash::{DefaultHasher, Hash, Hasher};

    use super::*;

    fn hash_of(secret: &Secret) -> u64 {
        let mut hasher = DefaultHasher::new();
        secret.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn text_secret_reads_back_as_is() {
        let text = "that'll remain our dirty little secret";
        let secret = Secret::from(text);
        assert_eq!(secret.as_str(), text);
        assert_eq!(secret.as_bytes(), text.as_bytes());
    }

    #[test]
    fn binary_secret_reads_back_as_is() {
        let text = "that'll remain our dirty little secret";
        let secret = Secret::from(text.as_bytes());
        assert_eq!(secret.as_str(), text);
        assert_eq!(secret.as_bytes(), text.as_bytes());
    }

    #[test]
    fn base64_secret_decodes() {
        let text = "that'll remain our dirty little secret";
        let encoded = BASE64.encode(text.as_bytes());

        let from_text = Secret::from_base64(&encoded).unwrap();
        assert_eq!(from_text.as_str(), text);
        assert_eq!(from_text.as_bytes(), text.as_bytes());

        let from_bytes = Secret::from_base64(encoded.as_bytes()).unwrap();
        assert_eq!(from_bytes.as_bytes(), text.as_bytes());
    }

    #[test]
    fn base64_rejects_invalid_input() {
        let err = Secret::from_base64("not base64!").unwrap_err();
        assert!(err.to_string().contains("invalid base64"));
    }

    #[test]
    fn emptiness() {
        assert!(Secret::from("").is_empty());
        assert!(Secret::from(Vec::new()).is_empty());
        assert!(!Secret::from("a").is_empty());
        assert!(!Secret::from([0u8].as_slice()).is_empty());
    }

    #[test]
    fn equality_distinguishes_text_from_binary() {
        assert_eq!(Secret::from("foo"), Secret::from("foo"));
        assert_eq!(hash_of(&Secret::from("foo")), hash_of(&Secret::from("foo")));

        assert_ne!(Secret::from("foo"), Secret::from(b"foo"));
        assert_ne!(hash_of(&Secret::from("foo")), hash_of(&Secret::from(b"foo")));
    }

    #[test]
    fn debug_redacts_payload() {
        let secret = Secret::from("hunter2");
        assert_eq!(format!("{secret:?}"), "Secret(<redacted>)");
    }
}
