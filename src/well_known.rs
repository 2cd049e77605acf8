//! Well-known secret key roles.

use std::fmt;
use std::str::FromStr;

/// Semantic role of a field inside a secret's value map.
///
/// The set is closed: a `keymap` entry naming any other role is silently
/// ignored during well-known key extraction.
///
/// # Examples
///
/// ```
/// use secret_url::WellKnownSecretKey;
///
/// let role: WellKnownSecretKey = "private_key".parse().unwrap();
/// assert_eq!(role, WellKnownSecretKey::PrivateKey);
///
/// // Role names are case-insensitive
/// assert_eq!(
///     "CERTIFICATE".parse::<WellKnownSecretKey>().unwrap(),
///     WellKnownSecretKey::Certificate
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WellKnownSecretKey {
    /// An X.509 certificate or certificate chain
    Certificate,
    /// A private key
    PrivateKey,
    /// A public key
    PublicKey,
    /// A user name
    Username,
    /// A password
    Password,
    /// A keystore blob
    Keystore,
}

impl WellKnownSecretKey {
    /// Returns the canonical lowercase name of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Certificate => "certificate",
            Self::PrivateKey => "private_key",
            Self::PublicKey => "public_key",
            Self::Username => "username",
            Self::Password => "password",
            Self::Keystore => "keystore",
        }
    }

    /// Matches a role name case-insensitively, returning `None` for names
    /// outside the closed set.
    #[must_use]
    pub fn matching(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "certificate" => Some(Self::Certificate),
            "private_key" => Some(Self::PrivateKey),
            "public_key" => Some(Self::PublicKey),
            "username" => Some(Self::Username),
            "password" => Some(Self::Password),
            "keystore" => Some(Self::Keystore),
            _ => None,
        }
    }
}

impl fmt::Display for WellKnownSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WellKnownSecretKey {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::matching(s).ok_or("unknown well-known secret key role")
    }
}
