//! Query parameters type for secret URLs.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Query parameters from a secret URL.
///
/// A parameter name maps to an ordered list of values: repeating a name
/// accumulates values in encounter order, never overwriting or deduplicating
/// them. A value-less parameter (`?watch`) stores the literal value `"true"`.
///
/// Parsing is permissive: malformed (empty) pairs are skipped silently. Only
/// the provider/path grammar of [`SecretUrl`] is strict.
///
/// [`SecretUrl`]: crate::SecretUrl
///
/// # Examples
///
/// ```
/// use secret_url::QueryParams;
///
/// let params = QueryParams::parse("watch=false&exclude=7&exclude=9");
/// assert_eq!(params.all("watch"), ["false"]);
/// assert_eq!(params.all("exclude"), ["7", "9"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    params: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    /// Creates an empty query params instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses query parameters from a raw query string (without leading '?').
    ///
    /// Pairs are split on `&`; each pair is split on its first `=`. A pair
    /// with no `=` stores `"true"`. Empty pairs are skipped.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for pair in input.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (name, value) = match pair.find('=') {
                Some(eq_idx) => (&pair[..eq_idx], &pair[eq_idx + 1..]),
                None => (pair, "true"),
            };
            params
                .entry(name.to_string())
                .or_default()
                .push(value.to_string());
        }

        Self { params }
    }

    /// Returns the first value for a parameter, if present.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns all values for a parameter, in encounter order.
    ///
    /// Returns an empty slice when the parameter is absent.
    #[must_use]
    pub fn all(&self, name: &str) -> &[String] {
        self.params.get(name).map_or(&[], Vec::as_slice)
    }

    /// Returns true if the parameter is present, regardless of value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Returns true if any value for `name` equals `value`, ignoring ASCII
    /// case on the value. The name is matched exactly.
    #[must_use]
    pub fn equals_ignore_case(&self, name: &str, value: &str) -> bool {
        self.all(name).iter().any(|v| v.eq_ignore_ascii_case(value))
    }

    /// Returns true if no parameters are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the number of distinct parameter names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns an iterator over `(name, values)` entries, names in
    /// lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .params
            .iter()
            .flat_map(|(name, values)| values.iter().map(move |v| format!("{name}={v}")))
            .collect();
        write!(f, "{}", pairs.join("&"))
    }
}

impl FromStr for QueryParams {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
