//! Constants for secret URL parsing and formatting.

/// The URL scheme prefix, including the `://` separator.
pub const SCHEME: &str = "secret://";

/// Separator between the provider and path, and between path segments.
pub const URL_SEPARATOR: char = '/';

/// Separator between the path and the optional key.
pub const KEY_SEPARATOR: char = ':';

/// Query parameter requesting that the secret be watched for changes.
pub const WATCH_PARAM: &str = "watch";

/// Query parameter carrying `role:secretKeyName` well-known key mappings.
pub const KEYMAP_PARAM: &str = "keymap";

/// Query parameter selecting a provider namespace.
pub const NAMESPACE_PARAM: &str = "namespace";

/// Query parameter asking for an initial resolution before watching starts.
pub const RESOLVE_BEFORE_WATCH_PARAM: &str = "resolveBeforeWatch";

/// Query parameter appended by the formatter for renewable secrets.
pub const RENEWABLE_PARAM: &str = "renewable";

/// Query parameter appended by the formatter for change-notifying secrets.
pub const RELOAD_ON_CHANGE_PARAM: &str = "reloadOnChange";
