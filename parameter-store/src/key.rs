//! Mapping of hierarchical parameter names to local secret keys.
//!
//! Secret keys must consist of alphanumeric characters, `-`, `_` or `.`.
//! Parameter names use the same character set but additionally use `/` to
//! delineate hierarchies, so the hierarchy is flattened with underscores.
//!
//! The mapping is not injective: `/dev/my_db` and `/dev/my/db` both become
//! `dev_my_db`. Callers building a result set must reject collisions.

/// Hierarchy separator used in parameter names.
pub const PATH_SEPARATOR: char = '/';

/// Replacement for [`PATH_SEPARATOR`] in local keys.
pub const KEY_SEPARATOR: &str = "_";

/// Map a parameter name to a local secret key.
///
/// Leading separators are dropped, every remaining separator becomes `_`.
///
/// ```
/// use parameter_store::key::map_secret_key;
///
/// assert_eq!(map_secret_key("/dev/myapp/password"), "dev_myapp_password");
/// ```
#[must_use]
pub fn map_secret_key(name: &str) -> String {
    name.trim_start_matches(PATH_SEPARATOR)
        .replace(PATH_SEPARATOR, KEY_SEPARATOR)
}
