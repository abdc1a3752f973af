//! Environment variable naming for the Bookit configuration.
//!
//! Structured overrides use `BOOKIT__SECTION__KEY`. A handful of conventional
//! variables (`DATABASE_URL`, `APP_PORT`, ...) are accepted as fallbacks so the
//! service runs unchanged on hosts that already export them.

use std::env;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "BOOKIT";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// Marker value replaced by the environment variable named after its path.
pub const SECRET_MARKER: &str = "secret_from_env";

/// Conventional variables and the configuration path each one feeds.
pub const LEGACY_VARS: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("APP_PORT", "server.port"),
    ("SUPABASE_URL", "auth.provider_url"),
    ("SUPABASE_ANON_KEY", "auth.anon_key"),
    ("ADMIN_EMAIL", "auth.admin_email"),
];

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// `server.port` becomes `BOOKIT__SERVER__PORT`.
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to the variable consulted for a `secret_from_env` marker
///
/// `auth.anon_key` becomes `AUTH_ANON_KEY`.
pub fn secret_path_to_env_var(path: &str) -> String {
    path.replace('.', "_").to_uppercase()
}

/// Collects the conventional variables that are set and not shadowed by their
/// structured `BOOKIT__…` counterpart.
pub fn legacy_overrides() -> Vec<(&'static str, String)> {
    LEGACY_VARS
        .iter()
        .filter(|(_, path)| env::var(config_path_to_env_var(path)).is_err())
        .filter_map(|(var, path)| env::var(var).ok().map(|value| (*path, value)))
        .collect()
}
